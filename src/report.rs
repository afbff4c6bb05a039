//! Text reporting of surveyed positions.
//!
//! The survey's contract is the numeric records themselves; this module is
//! the simple sink that renders them. Positions print with four decimals
//! (a tenth of a millimeter), which is more than enough for hand-measured
//! layouts. For structured output, serialize the
//! [`SurveyedMarker`](crate::SurveyedMarker) records instead.

use crate::survey::SurveyedMarker;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::io;
use std::io::Write;

impl Display for SurveyedMarker {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "marker {}: top_left {}, top_right {}, bottom_left {}",
            self.id, self.top_left, self.top_right, self.bottom_left,
        )
    }
}

/// Writes the surveyed markers as one line each, in the given order.
pub fn write_text<W: Write>(mut out: W, markers: &[SurveyedMarker]) -> io::Result<()> {
    for marker in markers {
        writeln!(out, "{marker}")?;
    }
    Ok(())
}
