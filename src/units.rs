//! Resolution of the layout's drawing unit into a meters-per-unit scale.
//!
//! Target drawings are dimensioned in whatever unit the drafting tool used;
//! the survey needs everything in meters. The scale factor is resolved once
//! per run from the layout's unit label and applied to every marker before
//! any rotation.

use std::fmt;
use std::fmt::{Display, Formatter};
use uom::si::f64::Length;
use uom::si::length::{inch, meter, millimeter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A drawing unit recognized in layout files.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DrawingUnit {
    /// Label `"mm"`.
    Millimeters,
    /// Label `"in"`.
    Inches,
}

impl DrawingUnit {
    /// Looks up the unit named by a layout-file label.
    ///
    /// Labels are matched exactly; the historical layout files only ever use
    /// `"mm"` and `"in"`.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "mm" => Some(Self::Millimeters),
            "in" => Some(Self::Inches),
            _ => None,
        }
    }

    /// The label this unit carries in layout files.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Millimeters => "mm",
            Self::Inches => "in",
        }
    }

    /// How many meters one drawing unit is.
    #[must_use]
    pub fn meters_per_unit(self) -> f64 {
        let one = match self {
            Self::Millimeters => Length::new::<millimeter>(1.),
            Self::Inches => Length::new::<inch>(1.),
        };
        one.get::<meter>()
    }
}

impl Display for DrawingUnit {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of resolving a layout's drawing-unit label.
///
/// Keeping the fallback case explicit lets callers distinguish "the drawing
/// is in meters" from "the unit was missing or unrecognized and meters were
/// substituted".
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ScaleFactor {
    /// The label named a recognized unit.
    Known(DrawingUnit),
    /// The label was absent or unrecognized; drawing values are taken as
    /// meters (scale 1.0).
    Fallback {
        /// The unrecognized label, if one was given at all.
        label: Option<String>,
    },
}

impl ScaleFactor {
    /// Resolves a drawing-unit label.
    ///
    /// An unrecognized or absent label is not fatal — historical layouts omit
    /// the unit — but it is surfaced as a warning-level diagnostic naming the
    /// substituted default, and as the [`ScaleFactor::Fallback`] variant.
    #[must_use]
    pub fn resolve(label: Option<&str>) -> Self {
        match label {
            Some(label) => match DrawingUnit::from_label(label) {
                Some(unit) => Self::Known(unit),
                None => {
                    tracing::warn!(
                        label,
                        "unrecognized drawing unit; treating drawing values as meters (scale 1.0)"
                    );
                    Self::Fallback {
                        label: Some(label.to_owned()),
                    }
                }
            },
            None => {
                tracing::warn!(
                    "layout names no drawing unit; treating drawing values as meters (scale 1.0)"
                );
                Self::Fallback { label: None }
            }
        }
    }

    /// How many meters one drawing unit is.
    #[must_use]
    pub fn meters_per_unit(&self) -> f64 {
        match self {
            Self::Known(unit) => unit.meters_per_unit(),
            Self::Fallback { .. } => 1.0,
        }
    }

    /// Whether this scale is the substituted meters default rather than a
    /// recognized unit.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

impl Display for ScaleFactor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(unit) => write!(f, "{unit}"),
            Self::Fallback { label: Some(label) } => {
                write!(f, "m (substituted for unrecognized \"{label}\")")
            }
            Self::Fallback { label: None } => f.write_str("m (no unit given)"),
        }
    }
}
