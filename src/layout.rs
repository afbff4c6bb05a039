//! The validated survey configuration: markers, drawing unit, and the dock's
//! mounting pose.
//!
//! A [`Layout`] is fixed at the start of a run and never mutated. Everything
//! that can be wrong with a configuration is rejected here, before any
//! position is computed — a marker that surveys at all surveys correctly.
//!
//! The on-disk representation is a small TOML document, deserialized into
//! [`LayoutFile`] and converted with `TryFrom`. The library only depends on
//! `serde`; picking the format (and parser) is left to the caller, which for
//! the shipped binary is TOML.

use crate::coordinates::{Coordinate, Vector};
use crate::frames::{Dock, World};
use crate::marker::{Marker, MarkerError};
use crate::math::{RigidTransform, Rotation};
use crate::units::ScaleFactor;
use std::collections::BTreeSet;
use thiserror::Error;
use uom::si::f64::Angle;

#[cfg(feature = "serde")]
use crate::marker::DrawingPoint;
#[cfg(feature = "serde")]
use serde::Deserialize;
#[cfg(feature = "serde")]
use uom::si::angle::radian;
#[cfg(feature = "serde")]
use uom::si::f64::Length;
#[cfg(feature = "serde")]
use uom::si::length::meter;

/// The dock's mounting pose in the world frame.
///
/// Roll is the rotation of the dock face normal away from horizontal, about
/// world X; yaw is the rotation of the dock's local X axis relative to world
/// X, about world Z. Together with the dock origin's position these fully
/// specify the dock's orientation for this fixed-mounting scenario.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DockMounting {
    roll: Angle,
    yaw: Angle,
    position: Coordinate<World>,
}

impl DockMounting {
    /// Constructs the mounting pose from its two angles and the dock
    /// origin's world-frame position.
    #[must_use]
    pub fn new(roll: impl Into<Angle>, yaw: impl Into<Angle>, position: Coordinate<World>) -> Self {
        Self {
            roll: roll.into(),
            yaw: yaw.into(),
            position,
        }
    }

    #[must_use]
    pub fn roll(&self) -> Angle {
        self.roll
    }

    #[must_use]
    pub fn yaw(&self) -> Angle {
        self.yaw
    }

    /// The dock origin's position in the world frame.
    #[must_use]
    pub fn position(&self) -> Coordinate<World> {
        self.position
    }

    /// Builds the dock→world transform this mounting describes.
    ///
    /// The rotation (roll, then yaw) is composed once here and reused for
    /// every marker of a run.
    #[must_use]
    pub fn dock_to_world(&self) -> RigidTransform<Dock, World> {
        RigidTransform::new(
            Rotation::from_roll_yaw(self.roll, self.yaw),
            Vector::from(self.position),
        )
    }
}

/// Rejected layout configuration.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum LayoutError {
    #[error(transparent)]
    Marker(#[from] MarkerError),
    #[error("marker {id} appears more than once; marker ids must be unique within a layout")]
    DuplicateMarkerId { id: u32 },
}

/// A validated survey configuration.
#[derive(Clone, Debug)]
pub struct Layout {
    scale: ScaleFactor,
    markers: Vec<Marker>,
    mounting: DockMounting,
}

impl Layout {
    /// Validates a marker set and resolves the drawing unit.
    ///
    /// The markers themselves have already been validated by
    /// [`Marker::new`]; what remains is the cross-marker invariant that ids
    /// are unique. Marker order is preserved — it dictates report order.
    pub fn new(
        drawing_unit: Option<&str>,
        markers: Vec<Marker>,
        mounting: DockMounting,
    ) -> Result<Self, LayoutError> {
        let mut seen = BTreeSet::new();
        for marker in &markers {
            if !seen.insert(marker.id()) {
                return Err(LayoutError::DuplicateMarkerId { id: marker.id() });
            }
        }

        Ok(Self {
            scale: ScaleFactor::resolve(drawing_unit),
            markers,
            mounting,
        })
    }

    /// The resolved meters-per-drawing-unit scale.
    #[must_use]
    pub fn scale(&self) -> &ScaleFactor {
        &self.scale
    }

    /// The configured markers, in report order.
    #[must_use]
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    #[must_use]
    pub fn mounting(&self) -> &DockMounting {
        &self.mounting
    }
}

/// The on-disk shape of a layout document.
///
/// Angles are radians, the dock position is meters, and marker measurements
/// are drawing units:
///
/// ```toml
/// drawing_unit = "mm"
/// dock_roll = -0.4363323129985824
/// dock_yaw = -1.5707963267948966
/// dock_position = [-0.7053, 0.3105, -0.8378]
///
/// [[markers]]
/// id = 96
/// edge_size = 100.0
/// position = [0.0, 0.0]
/// ```
#[cfg(feature = "serde")]
#[derive(Clone, Debug, Deserialize)]
pub struct LayoutFile {
    /// Optional drawing-unit label; see
    /// [`ScaleFactor::resolve`](crate::ScaleFactor::resolve).
    pub drawing_unit: Option<String>,
    /// Roll of the dock face about world X, radians.
    pub dock_roll: f64,
    /// Yaw of the dock about world Z, radians.
    pub dock_yaw: f64,
    /// World-frame position of the dock origin, meters.
    pub dock_position: [f64; 3],
    /// Marker descriptors, in report order.
    pub markers: Vec<MarkerEntry>,
}

/// One `[[markers]]` entry of a layout document.
#[cfg(feature = "serde")]
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct MarkerEntry {
    pub id: u32,
    /// Edge length, drawing units.
    pub edge_size: f64,
    /// Top-left corner as drawn, drawing units.
    pub position: [f64; 2],
}

#[cfg(feature = "serde")]
impl TryFrom<LayoutFile> for Layout {
    type Error = LayoutError;

    fn try_from(file: LayoutFile) -> Result<Self, Self::Error> {
        let markers = file
            .markers
            .iter()
            .map(|entry| {
                Marker::new(
                    entry.id,
                    entry.edge_size,
                    DrawingPoint {
                        x: entry.position[0],
                        y: entry.position[1],
                    },
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        let [x, y, z] = file.dock_position;
        let mounting = DockMounting::new(
            Angle::new::<radian>(file.dock_roll),
            Angle::new::<radian>(file.dock_yaw),
            Coordinate::from_cartesian(
                Length::new::<meter>(x),
                Length::new::<meter>(y),
                Length::new::<meter>(z),
            ),
        );

        Layout::new(file.drawing_unit.as_deref(), markers, mounting)
    }
}

#[cfg(test)]
mod tests {
    use super::{DockMounting, Layout, LayoutError, LayoutFile};
    use crate::coordinates::Coordinate;
    use crate::marker::{DrawingPoint, Marker, MarkerError};
    use crate::units::{DrawingUnit, ScaleFactor};
    use uom::si::f64::{Angle, Length};
    use uom::si::{angle::degree, length::meter};

    fn m(meters: f64) -> Length {
        Length::new::<meter>(meters)
    }
    fn d(degrees: f64) -> Angle {
        Angle::new::<degree>(degrees)
    }

    fn mounting() -> DockMounting {
        DockMounting::new(
            d(-25.),
            d(-90.),
            Coordinate::from_cartesian(m(-0.7053), m(0.3105), m(-0.8378)),
        )
    }

    fn marker(id: u32) -> Marker {
        Marker::new(id, 100., DrawingPoint { x: 0., y: 0. }).expect("descriptor is valid")
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let error = Layout::new(Some("mm"), vec![marker(43), marker(44), marker(43)], mounting())
            .expect_err("id 43 appears twice");
        assert_eq!(error, LayoutError::DuplicateMarkerId { id: 43 });
    }

    #[test]
    fn marker_order_is_preserved() {
        let layout = Layout::new(Some("mm"), vec![marker(43), marker(44), marker(96)], mounting())
            .expect("ids are unique");
        let ids: Vec<_> = layout.markers().iter().map(Marker::id).collect();
        assert_eq!(ids, [43, 44, 96]);
    }

    #[test]
    fn layout_file_parses_and_validates() {
        let document = r#"
            drawing_unit = "mm"
            dock_roll = -0.4363323129985824
            dock_yaw = -1.5707963267948966
            dock_position = [-0.7053, 0.3105, -0.8378]

            [[markers]]
            id = 96
            edge_size = 100.0
            position = [0.0, 0.0]

            [[markers]]
            id = 44
            edge_size = 100.0
            position = [100.0, 0.0]
        "#;

        let file: LayoutFile = toml::from_str(document).expect("document is well-formed");
        let layout = Layout::try_from(file).expect("document is a valid layout");

        assert_eq!(layout.scale(), &ScaleFactor::Known(DrawingUnit::Millimeters));
        assert_eq!(layout.markers().len(), 2);
        assert_eq!(layout.markers()[0].id(), 96);
        assert_eq!(
            layout.mounting().position(),
            Coordinate::from_cartesian(m(-0.7053), m(0.3105), m(-0.8378)),
        );
    }

    #[test]
    fn invalid_marker_entries_fail_conversion() {
        let document = r#"
            dock_roll = 0.0
            dock_yaw = 0.0
            dock_position = [0.0, 0.0, 0.0]

            [[markers]]
            id = 43
            edge_size = 0.0
            position = [0.0, 0.0]
        "#;

        let file: LayoutFile = toml::from_str(document).expect("document is well-formed");
        let error = Layout::try_from(file).expect_err("edge_size 0 is invalid");
        assert_eq!(
            error,
            LayoutError::Marker(MarkerError::NonPositiveEdge {
                id: 43,
                edge_size: 0.,
            })
        );
        assert_eq!(error.to_string(), "marker 43: edge_size must be > 0 (got 0)");
    }
}
