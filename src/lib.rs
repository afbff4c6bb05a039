//! This library turns hand-measured, planar fiducial-marker layouts into
//! world-frame 3D corner positions.
//!
//! Docking targets carry a handful of fiducial markers whose corners a
//! localization system tracks to triangulate its own pose. The markers are
//! measured where it is easy — on the flat target drawing, in drawing units —
//! but the localization system needs their corners where it is useful: in the
//! world frame, in meters. Given the dock's mounting pose (roll, yaw, and the
//! dock origin's world position), this crate performs that conversion as a
//! one-shot batch computation.
//!
//! Positions are represented as [`Coordinate`]s tagged with the frame they
//! are expressed in ([`Dock`] or [`World`]), so that a dock-local corner
//! cannot be mistaken for a world-frame result. The [`math`] module holds the
//! typed [`Rotation`](math::Rotation) and
//! [`RigidTransform`](math::RigidTransform) that move between the two.
//!
//! # Examples
//!
//! Surveying a single 100 mm marker drawn at the target origin, on a dock
//! rolled back 25° and yawed -90°:
//!
//! ```
//! use dockmark::{survey, Coordinate, DockMounting, DrawingPoint, Layout, Marker};
//! use uom::si::f64::{Angle, Length};
//! use uom::si::{angle::degree, length::meter};
//!
//! let mounting = DockMounting::new(
//!     Angle::new::<degree>(-25.), // roll
//!     Angle::new::<degree>(-90.), // yaw
//!     Coordinate::from_cartesian(
//!         Length::new::<meter>(-0.7053),
//!         Length::new::<meter>(0.3105),
//!         Length::new::<meter>(-0.8378),
//!     ),
//! );
//!
//! let markers = vec![
//!     Marker::new(96, 100., DrawingPoint { x: 0., y: 0. }).expect("edge size is positive"),
//! ];
//!
//! let layout = Layout::new(Some("mm"), markers, mounting).expect("marker ids are unique");
//! for marker in survey(&layout) {
//!     // marker 96: top_left (-0.7053, 0.3105, -0.8378), ...
//!     println!("{marker}");
//! }
//! ```
//!
//! The `dockmark` binary (feature `cli`) wraps the same pipeline around a
//! TOML layout file; see [`layout::LayoutFile`] for the document shape.

mod coordinates;
mod frames;
pub mod layout;
pub mod marker;
pub mod math;
pub mod report;
pub mod survey;
pub mod units;

pub(crate) type Point3 = nalgebra::Point3<f64>;
pub(crate) type Vector3 = nalgebra::Vector3<f64>;
pub(crate) type Matrix3 = nalgebra::Matrix3<f64>;

pub use coordinates::{Coordinate, Vector};
pub use frames::{Dock, Frame, World};
pub use layout::{DockMounting, Layout, LayoutError};
pub use marker::{Corners, DrawingPoint, Marker, MarkerError};
pub use math::{Axis, RigidTransform, Rotation, UnsupportedAxisError};
pub use survey::{survey, SurveyedMarker};
pub use units::{DrawingUnit, ScaleFactor};
