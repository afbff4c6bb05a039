//! The two coordinate frames a dock survey moves between.
//!
//! Both frames are zero-sized marker types: they only exist to tag
//! [`Coordinate`](crate::Coordinate)s, [`Vector`](crate::Vector)s, and
//! transforms with the frame they are expressed in, so that a dock-local
//! corner cannot accidentally be used where a world-frame position is
//! expected (or vice versa).

mod private {
    pub trait Sealed {}

    impl Sealed for super::Dock {}
    impl Sealed for super::World {}
}

/// Marks a coordinate frame of the survey.
///
/// This trait is sealed: the survey relates exactly two frames, [`Dock`] and
/// [`World`], and the one transform between them is built from the dock's
/// mounting parameters (see [`DockMounting`](crate::DockMounting)).
pub trait Frame: private::Sealed {
    /// Short human-readable frame name, used in `Display` output.
    const NAME: &'static str;
}

/// The dock's local frame, fixed to the physical docking structure.
///
/// Its origin is the origin of the target drawing, and its axes are:
///
/// - positive X to the right along the dock face;
/// - positive Y outward from the dock face, towards an observer facing it;
/// - positive Z down (when the dock face is vertical).
///
/// The target artwork lies in this frame's X–Z plane: the drawing's 2D
/// (x, y) axes map to dock-local (X, Z), and a planar marker's raw corners
/// all have a dock-local Y of zero.
#[derive(Clone, Copy, Debug)]
pub struct Dock;

impl Frame for Dock {
    const NAME: &'static str = "dock";
}

/// The global reference frame of the localization system.
///
/// The dock frame is related to it by a fixed rotation (roll about world X,
/// then yaw about world Z) plus the translation of the dock origin.
#[derive(Clone, Copy, Debug)]
pub struct World;

impl Frame for World {
    const NAME: &'static str = "world";
}
