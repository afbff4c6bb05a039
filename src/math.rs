//! Typed rotations and rigid transforms between the survey's frames.
//!
//! The main types are [`Rotation`], a 3×3 rotation-matrix wrapper tagged with
//! the frames it maps between, and [`RigidTransform`], a rotation plus a
//! translation. Both are applied with [`Mul`] following the mathematical
//! convention: the transform on the left, the value on the right, so
//! `rotation * coordinate` takes a `Coordinate<From>` to a `Coordinate<To>`.
//!
//! Rotations about a principal axis are built with [`Rotation::about`]. The
//! dock mounting model only ever rolls about X and yaws about Z, so a
//! requested rotation about Y is an error rather than a silent identity —
//! a wrong-axis rotation would corrupt every downstream coordinate.

use crate::coordinates::{Coordinate, Vector};
use crate::frames::{Dock, Frame, World};
use crate::Matrix3;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::marker::PhantomData;
use std::ops::Mul;
use thiserror::Error;
use uom::si::angle::radian;
use uom::si::f64::Angle;

#[cfg(any(test, feature = "approx"))]
use approx::{AbsDiffEq, RelativeEq};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A principal axis of a coordinate frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Display for Axis {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        })
    }
}

/// Returned by [`Rotation::about`] for an axis the mounting model does not
/// rotate about.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("unsupported rotation axis {axis}: only roll (about X) and yaw (about Z) are defined")]
pub struct UnsupportedAxisError {
    /// The rejected axis.
    pub axis: Axis,
}

fn x_rotation(angle: Angle) -> Matrix3 {
    let (sin, cos) = angle.get::<radian>().sin_cos();
    #[rustfmt::skip]
    let matrix = Matrix3::new(
        1., 0., 0.,
        0., cos, -sin,
        0., sin, cos,
    );
    matrix
}

fn z_rotation(angle: Angle) -> Matrix3 {
    let (sin, cos) = angle.get::<radian>().sin_cos();
    #[rustfmt::skip]
    let matrix = Matrix3::new(
        cos, -sin, 0.,
        sin, cos, 0.,
        0., 0., 1.,
    );
    matrix
}

/// Defines a rotation taking values in frame `From` to frame `To`.
///
/// Mathematically this is a type-tagged orthonormal 3×3 matrix. Rotations
/// compose with `*` in the usual matrix order: `second * first` is the
/// rotation that applies `first`, then `second`.
///
/// <div class="warning">
///
/// Note that this type implements `Deserialize`, and that deserialization
/// checks neither the frame tags nor orthonormality. This is a foot-gun to be
/// mindful of.
///
/// </div>
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
// don't require From/To: Serialize/Deserialize since we skip it anyway
#[cfg_attr(feature = "serde", serde(bound = ""))]
// no need for the "inner": indirection
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Rotation<From, To> {
    /// Maps `From` into `To` by plain matrix-vector multiplication.
    pub(crate) inner: Matrix3,
    #[cfg_attr(feature = "serde", serde(skip))]
    from: PhantomData<From>,
    #[cfg_attr(feature = "serde", serde(skip))]
    to: PhantomData<To>,
}

// manual impls of Clone and Copy to avoid requiring From/To: Copy + Clone
impl<From, To> Clone for Rotation<From, To> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<From, To> Copy for Rotation<From, To> {}

impl<From, To> Rotation<From, To> {
    fn from_matrix(inner: Matrix3) -> Self {
        Self {
            inner,
            from: PhantomData,
            to: PhantomData,
        }
    }

    /// Constructs the right-handed rotation by `angle` about the given
    /// principal axis.
    ///
    /// Only [`Axis::X`] (roll) and [`Axis::Z`] (yaw) are supported; asking
    /// for [`Axis::Y`] yields [`UnsupportedAxisError`].
    ///
    /// Same (axis, angle) always yields the same matrix; at an angle of zero
    /// the result is [`Rotation::identity`].
    pub fn about(axis: Axis, angle: impl Into<Angle>) -> Result<Self, UnsupportedAxisError> {
        match axis {
            Axis::X => Ok(Self::from_matrix(x_rotation(angle.into()))),
            Axis::Z => Ok(Self::from_matrix(z_rotation(angle.into()))),
            Axis::Y => Err(UnsupportedAxisError { axis }),
        }
    }

    /// The rotation that leaves every value unchanged.
    #[must_use]
    pub fn identity() -> Self {
        Self::from_matrix(Matrix3::identity())
    }

    /// Returns the equal-but-opposite rotation to this one.
    ///
    /// For an orthonormal matrix the inverse is the transpose.
    #[must_use]
    pub fn inverse(&self) -> Rotation<To, From> {
        Rotation::from_matrix(self.inner.transpose())
    }

    /// Checks that the matrix is orthonormal: no component of
    /// `R · Rᵀ − I` exceeds `tolerance`.
    #[must_use]
    pub fn is_orthonormal_within(&self, tolerance: f64) -> bool {
        (self.inner * self.inner.transpose() - Matrix3::identity()).amax() <= tolerance
    }

    /// Transforms a coordinate in frame `From` into frame `To`.
    ///
    /// Equivalent to `self * coordinate`.
    #[doc(alias = "apply")]
    pub fn transform(&self, coordinate: Coordinate<From>) -> Coordinate<To> {
        *self * coordinate
    }
}

impl Rotation<Dock, World> {
    /// Constructs the dock→world rotation from the dock's mounting angles.
    ///
    /// Roll (about X) is applied first, in dock-local space; yaw (about Z)
    /// second, aligning the already-rolled frame to the world azimuth. The
    /// order is significant: reversing it yields a different rotation for any
    /// non-zero pair of angles.
    #[must_use]
    pub fn from_roll_yaw(roll: impl Into<Angle>, yaw: impl Into<Angle>) -> Self {
        Self::from_matrix(z_rotation(yaw.into()) * x_rotation(roll.into()))
    }
}

impl<From, To> PartialEq<Self> for Rotation<From, To> {
    fn eq(&self, other: &Self) -> bool {
        self.inner.eq(&other.inner)
    }
}

#[cfg(any(test, feature = "approx"))]
impl<From, To> AbsDiffEq<Self> for Rotation<From, To> {
    type Epsilon = <f64 as AbsDiffEq>::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        Matrix3::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.inner.abs_diff_eq(&other.inner, epsilon)
    }
}

#[cfg(any(test, feature = "approx"))]
impl<From, To> RelativeEq for Rotation<From, To> {
    fn default_max_relative() -> Self::Epsilon {
        Matrix3::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.inner.relative_eq(&other.inner, epsilon, max_relative)
    }
}

impl<From: Frame, To: Frame> Display for Rotation<From, To> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "rotation {} -> {}: {}", From::NAME, To::NAME, self.inner)
    }
}

// Rotation<Over, To> * Rotation<From, Over> -> Rotation<From, To>
//
// matrix convention: the right-hand rotation is applied first.
impl<From, Over, To> Mul<Rotation<From, Over>> for Rotation<Over, To> {
    type Output = Rotation<From, To>;

    fn mul(self, rhs: Rotation<From, Over>) -> Self::Output {
        Rotation::from_matrix(self.inner * rhs.inner)
    }
}

// Rotation<From, To> * Coordinate<From> -> Coordinate<To>
impl<From, To> Mul<Coordinate<From>> for Rotation<From, To> {
    type Output = Coordinate<To>;

    fn mul(self, rhs: Coordinate<From>) -> Self::Output {
        Coordinate::from_nalgebra_point(self.inner * rhs.point)
    }
}

// Rotation<From, To> * Vector<From> -> Vector<To>
impl<From, To> Mul<Vector<From>> for Rotation<From, To> {
    type Output = Vector<To>;

    fn mul(self, rhs: Vector<From>) -> Self::Output {
        Vector::from_nalgebra_vector(self.inner * rhs.inner)
    }
}

/// Defines a rigid transform (rotation plus translation) taking values in
/// frame `From` to frame `To`.
///
/// Applying the transform to a coordinate computes `R · p + t`, where the
/// translation `t` is expressed in the `To` frame. Vectors are displacements
/// without an origin, so they are only subjected to the rotation part.
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = ""))]
pub struct RigidTransform<From, To> {
    rotation: Rotation<From, To>,
    translation: Vector<To>,
}

// manual impls of Clone and Copy to avoid requiring From/To: Copy + Clone
impl<From, To> Clone for RigidTransform<From, To> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<From, To> Copy for RigidTransform<From, To> {}

impl<From, To> RigidTransform<From, To> {
    /// Constructs a transform from a rotation and the translation of the
    /// `From` frame's origin expressed in the `To` frame.
    #[must_use]
    pub fn new(rotation: Rotation<From, To>, translation: Vector<To>) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    /// Returns the rotation part of the transform.
    #[must_use]
    pub fn rotation(&self) -> Rotation<From, To> {
        self.rotation
    }

    /// Returns the translation part of the transform: the position of the
    /// `From` frame's origin in the `To` frame.
    #[must_use]
    pub fn translation(&self) -> Vector<To> {
        self.translation
    }

    /// Transforms a coordinate in frame `From` into frame `To`.
    #[doc(alias = "apply")]
    pub fn transform(&self, coordinate: Coordinate<From>) -> Coordinate<To> {
        self.rotation * coordinate + self.translation
    }

    /// Transforms a vector (displacement) in frame `From` into frame `To`.
    ///
    /// Only the rotation applies; a displacement has no origin to translate.
    pub fn transform_vector(&self, vector: Vector<From>) -> Vector<To> {
        self.rotation * vector
    }

    /// Returns the equal-but-opposite transform to this one.
    #[must_use]
    pub fn inverse(&self) -> RigidTransform<To, From> {
        let rotation = self.rotation.inverse();
        RigidTransform {
            rotation,
            translation: -(rotation * self.translation),
        }
    }
}

impl<From, To> PartialEq<Self> for RigidTransform<From, To> {
    fn eq(&self, other: &Self) -> bool {
        self.rotation == other.rotation && self.translation == other.translation
    }
}

impl<From: Frame, To: Frame> Display for RigidTransform<From, To> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "transform {} -> {}: rotate, then translate by {}",
            From::NAME,
            To::NAME,
            self.translation,
        )
    }
}
