use crate::frames::Frame;
use crate::{Point3, Vector3};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::marker::PhantomData;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use uom::si::area::square_meter;
use uom::si::f64::{Area, Length};
use uom::si::length::meter;

#[cfg(any(test, feature = "approx"))]
use approx::{AbsDiffEq, RelativeEq};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Defines a point (ie, position) in the frame specified by `In`.
///
/// Components are always stored in meters; construct and read them through
/// [`uom`] [`Length`]s so that no caller ever has to guess the unit.
///
/// <div class="warning">
///
/// Note that this type implements `Deserialize`, and that when deserializing,
/// the frame of the deserialized value is _not_ checked — the tag is purely
/// compile-time. This is a foot-gun to be mindful of.
///
/// </div>
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
// don't require In: Serialize/Deserialize since we skip it anyway
#[cfg_attr(feature = "serde", serde(bound = ""))]
// no need for the "point": indirection
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Coordinate<In> {
    /// X, Y, Z in meters
    pub(crate) point: Point3,
    #[cfg_attr(feature = "serde", serde(skip))]
    frame: PhantomData<In>,
}

// manual impls of Clone and Copy to avoid requiring In: Copy + Clone
impl<In> Clone for Coordinate<In> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<In> Copy for Coordinate<In> {}

impl<In> Coordinate<In> {
    pub(crate) fn from_nalgebra_point(point: Point3) -> Self {
        Self {
            point,
            frame: PhantomData,
        }
    }

    /// Constructs a coordinate at the given (x, y, z) cartesian point in the
    /// frame `In`.
    ///
    /// The meaning of `x`, `y`, and `z` is dictated by `In`; see
    /// [`Dock`](crate::Dock) and [`World`](crate::World).
    pub fn from_cartesian(
        x: impl Into<Length>,
        y: impl Into<Length>,
        z: impl Into<Length>,
    ) -> Self {
        Self::from_nalgebra_point(Point3::new(
            x.into().get::<meter>(),
            y.into().get::<meter>(),
            z.into().get::<meter>(),
        ))
    }

    /// Constructs a coordinate at the origin of the frame `In`.
    #[must_use]
    pub fn origin() -> Self {
        Self::from_nalgebra_point(Point3::origin())
    }

    #[must_use]
    pub fn x(&self) -> Length {
        Length::new::<meter>(self.point.x)
    }

    #[must_use]
    pub fn y(&self) -> Length {
        Length::new::<meter>(self.point.y)
    }

    #[must_use]
    pub fn z(&self) -> Length {
        Length::new::<meter>(self.point.z)
    }

    /// Returns the cartesian components of this coordinate in XYZ order.
    ///
    /// To turn this into a simple (ie, unitless) `[f64; 3]`, use
    /// [`array::map`] combined with `.get::<meter>()`.
    #[doc(alias = "components")]
    #[must_use]
    pub fn to_cartesian(&self) -> [Length; 3] {
        [self.x(), self.y(), self.z()]
    }

    /// Computes the distance between this point and the given point.
    #[must_use]
    pub fn distance_from(&self, other: &Coordinate<In>) -> Length {
        (*other - *self).magnitude()
    }
}

impl<In> Default for Coordinate<In> {
    fn default() -> Self {
        Self::origin()
    }
}

impl<In> PartialEq<Self> for Coordinate<In> {
    fn eq(&self, other: &Self) -> bool {
        self.point.eq(&other.point)
    }
}

#[cfg(any(test, feature = "approx"))]
impl<In> AbsDiffEq<Self> for Coordinate<In> {
    type Epsilon = Length;

    fn default_epsilon() -> Self::Epsilon {
        // surveyed constants feed triangulation; a tenth of a millimeter is
        // the coarsest default tolerance that is still safely below it
        Length::new::<meter>(0.0001)
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        // NOTE: this measures whether the absolute difference in any _one_
        // component is off by more than epsilon, not whether the magnitude of
        // the vector between the coordinates is below epsilon.
        self.point.abs_diff_eq(&other.point, epsilon.get::<meter>())
    }
}

#[cfg(any(test, feature = "approx"))]
impl<In> RelativeEq for Coordinate<In> {
    fn default_max_relative() -> Self::Epsilon {
        Length::new::<meter>(Point3::default_max_relative())
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.point.relative_eq(
            &other.point,
            epsilon.get::<meter>(),
            max_relative.get::<meter>(),
        )
    }
}

impl<In> Display for Coordinate<In> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(4);
        write!(
            f,
            "({:.p$}, {:.p$}, {:.p$})",
            self.point.x,
            self.point.y,
            self.point.z,
            p = precision,
        )
    }
}

impl<In> Neg for Coordinate<In> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::from_nalgebra_point(-self.point)
    }
}

impl<In> Sub<Self> for Coordinate<In> {
    type Output = Vector<In>;

    fn sub(self, rhs: Self) -> Self::Output {
        Vector::from_nalgebra_vector(self.point - rhs.point)
    }
}

impl<In> Add<Vector<In>> for Coordinate<In> {
    type Output = Coordinate<In>;

    fn add(self, rhs: Vector<In>) -> Self::Output {
        Self::from_nalgebra_point(self.point + rhs.inner)
    }
}

impl<In> AddAssign<Vector<In>> for Coordinate<In> {
    fn add_assign(&mut self, rhs: Vector<In>) {
        self.point += rhs.inner;
    }
}

impl<In> Sub<Vector<In>> for Coordinate<In> {
    type Output = Coordinate<In>;

    fn sub(self, rhs: Vector<In>) -> Self::Output {
        Self::from_nalgebra_point(self.point - rhs.inner)
    }
}

impl<In> SubAssign<Vector<In>> for Coordinate<In> {
    fn sub_assign(&mut self, rhs: Vector<In>) {
        self.point -= rhs.inner;
    }
}

/// Defines a vector (ie, direction with magnitude) in the frame specified by
/// `In`.
///
/// In this crate, vectors arise as displacements: the difference of two
/// [`Coordinate`]s, a marker edge, or the translation part of a
/// [`RigidTransform`](crate::RigidTransform).
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = ""))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Vector<In> {
    /// X, Y, Z in meters
    pub(crate) inner: Vector3,
    #[cfg_attr(feature = "serde", serde(skip))]
    frame: PhantomData<In>,
}

// manual impls of Clone and Copy to avoid requiring In: Copy + Clone
impl<In> Clone for Vector<In> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<In> Copy for Vector<In> {}

impl<In> Vector<In> {
    pub(crate) fn from_nalgebra_vector(inner: Vector3) -> Self {
        Self {
            inner,
            frame: PhantomData,
        }
    }

    /// Constructs a vector with the given (x, y, z) cartesian components in
    /// the frame `In`.
    pub fn from_cartesian(
        x: impl Into<Length>,
        y: impl Into<Length>,
        z: impl Into<Length>,
    ) -> Self {
        Self::from_nalgebra_vector(Vector3::new(
            x.into().get::<meter>(),
            y.into().get::<meter>(),
            z.into().get::<meter>(),
        ))
    }

    /// Constructs the zero-length vector.
    #[must_use]
    pub fn zero() -> Self {
        Self::from_nalgebra_vector(Vector3::zeros())
    }

    #[must_use]
    pub fn x(&self) -> Length {
        Length::new::<meter>(self.inner.x)
    }

    #[must_use]
    pub fn y(&self) -> Length {
        Length::new::<meter>(self.inner.y)
    }

    #[must_use]
    pub fn z(&self) -> Length {
        Length::new::<meter>(self.inner.z)
    }

    /// Computes the length of the vector.
    #[doc(alias = "norm")]
    #[must_use]
    pub fn magnitude(&self) -> Length {
        Length::new::<meter>(self.inner.norm())
    }

    /// Computes the dot product of the two vectors.
    ///
    /// Two perpendicular vectors have a dot product of zero.
    #[must_use]
    pub fn dot(&self, rhs: &Self) -> Area {
        Area::new::<square_meter>(self.inner.dot(&rhs.inner))
    }
}

/// A coordinate is the displacement of its point from the frame's origin.
impl<In> From<Coordinate<In>> for Vector<In> {
    fn from(coordinate: Coordinate<In>) -> Self {
        Self::from_nalgebra_vector(coordinate.point.coords)
    }
}

impl<In> PartialEq<Self> for Vector<In> {
    fn eq(&self, other: &Self) -> bool {
        self.inner.eq(&other.inner)
    }
}

#[cfg(any(test, feature = "approx"))]
impl<In> AbsDiffEq<Self> for Vector<In> {
    type Epsilon = Length;

    fn default_epsilon() -> Self::Epsilon {
        Length::new::<meter>(0.0001)
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.inner.abs_diff_eq(&other.inner, epsilon.get::<meter>())
    }
}

#[cfg(any(test, feature = "approx"))]
impl<In> RelativeEq for Vector<In> {
    fn default_max_relative() -> Self::Epsilon {
        Length::new::<meter>(Vector3::default_max_relative())
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.inner.relative_eq(
            &other.inner,
            epsilon.get::<meter>(),
            max_relative.get::<meter>(),
        )
    }
}

impl<In: Frame> Display for Vector<In> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(4);
        write!(
            f,
            "({:.p$}, {:.p$}, {:.p$}) in {}",
            self.inner.x,
            self.inner.y,
            self.inner.z,
            In::NAME,
            p = precision,
        )
    }
}

impl<In> Neg for Vector<In> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::from_nalgebra_vector(-self.inner)
    }
}

impl<In> Add<Self> for Vector<In> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::from_nalgebra_vector(self.inner + rhs.inner)
    }
}

impl<In> AddAssign<Self> for Vector<In> {
    fn add_assign(&mut self, rhs: Self) {
        self.inner += rhs.inner;
    }
}

impl<In> Sub<Self> for Vector<In> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::from_nalgebra_vector(self.inner - rhs.inner)
    }
}

impl<In> SubAssign<Self> for Vector<In> {
    fn sub_assign(&mut self, rhs: Self) {
        self.inner -= rhs.inner;
    }
}

#[cfg(test)]
mod tests {
    use super::{Coordinate, Vector};
    use crate::frames::{Dock, World};
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use rstest::rstest;
    use uom::si::area::square_meter;
    use uom::si::f64::Length;
    use uom::si::length::meter;

    fn m(meters: f64) -> Length {
        Length::new::<meter>(meters)
    }

    #[test]
    fn coordinate_difference_is_a_vector() {
        let a = Coordinate::<Dock>::from_cartesian(m(1.), m(2.), m(3.));
        let b = Coordinate::<Dock>::from_cartesian(m(0.5), m(2.), m(1.));

        let displacement = a - b;
        assert_relative_eq!(displacement, Vector::from_cartesian(m(0.5), m(0.), m(2.)));
        assert_relative_eq!(b + displacement, a);
    }

    #[rstest]
    #[case(m(3.), m(4.), m(0.), 5.)]
    #[case(m(0.), m(0.), m(-2.), 2.)]
    #[case(m(0.), m(0.), m(0.), 0.)]
    fn vector_magnitude(#[case] x: Length, #[case] y: Length, #[case] z: Length, #[case] expected: f64) {
        let vector = Vector::<World>::from_cartesian(x, y, z);
        assert_abs_diff_eq!(vector.magnitude().get::<meter>(), expected);
    }

    #[test]
    fn perpendicular_vectors_have_zero_dot_product() {
        let along_x = Vector::<Dock>::from_cartesian(m(0.25), m(0.), m(0.));
        let along_z = Vector::<Dock>::from_cartesian(m(0.), m(0.), m(0.25));

        assert_abs_diff_eq!(along_x.dot(&along_z).get::<square_meter>(), 0.);
    }

    #[test]
    fn display_defaults_to_four_decimals() {
        let coordinate = Coordinate::<World>::from_cartesian(m(-0.70534), m(0.3105), m(-0.8378));
        assert_eq!(format!("{coordinate}"), "(-0.7053, 0.3105, -0.8378)");
        assert_eq!(format!("{coordinate:.2}"), "(-0.71, 0.31, -0.84)");
    }
}
