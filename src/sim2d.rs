//! Points and the 2D similarity transform.

use std::fmt;
use std::ops::Mul;

use approx::{AbsDiffEq, RelativeEq};
use nalgebra::{Affine2, Matrix3, Point2, Rotation2, Translation2};

/// A point of the plane.
pub type Point = Point2<f64>;

/// Ordered point set. Two sets used together are index-correlated:
/// element `i` of one corresponds to element `i` of the other.
pub type PointSet = Vec<Point>;

/// One non-negative weight per correspondence.
/// A weight of zero ignores the correspondence without removing it.
pub type WeightVector = Vec<f64>;

/// Similarity transform of the plane: uniform scale $s$, rotation angle $r$
/// (radians) and translation $(x, y)$.
///
/// A point $p$ is mapped to
/// $$
/// T(p) = \bm{R}(r) \ s \ p + (x, y)^T
/// $$
/// i.e. scaling first, then rotation, then translation.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sim2D {
    /// Scale factor.
    pub s: f64,
    /// Rotation angle in radians.
    pub r: f64,
    /// Translation along x.
    pub x: f64,
    /// Translation along y.
    pub y: f64,
}

impl Sim2D {
    /// Build a transform from its four parameters.
    pub fn new(s: f64, r: f64, x: f64, y: f64) -> Self {
        Self { s, r, x, y }
    }

    /// The transform leaving every point in place.
    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 0.0)
    }

    /// Scale factor.
    pub fn scaling(&self) -> f64 {
        self.s
    }

    /// Rotation part as a nalgebra rotation.
    pub fn rotation(&self) -> Rotation2<f64> {
        Rotation2::new(self.r)
    }

    /// Translation part as a nalgebra translation.
    pub fn translation(&self) -> Translation2<f64> {
        Translation2::new(self.x, self.y)
    }

    /// Homogeneous 3x3 matrix of the transform.
    pub fn matrix(&self) -> Matrix3<f64> {
        let (sin, cos) = self.r.sin_cos();
        let a = self.s * cos;
        let b = self.s * sin;
        #[rustfmt::skip]
        let m = Matrix3::new(
            a,  -b,  self.x,
            b,   a,  self.y,
            0.0, 0.0, 1.0,
        );
        m
    }

    /// The transform as a nalgebra affine transform,
    /// equal to `translation * rotation * scaling`.
    pub fn transform(&self) -> Affine2<f64> {
        Affine2::from_matrix_unchecked(self.matrix())
    }

    /// Apply the transform to a point.
    pub fn transform_point(&self, p: &Point) -> Point {
        self.translation() * (self.rotation() * (*p * self.s))
    }

    /// `true` when all four parameters are finite numbers.
    /// Degenerate fits (zero weight sum, coincident points) are not.
    pub fn is_finite(&self) -> bool {
        self.s.is_finite() && self.r.is_finite() && self.x.is_finite() && self.y.is_finite()
    }
}

impl Default for Sim2D {
    fn default() -> Self {
        Self::identity()
    }
}

/// Composition: `a * b` applies `b` first, then `a`.
impl Mul for Sim2D {
    type Output = Sim2D;

    fn mul(self, rhs: Sim2D) -> Sim2D {
        let t = self.transform_point(&Point::new(rhs.x, rhs.y));
        Sim2D::new(self.s * rhs.s, self.r + rhs.r, t.x, t.y)
    }
}

impl Mul<Point> for Sim2D {
    type Output = Point;

    fn mul(self, rhs: Point) -> Point {
        self.transform_point(&rhs)
    }
}

impl fmt::Display for Sim2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{s: {}, r: {}, x: {}, y: {}}}", self.s, self.r, self.x, self.y)
    }
}

// Rotations are compared as rotations, so angles differing by a full turn are equal.
impl AbsDiffEq for Sim2D {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.s.abs_diff_eq(&other.s, epsilon)
            && self.rotation().abs_diff_eq(&other.rotation(), epsilon)
            && self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
    }
}

impl RelativeEq for Sim2D {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.s.relative_eq(&other.s, epsilon, max_relative)
            && self
                .rotation()
                .relative_eq(&other.rotation(), epsilon, max_relative)
            && self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
    }
}

// Tests #######################################################################

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn identity_keeps_points() {
        let p = Point::new(3.5, -1.25);
        assert_eq!(Sim2D::identity().transform_point(&p), p);
        assert_eq!(Sim2D::default(), Sim2D::identity());
    }

    #[test]
    fn scale_then_rotate_then_translate() {
        let t = Sim2D::new(2.0, FRAC_PI_2, 1.0, 0.0);
        let q = t.transform_point(&Point::new(1.0, 0.0));
        assert_relative_eq!(q, Point::new(1.0, 2.0), epsilon = 1e-12);
    }

    #[test]
    fn affine_matches_transform_point() {
        let t = Sim2D::new(0.7, -0.4, 3.0, -2.0);
        let p = Point::new(-1.5, 4.0);
        assert_relative_eq!(t.transform() * p, t.transform_point(&p), epsilon = 1e-12);
        assert_relative_eq!(t * p, t.transform_point(&p), epsilon = 1e-12);
    }

    #[test]
    fn composition_applies_right_operand_first() {
        let a = Sim2D::new(1.5, 0.3, -2.0, 1.0);
        let b = Sim2D::new(0.5, -1.1, 4.0, 0.25);
        let p = Point::new(0.75, -3.0);
        let composed = (a * b).transform_point(&p);
        let sequential = a.transform_point(&b.transform_point(&p));
        assert_relative_eq!(composed, sequential, epsilon = 1e-12);
        assert_relative_eq!(a * Sim2D::identity(), a, epsilon = 1e-12);
        assert_relative_eq!(Sim2D::identity() * a, a, epsilon = 1e-12);
    }

    #[test]
    fn canonical_text_form() {
        let t = Sim2D::new(2.0, 0.5, -1.0, 3.25);
        assert_eq!(t.to_string(), "{s: 2, r: 0.5, x: -1, y: 3.25}");
    }

    #[test]
    fn full_turn_compares_equal() {
        let a = Sim2D::new(1.0, 0.1, 0.0, 0.0);
        let b = Sim2D::new(1.0, 0.1 + 2.0 * std::f64::consts::PI, 0.0, 0.0);
        assert_relative_eq!(a, b, epsilon = 1e-12);
    }

    #[test]
    fn finiteness() {
        assert!(Sim2D::identity().is_finite());
        assert!(!Sim2D::new(f64::NAN, 0.0, 0.0, 0.0).is_finite());
        assert!(!Sim2D::new(1.0, 0.0, f64::INFINITY, 0.0).is_finite());
    }
}
