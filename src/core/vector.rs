use crate::error::{Error, Result};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// A 3D vector with f64 components.
///
/// Used for ball positions, velocities, gravity and collision normals. The
/// simulation lives in the XY plane; `z` is carried through every operation so
/// cross products and axis angles stay well defined.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector {
    /// Zero vector (0, 0, 0)
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Unit vector along X axis (1, 0, 0)
    pub const X: Self = Self::new(1.0, 0.0, 0.0);

    /// Unit vector along Y axis (0, 1, 0)
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);

    /// Unit vector along Z axis (0, 0, 1)
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    /// Creates a new Vector from components
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Vector in the simulation plane (z = 0).
    #[inline]
    pub const fn planar(x: f64, y: f64) -> Self {
        Self::new(x, y, 0.0)
    }

    /// Converts the Vector to an array
    #[inline]
    pub const fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Length of the vector; 0 for the zero vector.
    ///
    /// Components are scaled by the largest one before squaring, so finite input
    /// never overflows to infinity or underflows to zero.
    pub fn magnitude(self) -> f64 {
        let m = self.max_abs();
        if m == 0.0 || !m.is_finite() {
            return m;
        }
        let (x, y, z) = (self.x / m, self.y / m, self.z / m);
        m * (x * x + y * y + z * z).sqrt()
    }

    /// Largest absolute component.
    #[inline]
    pub fn max_abs(self) -> f64 {
        self.x.abs().max(self.y.abs()).max(self.z.abs())
    }

    /// Squared length (no sqrt, no scaling)
    #[inline]
    pub fn magnitude_squared(self) -> f64 {
        self.dot(self)
    }

    /// Component-wise scale by `s`
    #[inline]
    pub fn scale(self, s: f64) -> Self {
        Self::new(self.x * s, self.y * s, self.z * s)
    }

    /// Dot product of two vectors
    #[inline]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Right-handed cross product.
    #[inline]
    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Unit-length vector with the same direction.
    ///
    /// Errors: `Error::DegenerateGeometry` exactly when every component is zero.
    pub fn unit(self) -> Result<Self> {
        let m = self.max_abs();
        if m == 0.0 {
            return Err(Error::DegenerateGeometry(
                "unit vector of zero-length vector",
            ));
        }
        // Divide rather than multiply by 1/m: 1/m overflows for subnormal m.
        let scaled = Self::new(self.x / m, self.y / m, self.z / m);
        let len = scaled.magnitude();
        Ok(Self::new(scaled.x / len, scaled.y / len, scaled.z / len))
    }

    /// Angle between two vectors in degrees, in [0, 180].
    ///
    /// The cosine is clamped to [-1, 1] before `acos`, so rounding on nearly
    /// parallel inputs cannot produce NaN.
    pub fn angle_between(self, other: Self) -> Result<f64> {
        let (Ok(a), Ok(b)) = (self.unit(), other.unit()) else {
            return Err(Error::DegenerateGeometry(
                "angle with a zero-length vector",
            ));
        };
        let cos = a.dot(b).clamp(-1.0, 1.0);
        Ok(cos.acos().to_degrees())
    }

    /// Projection of `self` onto `onto`, as a vector parallel to `onto`.
    pub fn projection(self, onto: Self) -> Result<Self> {
        let dir = onto.unit().map_err(|_| {
            Error::DegenerateGeometry("projection onto a zero-length vector")
        })?;
        Ok(dir.scale(self.dot(dir)))
    }

    /// Reflects this vector about `normal`. The normal must be unit length; this is
    /// not checked.
    #[inline]
    pub fn reflect(self, normal: Self) -> Self {
        self - normal.scale(2.0 * self.dot(normal))
    }

    /// Angles to the X, Y and Z axes in degrees.
    pub fn axis_angles(self) -> Result<[f64; 3]> {
        Ok([
            self.angle_between(Self::X)?,
            self.angle_between(Self::Y)?,
            self.angle_between(Self::Z)?,
        ])
    }

    /// Distance between two points
    #[inline]
    pub fn distance(self, other: Self) -> f64 {
        (self - other).magnitude()
    }

    /// True if no component is NaN or infinite
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2},{:.2},{:.2})", self.x, self.y, self.z)
    }
}

impl Add for Vector {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl AddAssign for Vector {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Vector {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl SubAssign for Vector {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Mul<f64> for Vector {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: f64) -> Self {
        self.scale(scalar)
    }
}

impl Mul<Vector> for f64 {
    type Output = Vector;

    #[inline]
    fn mul(self, vec: Vector) -> Vector {
        vec.scale(self)
    }
}

impl MulAssign<f64> for Vector {
    #[inline]
    fn mul_assign(&mut self, scalar: f64) {
        *self = self.scale(scalar);
    }
}

impl Neg for Vector {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl From<[f64; 3]> for Vector {
    fn from(arr: [f64; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }
}

impl From<Vector> for [f64; 3] {
    fn from(v: Vector) -> Self {
        v.to_array()
    }
}

impl From<(f64, f64)> for Vector {
    fn from((x, y): (f64, f64)) -> Self {
        Self::planar(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    fn vec_approx_eq(a: Vector, b: Vector) -> bool {
        approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z)
    }

    #[test]
    fn magnitude_of_3_4_0() {
        let v = Vector::new(3.0, 4.0, 0.0);
        assert!(approx_eq(v.magnitude(), 5.0));
        assert_eq!(Vector::ZERO.magnitude(), 0.0);
    }

    #[test]
    fn componentwise_arithmetic() {
        let a = Vector::new(1.0, 2.0, 3.0);
        let b = Vector::new(4.0, -5.0, 6.0);
        assert_eq!(a + b, Vector::new(5.0, -3.0, 9.0));
        assert_eq!(a - b, Vector::new(-3.0, 7.0, -3.0));
        assert_eq!(a * 2.0, Vector::new(2.0, 4.0, 6.0));
        assert_eq!(2.0 * a, a.scale(2.0));
        assert_eq!(-a, Vector::new(-1.0, -2.0, -3.0));

        let mut c = a;
        c += b;
        c -= a;
        assert_eq!(c, b);
    }

    #[test]
    fn dot_and_cross() {
        let a = Vector::new(1.0, 2.0, 3.0);
        let b = Vector::new(4.0, 5.0, 6.0);
        assert!(approx_eq(a.dot(b), 32.0));
        assert_eq!(Vector::X.cross(Vector::Y), Vector::Z);
        assert_eq!(Vector::Y.cross(Vector::X), -Vector::Z);
        assert_eq!(a.cross(b), Vector::new(-3.0, 6.0, -3.0));
    }

    #[test]
    fn unit_has_length_one() -> Result<()> {
        for v in [
            Vector::new(3.0, 4.0, 0.0),
            Vector::new(-1e-9, 2e-9, 0.0),
            Vector::new(1e6, -3.0, 7.5),
            Vector::planar(1e200, 0.0),
            Vector::planar(1e-170, 0.0),
            Vector::new(-1e-320, 3e-321, 0.0),
            Vector::new(f64::MAX, f64::MAX, -f64::MAX),
        ] {
            assert!((v.unit()?.magnitude() - 1.0).abs() < 1e-12);
        }
        Ok(())
    }

    #[test]
    fn unit_of_zero_fails() {
        let err = Vector::ZERO.unit().unwrap_err();
        assert!(matches!(err, Error::DegenerateGeometry(_)));
    }

    #[test]
    fn angle_between_is_in_degrees() -> Result<()> {
        assert!(approx_eq(Vector::X.angle_between(Vector::Y)?, 90.0));
        assert!(approx_eq(Vector::X.angle_between(-Vector::X)?, 180.0));
        assert!(Vector::ZERO.angle_between(Vector::X).is_err());
        Ok(())
    }

    #[test]
    fn angle_between_clamps_cosine_rounded_above_one() -> Result<()> {
        let a = Vector::new(0.4, 0.7, 0.3);
        let u = a.unit()?;
        // Rounding pushes the unclamped cosine past 1, where acos is NaN.
        assert!(u.dot(u) > 1.0, "cosine {} does not exceed 1", u.dot(u));
        assert_eq!(a.angle_between(a)?, 0.0);
        Ok(())
    }

    #[test]
    fn magnitude_survives_extreme_components() {
        assert_eq!(Vector::planar(1e200, 0.0).magnitude(), 1e200);
        assert_eq!(Vector::planar(1e-170, 0.0).magnitude(), 1e-170);
        assert!((Vector::new(3e200, 4e200, 0.0).magnitude() / 5e200 - 1.0).abs() < 1e-15);
    }

    #[test]
    fn projection_onto_axis() -> Result<()> {
        let v = Vector::new(3.0, 4.0, 5.0);
        assert!(vec_approx_eq(v.projection(Vector::X * 2.0)?, Vector::new(3.0, 0.0, 0.0)));
        assert!(v.projection(Vector::ZERO).is_err());
        Ok(())
    }

    #[test]
    fn reflect_off_floor() {
        let v = Vector::new(1.0, -1.0, 0.0);
        assert_eq!(v.reflect(Vector::Y), Vector::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn axis_angles_of_diagonal() -> Result<()> {
        let [ax, ay, az] = Vector::new(1.0, 1.0, 0.0).axis_angles()?;
        assert!((ax - 45.0).abs() < 1e-9);
        assert!((ay - 45.0).abs() < 1e-9);
        assert!((az - 90.0).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn display_uses_two_decimals() {
        assert_eq!(Vector::new(1.0, -2.5, 1.0 / 3.0).to_string(), "(1.00,-2.50,0.33)");
    }
}
