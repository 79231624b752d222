use crate::core::Vector;
use crate::error::{Error, Result};

/// A rigid disc in the arena.
///
/// Every ball shares the world's radius and has unit mass, so only the
/// kinematic state lives here.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Ball {
    /// Center of the disc.
    pub position: Vector,
    /// Displacement per step.
    pub velocity: Vector,
}

impl Ball {
    /// Create a ball after checking that its state is finite.
    ///
    /// Errors:
    /// - `Error::InvalidConfig` if any position or velocity component is NaN/inf.
    pub fn new(position: Vector, velocity: Vector) -> Result<Self> {
        if !position.is_finite() {
            return Err(Error::InvalidConfig("ball position must be finite".into()));
        }
        if !velocity.is_finite() {
            return Err(Error::InvalidConfig("ball velocity must be finite".into()));
        }
        Ok(Self { position, velocity })
    }

    /// Ball at rest at `position`.
    pub fn at_rest(position: Vector) -> Result<Self> {
        Self::new(position, Vector::ZERO)
    }

    /// Kinetic energy per unit mass: 1/2 |v|^2.
    #[inline]
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.velocity.magnitude_squared()
    }

    /// Speed, |v|.
    #[inline]
    pub fn speed(&self) -> f64 {
        self.velocity.magnitude()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_ball_ok() -> Result<()> {
        let b = Ball::new(Vector::planar(10.0, 20.0), Vector::planar(2.0, -3.0))?;
        assert_eq!(b.position, Vector::new(10.0, 20.0, 0.0));
        assert_eq!(b.velocity, Vector::new(2.0, -3.0, 0.0));
        Ok(())
    }

    #[test]
    fn non_finite_position_rejected() {
        let err = Ball::at_rest(Vector::planar(f64::NAN, 0.0)).unwrap_err();
        assert!(err.to_string().contains("position"));
    }

    #[test]
    fn non_finite_velocity_rejected() {
        let err = Ball::new(Vector::ZERO, Vector::planar(0.0, f64::INFINITY)).unwrap_err();
        assert!(err.to_string().contains("velocity"));
    }

    #[test]
    fn kinetic_energy_and_speed() -> Result<()> {
        let b = Ball::new(Vector::ZERO, Vector::planar(3.0, 4.0))?;
        assert!((b.kinetic_energy() - 12.5).abs() < 1e-12);
        assert!((b.speed() - 5.0).abs() < 1e-12);
        Ok(())
    }
}
