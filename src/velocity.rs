//! Initial velocity input modes.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_ANGLE_DEGREES, DEFAULT_SPEED, DEGREES_TO_RADIANS};

/// How the launch velocity is specified.
///
/// `Polar` launches in the XY plane (Y is up) at `angle_degrees` above the
/// +X axis and never produces Z motion. `Cartesian` takes the three
/// components as independent inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum VelocitySpec {
    Polar { speed: f64, angle_degrees: f64 },
    Cartesian { vx: f64, vy: f64, vz: f64 },
}

impl Default for VelocitySpec {
    fn default() -> Self {
        VelocitySpec::Polar {
            speed: DEFAULT_SPEED,
            angle_degrees: DEFAULT_ANGLE_DEGREES,
        }
    }
}

impl VelocitySpec {
    pub fn polar(speed: f64, angle_degrees: f64) -> Self {
        VelocitySpec::Polar { speed, angle_degrees }
    }

    pub fn cartesian(vx: f64, vy: f64, vz: f64) -> Self {
        VelocitySpec::Cartesian { vx, vy, vz }
    }

    /// Velocity as (vx, vy, vz).
    pub fn resolve(&self) -> Vector3<f64> {
        match *self {
            VelocitySpec::Polar { speed, angle_degrees } => {
                let angle_rad = angle_degrees * DEGREES_TO_RADIANS;
                Vector3::new(speed * angle_rad.cos(), speed * angle_rad.sin(), 0.0)
            }
            VelocitySpec::Cartesian { vx, vy, vz } => Vector3::new(vx, vy, vz),
        }
    }

    pub fn is_finite(&self) -> bool {
        match *self {
            VelocitySpec::Polar { speed, angle_degrees } => speed.is_finite() && angle_degrees.is_finite(),
            VelocitySpec::Cartesian { vx, vy, vz } => vx.is_finite() && vy.is_finite() && vz.is_finite(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_polar_decomposes_in_xy_plane() {
        let v = VelocitySpec::polar(20.0, 45.0).resolve();
        assert_relative_eq!(v.x, 14.142135623730951, epsilon = 1e-12);
        assert_relative_eq!(v.y, 14.142135623730951, epsilon = 1e-12);
        assert_eq!(v.z, 0.0);
    }

    #[test]
    fn test_polar_vertical_launch() {
        let v = VelocitySpec::polar(5.0, 90.0).resolve();
        assert_relative_eq!(v.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(v.y, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_cartesian_is_taken_verbatim() {
        let v = VelocitySpec::cartesian(10.0, -2.5, 3.0).resolve();
        assert_eq!(v, Vector3::new(10.0, -2.5, 3.0));
    }

    #[test]
    fn test_non_finite_components_detected() {
        assert!(VelocitySpec::default().is_finite());
        assert!(!VelocitySpec::polar(f64::NAN, 45.0).is_finite());
        assert!(!VelocitySpec::cartesian(0.0, f64::INFINITY, 0.0).is_finite());
    }
}
