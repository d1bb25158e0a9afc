use nalgebra::{Matrix3, Rotation3, Vector3};

use crate::dynamics::state::KinematicState;
use crate::error::{unit, SimError};

const SMALL_NUM: f64 = 1e-7;

// ---------------------------------------------------------------------------
// xyz Euler angles <-> rotation
// ---------------------------------------------------------------------------

/// Body -> world rotation for xyz Euler angles in degrees: `Rx(a) * Ry(b) * Rz(g)`.
pub fn rotation_from_euler(angles: &Vector3<f64>) -> Rotation3<f64> {
    Rotation3::from_axis_angle(&Vector3::x_axis(), angles.x.to_radians())
        * Rotation3::from_axis_angle(&Vector3::y_axis(), angles.y.to_radians())
        * Rotation3::from_axis_angle(&Vector3::z_axis(), angles.z.to_radians())
}

/// Inverse of [`rotation_from_euler`], in degrees.
///
/// In gimbal lock (b = +/-90 deg) the x angle is pinned to zero and the
/// whole in-plane rotation goes to z.
pub fn euler_from_matrix(m: &Matrix3<f64>) -> Vector3<f64> {
    let sin_b = m[(0, 2)].clamp(-1.0, 1.0);
    let beta = sin_b.asin();
    let cos_b = m[(0, 0)].hypot(m[(0, 1)]);
    let (alpha, gamma) = if cos_b > SMALL_NUM {
        ((-m[(1, 2)]).atan2(m[(2, 2)]), (-m[(0, 1)]).atan2(m[(0, 0)]))
    } else {
        (0.0, m[(1, 0)].atan2(m[(1, 1)]))
    };
    Vector3::new(alpha.to_degrees(), beta.to_degrees(), gamma.to_degrees())
}

/// Body +z axis (engine thrust direction) expressed in the world frame.
pub fn body_z(orientation: &Vector3<f64>) -> Vector3<f64> {
    rotation_from_euler(orientation) * Vector3::z()
}

// ---------------------------------------------------------------------------
// Attitude control seam
// ---------------------------------------------------------------------------

/// Adjusts orientation in place once per tick when stabilisation is on.
pub trait AttitudeControl {
    fn stabilize(&mut self, state: &mut KinematicState) -> Result<(), SimError>;

    fn name(&self) -> &str {
        "unnamed"
    }
}

/// Keeps the lander base pointing at the planet, i.e. thrust straight up.
#[derive(Debug, Clone, Copy, Default)]
pub struct RadialStabilizer;

impl AttitudeControl for RadialStabilizer {
    fn stabilize(&mut self, state: &mut KinematicState) -> Result<(), SimError> {
        let up = unit(&state.position, "position")?;
        let mut left = Vector3::new(-up.y, up.x, 0.0);
        if left.norm() < SMALL_NUM {
            left = Vector3::new(-up.z, 0.0, up.x);
        }
        let left = unit(&left, "attitude reference")?;
        let out = left.cross(&up);
        let m = Matrix3::from_columns(&[out, left, up]);
        state.orientation = euler_from_matrix(&m);
        Ok(())
    }

    fn name(&self) -> &str {
        "RadialStabilizer"
    }
}
