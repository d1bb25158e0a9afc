use nalgebra::Vector3;

use crate::error::SimError;
use crate::physics::planet::Planet;

/// Inverse-square gravitational acceleration towards the planet centre.
///
/// `pos` is planet-centred, in metres. Returns an acceleration (m/s^2), not
/// a force, so callers do not divide by mass again.
pub fn gravity_accel(pos: &Vector3<f64>, planet: &Planet) -> Result<Vector3<f64>, SimError> {
    let r2 = pos.norm_squared();
    if !(r2 > 0.0) || !r2.is_finite() {
        return Err(SimError::ZeroPosition);
    }
    let r = r2.sqrt();
    Ok(-(planet.mu() / r2) * (pos / r))
}

/// Gravitational acceleration magnitude at distance `r` from the centre.
pub fn gravity_magnitude(r: f64, planet: &Planet) -> f64 {
    planet.mu() / (r * r)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::planet::presets;

    #[test]
    fn surface_gravity_points_inward() {
        let mars = presets::mars();
        let pos = Vector3::new(0.0, -mars.radius, 0.0);
        let g = gravity_accel(&pos, &mars).unwrap();
        assert!(g.y > 0.0, "Gravity should point to the centre");
        assert!((g.norm() - mars.surface_gravity()).abs() < 1e-9);
    }

    #[test]
    fn gravity_decreases_with_distance() {
        let mars = presets::mars();
        let near = gravity_accel(&Vector3::new(mars.radius, 0.0, 0.0), &mars).unwrap();
        let far = gravity_accel(&Vector3::new(2.0 * mars.radius, 0.0, 0.0), &mars).unwrap();
        assert!((near.norm() / far.norm() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn planet_centre_is_rejected() {
        let mars = presets::mars();
        assert!(matches!(
            gravity_accel(&Vector3::zeros(), &mars),
            Err(SimError::ZeroPosition)
        ));
    }
}
