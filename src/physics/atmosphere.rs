use nalgebra::Vector3;

use crate::physics::planet::Planet;

// ---------------------------------------------------------------------------
// Exponential atmosphere truncated at the exosphere
// ---------------------------------------------------------------------------

/// Atmospheric density (kg/m^3) at a geometric altitude.
///
/// Exponential decay with the planet's scale height, shifted so the profile
/// reaches exactly zero at the exosphere and renormalised so the surface
/// value is unchanged. Negative altitudes (integration overshoot below the
/// surface) read the surface density.
pub fn density(altitude: f64, planet: &Planet) -> f64 {
    if altitude >= planet.exosphere {
        return 0.0;
    }
    let h = altitude.max(0.0);
    let floor = (-planet.exosphere / planet.scale_height).exp();
    let shape = ((-h / planet.scale_height).exp() - floor) / (1.0 - floor);
    planet.surface_density * shape.max(0.0)
}

/// Density at a planet-centred position.
pub fn density_at(pos: &Vector3<f64>, planet: &Planet) -> f64 {
    density(pos.norm() - planet.radius, planet)
}
