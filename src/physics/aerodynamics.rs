use nalgebra::Vector3;

/// Quadratic drag force (N), opposing velocity.
///
/// Magnitude `0.5 * rho * |v|^2 * cd * area`. Written as `|v| * v` so a
/// craft at rest simply feels no drag.
pub fn drag_force(vel: &Vector3<f64>, density: f64, cd: f64, area: f64) -> Vector3<f64> {
    let speed = vel.norm();
    if speed > 1e-12 {
        -0.5 * density * cd * area * speed * vel
    } else {
        Vector3::zeros()
    }
}

/// Drag force magnitude for a given speed.
pub fn drag_magnitude(speed: f64, density: f64, cd: f64, area: f64) -> f64 {
    0.5 * density * cd * area * speed * speed
}
