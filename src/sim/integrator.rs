use nalgebra::Vector3;

use crate::dynamics::state::KinematicState;
use crate::error::{ensure_finite, SimError};
use crate::physics::aerodynamics::drag_force;
use crate::physics::atmosphere;
use crate::physics::gravity::gravity_accel;
use crate::physics::planet::Planet;
use crate::vehicle::{Engine, Lander};

// ---------------------------------------------------------------------------
// Forces
// ---------------------------------------------------------------------------

/// Total acceleration from thrust, gravity, lander drag and (if open) chute drag.
///
/// Uses `state.mass`, which the caller must have refreshed from the fuel level.
/// Chute drag is added on top of lander drag, never in place of it.
pub fn total_acceleration(
    state: &KinematicState,
    thrust: &Vector3<f64>,
    planet: &Planet,
    lander: &Lander,
) -> Result<Vector3<f64>, SimError> {
    let rho = atmosphere::density_at(&state.position, planet);

    let mut accel = thrust / state.mass;
    accel += gravity_accel(&state.position, planet)?;
    accel += drag_force(&state.velocity, rho, lander.drag_coef_lander, lander.lander_area())
        / state.mass;
    if state.parachute.is_deployed() {
        accel += drag_force(&state.velocity, rho, lander.drag_coef_chute, lander.chute_area())
            / state.mass;
    }
    Ok(accel)
}

// ---------------------------------------------------------------------------
// Euler bootstrap + position Verlet
// ---------------------------------------------------------------------------

/// Advance `state` by one fixed step `dt`.
///
/// The first step (t == 0) is semi-implicit Euler because no earlier
/// position exists. Every later step is Stormer-Verlet on positions, with
/// velocity rebuilt as a central difference; that velocity belongs to the
/// start of the step, one step behind the new position.
///
/// The step is computed on a copy and committed only on success, so an
/// error leaves `state` (fuel and clock included) as it was.
pub fn step(
    state: &mut KinematicState,
    planet: &Planet,
    lander: &Lander,
    engine: &mut dyn Engine,
    dt: f64,
) -> Result<(), SimError> {
    // Reject the planet centre before the engine burns anything.
    gravity_accel(&state.position, planet)?;

    let mut next = state.clone();
    next.fuel = next.fuel.clamp(0.0, 1.0);
    next.mass = lander.mass(next.fuel);

    let thrust = engine.thrust_in_world_frame(&mut next, lander, dt);
    let accel = total_acceleration(&next, &thrust, planet, lander)?;
    ensure_finite(&accel, "acceleration", next.time)?;
    next.acceleration = accel;

    let new_position = if next.time == 0.0 {
        let p = next.position + next.velocity * dt;
        next.velocity += next.acceleration * dt;
        p
    } else {
        let p = 2.0 * next.position - next.previous_position + dt * dt * next.acceleration;
        next.velocity = (p - next.previous_position) / (2.0 * dt);
        p
    };
    ensure_finite(&new_position, "position", next.time)?;

    next.previous_position = next.position;
    next.position = new_position;
    next.time += dt;
    next.refresh_altitude(planet);
    *state = next;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
