use nalgebra::Vector3;

use crate::dynamics::attitude::body_z;
use crate::dynamics::state::KinematicState;
use crate::vehicle::lander::Lander;

/// Produces the engine force for one tick.
///
/// Implementations own the throttle-to-thrust mapping and propellant use;
/// the integrator only divides the returned force by the current mass.
pub trait Engine {
    /// Thrust force in world coordinates, N.
    fn thrust_in_world_frame(
        &mut self,
        state: &mut KinematicState,
        lander: &Lander,
        dt: f64,
    ) -> Vector3<f64>;

    fn name(&self) -> &str {
        "unnamed"
    }
}

/// Single fixed engine along the body +z axis, responding instantly.
#[derive(Debug, Clone, Copy, Default)]
pub struct MainEngine;

impl Engine for MainEngine {
    fn thrust_in_world_frame(
        &mut self,
        state: &mut KinematicState,
        lander: &Lander,
        dt: f64,
    ) -> Vector3<f64> {
        state.clamp_domains();
        if state.landed || state.fuel <= 0.0 {
            state.throttle = 0.0;
        }
        state.fuel = (state.fuel - dt * lander.fuel_fraction_rate() * state.throttle).max(0.0);
        body_z(&state.orientation) * (state.throttle * lander.max_thrust)
    }

    fn name(&self) -> &str {
        "MainEngine"
    }
}

/// Engine that never fires; isolates gravity and drag in tests and coasting runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullEngine;

impl Engine for NullEngine {
    fn thrust_in_world_frame(
        &mut self,
        _state: &mut KinematicState,
        _lander: &Lander,
        _dt: f64,
    ) -> Vector3<f64> {
        Vector3::zeros()
    }

    fn name(&self) -> &str {
        "NullEngine"
    }
}
