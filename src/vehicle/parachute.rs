use crate::dynamics::state::KinematicState;
use crate::physics::aerodynamics::drag_magnitude;
use crate::physics::atmosphere;
use crate::physics::planet::Planet;
use crate::vehicle::lander::Lander;

/// Decides whether opening (or keeping) the canopy would survive.
pub trait DeploymentSafety {
    fn safe_to_deploy(&self, state: &KinematicState, planet: &Planet, lander: &Lander) -> bool;
}

/// Canopy limits taken from the lander: peak drag, and airspeed inside the
/// atmosphere.
#[derive(Debug, Clone, Copy, Default)]
pub struct CanopyLimits;

impl DeploymentSafety for CanopyLimits {
    fn safe_to_deploy(&self, state: &KinematicState, planet: &Planet, lander: &Lander) -> bool {
        // Recompute altitude from position; the cached value may lag mid-tick.
        let altitude = state.position.norm() - planet.radius;
        let speed = state.speed();
        let drag = drag_magnitude(
            speed,
            atmosphere::density(altitude, planet),
            lander.drag_coef_chute,
            lander.chute_area(),
        );
        let too_much_drag = drag > lander.max_parachute_drag;
        let too_fast = speed > lander.max_parachute_speed && altitude < planet.exosphere;
        !(too_much_drag || too_fast)
    }
}
