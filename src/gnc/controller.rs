use crate::dynamics::state::KinematicState;
use crate::error::SimError;
use crate::physics::planet::Planet;
use crate::vehicle::{DeploymentSafety, Lander};

/// Command produced by a controller for the next integration step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GncCommand {
    pub throttle: f64,
    /// Request to open the canopy this tick.
    pub deploy_parachute: bool,
}

/// Read-only view of the environment a controller may consult.
pub struct FlightContext<'a> {
    pub planet: &'a Planet,
    pub lander: &'a Lander,
    pub safety: &'a dyn DeploymentSafety,
}

/// Trait for closed-loop flight controllers.
///
/// Implement this to plug a different throttle/parachute law into the
/// simulation loop.
pub trait Controller {
    /// Compute throttle and parachute commands from the current state.
    fn control(
        &mut self,
        state: &KinematicState,
        ctx: &FlightContext<'_>,
    ) -> Result<GncCommand, SimError>;

    /// Reset controller internal state (e.g. integral accumulators).
    fn reset(&mut self) {}

    /// Human-readable name for logging.
    fn name(&self) -> &str {
        "unnamed"
    }
}
