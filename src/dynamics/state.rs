use nalgebra::Vector3;

use crate::error::{unit, SimError};
use crate::physics::planet::Planet;
use crate::vehicle::Lander;

// ---------------------------------------------------------------------------
// Parachute status
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParachuteStatus {
    #[default]
    NotDeployed,
    Deployed,
    /// Torn off by excessive drag or speed. Terminal.
    Lost,
}

/// Result of asking for the parachute to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployOutcome {
    Deployed,
    /// The canopy was already open; nothing changed.
    AlreadyDeployed,
    /// The canopy is gone and cannot be deployed again.
    Lost,
}

impl ParachuteStatus {
    /// Open the canopy. Idempotent, and never resurrects a lost chute.
    pub fn deploy(&mut self) -> DeployOutcome {
        match *self {
            ParachuteStatus::NotDeployed => {
                *self = ParachuteStatus::Deployed;
                DeployOutcome::Deployed
            }
            ParachuteStatus::Deployed => DeployOutcome::AlreadyDeployed,
            ParachuteStatus::Lost => DeployOutcome::Lost,
        }
    }

    pub fn is_deployed(self) -> bool {
        self == ParachuteStatus::Deployed
    }
}

// ---------------------------------------------------------------------------
// Kinematic state
// ---------------------------------------------------------------------------

/// Translational state of the lander at one instant.
/// Frame: planet-centred Cartesian, metres and seconds.
#[derive(Debug, Clone)]
pub struct KinematicState {
    pub time: f64,                      // s, 0.0 marks the bootstrap step
    pub position: Vector3<f64>,         // m
    pub velocity: Vector3<f64>,         // m/s
    pub acceleration: Vector3<f64>,     // m/s^2, rebuilt every tick
    /// Position one step back. Only meaningful once the first tick has run.
    pub previous_position: Vector3<f64>,
    pub orientation: Vector3<f64>,      // deg, xyz Euler angles
    pub altitude: f64,                  // m, cached |position| - radius
    pub fuel: f64,                      // fraction of a full tank
    pub throttle: f64,                  // commanded fraction of max thrust
    pub mass: f64,                      // kg, cached from fuel
    pub parachute: ParachuteStatus,
    pub landed: bool,
}

impl KinematicState {
    /// A fresh state at t=0 with a full tank and the engine off.
    pub fn new(
        position: Vector3<f64>,
        velocity: Vector3<f64>,
        orientation: Vector3<f64>,
        parachute: ParachuteStatus,
        planet: &Planet,
        lander: &Lander,
    ) -> Self {
        let mut state = Self {
            time: 0.0,
            position,
            velocity,
            acceleration: Vector3::zeros(),
            previous_position: position,
            orientation,
            altitude: 0.0,
            fuel: 1.0,
            throttle: 0.0,
            mass: lander.full_mass(),
            parachute,
            landed: false,
        };
        state.refresh_altitude(planet);
        state
    }

    pub fn refresh_altitude(&mut self, planet: &Planet) {
        self.altitude = self.position.norm() - planet.radius;
    }

    /// Clamp fuel and throttle back into [0, 1]; saturation is expected, not an error.
    pub fn clamp_domains(&mut self) {
        self.fuel = self.fuel.clamp(0.0, 1.0);
        self.throttle = self.throttle.clamp(0.0, 1.0);
    }

    /// Outward unit vector from the planet centre.
    pub fn up(&self) -> Result<Vector3<f64>, SimError> {
        unit(&self.position, "position")
    }

    /// Outward (climb) component of velocity.
    pub fn climb_rate(&self) -> Result<f64, SimError> {
        Ok(self.velocity.dot(&self.up()?))
    }

    /// True when the craft is moving towards the planet centre.
    pub fn descending(&self) -> bool {
        self.velocity.dot(&self.position) < 0.0
    }

    pub fn speed(&self) -> f64 {
        self.velocity.norm()
    }

    /// Speed parallel to the local horizontal.
    pub fn ground_speed(&self) -> Result<f64, SimError> {
        let up = self.up()?;
        Ok((self.velocity - self.velocity.dot(&up) * up).norm())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::planet::presets::mars;
    use crate::vehicle::lander::presets::standard;

    fn state_at(pos: Vector3<f64>, vel: Vector3<f64>) -> KinematicState {
        let p = mars();
        let l = standard(&p);
        KinematicState::new(pos, vel, Vector3::zeros(), ParachuteStatus::NotDeployed, &p, &l)
    }

    #[test]
    fn new_state_starts_at_bootstrap_instant() {
        let r = mars().radius;
        let s = state_at(Vector3::new(r + 500.0, 0.0, 0.0), Vector3::zeros());
        assert_eq!(s.time, 0.0);
        assert!((s.altitude - 500.0).abs() < 1e-6);
        assert_eq!(s.previous_position, s.position);
        assert_eq!(s.fuel, 1.0);
    }

    #[test]
    fn deploy_is_idempotent() {
        let mut chute = ParachuteStatus::NotDeployed;
        assert_eq!(chute.deploy(), DeployOutcome::Deployed);
        assert_eq!(chute.deploy(), DeployOutcome::AlreadyDeployed);
        assert_eq!(chute, ParachuteStatus::Deployed);
    }

    #[test]
    fn lost_chute_stays_lost() {
        let mut chute = ParachuteStatus::Lost;
        assert_eq!(chute.deploy(), DeployOutcome::Lost);
        assert_eq!(chute, ParachuteStatus::Lost);
    }

    #[test]
    fn climb_and_ground_speed_split_velocity() {
        let r = mars().radius;
        let s = state_at(Vector3::new(0.0, r, 0.0), Vector3::new(3.0, -4.0, 0.0));
        assert!((s.climb_rate().unwrap() + 4.0).abs() < 1e-12);
        assert!((s.ground_speed().unwrap() - 3.0).abs() < 1e-12);
        assert!(s.descending());
    }

    #[test]
    fn clamp_domains_saturates() {
        let r = mars().radius;
        let mut s = state_at(Vector3::new(r, 0.0, 0.0), Vector3::zeros());
        s.fuel = -0.1;
        s.throttle = 1.3;
        s.clamp_domains();
        assert_eq!(s.fuel, 0.0);
        assert_eq!(s.throttle, 1.0);
    }
}
