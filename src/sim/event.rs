use crate::dynamics::state::{KinematicState, ParachuteStatus};

// ---------------------------------------------------------------------------
// Simulation events
// ---------------------------------------------------------------------------

/// Kinds of simulation events.
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    ParachuteDeployed,
    /// A deploy request arrived while the canopy was already open.
    ParachuteRedundant,
    ParachuteLost,
    FuelExhausted,
    AltitudeCrossed { altitude: f64, ascending: bool },
    Touchdown { crashed: bool, descent_rate: f64, ground_speed: f64 },
}

/// A discrete event that occurred during simulation.
#[derive(Debug, Clone)]
pub struct SimEvent {
    pub time: f64,
    pub kind: EventKind,
    pub state: KinematicState,
}

/// Trait for passive event detectors.
/// Implementations inspect consecutive states and report events.
pub trait EventDetector {
    fn check(&mut self, prev: &KinematicState, current: &KinematicState) -> Option<EventKind>;
}

/// Reports canopy transitions: opening and loss.
pub struct ParachuteDetector;

impl EventDetector for ParachuteDetector {
    fn check(&mut self, prev: &KinematicState, current: &KinematicState) -> Option<EventKind> {
        match (prev.parachute, current.parachute) {
            (ParachuteStatus::NotDeployed, ParachuteStatus::Deployed) => {
                Some(EventKind::ParachuteDeployed)
            }
            (ParachuteStatus::Deployed, ParachuteStatus::Lost) => Some(EventKind::ParachuteLost),
            _ => None,
        }
    }
}

/// Fires once when the tank runs dry.
pub struct FuelDetector;

impl EventDetector for FuelDetector {
    fn check(&mut self, prev: &KinematicState, current: &KinematicState) -> Option<EventKind> {
        if prev.fuel > 0.0 && current.fuel <= 0.0 {
            Some(EventKind::FuelExhausted)
        } else {
            None
        }
    }
}

/// Detects when altitude crosses a threshold (ascending or descending).
pub struct AltitudeDetector {
    pub altitude: f64,
    pub ascending: bool,
    fired: bool,
}

impl AltitudeDetector {
    pub fn new(altitude: f64, ascending: bool) -> Self {
        Self { altitude, ascending, fired: false }
    }
}

impl EventDetector for AltitudeDetector {
    fn check(&mut self, prev: &KinematicState, current: &KinematicState) -> Option<EventKind> {
        if self.fired {
            return None;
        }
        let crossed = if self.ascending {
            prev.altitude < self.altitude && current.altitude >= self.altitude
        } else {
            prev.altitude > self.altitude && current.altitude <= self.altitude
        };
        if crossed {
            self.fired = true;
            Some(EventKind::AltitudeCrossed { altitude: self.altitude, ascending: self.ascending })
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::planet::presets::mars;
    use crate::vehicle::lander::presets::standard;
    use nalgebra::Vector3;

    fn make_state(alt: f64) -> KinematicState {
        let p = mars();
        let l = standard(&p);
        KinematicState::new(
            Vector3::new(p.radius + alt, 0.0, 0.0),
            Vector3::zeros(),
            Vector3::zeros(),
            ParachuteStatus::NotDeployed,
            &p,
            &l,
        )
    }

    #[test]
    fn parachute_opening_detected() {
        let prev = make_state(5000.0);
        let mut curr = prev.clone();
        curr.parachute = ParachuteStatus::Deployed;
        assert_eq!(ParachuteDetector.check(&prev, &curr), Some(EventKind::ParachuteDeployed));
        assert_eq!(ParachuteDetector.check(&curr, &curr), None);
    }

    #[test]
    fn parachute_loss_detected() {
        let mut prev = make_state(5000.0);
        prev.parachute = ParachuteStatus::Deployed;
        let mut curr = prev.clone();
        curr.parachute = ParachuteStatus::Lost;
        assert_eq!(ParachuteDetector.check(&prev, &curr), Some(EventKind::ParachuteLost));
    }

    #[test]
    fn fuel_exhaustion_detected_once() {
        let mut prev = make_state(100.0);
        prev.fuel = 0.001;
        let mut curr = prev.clone();
        curr.fuel = 0.0;
        assert_eq!(FuelDetector.check(&prev, &curr), Some(EventKind::FuelExhausted));
        assert_eq!(FuelDetector.check(&curr, &curr), None);
    }

    #[test]
    fn altitude_detector_descending() {
        let mut det = AltitudeDetector::new(1000.0, false);
        let prev = make_state(1050.0);
        let curr = make_state(990.0);
        assert!(det.check(&prev, &curr).is_some());
        // Should not fire again
        assert!(det.check(&prev, &curr).is_none());
    }

    #[test]
    fn altitude_detector_ignores_wrong_direction() {
        let mut det = AltitudeDetector::new(1000.0, true);
        let prev = make_state(1050.0);
        let curr = make_state(990.0);
        assert!(det.check(&prev, &curr).is_none());
    }
}
