use serde::Deserialize;
use tracing::debug;

use crate::dynamics::state::{KinematicState, ParachuteStatus};
use crate::error::{unit, ConfigError, SimError};
use crate::physics::gravity::gravity_magnitude;
use super::controller::{Controller, FlightContext, GncCommand};
use super::pid::Pid;

/// Target descent rate at zero altitude, m/s.
const TOUCHDOWN_RATE: f64 = 0.5;
/// Parachute window, exclusive on both ends, m.
const CHUTE_MIN_ALTITUDE: f64 = 3_000.0;
const CHUTE_MAX_ALTITUDE: f64 = 10_000.0;

// ---------------------------------------------------------------------------
// Gains
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct AutopilotGains {
    pub kh: f64, // 1/s, target descent rate per metre of altitude
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
}

impl Default for AutopilotGains {
    fn default() -> Self {
        Self { kh: 0.02, kp: 1.0, ki: 0.0, kd: 0.0 }
    }
}

impl AutopilotGains {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [("kh", self.kh), ("kp", self.kp), ("ki", self.ki), ("kd", self.kd)] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { name, value });
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Throttle saturation around the hover bias
// ---------------------------------------------------------------------------

/// Map a controller output onto a throttle, biased by the hover fraction.
///
/// Outputs at or below `-delta` shut the engine off, outputs at or above
/// `1 - delta` saturate it, anything between is added to `delta`. The three
/// branches together keep the result in [0, 1].
pub fn saturate(output: f64, delta: f64) -> f64 {
    if output <= -delta {
        0.0
    } else if output < 1.0 - delta {
        delta + output
    } else {
        1.0
    }
}

// ---------------------------------------------------------------------------
// Autopilot
// ---------------------------------------------------------------------------

/// Descent autopilot: PID on the gap between the actual climb rate and a
/// target rate proportional to altitude, plus automatic chute deployment.
#[derive(Debug, Clone)]
pub struct Autopilot {
    pub kh: f64,
    pid: Pid,
}

impl Autopilot {
    pub fn new(gains: AutopilotGains) -> Self {
        Self {
            kh: gains.kh,
            pid: Pid::new(gains.kp, gains.ki, gains.kd),
        }
    }

    /// Running sum of the error term since the last reset.
    pub fn integral_error(&self) -> f64 {
        self.pid.integral()
    }

    /// Throttle for this tick. Advances the integral accumulator.
    pub fn throttle(
        &mut self,
        state: &KinematicState,
        ctx: &FlightContext<'_>,
    ) -> Result<f64, SimError> {
        let up = state.up()?;
        let v_hat = unit(&state.velocity, "velocity")?;

        let error = -(TOUCHDOWN_RATE + self.kh * state.altitude + state.velocity.dot(&up));
        // The y velocity term ties this to the planar scenarios; it is not
        // frame independent.
        let error_rate = self.kh * state.velocity.y
            - (state.acceleration.dot(&up) + state.velocity.dot(&v_hat));
        let output = self.pid.update(error, error_rate);

        let r = state.position.norm();
        let delta = ctx.lander.hover_throttle(state.fuel, gravity_magnitude(r, ctx.planet));

        Ok(saturate(output, delta))
    }

    /// Whether the canopy should be opened now.
    pub fn should_deploy(&self, state: &KinematicState, ctx: &FlightContext<'_>) -> bool {
        state.parachute == ParachuteStatus::NotDeployed
            && state.altitude > CHUTE_MIN_ALTITUDE
            && state.altitude < CHUTE_MAX_ALTITUDE
            && state.descending()
            && ctx.safety.safe_to_deploy(state, ctx.planet, ctx.lander)
    }
}

impl Default for Autopilot {
    fn default() -> Self {
        Self::new(AutopilotGains::default())
    }
}

impl Controller for Autopilot {
    fn control(
        &mut self,
        state: &KinematicState,
        ctx: &FlightContext<'_>,
    ) -> Result<GncCommand, SimError> {
        Ok(GncCommand {
            throttle: self.throttle(state, ctx)?,
            deploy_parachute: self.should_deploy(state, ctx),
        })
    }

    fn reset(&mut self) {
        debug!(integral = self.pid.integral(), "autopilot integral reset");
        self.pid.reset();
    }

    fn name(&self) -> &str {
        "Autopilot"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::planet::{presets::mars, Planet};
    use crate::vehicle::lander::presets::standard;
    use crate::vehicle::{CanopyLimits, Lander};
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    struct AlwaysSafe;
    impl crate::vehicle::DeploymentSafety for AlwaysSafe {
        fn safe_to_deploy(&self, _: &KinematicState, _: &Planet, _: &Lander) -> bool {
            true
        }
    }

    fn descending_at(altitude: f64, planet: &Planet, lander: &Lander) -> KinematicState {
        let mut s = KinematicState::new(
            Vector3::new(0.0, -(planet.radius + altitude), 0.0),
            Vector3::new(0.0, 50.0, 0.0),
            Vector3::zeros(),
            ParachuteStatus::NotDeployed,
            planet,
            lander,
        );
        s.time = 10.0;
        s
    }

    #[test]
    fn saturate_stays_in_unit_range() {
        let deltas = [0.0, 0.1, 0.5, 0.667, 0.99, 1.0, 1.4];
        let mut output = -50.0;
        while output <= 50.0 {
            for &delta in &deltas {
                let t = saturate(output, delta);
                assert!((0.0..=1.0).contains(&t), "output={output} delta={delta} -> {t}");
            }
            output += 0.37;
        }
    }

    #[test]
    fn saturate_branches() {
        assert_eq!(saturate(-0.4, 0.4), 0.0);
        assert_relative_eq!(saturate(0.1, 0.4), 0.5);
        assert_eq!(saturate(0.6, 0.4), 1.0);
        assert_eq!(saturate(f64::MAX, 0.4), 1.0);
        assert_eq!(saturate(f64::MIN, 0.4), 0.0);
    }

    #[test]
    fn zero_gains_hover_on_feedforward() {
        let p = mars();
        let l = standard(&p);
        let s = descending_at(1_000.0, &p, &l);
        let ctx = FlightContext { planet: &p, lander: &l, safety: &CanopyLimits };
        let mut ap = Autopilot::new(AutopilotGains { kh: 0.02, kp: 0.0, ki: 0.0, kd: 0.0 });
        let throttle = ap.throttle(&s, &ctx).unwrap();
        let r = s.position.norm();
        let delta = l.mass(s.fuel) * p.mu() / (r * r) / l.max_thrust;
        assert_relative_eq!(throttle, delta, epsilon = 1e-12);
        assert_relative_eq!(throttle, l.hover_throttle(s.fuel, p.mu() / (r * r)), epsilon = 1e-12);
        assert!(throttle > 0.6 && throttle < 0.7);
    }

    #[test]
    fn too_slow_descent_cuts_throttle() {
        // Falling 50 m/s at 10 km while the target is ~200 m/s: engine off.
        let p = mars();
        let l = standard(&p);
        let s = descending_at(9_999.0, &p, &l);
        let ctx = FlightContext { planet: &p, lander: &l, safety: &CanopyLimits };
        let mut ap = Autopilot::default();
        assert_eq!(ap.throttle(&s, &ctx).unwrap(), 0.0);
    }

    #[test]
    fn too_fast_descent_saturates() {
        let p = mars();
        let l = standard(&p);
        let mut s = descending_at(100.0, &p, &l);
        s.velocity = Vector3::new(0.0, 80.0, 0.0);
        let ctx = FlightContext { planet: &p, lander: &l, safety: &CanopyLimits };
        let mut ap = Autopilot::default();
        assert_eq!(ap.throttle(&s, &ctx).unwrap(), 1.0);
    }

    #[test]
    fn integral_accumulates_raw_error() {
        let p = mars();
        let l = standard(&p);
        let s = descending_at(1_000.0, &p, &l);
        let ctx = FlightContext { planet: &p, lander: &l, safety: &CanopyLimits };
        let mut ap = Autopilot::default();
        ap.throttle(&s, &ctx).unwrap();
        ap.throttle(&s, &ctx).unwrap();
        // error = -(0.5 + 0.02 * 1000 - 50) = 29.5 per tick
        assert_relative_eq!(ap.integral_error(), 59.0, epsilon = 1e-9);
        Controller::reset(&mut ap);
        assert_eq!(ap.integral_error(), 0.0);
    }

    #[test]
    fn zero_velocity_is_a_precondition_violation() {
        let p = mars();
        let l = standard(&p);
        let mut s = descending_at(1_000.0, &p, &l);
        s.velocity = Vector3::zeros();
        let ctx = FlightContext { planet: &p, lander: &l, safety: &CanopyLimits };
        let mut ap = Autopilot::default();
        assert!(matches!(
            ap.throttle(&s, &ctx),
            Err(SimError::ZeroVector("velocity"))
        ));
    }

    #[test]
    fn parachute_window_is_exclusive() {
        let p = mars();
        let l = standard(&p);
        let ctx = FlightContext { planet: &p, lander: &l, safety: &AlwaysSafe };
        let ap = Autopilot::default();
        for (altitude, expected) in [
            (2_999.0, false),
            (3_000.0, false),
            (3_001.0, true),
            (9_999.0, true),
            (10_000.0, false),
            (10_001.0, false),
        ] {
            let mut s = descending_at(altitude, &p, &l);
            s.altitude = altitude;
            assert_eq!(ap.should_deploy(&s, &ctx), expected, "altitude {altitude}");
        }
    }

    #[test]
    fn parachute_needs_descent() {
        let p = mars();
        let l = standard(&p);
        let ctx = FlightContext { planet: &p, lander: &l, safety: &AlwaysSafe };
        let mut s = descending_at(5_000.0, &p, &l);
        s.velocity = -s.velocity;
        assert!(!Autopilot::default().should_deploy(&s, &ctx));
    }

    #[test]
    fn deployed_chute_is_not_reevaluated() {
        let p = mars();
        let l = standard(&p);
        let ctx = FlightContext { planet: &p, lander: &l, safety: &AlwaysSafe };
        let mut s = descending_at(5_000.0, &p, &l);
        s.parachute = ParachuteStatus::Deployed;
        assert!(!Autopilot::default().should_deploy(&s, &ctx));
        s.parachute = ParachuteStatus::Lost;
        assert!(!Autopilot::default().should_deploy(&s, &ctx));
    }

    #[test]
    fn non_finite_gain_is_rejected() {
        let gains = AutopilotGains { kh: f64::NAN, ..AutopilotGains::default() };
        assert!(gains.validate().is_err());
    }
}
