use tracing::{debug, info, warn};

use crate::config::SimConfig;
use crate::dynamics::attitude::{AttitudeControl, RadialStabilizer};
use crate::dynamics::state::{DeployOutcome, KinematicState, ParachuteStatus};
use crate::error::SimError;
use crate::gnc::{Autopilot, Controller, FlightContext};
use crate::scenario::{self, Scenario};
use crate::vehicle::{CanopyLimits, DeploymentSafety, Engine, MainEngine};
use super::event::{EventDetector, EventKind, FuelDetector, ParachuteDetector, SimEvent};
use super::integrator;
use super::telemetry::Telemetry;

/// Per-run switches that sit outside the kinematic state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modes {
    pub autopilot_enabled: bool,
    pub stabilized_attitude: bool,
}

// ---------------------------------------------------------------------------
// Simulation loop
// ---------------------------------------------------------------------------

/// Owns the lander state and everything that mutates it once per tick.
///
/// A tick runs to completion (integration, control, attitude, mission
/// checks) before returning; nothing here is shared across threads.
pub struct Simulation<C: Controller = Autopilot> {
    config: SimConfig,
    scenario: Scenario,
    state: KinematicState,
    modes: Modes,
    dt: f64,
    controller: C,
    engine: Box<dyn Engine>,
    attitude: Box<dyn AttitudeControl>,
    safety: Box<dyn DeploymentSafety>,
    detectors: Vec<Box<dyn EventDetector>>,
    telemetry: Telemetry,
    events: Vec<SimEvent>,
}

impl Simulation<Autopilot> {
    /// Start a mission on catalog entry `index` with the standard autopilot.
    pub fn new(config: SimConfig, index: usize) -> Result<Self, SimError> {
        let autopilot = Autopilot::new(config.autopilot);
        Self::with_controller(config, index, autopilot)
    }
}

impl<C: Controller> Simulation<C> {
    /// Start a mission with a custom controller. The controller is reset, so
    /// nothing it accumulated earlier carries into the new mission.
    pub fn with_controller(config: SimConfig, index: usize, mut controller: C) -> Result<Self, SimError> {
        config.validate()?;
        let scenario = scenario::select(index, &config.planet, &config.lander)?;
        let state = scenario.initial_state(&config.planet, &config.lander);
        let modes = Modes {
            autopilot_enabled: scenario.initial.autopilot_enabled,
            stabilized_attitude: scenario.initial.stabilized_attitude,
        };
        let dt = scenario.initial.dt;
        controller.reset();
        info!(index, description = scenario.description, controller = controller.name(), "mission start");
        Ok(Self {
            config,
            scenario,
            state,
            modes,
            dt,
            controller,
            engine: Box::new(MainEngine),
            attitude: Box::new(RadialStabilizer),
            safety: Box::new(CanopyLimits),
            detectors: vec![Box::new(ParachuteDetector), Box::new(FuelDetector)],
            telemetry: Telemetry::default(),
            events: Vec::new(),
        })
    }

    pub fn with_engine(mut self, engine: Box<dyn Engine>) -> Self {
        self.engine = engine;
        self
    }

    pub fn with_attitude_control(mut self, attitude: Box<dyn AttitudeControl>) -> Self {
        self.attitude = attitude;
        self
    }

    pub fn with_safety(mut self, safety: Box<dyn DeploymentSafety>) -> Self {
        self.safety = safety;
        self
    }

    pub fn add_detector(&mut self, detector: Box<dyn EventDetector>) {
        self.detectors.push(detector);
    }

    // -- scenario selection ------------------------------------------------

    /// Re-select initial conditions. Telemetry and events are cleared; the
    /// controller keeps its accumulated state. On error nothing changes.
    pub fn load_scenario(&mut self, index: usize) -> Result<(), SimError> {
        let scenario = scenario::select(index, &self.config.planet, &self.config.lander)?;
        self.state = scenario.initial_state(&self.config.planet, &self.config.lander);
        self.modes = Modes {
            autopilot_enabled: scenario.initial.autopilot_enabled,
            stabilized_attitude: scenario.initial.stabilized_attitude,
        };
        self.dt = scenario.initial.dt;
        self.scenario = scenario;
        self.telemetry.clear();
        self.events.clear();
        Ok(())
    }

    /// Re-select initial conditions and start a new mission: the controller
    /// is reset as well.
    pub fn restart_mission(&mut self, index: usize) -> Result<(), SimError> {
        self.load_scenario(index)?;
        self.controller.reset();
        info!(index, description = self.scenario.description, "mission restart");
        Ok(())
    }

    // -- manual commands ----------------------------------------------------

    pub fn set_autopilot(&mut self, enabled: bool) {
        self.modes.autopilot_enabled = enabled;
    }

    pub fn set_stabilized_attitude(&mut self, enabled: bool) {
        self.modes.stabilized_attitude = enabled;
    }

    /// Manual throttle; values outside [0, 1] saturate.
    pub fn set_throttle(&mut self, throttle: f64) {
        self.state.throttle = throttle.clamp(0.0, 1.0);
    }

    /// Manual parachute command. A second request is reported, not repeated.
    pub fn deploy_parachute(&mut self) -> DeployOutcome {
        let outcome = self.state.parachute.deploy();
        match outcome {
            DeployOutcome::Deployed => self.push_event(EventKind::ParachuteDeployed),
            DeployOutcome::AlreadyDeployed => self.push_event(EventKind::ParachuteRedundant),
            DeployOutcome::Lost => warn!(time = self.state.time, "parachute already lost"),
        }
        outcome
    }

    // -- stepping -----------------------------------------------------------

    /// Advance one fixed step. On error the state is left as it was before
    /// the call and nothing is recorded.
    pub fn tick(&mut self) -> Result<(), SimError> {
        if self.state.landed {
            return Err(SimError::Landed { time: self.state.time });
        }
        let prev = self.state.clone();
        if let Err(err) = self.advance() {
            self.state = prev;
            return Err(err);
        }

        for detector in self.detectors.iter_mut() {
            if let Some(kind) = detector.check(&prev, &self.state) {
                log_event(&kind, self.state.time);
                self.events.push(SimEvent { time: self.state.time, kind, state: self.state.clone() });
            }
        }

        self.telemetry.record(&self.state);
        Ok(())
    }

    /// The fallible part of a tick: integration, control, attitude and
    /// mission checks, in that order.
    fn advance(&mut self) -> Result<(), SimError> {
        let planet = &self.config.planet;
        let lander = &self.config.lander;

        integrator::step(&mut self.state, planet, lander, self.engine.as_mut(), self.dt)?;

        if self.modes.autopilot_enabled {
            let ctx = FlightContext { planet, lander, safety: self.safety.as_ref() };
            let cmd = self.controller.control(&self.state, &ctx)?;
            if !cmd.throttle.is_finite() {
                return Err(SimError::NonFinite { quantity: "throttle", time: self.state.time });
            }
            self.state.throttle = cmd.throttle.clamp(0.0, 1.0);
            if cmd.deploy_parachute {
                self.state.parachute.deploy();
            }
        }

        if self.modes.stabilized_attitude {
            self.attitude.stabilize(&mut self.state)?;
        }

        if self.state.parachute == ParachuteStatus::Deployed
            && !self.safety.safe_to_deploy(&self.state, planet, lander)
        {
            self.state.parachute = ParachuteStatus::Lost;
        }

        self.check_touchdown()
    }

    /// Tick until touchdown, `max_time`, or `max_ticks`. Returns ticks taken.
    pub fn run(&mut self, max_ticks: usize) -> Result<usize, SimError> {
        let mut ticks = 0;
        while !self.state.landed && self.state.time < self.config.max_time && ticks < max_ticks {
            self.tick()?;
            ticks += 1;
        }
        debug!(ticks, time = self.state.time, landed = self.state.landed, "run finished");
        Ok(ticks)
    }

    fn check_touchdown(&mut self) -> Result<(), SimError> {
        let lander = &self.config.lander;
        if self.state.altitude >= lander.size / 2.0 {
            return Ok(());
        }
        let descent_rate = -self.state.climb_rate()?;
        let ground_speed = self.state.ground_speed()?;
        let crashed = descent_rate > lander.max_impact_descent_rate
            || ground_speed > lander.max_impact_ground_speed;
        self.state.landed = true;
        self.state.throttle = 0.0;
        self.push_event(EventKind::Touchdown { crashed, descent_rate, ground_speed });
        Ok(())
    }

    fn push_event(&mut self, kind: EventKind) {
        log_event(&kind, self.state.time);
        self.events.push(SimEvent { time: self.state.time, kind, state: self.state.clone() });
    }

    // -- read access --------------------------------------------------------

    pub fn state(&self) -> &KinematicState {
        &self.state
    }

    pub fn throttle(&self) -> f64 {
        self.state.throttle
    }

    pub fn parachute_status(&self) -> ParachuteStatus {
        self.state.parachute
    }

    pub fn modes(&self) -> Modes {
        self.modes
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn controller(&self) -> &C {
        &self.controller
    }

    pub fn telemetry(&self) -> &Telemetry {
        &self.telemetry
    }

    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }
}

fn log_event(kind: &EventKind, time: f64) {
    match kind {
        EventKind::ParachuteDeployed => info!(time, "parachute deployed"),
        EventKind::ParachuteRedundant => info!(time, "parachute already deployed"),
        EventKind::ParachuteLost => warn!(time, "parachute lost"),
        EventKind::FuelExhausted => warn!(time, "fuel exhausted"),
        EventKind::AltitudeCrossed { altitude, ascending } => {
            debug!(time, altitude, ascending, "altitude crossed")
        }
        EventKind::Touchdown { crashed: true, descent_rate, ground_speed } => {
            warn!(time, descent_rate, ground_speed, "crashed")
        }
        EventKind::Touchdown { crashed: false, descent_rate, ground_speed } => {
            info!(time, descent_rate, ground_speed, "landed")
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
