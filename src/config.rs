//! Physical constants, controller gains and run limits.

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::gnc::AutopilotGains;
use crate::physics::planet::{self, positive, Planet};
use crate::vehicle::{lander, Lander};

/// Everything a run needs besides the scenario.
#[derive(Debug, Clone, Deserialize)]
pub struct SimConfig {
    pub planet: Planet,
    pub lander: Lander,
    #[serde(default)]
    pub autopilot: AutopilotGains,
    /// Hard stop for [`crate::sim::Simulation::run`], s.
    #[serde(default = "default_max_time")]
    pub max_time: f64,
}

fn default_max_time() -> f64 {
    3_600.0
}

impl Default for SimConfig {
    fn default() -> Self {
        let planet = planet::presets::mars();
        let lander = lander::presets::standard(&planet);
        Self {
            planet,
            lander,
            autopilot: AutopilotGains::default(),
            max_time: default_max_time(),
        }
    }
}

impl SimConfig {
    /// Reject missing or non-positive constants before anything is simulated.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.planet.validate()?;
        self.lander.validate()?;
        self.autopilot.validate()?;
        positive("max_time", self.max_time)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}
