pub mod config;
pub mod dynamics;
pub mod error;
pub mod gnc;
pub mod physics;
pub mod scenario;
pub mod sim;
pub mod vehicle;

pub use config::SimConfig;
pub use error::{ConfigError, SimError};
pub use sim::{Simulation, SimEvent};
