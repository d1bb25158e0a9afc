pub mod engine;
pub mod lander;
pub mod parachute;

pub use engine::{Engine, MainEngine, NullEngine};
pub use lander::{presets, Lander, LanderBuilder};
pub use parachute::{CanopyLimits, DeploymentSafety};
