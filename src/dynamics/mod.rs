pub mod attitude;
pub mod state;

pub use attitude::{body_z, AttitudeControl, RadialStabilizer};
pub use state::{DeployOutcome, KinematicState, ParachuteStatus};
