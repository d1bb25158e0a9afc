pub mod autopilot;
pub mod controller;
pub mod pid;

pub use autopilot::{saturate, Autopilot, AutopilotGains};
pub use controller::{Controller, FlightContext, GncCommand};
pub use pid::Pid;
