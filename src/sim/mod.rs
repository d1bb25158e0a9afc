pub mod event;
pub mod integrator;
pub mod runner;
pub mod telemetry;

pub use event::{EventDetector, EventKind, SimEvent};
pub use integrator::step;
pub use runner::{Modes, Simulation};
pub use telemetry::Telemetry;
