pub mod aerodynamics;
pub mod atmosphere;
pub mod gravity;
pub mod planet;

pub use planet::Planet;
