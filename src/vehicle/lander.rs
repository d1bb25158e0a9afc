use std::f64::consts::PI;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::physics::planet::{positive, Planet};

// ---------------------------------------------------------------------------
// Lander definition
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Lander {
    pub name: String,
    pub unloaded_mass: f64,          // kg, structure without propellant
    pub fuel_capacity: f64,          // l
    pub fuel_density: f64,           // kg/l
    pub max_thrust: f64,             // N
    pub fuel_rate_at_max_thrust: f64, // l/s
    pub size: f64,                   // m, lander radius
    pub drag_coef_lander: f64,
    pub drag_coef_chute: f64,
    pub max_parachute_drag: f64,     // N
    pub max_parachute_speed: f64,    // m/s
    pub max_impact_ground_speed: f64, // m/s
    pub max_impact_descent_rate: f64, // m/s
}

impl Lander {
    /// Total mass for a fuel fraction; the fraction is clamped into [0, 1].
    pub fn mass(&self, fuel: f64) -> f64 {
        self.unloaded_mass + fuel.clamp(0.0, 1.0) * self.fuel_capacity * self.fuel_density
    }

    /// Mass with a full tank.
    pub fn full_mass(&self) -> f64 {
        self.mass(1.0)
    }

    /// Frontal area of the lander body, m^2.
    pub fn lander_area(&self) -> f64 {
        PI * self.size * self.size
    }

    /// Canopy reference area: five times the square of the lander diameter.
    pub fn chute_area(&self) -> f64 {
        5.0 * (2.0 * self.size) * (2.0 * self.size)
    }

    /// Throttle fraction whose thrust exactly cancels a gravity magnitude `g`.
    pub fn hover_throttle(&self, fuel: f64, g: f64) -> f64 {
        self.mass(fuel) * g / self.max_thrust
    }

    /// Fuel fraction burned per second at full throttle.
    pub fn fuel_fraction_rate(&self) -> f64 {
        self.fuel_rate_at_max_thrust / self.fuel_capacity
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("unloaded_mass", self.unloaded_mass)?;
        positive("fuel_capacity", self.fuel_capacity)?;
        positive("fuel_density", self.fuel_density)?;
        positive("max_thrust", self.max_thrust)?;
        positive("fuel_rate_at_max_thrust", self.fuel_rate_at_max_thrust)?;
        positive("size", self.size)?;
        positive("drag_coef_lander", self.drag_coef_lander)?;
        positive("drag_coef_chute", self.drag_coef_chute)?;
        positive("max_parachute_drag", self.max_parachute_drag)?;
        positive("max_parachute_speed", self.max_parachute_speed)?;
        positive("max_impact_ground_speed", self.max_impact_ground_speed)?;
        positive("max_impact_descent_rate", self.max_impact_descent_rate)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Lander builder
// ---------------------------------------------------------------------------

pub struct LanderBuilder {
    name: String,
    unloaded_mass: f64,
    fuel_capacity: f64,
    fuel_density: f64,
    max_thrust: Option<f64>,
    fuel_rate_at_max_thrust: f64,
    size: f64,
    drag_coef_lander: f64,
    drag_coef_chute: f64,
    max_parachute_drag: f64,
    max_parachute_speed: f64,
    max_impact_ground_speed: f64,
    max_impact_descent_rate: f64,
}

impl LanderBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            unloaded_mass: 100.0,
            fuel_capacity: 100.0,
            fuel_density: 1.0,
            max_thrust: None,
            fuel_rate_at_max_thrust: 0.5,
            size: 1.0,
            drag_coef_lander: 1.0,
            drag_coef_chute: 2.0,
            max_parachute_drag: 20_000.0,
            max_parachute_speed: 500.0,
            max_impact_ground_speed: 1.0,
            max_impact_descent_rate: 1.0,
        }
    }

    pub fn unloaded_mass(mut self, v: f64) -> Self { self.unloaded_mass = v; self }
    pub fn fuel_capacity(mut self, v: f64) -> Self { self.fuel_capacity = v; self }
    pub fn fuel_density(mut self, v: f64) -> Self { self.fuel_density = v; self }
    pub fn max_thrust(mut self, v: f64) -> Self { self.max_thrust = Some(v); self }
    pub fn fuel_rate_at_max_thrust(mut self, v: f64) -> Self { self.fuel_rate_at_max_thrust = v; self }
    pub fn size(mut self, v: f64) -> Self { self.size = v; self }
    pub fn drag_coef_lander(mut self, v: f64) -> Self { self.drag_coef_lander = v; self }
    pub fn drag_coef_chute(mut self, v: f64) -> Self { self.drag_coef_chute = v; self }
    pub fn max_parachute_drag(mut self, v: f64) -> Self { self.max_parachute_drag = v; self }
    pub fn max_parachute_speed(mut self, v: f64) -> Self { self.max_parachute_speed = v; self }

    /// Finish the lander. Without an explicit thrust the engine is sized to
    /// 1.5x the full-tank weight at the planet's surface.
    pub fn build(self, planet: &Planet) -> Lander {
        let full_mass = self.unloaded_mass + self.fuel_capacity * self.fuel_density;
        Lander {
            name: self.name,
            unloaded_mass: self.unloaded_mass,
            fuel_capacity: self.fuel_capacity,
            fuel_density: self.fuel_density,
            max_thrust: self
                .max_thrust
                .unwrap_or(1.5 * full_mass * planet.surface_gravity()),
            fuel_rate_at_max_thrust: self.fuel_rate_at_max_thrust,
            size: self.size,
            drag_coef_lander: self.drag_coef_lander,
            drag_coef_chute: self.drag_coef_chute,
            max_parachute_drag: self.max_parachute_drag,
            max_parachute_speed: self.max_parachute_speed,
            max_impact_ground_speed: self.max_impact_ground_speed,
            max_impact_descent_rate: self.max_impact_descent_rate,
        }
    }
}

pub mod presets {
    use super::{Lander, LanderBuilder};
    use crate::physics::planet::Planet;

    /// The standard single-engine lander with a parachute.
    pub fn standard(planet: &Planet) -> Lander {
        LanderBuilder::new("Standard lander").build(planet)
    }
}
