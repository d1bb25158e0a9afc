use std::f64::consts::PI;

use serde::Deserialize;

use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Planet definition
// ---------------------------------------------------------------------------

/// Spherical, non-rotating-for-dynamics planet with a thin exponential
/// atmosphere.
#[derive(Debug, Clone, Deserialize)]
pub struct Planet {
    pub name: String,
    pub gravitational_constant: f64, // m^3 kg^-1 s^-2
    pub mass: f64,                   // kg
    pub radius: f64,                 // m
    pub day: f64,                    // s, sidereal rotation period
    pub exosphere: f64,              // m, altitude above which density is zero
    pub surface_density: f64,        // kg/m^3
    pub scale_height: f64,           // m
}

impl Planet {
    /// Standard gravitational parameter GM.
    pub fn mu(&self) -> f64 {
        self.gravitational_constant * self.mass
    }

    /// Gravitational acceleration magnitude at the surface.
    pub fn surface_gravity(&self) -> f64 {
        self.mu() / (self.radius * self.radius)
    }

    /// Angular rate of the planet's rotation, rad/s.
    pub fn rotation_rate(&self) -> f64 {
        2.0 * PI / self.day
    }

    /// Orbital radius at which the period matches one planetary day.
    pub fn stationary_orbit_radius(&self) -> f64 {
        let omega = self.rotation_rate();
        (self.mu() / (omega * omega)).cbrt()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("gravitational_constant", self.gravitational_constant)?;
        positive("planet mass", self.mass)?;
        positive("planet radius", self.radius)?;
        positive("planet day", self.day)?;
        positive("exosphere", self.exosphere)?;
        positive("scale_height", self.scale_height)?;
        if !self.surface_density.is_finite() || self.surface_density < 0.0 {
            return Err(ConfigError::NonPositive {
                name: "surface_density",
                value: self.surface_density,
            });
        }
        Ok(())
    }
}

pub(crate) fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}

// ---------------------------------------------------------------------------
// Presets
// ---------------------------------------------------------------------------

pub mod presets {
    use super::Planet;

    pub fn mars() -> Planet {
        Planet {
            name: "Mars".into(),
            gravitational_constant: 6.673e-11,
            mass: 6.42e23,
            radius: 3_386_000.0,
            day: 88_642.65,
            exosphere: 200_000.0,
            surface_density: 0.017,
            scale_height: 11_000.0,
        }
    }
}
