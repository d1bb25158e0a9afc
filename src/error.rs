use nalgebra::Vector3;
use thiserror::Error;

/// Fatal conditions raised while stepping the simulation.
///
/// None of these are recovered inside a tick: the tick is aborted and the
/// error is handed back to whoever drives the loop.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("position is at the planet centre; gravity is undefined")]
    ZeroPosition,
    #[error("cannot take the unit vector of a zero-length {0}")]
    ZeroVector(&'static str),
    #[error("non-finite {quantity} at t={time:.3}s")]
    NonFinite { quantity: &'static str, time: f64 },
    #[error("scenario index {index} is outside the catalog (0..{len})")]
    ScenarioOutOfRange { index: usize, len: usize },
    #[error("scenario {index} ({description}) has no initial conditions")]
    ScenarioUnimplemented { index: usize, description: &'static str },
    #[error("lander has already touched down at t={time:.3}s")]
    Landed { time: f64 },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Problems found in the physical constants before a run starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be positive and finite, got {value}")]
    NonPositive { name: &'static str, value: f64 },
    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f64 },
    #[error("{name} must lie in [0, 1], got {value}")]
    OutOfUnitRange { name: &'static str, value: f64 },
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Unit vector of `v`, refusing the zero vector instead of producing NaNs.
pub fn unit(v: &Vector3<f64>, what: &'static str) -> Result<Vector3<f64>, SimError> {
    v.try_normalize(f64::MIN_POSITIVE)
        .filter(|u| u.iter().all(|c| c.is_finite()))
        .ok_or(SimError::ZeroVector(what))
}

pub(crate) fn ensure_finite(
    v: &Vector3<f64>,
    quantity: &'static str,
    time: f64,
) -> Result<(), SimError> {
    if v.iter().all(|c| c.is_finite()) {
        Ok(())
    } else {
        Err(SimError::NonFinite { quantity, time })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_of_zero_is_rejected() {
        let err = unit(&Vector3::zeros(), "velocity").unwrap_err();
        assert!(matches!(err, SimError::ZeroVector("velocity")));
    }

    #[test]
    fn unit_has_length_one() {
        let u = unit(&Vector3::new(3.0, 0.0, 4.0), "position").unwrap();
        assert!((u.norm() - 1.0).abs() < 1e-12);
        assert!((u.x - 0.6).abs() < 1e-12);
    }

    #[test]
    fn nan_vector_is_flagged() {
        let v = Vector3::new(f64::NAN, 0.0, 0.0);
        assert!(ensure_finite(&v, "acceleration", 1.0).is_err());
        assert!(ensure_finite(&Vector3::zeros(), "acceleration", 1.0).is_ok());
    }
}
