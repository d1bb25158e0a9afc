use std::f64::consts::PI;

use nalgebra::Vector3;
use tracing::debug;

use crate::dynamics::state::{KinematicState, ParachuteStatus};
use crate::error::SimError;
use crate::physics::planet::Planet;
use crate::vehicle::Lander;

// ---------------------------------------------------------------------------
// Scenario records
// ---------------------------------------------------------------------------

/// Starting pose, step size and mode flags for one run.
#[derive(Debug, Clone)]
pub struct InitialConditions {
    pub position: Vector3<f64>,    // m, planet-centred
    pub velocity: Vector3<f64>,    // m/s
    pub orientation: Vector3<f64>, // deg, xyz Euler
    pub dt: f64,                   // s
    pub parachute: ParachuteStatus,
    pub stabilized_attitude: bool,
    pub autopilot_enabled: bool,
}

/// A catalog entry resolved against a planet and lander.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub index: usize,
    pub description: &'static str,
    pub initial: InitialConditions,
}

impl Scenario {
    pub fn initial_state(&self, planet: &Planet, lander: &Lander) -> KinematicState {
        KinematicState::new(
            self.initial.position,
            self.initial.velocity,
            self.initial.orientation,
            self.initial.parachute,
            planet,
            lander,
        )
    }
}

type Builder = fn(&Planet, &Lander) -> InitialConditions;

struct CatalogEntry {
    description: &'static str,
    /// `None` marks a reserved slot with no initial conditions yet.
    build: Option<Builder>,
}

const DT: f64 = 0.1;

static CATALOG: [CatalogEntry; CATALOG_LEN] = [
    CatalogEntry { description: "Circular orbit", build: Some(circular_orbit) },
    CatalogEntry { description: "Descent from 10km", build: Some(descent_from_10km) },
    CatalogEntry { description: "Elliptical orbit", build: Some(elliptical_orbit) },
    CatalogEntry {
        description: "Polar launch at escape velocity, but drag prevents escape",
        build: Some(polar_launch),
    },
    CatalogEntry {
        description: "Elliptical orbit with aerobraking",
        build: Some(aerobraking_orbit),
    },
    CatalogEntry { description: "Descent from 200km, exosphere", build: Some(exosphere_descent) },
    CatalogEntry { description: "Areostationary circular orbit", build: Some(stationary_orbit) },
    CatalogEntry { description: "Take-off from Mars surface", build: Some(surface_takeoff) },
    CatalogEntry { description: "Take-off from Phobos, land on Mars", build: None },
    CatalogEntry { description: "???", build: None },
];

/// Number of slots in the catalog, including reserved ones.
pub const CATALOG_LEN: usize = 10;

/// Descriptions of every slot, in index order.
pub fn descriptions() -> impl Iterator<Item = &'static str> {
    CATALOG.iter().map(|e| e.description)
}

/// Resolve a catalog index. Reserved slots are an error, never a silent no-op.
pub fn select(index: usize, planet: &Planet, lander: &Lander) -> Result<Scenario, SimError> {
    let entry = CATALOG
        .get(index)
        .ok_or(SimError::ScenarioOutOfRange { index, len: CATALOG.len() })?;
    let build = entry.build.ok_or(SimError::ScenarioUnimplemented {
        index,
        description: entry.description,
    })?;
    debug!(index, description = entry.description, "scenario selected");
    Ok(Scenario {
        index,
        description: entry.description,
        initial: build(planet, lander),
    })
}

// ---------------------------------------------------------------------------
// Presets
// ---------------------------------------------------------------------------

fn circular_orbit(planet: &Planet, _: &Lander) -> InitialConditions {
    let r = 1.2 * planet.radius;
    InitialConditions {
        position: Vector3::new(r, 0.0, 0.0),
        velocity: Vector3::new(0.0, -(planet.mu() / r).sqrt(), 0.0),
        orientation: Vector3::new(0.0, 90.0, 0.0),
        dt: DT,
        parachute: ParachuteStatus::NotDeployed,
        stabilized_attitude: false,
        autopilot_enabled: false,
    }
}

fn descent_from_10km(planet: &Planet, _: &Lander) -> InitialConditions {
    InitialConditions {
        position: Vector3::new(0.0, -(planet.radius + 10_000.0), 0.0),
        velocity: Vector3::zeros(),
        orientation: Vector3::new(0.0, 0.0, 90.0),
        dt: DT,
        parachute: ParachuteStatus::NotDeployed,
        stabilized_attitude: true,
        autopilot_enabled: false,
    }
}

fn elliptical_orbit(planet: &Planet, _: &Lander) -> InitialConditions {
    InitialConditions {
        position: Vector3::new(0.0, 0.0, 1.2 * planet.radius),
        velocity: Vector3::new(3_500.0, 0.0, 0.0),
        orientation: Vector3::new(0.0, 0.0, 90.0),
        dt: DT,
        parachute: ParachuteStatus::NotDeployed,
        stabilized_attitude: false,
        autopilot_enabled: false,
    }
}

fn polar_launch(planet: &Planet, lander: &Lander) -> InitialConditions {
    InitialConditions {
        position: Vector3::new(0.0, 0.0, planet.radius + lander.size / 2.0),
        velocity: Vector3::new(0.0, 0.0, 5_027.0),
        orientation: Vector3::zeros(),
        dt: DT,
        parachute: ParachuteStatus::NotDeployed,
        stabilized_attitude: false,
        autopilot_enabled: false,
    }
}

fn aerobraking_orbit(planet: &Planet, _: &Lander) -> InitialConditions {
    InitialConditions {
        position: Vector3::new(0.0, 0.0, planet.radius + 100_000.0),
        velocity: Vector3::new(4_000.0, 0.0, 0.0),
        orientation: Vector3::new(0.0, 90.0, 0.0),
        dt: DT,
        parachute: ParachuteStatus::NotDeployed,
        stabilized_attitude: false,
        autopilot_enabled: false,
    }
}

fn exosphere_descent(planet: &Planet, _: &Lander) -> InitialConditions {
    InitialConditions {
        position: Vector3::new(0.0, -(planet.radius + planet.exosphere), 0.0),
        velocity: Vector3::zeros(),
        orientation: Vector3::new(0.0, 0.0, 90.0),
        dt: DT,
        parachute: ParachuteStatus::NotDeployed,
        stabilized_attitude: true,
        autopilot_enabled: false,
    }
}

fn stationary_orbit(planet: &Planet, _: &Lander) -> InitialConditions {
    let r = planet.stationary_orbit_radius();
    InitialConditions {
        position: Vector3::new(r, 0.0, 0.0),
        velocity: Vector3::new(0.0, 2.0 * PI / planet.day * r, 0.0),
        orientation: Vector3::new(0.0, 90.0, 0.0),
        dt: DT,
        parachute: ParachuteStatus::NotDeployed,
        stabilized_attitude: true,
        autopilot_enabled: false,
    }
}

fn surface_takeoff(planet: &Planet, lander: &Lander) -> InitialConditions {
    InitialConditions {
        position: Vector3::new(planet.radius + 10.0 * lander.size / 2.0, 0.0, 0.0),
        velocity: Vector3::zeros(),
        orientation: Vector3::new(0.0, 0.07, 0.0),
        dt: DT,
        parachute: ParachuteStatus::NotDeployed,
        stabilized_attitude: true,
        autopilot_enabled: false,
    }
}
