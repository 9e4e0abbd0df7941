//! Scenario definitions: operators, planets and opening edges of a match.
//!
//! Scenarios are plain data. They can be written by hand in TOML or built
//! from the hardcoded layouts below; `world_setup` turns them into the
//! engine's arenas.

use std::f64::consts::PI;
use std::path::Path;

use serde::{Deserialize, Serialize};

use conquest_core::constants::DEFAULT_PLANET_MAX_HEALTH;
use conquest_core::enums::{Difficulty, OperatorKind, PlanetType};
use conquest_core::error::{ConfigError, SetupError};
use conquest_core::types::Position;

use crate::planet::Orbit;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatorSpec {
    pub name: String,
    pub kind: OperatorKind,
    /// Ignored for the player.
    #[serde(default)]
    pub difficulty: Difficulty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetSpec {
    #[serde(default)]
    pub planet_type: PlanetType,
    /// Index into `Scenario::operators`.
    pub owner: usize,
    #[serde(default = "default_max_health")]
    pub max_health: i32,
    /// Starting health; full when absent.
    #[serde(default)]
    pub health: Option<i32>,
    pub orbit: Orbit,
}

fn default_max_health() -> i32 {
    DEFAULT_PLANET_MAX_HEALTH
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub operators: Vec<OperatorSpec>,
    pub planets: Vec<PlanetSpec>,
    /// Opening targeting edges as `(from, to)` planet indices.
    #[serde(default)]
    pub edges: Vec<(usize, usize)>,
}

impl Scenario {
    /// Parse a TOML document, then validate it.
    pub fn from_toml_str(source: &str) -> Result<Self, SetupError> {
        let scenario: Scenario = toml::from_str(source).map_err(ConfigError::from)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SetupError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Check owner and edge indices and health values.
    pub fn validate(&self) -> Result<(), SetupError> {
        if self.operators.is_empty() {
            return Err(SetupError::NoOperators);
        }
        if !self
            .operators
            .iter()
            .any(|o| o.kind == OperatorKind::Player)
        {
            return Err(SetupError::NoPlayer);
        }
        for (index, planet) in self.planets.iter().enumerate() {
            if planet.owner >= self.operators.len() {
                return Err(SetupError::UnknownOwner {
                    planet: index,
                    owner: planet.owner,
                });
            }
            if planet.max_health <= 0 {
                return Err(SetupError::InvalidHealth {
                    planet: index,
                    max_health: planet.max_health,
                });
            }
        }
        for &(from, to) in &self.edges {
            if from >= self.planets.len() || to >= self.planets.len() {
                return Err(SetupError::UnknownPlanet { from, to });
            }
        }
        Ok(())
    }

    /// "Skirmish": one player against one bot on a mirrored eight-planet
    /// map. Each side starts with a Fortress home, a Standard outpost, a
    /// Factory and a Nexus orbiting the centre.
    pub fn skirmish(difficulty: Difficulty) -> Self {
        let operators = vec![
            OperatorSpec {
                name: "Player".to_string(),
                kind: OperatorKind::Player,
                difficulty: Difficulty::default(),
            },
            OperatorSpec {
                name: format!("{difficulty:?} bot"),
                kind: OperatorKind::Bot,
                difficulty,
            },
        ];

        let mut planets = Vec::with_capacity(8);
        for (owner, side) in [(0usize, -1.0), (1usize, 1.0)] {
            planets.push(fixed(PlanetType::Fortress, owner, side * 320.0, 0.0, 150));
            planets.push(fixed(PlanetType::Standard, owner, side * 220.0, -side * 130.0, 100));
            planets.push(fixed(PlanetType::Factory, owner, side * 120.0, side * 200.0, 80));
            planets.push(PlanetSpec {
                planet_type: PlanetType::Nexus,
                owner,
                max_health: 100,
                health: None,
                orbit: Orbit {
                    center: Position::new(0.0, 0.0),
                    semi_major: 110.0,
                    semi_minor: 70.0,
                    // player's nexus starts on the left
                    angle: if owner == 0 { PI } else { 0.0 },
                    speed: 0.002,
                },
            });
        }

        Self {
            operators,
            planets,
            edges: Vec::new(),
        }
    }
}

fn fixed(planet_type: PlanetType, owner: usize, x: f64, y: f64, max_health: i32) -> PlanetSpec {
    PlanetSpec {
        planet_type,
        owner,
        max_health,
        health: None,
        orbit: Orbit::fixed(Position::new(x, y)),
    }
}
