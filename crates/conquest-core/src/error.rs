//! Error types for configuration loading and match setup.
//!
//! The tick itself never fails: missing entities, full target lists and
//! unavailable abilities are handled as ordinary outcomes. Only building a
//! match from external input can be rejected.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to load or validate a `GameConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Tunables must be finite and non-negative.
    #[error("config value `{name}` must be finite and non-negative, got {value}")]
    Invalid { name: &'static str, value: f64 },
}

/// Failure to build a match from a scenario description.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("scenario has no operators")]
    NoOperators,

    #[error("scenario has no player operator")]
    NoPlayer,

    #[error("planet {planet} references unknown operator index {owner}")]
    UnknownOwner { planet: usize, owner: usize },

    #[error("edge {from} -> {to} references an unknown planet")]
    UnknownPlanet { from: usize, to: usize },

    #[error("planet {planet} has non-positive max health {max_health}")]
    InvalidHealth { planet: usize, max_health: i32 },

    #[error(transparent)]
    Config(#[from] ConfigError),
}
