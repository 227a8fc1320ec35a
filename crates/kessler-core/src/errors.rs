//! Error types for commands and configuration.
//!
//! Errors only ever describe a rejected input: a rejected command has made
//! no change to the world.

use thiserror::Error;

use crate::enums::{DrvType, GameOverReason, OrbitLayer};

/// A configuration value failed validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be {expected}, got {value}")]
    OutOfRange {
        name: &'static str,
        expected: &'static str,
        value: f64,
    },
    #[error("{0:?} is collision-immune and has no threshold")]
    ImmuneLayer(OrbitLayer),
    #[error("severe cascade threshold {severe} is below cascade threshold {cascade}")]
    CascadeOrdering { cascade: u32, severe: u32 },
    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A command was rejected before any mutation.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("no game in progress; call initialize_game first")]
    NotInitialized,
    #[error("game is over ({0})")]
    GameOver(GameOverReason),
    #[error("insufficient budget: need {required}, have {available}")]
    InsufficientBudget { required: i64, available: i64 },
    #[error("cannot launch into {layer:?}: {reason}")]
    InvalidOrbit {
        layer: OrbitLayer,
        reason: &'static str,
    },
    #[error("{drv_type:?} vehicles cannot operate in {layer:?}")]
    UnsupportedDrvOrbit { drv_type: DrvType, layer: OrbitLayer },
    #[error(transparent)]
    InvalidSetting(#[from] ConfigError),
}
