//! Runtime settings read from an optional JSON file.
//!
//! Every field has a default, so a partial file only overrides what it names:
//!
//! ```json
//! { "seed": 42, "random_tick_speed": 12 }
//! ```

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Resource, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArborConfig {
    /// Seed of the random source behind ticks and bone meal.
    pub seed: u64,
    pub random_tick_speed: u32,
    pub max_update_depth: u16,
    /// Remove saplings without a species instead of leaving them inert.
    pub remove_empty_saplings: bool,
    /// Species definitions. The built-in set is used when the file is missing.
    pub species_file: PathBuf,
}

impl Default for ArborConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            random_tick_speed: 3,
            max_update_depth: 512,
            remove_empty_saplings: false,
            species_file: PathBuf::from("species.json"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("max_update_depth must be at least 1")]
    ZeroUpdateDepth,
}

impl ArborConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Neighbor updates never drain with a depth of zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_update_depth == 0 {
            return Err(ConfigError::ZeroUpdateDepth);
        }
        Ok(())
    }

    /// Reads the config at `path`, falling back to defaults if there is no such file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => {
                debug!("loading config from {}", path.display());
                Self::from_json(&json)
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("{} not found, using default config", path.display());
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Io {
                path: path.to_owned(),
                source,
            }),
        }
    }
}
