#![allow(unused_variables)]

pub mod config;
pub mod species;
pub mod world;

pub use config::{ArborConfig, ConfigError};

use crate::species::{Species, SpeciesRegistry, builtin_species};
use crate::world::WorldPlugin;
use crate::world::level::{GameRules, Level};
use crate::world::tick::TickRandom;
use bevy_app::{App, Plugin};
use std::sync::Arc;
use tracing::warn;

/// Sets up a level, its species and every sapling system.
pub struct ArborPlugin {
    config: ArborConfig,
    species: Vec<Arc<dyn Species>>,
}

impl ArborPlugin {
    /// Uses the built-in species. See [`ArborPlugin::with_species`] to replace them.
    pub fn new(config: ArborConfig) -> Self {
        let species = builtin_species().unwrap_or_else(|err| {
            warn!("built-in species failed to load: {err}");
            Vec::new()
        });
        Self { config, species }
    }

    pub fn with_species(mut self, species: Vec<Arc<dyn Species>>) -> Self {
        self.species = species;
        self
    }
}

impl Default for ArborPlugin {
    fn default() -> Self {
        Self::new(ArborConfig::default())
    }
}

impl Plugin for ArborPlugin {
    fn build(&self, app: &mut App) {
        if let Err(err) = self.config.validate() {
            warn!("{err}, using 1");
        }
        let mut registry = SpeciesRegistry::default();
        for species in &self.species {
            if let Err(err) = registry.try_insert(species.identifier().clone(), species.clone()) {
                warn!("{err}, keeping the first definition");
            }
        }

        app.insert_resource(self.config.clone());
        app.insert_resource(Level::new(GameRules::from(&self.config)));
        app.insert_resource(registry);
        app.insert_resource(TickRandom::from_seed(self.config.seed));
        app.add_plugins(WorldPlugin);
    }
}
