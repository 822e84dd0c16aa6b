use crate::species::{DataSpecies, Species, SpeciesRegistry};
use crate::world::block::arbor::block_by_name;
use crate::world::block::{Block, SoilFlags};
use arbor_registry::DuplicateEntry;
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;
use valence_ident::Ident;

const BUILTIN_SPECIES: &str = include_str!("../../assets/species.json");

/// One entry of a species definition file.
#[derive(Clone, Debug, Deserialize)]
pub struct SpeciesDef {
    pub id: String,
    pub seed: String,
    #[serde(default = "default_soils")]
    pub soils: Vec<String>,
    pub branch: String,
    pub leaves: String,
    #[serde(default)]
    pub rooty_soil: Option<String>,
    #[serde(default)]
    pub bone_meal: bool,
    #[serde(default)]
    pub bone_meal_chance: f32,
}

fn default_soils() -> Vec<String> {
    vec!["dirt".to_owned()]
}

#[derive(Debug, Error)]
pub enum SpeciesLoadError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("invalid identifier {0:?}")]
    InvalidIdent(String),
    #[error("species {species} references unknown block {block}")]
    UnknownBlock { species: String, block: String },
    #[error("species {species} references unknown soil {soil}")]
    UnknownSoil { species: String, soil: String },
    #[error("species {species} has bone meal chance {chance} outside 0..=1")]
    InvalidChance { species: String, chance: f32 },
    #[error(transparent)]
    Duplicate(#[from] DuplicateEntry),
}

impl SpeciesDef {
    pub fn build(&self) -> Result<DataSpecies, SpeciesLoadError> {
        let id = parse_ident(&self.id)?;
        let seed = parse_ident(&self.seed)?;
        let branch = self.block(&self.branch)?;
        let leaves = self.block(&self.leaves)?;

        let mut soils = SoilFlags::empty();
        for soil in &self.soils {
            soils |= SoilFlags::from_name(&soil.to_ascii_uppercase()).ok_or_else(|| {
                SpeciesLoadError::UnknownSoil {
                    species: self.id.clone(),
                    soil: soil.clone(),
                }
            })?;
        }

        let mut species = DataSpecies::new(id, seed, branch, leaves).with_soils(soils);
        if let Some(rooty) = &self.rooty_soil {
            species = species.with_rooty_soil(self.block(rooty)?);
        }
        if self.bone_meal {
            if !(0.0..=1.0).contains(&self.bone_meal_chance) {
                return Err(SpeciesLoadError::InvalidChance {
                    species: self.id.clone(),
                    chance: self.bone_meal_chance,
                });
            }
            species = species.with_bone_meal(self.bone_meal_chance);
        }
        Ok(species)
    }

    fn block(&self, name: &str) -> Result<&'static Block, SpeciesLoadError> {
        let ident = parse_ident(name)?;
        block_by_name(ident.as_str()).ok_or_else(|| SpeciesLoadError::UnknownBlock {
            species: self.id.clone(),
            block: name.to_owned(),
        })
    }
}

fn parse_ident(value: &str) -> Result<Ident<String>, SpeciesLoadError> {
    Ident::from_str(value).map_err(|_| SpeciesLoadError::InvalidIdent(value.to_owned()))
}

/// Parses a JSON array of [`SpeciesDef`].
pub fn parse_species(json: &str) -> Result<Vec<Arc<dyn Species>>, SpeciesLoadError> {
    let defs: Vec<SpeciesDef> = serde_json::from_str(json)?;
    defs.iter()
        .map(|def| def.build().map(|s| Arc::new(s) as Arc<dyn Species>))
        .collect()
}

pub fn load_species_file(path: impl AsRef<Path>) -> Result<Vec<Arc<dyn Species>>, SpeciesLoadError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)?;
    let species = parse_species(&json)?;
    debug!("loaded {} species from {}", species.len(), path.display());
    Ok(species)
}

/// Species shipped with the crate.
pub fn builtin_species() -> Result<Vec<Arc<dyn Species>>, SpeciesLoadError> {
    parse_species(BUILTIN_SPECIES)
}

/// Builds a registry, rejecting duplicate identifiers.
pub fn build_registry(
    species: impl IntoIterator<Item = Arc<dyn Species>>,
) -> Result<SpeciesRegistry, SpeciesLoadError> {
    let mut registry = SpeciesRegistry::default();
    for species in species {
        registry.try_insert(species.identifier().clone(), species)?;
    }
    Ok(registry)
}
