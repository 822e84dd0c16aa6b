use crate::world::block::{Block, BlockUpdateFlags, SoilFlags};
use crate::world::item::ItemStack;
use crate::world::level::{BlockGetter, LevelAccess};
use arbor_engine::world::block::BlockPos;
use arbor_registry::Registry;
use rand::{Rng, RngCore};
use std::fmt::Debug;
use std::sync::Arc;
use tracing::trace;
use valence_ident::Ident;

pub mod loader;

pub use loader::{
    SpeciesDef, SpeciesLoadError, build_registry, builtin_species, load_species_file, parse_species,
};

pub type SpeciesRegistry = Registry<Arc<dyn Species>>;

/// Growth rules of a kind of tree.
///
/// Saplings only keep a shared reference; the [`SpeciesRegistry`] owns the species.
pub trait Species: Send + Sync + Debug {
    fn identifier(&self) -> &Ident<String>;

    /// Whether `soil`, found at `soil_pos` under a sapling, can hold this species.
    fn is_acceptable_soil(&self, level: &dyn BlockGetter, soil_pos: BlockPos, soil: &'static Block)
    -> bool;

    /// Replaces the sapling at `pos` with a grown tree. Returns `false` if nothing was placed.
    fn transition_to_tree(&self, level: &mut dyn LevelAccess, pos: BlockPos) -> bool;

    fn can_grow_with_bone_meal(&self, level: &dyn BlockGetter, pos: BlockPos) -> bool;

    fn can_use_bone_meal_now(
        &self,
        level: &dyn BlockGetter,
        random: &mut dyn RngCore,
        pos: BlockPos,
    ) -> bool;

    fn seed_stack(&self, count: u8) -> ItemStack;
}

/// A species described entirely by data, see [`loader`].
#[derive(Clone, Debug)]
pub struct DataSpecies {
    id: Ident<String>,
    seed: Ident<String>,
    soils: SoilFlags,
    branch: &'static Block,
    leaves: &'static Block,
    rooty_soil: Option<&'static Block>,
    bone_meal: bool,
    bone_meal_chance: f32,
}

impl DataSpecies {
    pub fn new(
        id: impl Into<Ident<String>>,
        seed: impl Into<Ident<String>>,
        branch: &'static Block,
        leaves: &'static Block,
    ) -> Self {
        Self {
            id: id.into(),
            seed: seed.into(),
            soils: SoilFlags::DIRT,
            branch,
            leaves,
            rooty_soil: None,
            bone_meal: false,
            bone_meal_chance: 0.0,
        }
    }

    pub fn with_soils(mut self, soils: SoilFlags) -> Self {
        self.soils = soils;
        self
    }

    pub fn with_rooty_soil(mut self, block: &'static Block) -> Self {
        self.rooty_soil = Some(block);
        self
    }

    /// Enables bone meal growth. `chance` is clamped to `0.0..=1.0`.
    pub fn with_bone_meal(mut self, chance: f32) -> Self {
        self.bone_meal = true;
        self.bone_meal_chance = chance.clamp(0.0, 1.0);
        self
    }

    pub fn soils(&self) -> SoilFlags {
        self.soils
    }

    pub fn branch(&self) -> &'static Block {
        self.branch
    }

    pub fn leaves(&self) -> &'static Block {
        self.leaves
    }
}

impl Species for DataSpecies {
    fn identifier(&self) -> &Ident<String> {
        &self.id
    }

    fn is_acceptable_soil(
        &self,
        _level: &dyn BlockGetter,
        _soil_pos: BlockPos,
        soil: &'static Block,
    ) -> bool {
        soil.soil().intersects(self.soils)
    }

    fn transition_to_tree(&self, level: &mut dyn LevelAccess, pos: BlockPos) -> bool {
        if let Some(rooty) = self.rooty_soil {
            level.set_block(pos.below(), rooty, BlockUpdateFlags::ALL);
        }
        if !level.set_block(pos, self.branch, BlockUpdateFlags::ALL) {
            return false;
        }
        let crown = pos.above();
        if level.is_empty_block(crown) {
            level.set_block(crown, self.leaves, BlockUpdateFlags::ALL);
        }
        trace!("{} grew at {}", self.id.as_str(), pos);
        true
    }

    fn can_grow_with_bone_meal(&self, _level: &dyn BlockGetter, _pos: BlockPos) -> bool {
        self.bone_meal
    }

    fn can_use_bone_meal_now(
        &self,
        _level: &dyn BlockGetter,
        random: &mut dyn RngCore,
        _pos: BlockPos,
    ) -> bool {
        self.bone_meal && random.random::<f32>() < self.bone_meal_chance
    }

    fn seed_stack(&self, count: u8) -> ItemStack {
        ItemStack::new(self.seed.clone(), count)
    }
}
