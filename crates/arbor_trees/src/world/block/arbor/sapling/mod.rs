use crate::species::Species;
use crate::world::block::arbor::AIR;
use crate::world::block::behaviour::{BlockBehaviour, Properties, TreePart};
use crate::world::block::cell::SaplingCell;
use crate::world::block::{Block, BlockUpdateFlags};
use crate::world::item::ItemStack;
use crate::world::level::{BlockGetter, LevelAccess};
use arbor_engine::world::block::BlockPos;
use bevy_ecs::message::Message;
use rand::RngCore;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, trace};
use valence_ident::{Ident, ident};

mod systems;

pub use systems::{SaplingBlockPlugin, SeedPlanted};

const PROPERTIES: Properties = Properties::new()
    .instant_break()
    .no_collision()
    .with_random_ticks()
    .with_tree_part(TreePart::Sapling);

/// Placeholder block that grows into a tree of the species recorded next to it.
pub const SAPLING: Block = Block {
    identifier: ident!("arbor:sapling"),
    properties: &PROPERTIES,
    behaviour: &SaplingBlock,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaplingState {
    /// No species assigned.
    Empty,
    Planted,
    /// Planted, but the surroundings no longer hold it.
    Invalid,
    Converting,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaplingOutcome {
    NoOp,
    ConvertToTree,
    DropAndClear,
}

/// Emitted for every sapling that grew or was removed.
#[derive(Message, Clone, Debug, PartialEq, Eq)]
pub struct SaplingChanged {
    pub pos: BlockPos,
    pub outcome: SaplingOutcome,
    pub species: Option<Ident<String>>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlantError {
    #[error("unknown species {0}")]
    UnknownSpecies(String),
    #[error("{species} cannot grow at {pos}")]
    InvalidPlacement { species: String, pos: BlockPos },
    #[error("{pos} is occupied by {block}")]
    Occupied { pos: BlockPos, block: String },
}

pub struct SaplingBlock;

impl SaplingBlock {
    /// Species recorded for the sapling at `pos`. A missing record reads as no species.
    pub fn species_at(level: &dyn BlockGetter, pos: BlockPos) -> Option<Arc<dyn Species>> {
        level.cells().get(pos).and_then(SaplingCell::species).cloned()
    }

    /// Places a sapling at `pos` with a fresh record holding `species`.
    pub fn set_species(
        level: &mut dyn LevelAccess,
        pos: BlockPos,
        species: Option<Arc<dyn Species>>,
    ) {
        level.set_block(pos, &SAPLING, BlockUpdateFlags::ALL);
        level.cells_mut().insert(SaplingCell::new(pos, species));
    }

    /// Plants a seed of `species`, refusing spots the sapling could not stay on.
    pub fn plant(
        level: &mut dyn LevelAccess,
        pos: BlockPos,
        species: Arc<dyn Species>,
    ) -> Result<(), PlantError> {
        let current = level.get_block(pos);
        if !current.is_air() && !current.is_replaceable() {
            return Err(PlantError::Occupied {
                pos,
                block: current.identifier.as_str().to_owned(),
            });
        }
        if !Self::is_placement_valid(&*level, Some(species.as_ref()), pos) {
            return Err(PlantError::InvalidPlacement {
                species: species.identifier().as_str().to_owned(),
                pos,
            });
        }

        debug!("planted {} at {}", species.identifier().as_str(), pos);
        Self::set_species(level, pos, Some(species));
        Ok(())
    }

    /// Whether a sapling of `species` may stay at `pos`.
    ///
    /// No horizontal neighbor may be a branch or another sapling, the block above must
    /// be air and the block below must be soil the species accepts. No species is never valid.
    pub fn is_placement_valid(
        level: &dyn BlockGetter,
        species: Option<&dyn Species>,
        pos: BlockPos,
    ) -> bool {
        let Some(species) = species else {
            return false;
        };

        let crowded = pos.horizontal_neighbors().any(|neighbor| {
            let block = level.get_block(neighbor);
            block.is_branch() || block.is_sapling()
        });
        if crowded {
            return false;
        }

        let soil_pos = pos.below();
        level.is_empty_block(pos.above())
            && species.is_acceptable_soil(level, soil_pos, level.get_block(soil_pos))
    }

    /// Observable state of the sapling at `pos`, `None` if there is no sapling.
    pub fn state(level: &dyn BlockGetter, pos: BlockPos) -> Option<SaplingState> {
        if !level.get_block(pos).is_sapling() {
            return None;
        }
        let Some(cell) = level.cells().get(pos) else {
            return Some(SaplingState::Empty);
        };
        let state = match cell.species() {
            None => SaplingState::Empty,
            Some(_) if cell.is_converting() => SaplingState::Converting,
            Some(species) if Self::is_placement_valid(level, Some(species.as_ref()), pos) => {
                SaplingState::Planted
            }
            Some(_) => SaplingState::Invalid,
        };
        Some(state)
    }

    /// Converts the sapling into a tree when it may stay, otherwise drops it.
    pub fn grow(level: &mut dyn LevelAccess, pos: BlockPos) -> SaplingOutcome {
        if !level.get_block(pos).is_sapling() {
            return SaplingOutcome::NoOp;
        }
        let Some(species) = Self::species_at(&*level, pos) else {
            return Self::clear_empty(level, pos);
        };
        if level.cells().get(pos).is_some_and(SaplingCell::is_converting) {
            return SaplingOutcome::NoOp;
        }

        let outcome = if Self::is_placement_valid(&*level, Some(species.as_ref()), pos) {
            if let Some(cell) = level.cells_mut().get_mut(pos) {
                cell.converting = true;
            }
            if species.transition_to_tree(level, pos) {
                SaplingOutcome::ConvertToTree
            } else {
                if let Some(cell) = level.cells_mut().get_mut(pos) {
                    cell.converting = false;
                }
                SaplingOutcome::NoOp
            }
        } else {
            Self::drop_and_clear(level, Some(species.as_ref()), pos);
            SaplingOutcome::DropAndClear
        };

        Self::report(level, pos, outcome, Some(&species));
        outcome
    }

    /// Drops the sapling right away when its surroundings no longer hold it.
    pub fn on_neighbor_changed(level: &mut dyn LevelAccess, pos: BlockPos) -> SaplingOutcome {
        if !level.get_block(pos).is_sapling() {
            return SaplingOutcome::NoOp;
        }
        let Some(species) = Self::species_at(&*level, pos) else {
            return Self::clear_empty(level, pos);
        };
        if level.cells().get(pos).is_some_and(SaplingCell::is_converting)
            || Self::is_placement_valid(&*level, Some(species.as_ref()), pos)
        {
            return SaplingOutcome::NoOp;
        }

        Self::drop_and_clear(level, Some(species.as_ref()), pos);
        Self::report(level, pos, SaplingOutcome::DropAndClear, Some(&species));
        SaplingOutcome::DropAndClear
    }

    /// Creative players get no seed: the species is cleared before drops are collected.
    pub fn on_harvest(level: &mut dyn LevelAccess, pos: BlockPos, creative: bool) {
        if !creative {
            return;
        }
        if let Some(cell) = level.cells_mut().get_mut(pos) {
            cell.clear_species();
        }
    }

    /// Spawns one seed of `species`, if any, then sets `pos` to air.
    pub fn drop_and_clear(level: &mut dyn LevelAccess, species: Option<&dyn Species>, pos: BlockPos) {
        if let Some(species) = species {
            level.spawn_item(pos, species.seed_stack(1));
        }
        level.set_block(pos, &AIR, BlockUpdateFlags::ALL);
        debug!(
            "sapling at {} dropped ({})",
            pos,
            species.map_or("no species", |s| s.identifier().as_str())
        );
    }

    /// Both bone meal hooks in one call. The randomness belongs to the species.
    pub fn can_accept_bone_meal(
        level: &dyn BlockGetter,
        pos: BlockPos,
        random: &mut dyn RngCore,
    ) -> bool {
        SaplingBlock.is_valid_bonemeal_target(level, pos)
            && SaplingBlock.is_bonemeal_success(level, random, pos)
    }

    fn clear_empty(level: &mut dyn LevelAccess, pos: BlockPos) -> SaplingOutcome {
        if !level.rules().remove_empty_saplings {
            return SaplingOutcome::NoOp;
        }
        Self::drop_and_clear(level, None, pos);
        Self::report(level, pos, SaplingOutcome::DropAndClear, None);
        SaplingOutcome::DropAndClear
    }

    fn report(
        level: &mut dyn LevelAccess,
        pos: BlockPos,
        outcome: SaplingOutcome,
        species: Option<&Arc<dyn Species>>,
    ) {
        if outcome == SaplingOutcome::NoOp {
            return;
        }
        trace!("sapling at {} -> {:?}", pos, outcome);
        level.push_sapling_change(SaplingChanged {
            pos,
            outcome,
            species: species.map(|s| s.identifier().clone()),
        });
    }
}

impl BlockBehaviour for SaplingBlock {
    fn random_tick(&self, level: &mut dyn LevelAccess, pos: BlockPos, _random: &mut dyn RngCore) {
        Self::grow(level, pos);
    }

    fn neighbor_changed(&self, level: &mut dyn LevelAccess, pos: BlockPos, _from_pos: BlockPos) {
        Self::on_neighbor_changed(level, pos);
    }

    fn player_will_destroy(&self, level: &mut dyn LevelAccess, pos: BlockPos, creative: bool) {
        Self::on_harvest(level, pos, creative);
    }

    fn get_drops(&self, level: &dyn BlockGetter, pos: BlockPos) -> Vec<ItemStack> {
        Self::species_at(level, pos)
            .map(|species| vec![species.seed_stack(1)])
            .unwrap_or_default()
    }

    fn pick_block(&self, level: &dyn BlockGetter, pos: BlockPos) -> Option<ItemStack> {
        Self::species_at(level, pos).map(|species| species.seed_stack(1))
    }

    fn is_valid_bonemeal_target(&self, level: &dyn BlockGetter, pos: BlockPos) -> bool {
        Self::species_at(level, pos).is_some_and(|s| s.can_grow_with_bone_meal(level, pos))
    }

    fn is_bonemeal_success(
        &self,
        level: &dyn BlockGetter,
        random: &mut dyn RngCore,
        pos: BlockPos,
    ) -> bool {
        Self::species_at(level, pos).is_some_and(|s| s.can_use_bone_meal_now(level, random, pos))
    }

    fn perform_bonemeal(&self, level: &mut dyn LevelAccess, pos: BlockPos, _random: &mut dyn RngCore) {
        Self::grow(level, pos);
    }
}
