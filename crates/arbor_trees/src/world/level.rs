use crate::config::ArborConfig;
use crate::world::block::arbor::AIR;
use crate::world::block::arbor::sapling::SaplingChanged;
use crate::world::block::cell::SaplingCells;
use crate::world::block::{Block, BlockUpdateFlags};
use crate::world::item::{DroppedItem, ItemStack};
use arbor_engine::world::block::BlockPos;
use bevy_ecs::prelude::Resource;
use indexmap::IndexSet;
use rustc_hash::{FxBuildHasher, FxHashMap};
use std::collections::VecDeque;
use std::mem;

/// Level-wide switches consulted by block behaviours.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameRules {
    /// Random ticks per 16x16x16 section per tick.
    pub random_tick_speed: u32,
    /// Rounds of neighbor notification processed per propagation pass.
    pub max_update_depth: u16,
    /// Remove saplings that never received a species when they are ticked
    /// or their neighbors change. They never drop a seed either way.
    pub remove_empty_saplings: bool,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            random_tick_speed: 3,
            max_update_depth: 512,
            remove_empty_saplings: false,
        }
    }
}

impl From<&ArborConfig> for GameRules {
    fn from(config: &ArborConfig) -> Self {
        Self {
            random_tick_speed: config.random_tick_speed,
            max_update_depth: config.max_update_depth.max(1),
            remove_empty_saplings: config.remove_empty_saplings,
        }
    }
}

/// A block change waiting to notify its neighbors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockChange {
    pub pos: BlockPos,
    pub old: &'static Block,
    pub new: &'static Block,
}

pub trait BlockGetter {
    fn get_block(&self, pos: BlockPos) -> &'static Block;

    fn is_empty_block(&self, pos: BlockPos) -> bool {
        self.get_block(pos).is_air()
    }

    fn cells(&self) -> &SaplingCells;

    fn rules(&self) -> &GameRules;
}

pub trait LevelAccess: BlockGetter {
    /// Replaces the block at `pos`. Returns `false` when the block was already there.
    ///
    /// Any sapling record at `pos` is discarded when the block changes.
    fn set_block(&mut self, pos: BlockPos, block: &'static Block, flags: BlockUpdateFlags) -> bool;

    fn spawn_item(&mut self, pos: BlockPos, stack: ItemStack);

    fn cells_mut(&mut self) -> &mut SaplingCells;

    fn push_sapling_change(&mut self, change: SaplingChanged);
}

/// Sparse in-memory block storage. Positions without an entry hold air.
#[derive(Resource, Debug, Default)]
pub struct Level {
    rules: GameRules,
    blocks: FxHashMap<BlockPos, &'static Block>,
    ticking: IndexSet<BlockPos, FxBuildHasher>,
    cells: SaplingCells,
    dropped: Vec<DroppedItem>,
    pending: VecDeque<BlockChange>,
    sapling_changes: Vec<SaplingChanged>,
}

impl Level {
    pub fn new(rules: GameRules) -> Self {
        Self {
            rules,
            ..Default::default()
        }
    }

    pub fn rules_mut(&mut self) -> &mut GameRules {
        &mut self.rules
    }

    /// Fills the inclusive box between `from` and `to` without notifying neighbors.
    pub fn fill(&mut self, from: BlockPos, to: BlockPos, block: &'static Block) {
        let min = from.min(*to);
        let max = from.max(*to);
        for x in min.x..=max.x {
            for y in min.y..=max.y {
                for z in min.z..=max.z {
                    self.set_block(BlockPos::new(x, y, z), block, BlockUpdateFlags::NONE);
                }
            }
        }
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn ticking_positions(&self) -> impl Iterator<Item = BlockPos> + '_ {
        self.ticking.iter().copied()
    }

    pub fn dropped_items(&self) -> &[DroppedItem] {
        &self.dropped
    }

    /// Items spawned since the last call. `ItemPlugin` drains these every tick.
    pub fn take_dropped_items(&mut self) -> Vec<DroppedItem> {
        mem::take(&mut self.dropped)
    }

    pub fn has_pending_changes(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn take_block_changes(&mut self) -> Vec<BlockChange> {
        self.pending.drain(..).collect()
    }

    pub fn take_sapling_changes(&mut self) -> Vec<SaplingChanged> {
        mem::take(&mut self.sapling_changes)
    }
}

impl BlockGetter for Level {
    fn get_block(&self, pos: BlockPos) -> &'static Block {
        self.blocks.get(&pos).copied().unwrap_or(&AIR)
    }

    fn cells(&self) -> &SaplingCells {
        &self.cells
    }

    fn rules(&self) -> &GameRules {
        &self.rules
    }
}

impl LevelAccess for Level {
    fn set_block(&mut self, pos: BlockPos, block: &'static Block, flags: BlockUpdateFlags) -> bool {
        let old = self.get_block(pos);
        if old == block {
            return false;
        }

        if block.is_air() {
            self.blocks.remove(&pos);
        } else {
            self.blocks.insert(pos, block);
        }

        if block.is_randomly_ticking() {
            self.ticking.insert(pos);
        } else {
            self.ticking.swap_remove(&pos);
        }

        self.cells.remove(pos);

        if flags.contains(BlockUpdateFlags::NEIGHBORS) {
            self.pending.push_back(BlockChange {
                pos,
                old,
                new: block,
            });
        }
        true
    }

    fn spawn_item(&mut self, pos: BlockPos, stack: ItemStack) {
        if stack.is_empty() {
            return;
        }
        self.dropped.push(DroppedItem { pos, stack });
    }

    fn cells_mut(&mut self) -> &mut SaplingCells {
        &mut self.cells
    }

    fn push_sapling_change(&mut self, change: SaplingChanged) {
        self.sapling_changes.push(change);
    }
}
