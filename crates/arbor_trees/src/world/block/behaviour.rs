use crate::world::block::SoilFlags;
use crate::world::item::ItemStack;
use crate::world::level::{BlockGetter, LevelAccess};
use arbor_engine::world::block::BlockPos;
use rand::RngCore;

/// Which part of a tree a block represents, if any.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum TreePart {
    #[default]
    None,
    Sapling,
    Branch,
    Leaves,
    Root,
}

#[derive(Clone, Copy, Debug)]
pub struct Properties {
    pub hardness: f32,
    pub replaceable: bool,
    pub is_air: bool,
    pub has_collision: bool,
    pub is_randomly_ticking: bool,
    pub soil: SoilFlags,
    pub tree_part: TreePart,
}

impl Properties {
    pub const fn new() -> Self {
        Properties {
            hardness: 0.0,
            is_air: false,
            replaceable: false,
            has_collision: true,
            is_randomly_ticking: false,
            soil: SoilFlags::empty(),
            tree_part: TreePart::None,
        }
    }

    pub const fn with_strength(mut self, value: f32) -> Self {
        self.hardness = value;
        self
    }

    pub const fn instant_break(self) -> Self {
        self.with_strength(0.0)
    }

    pub const fn with_random_ticks(mut self) -> Self {
        self.is_randomly_ticking = true;
        self
    }

    pub const fn with_soil(mut self, value: SoilFlags) -> Self {
        self.soil = value;
        self
    }

    pub const fn with_tree_part(mut self, value: TreePart) -> Self {
        self.tree_part = value;
        self
    }

    pub const fn air(mut self) -> Self {
        self.is_air = true;
        self
    }

    pub const fn no_collision(mut self) -> Self {
        self.has_collision = false;
        self
    }

    pub const fn replaceable(mut self) -> Self {
        self.replaceable = true;
        self
    }
}

impl Default for Properties {
    fn default() -> Self {
        Self::new()
    }
}

/// Callbacks the level invokes on the block occupying a position.
///
/// Every hook defaults to doing nothing, so plain blocks only declare
/// [`Properties`] and use [`SimpleBlock`].
pub trait BlockBehaviour: Sync + Send {
    fn random_tick(&self, level: &mut dyn LevelAccess, pos: BlockPos, random: &mut dyn RngCore) {}

    fn neighbor_changed(&self, level: &mut dyn LevelAccess, pos: BlockPos, from_pos: BlockPos) {}

    /// Runs before a player removes the block, ahead of drop collection.
    fn player_will_destroy(&self, level: &mut dyn LevelAccess, pos: BlockPos, creative: bool) {}

    fn get_drops(&self, level: &dyn BlockGetter, pos: BlockPos) -> Vec<ItemStack> {
        Vec::new()
    }

    fn pick_block(&self, level: &dyn BlockGetter, pos: BlockPos) -> Option<ItemStack> {
        None
    }

    fn is_valid_bonemeal_target(&self, level: &dyn BlockGetter, pos: BlockPos) -> bool {
        false
    }

    fn is_bonemeal_success(
        &self,
        level: &dyn BlockGetter,
        random: &mut dyn RngCore,
        pos: BlockPos,
    ) -> bool {
        false
    }

    fn perform_bonemeal(&self, level: &mut dyn LevelAccess, pos: BlockPos, random: &mut dyn RngCore) {
    }
}

pub struct SimpleBlock;

impl BlockBehaviour for SimpleBlock {}
