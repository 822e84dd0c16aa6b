use crate::species::Species;
use arbor_engine::world::block::BlockPos;
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Per-position record kept next to a sapling block.
#[derive(Clone, Debug)]
pub struct SaplingCell {
    pos: BlockPos,
    species: Option<Arc<dyn Species>>,
    pub(crate) converting: bool,
}

impl SaplingCell {
    pub fn new(pos: BlockPos, species: Option<Arc<dyn Species>>) -> Self {
        Self {
            pos,
            species,
            converting: false,
        }
    }

    #[inline]
    pub fn species(&self) -> Option<&Arc<dyn Species>> {
        self.species.as_ref()
    }

    /// Drops the species reference so the sapling yields no seed.
    pub fn clear_species(&mut self) -> Option<Arc<dyn Species>> {
        self.species.take()
    }

    #[inline]
    pub fn is_converting(&self) -> bool {
        self.converting
    }
}

/// Sapling records keyed by the position of their block.
#[derive(Default, Debug)]
pub struct SaplingCells {
    cells: FxHashMap<BlockPos, SaplingCell>,
}

impl SaplingCells {
    pub fn get(&self, pos: BlockPos) -> Option<&SaplingCell> {
        self.cells.get(&pos)
    }

    pub fn get_mut(&mut self, pos: BlockPos) -> Option<&mut SaplingCell> {
        self.cells.get_mut(&pos)
    }

    pub fn insert(&mut self, cell: SaplingCell) -> Option<SaplingCell> {
        self.cells.insert(cell.pos, cell)
    }

    pub fn remove(&mut self, pos: BlockPos) -> Option<SaplingCell> {
        self.cells.remove(&pos)
    }

    pub fn contains(&self, pos: BlockPos) -> bool {
        self.cells.contains_key(&pos)
    }
}
