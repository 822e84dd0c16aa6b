use crate::world::block::behaviour::{BlockBehaviour, Properties, TreePart};
use std::fmt::{Debug, Formatter};
use std::hash::{Hash, Hasher};
use valence_ident::Ident;

pub mod arbor;
pub mod behaviour;
pub mod cell;

bitflags::bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct BlockUpdateFlags: u32 {
        /// Queue a neighbor notification for the six adjacent positions.
        const NEIGHBORS = 1;
        const NONE = 0;
        const ALL = BlockUpdateFlags::NEIGHBORS.bits();
    }
}

bitflags::bitflags! {
    /// Soil categories a block belongs to. Species accept soil by intersecting these.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct SoilFlags: u8 {
        const DIRT = 1;
        const SAND = 1 << 1;
        const GRAVEL = 1 << 2;
        const CLAY = 1 << 3;
    }
}

pub struct Block {
    pub identifier: Ident<&'static str>,
    pub properties: &'static Properties,
    pub behaviour: &'static dyn BlockBehaviour,
}

impl Debug for Block {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Block")
            .field("identifier", &self.identifier)
            .field("properties", self.properties)
            .finish_non_exhaustive()
    }
}

impl PartialEq for Block {
    fn eq(&self, other: &Self) -> bool {
        self.identifier == other.identifier
    }
}

impl Eq for Block {}

impl Hash for Block {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identifier.hash(state);
    }
}

impl Block {
    #[inline]
    pub fn hardness(&self) -> f32 {
        self.properties.hardness
    }

    #[inline]
    pub fn is_air(&self) -> bool {
        self.properties.is_air
    }

    #[inline]
    pub fn is_replaceable(&self) -> bool {
        self.properties.replaceable
    }

    #[inline]
    pub fn is_randomly_ticking(&self) -> bool {
        self.properties.is_randomly_ticking
    }

    #[inline]
    pub fn soil(&self) -> SoilFlags {
        self.properties.soil
    }

    #[inline]
    pub fn tree_part(&self) -> TreePart {
        self.properties.tree_part
    }

    #[inline]
    pub fn is_branch(&self) -> bool {
        self.properties.tree_part == TreePart::Branch
    }

    #[inline]
    pub fn is_sapling(&self) -> bool {
        self.properties.tree_part == TreePart::Sapling
    }
}
