use crate::world::block::Block;
use crate::world::block::behaviour::{Properties, SimpleBlock, TreePart};
use valence_ident::ident;

pub const PROPERTIES: Properties = Properties::new()
    .with_strength(0.2)
    .with_tree_part(TreePart::Leaves);

pub const OAK_LEAVES: Block = Block {
    identifier: ident!("arbor:oak_leaves"),
    properties: &PROPERTIES,
    behaviour: &SimpleBlock,
};

pub const SPRUCE_LEAVES: Block = Block {
    identifier: ident!("arbor:spruce_leaves"),
    properties: &PROPERTIES,
    behaviour: &SimpleBlock,
};

pub const ACACIA_LEAVES: Block = Block {
    identifier: ident!("arbor:acacia_leaves"),
    properties: &PROPERTIES,
    behaviour: &SimpleBlock,
};
