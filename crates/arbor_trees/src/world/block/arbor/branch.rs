use crate::world::block::Block;
use crate::world::block::behaviour::{Properties, SimpleBlock, TreePart};
use valence_ident::ident;

pub const PROPERTIES: Properties = Properties::new()
    .with_strength(2.0)
    .with_tree_part(TreePart::Branch);

pub const OAK_BRANCH: Block = Block {
    identifier: ident!("arbor:oak_branch"),
    properties: &PROPERTIES,
    behaviour: &SimpleBlock,
};

pub const SPRUCE_BRANCH: Block = Block {
    identifier: ident!("arbor:spruce_branch"),
    properties: &PROPERTIES,
    behaviour: &SimpleBlock,
};

pub const ACACIA_BRANCH: Block = Block {
    identifier: ident!("arbor:acacia_branch"),
    properties: &PROPERTIES,
    behaviour: &SimpleBlock,
};
