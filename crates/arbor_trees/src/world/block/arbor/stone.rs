use crate::world::block::Block;
use crate::world::block::behaviour::{Properties, SimpleBlock};
use valence_ident::ident;

pub const STONE: Block = Block {
    identifier: ident!("stone"),
    properties: &PROPERTIES,
    behaviour: &SimpleBlock,
};

pub const PROPERTIES: Properties = Properties::new().with_strength(1.5);
