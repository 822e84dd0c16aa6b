use crate::world::block::Block;
use crate::world::block::behaviour::{Properties, SimpleBlock};
use valence_ident::ident;

pub const AIR: Block = Block {
    identifier: ident!("air"),
    properties: &PROPERTIES,
    behaviour: &SimpleBlock,
};

pub const PROPERTIES: Properties = Properties::new().replaceable().no_collision().air();
