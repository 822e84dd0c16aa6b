use crate::world::block::behaviour::{Properties, SimpleBlock, TreePart};
use crate::world::block::{Block, SoilFlags};
use valence_ident::ident;

const DIRT_PROPERTIES: Properties = Properties::new()
    .with_strength(0.5)
    .with_soil(SoilFlags::DIRT);

const SAND_PROPERTIES: Properties = Properties::new()
    .with_strength(0.5)
    .with_soil(SoilFlags::SAND);

const GRASS_PROPERTIES: Properties = Properties::new()
    .with_strength(0.6)
    .with_soil(SoilFlags::DIRT);

const GRAVEL_PROPERTIES: Properties = Properties::new()
    .with_strength(0.6)
    .with_soil(SoilFlags::GRAVEL);

const CLAY_PROPERTIES: Properties = Properties::new()
    .with_strength(0.6)
    .with_soil(SoilFlags::CLAY);

const ROOTY_PROPERTIES: Properties = Properties::new()
    .with_strength(0.6)
    .with_tree_part(TreePart::Root);

pub const GRASS_BLOCK: Block = Block {
    identifier: ident!("grass_block"),
    properties: &GRASS_PROPERTIES,
    behaviour: &SimpleBlock,
};

pub const DIRT: Block = Block {
    identifier: ident!("dirt"),
    properties: &DIRT_PROPERTIES,
    behaviour: &SimpleBlock,
};

pub const COARSE_DIRT: Block = Block {
    identifier: ident!("coarse_dirt"),
    properties: &DIRT_PROPERTIES,
    behaviour: &SimpleBlock,
};

pub const PODZOL: Block = Block {
    identifier: ident!("podzol"),
    properties: &DIRT_PROPERTIES,
    behaviour: &SimpleBlock,
};

pub const SAND: Block = Block {
    identifier: ident!("sand"),
    properties: &SAND_PROPERTIES,
    behaviour: &SimpleBlock,
};

pub const RED_SAND: Block = Block {
    identifier: ident!("red_sand"),
    properties: &SAND_PROPERTIES,
    behaviour: &SimpleBlock,
};

pub const GRAVEL: Block = Block {
    identifier: ident!("gravel"),
    properties: &GRAVEL_PROPERTIES,
    behaviour: &SimpleBlock,
};

pub const CLAY: Block = Block {
    identifier: ident!("clay"),
    properties: &CLAY_PROPERTIES,
    behaviour: &SimpleBlock,
};

// Dirt holding the base of a grown tree. Not soil for new saplings.
pub const ROOTY_DIRT: Block = Block {
    identifier: ident!("arbor:rooty_dirt"),
    properties: &ROOTY_PROPERTIES,
    behaviour: &SimpleBlock,
};
