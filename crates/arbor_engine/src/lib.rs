pub mod direction;
pub mod world;
