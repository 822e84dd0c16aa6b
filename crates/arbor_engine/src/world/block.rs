use crate::direction::Direction;
use bevy_math::prelude::*;
use std::fmt::Display;
use std::hash::{Hash, Hasher};

#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct BlockPos(IVec3);

impl Display for BlockPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl ::core::ops::Deref for BlockPos {
    type Target = IVec3;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl BlockPos {
    pub const ZERO: BlockPos = BlockPos(IVec3::ZERO);

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self(IVec3::new(x, y, z))
    }

    #[inline]
    pub fn relative(&self, direction: Direction) -> BlockPos {
        Self(self.0 + direction.normal())
    }

    #[inline]
    pub fn above(&self) -> BlockPos {
        self.relative(Direction::Up)
    }

    #[inline]
    pub fn below(&self) -> BlockPos {
        self.relative(Direction::Down)
    }

    /// The four positions sharing a face with this one on the same layer.
    pub fn horizontal_neighbors(&self) -> impl Iterator<Item = BlockPos> + '_ {
        Direction::HORIZONTALS.into_iter().map(move |dir| self.relative(dir))
    }

    const PACKED_X_LENGTH: usize = 26;
    const PACKED_Z_LENGTH: usize = 26;
    const PACKED_Y_LENGTH: usize = 12;
    const PACKED_X_MASK: u64 = (1 << Self::PACKED_X_LENGTH) - 1;
    const PACKED_Y_MASK: u64 = (1 << Self::PACKED_Y_LENGTH) - 1;
    const PACKED_Z_MASK: u64 = (1 << Self::PACKED_Z_LENGTH) - 1;

    pub fn as_packed(&self) -> u64 {
        (self.x as u64 & Self::PACKED_X_MASK) << 38
            | (self.y as u64 & Self::PACKED_Y_MASK)
            | (self.z as u64 & Self::PACKED_Z_MASK) << 12
    }
}

impl Hash for BlockPos {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_packed().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn above_and_below() {
        let pos = BlockPos::new(4, 64, -3);
        assert_eq!(pos.above(), BlockPos::new(4, 65, -3));
        assert_eq!(pos.below(), BlockPos::new(4, 63, -3));
        assert_eq!(pos.above().below(), pos);
    }

    #[test]
    fn horizontal_neighbors_stay_on_layer() {
        let pos = BlockPos::new(0, 10, 0);
        let neighbors: Vec<_> = pos.horizontal_neighbors().collect();
        assert_eq!(neighbors.len(), 4);
        for neighbor in neighbors {
            assert_eq!(neighbor.y, 10);
            assert_eq!((neighbor.x - pos.x).abs() + (neighbor.z - pos.z).abs(), 1);
        }
        assert!(pos.horizontal_neighbors().any(|n| n == pos.relative(Direction::West)));
    }

    #[test]
    fn hash_distinguishes_nearby_positions() {
        let mut set = FxHashSet::default();
        for x in -2..=2 {
            for y in -2..=2 {
                for z in -2..=2 {
                    set.insert(BlockPos::new(x, y, z));
                }
            }
        }
        assert_eq!(set.len(), 125);
        assert!(set.contains(&BlockPos::new(-2, 2, 0)));
    }

    #[test]
    fn display() {
        assert_eq!(BlockPos::new(1, -2, 3).to_string(), "(1, -2, 3)");
    }
}
