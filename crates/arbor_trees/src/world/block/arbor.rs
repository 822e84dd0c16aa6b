use crate::world::block::Block;
use bevy_app::{App, Plugin};

macro_rules! declare_blocks {
    (
        $(
            $module:ident => [$($const_name:ident),+ $(,)?]
            $([$($plugin:ident),* $(,)?])?
        ),* $(,)?
    ) => {
        $(
            pub mod $module;
        )*

        $(
            $(
                pub use $module::$const_name;
            )+
        )*

        pub static ALL_BLOCKS: &[&Block] = &[$($(&$const_name),+),*];

        pub struct ArborBlockPlugin;

        impl Plugin for ArborBlockPlugin {
            fn build(&self, app: &mut App) {
                $(
                    $($(
                        app.add_plugins($module::$plugin);
                    )*)?
                )*
            }
        }
    };
}

declare_blocks! {
    air => [AIR],
    stone => [STONE],
    soil => [GRASS_BLOCK, DIRT, COARSE_DIRT, PODZOL, SAND, RED_SAND, GRAVEL, CLAY, ROOTY_DIRT],
    branch => [OAK_BRANCH, SPRUCE_BRANCH, ACACIA_BRANCH],
    leaves => [OAK_LEAVES, SPRUCE_LEAVES, ACACIA_LEAVES],
    sapling => [SAPLING] [SaplingBlockPlugin],
}

pub fn block_by_name(name: &str) -> Option<&'static Block> {
    ALL_BLOCKS
        .iter()
        .copied()
        .find(|block| block.identifier.as_str() == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn identifiers_are_unique() {
        let names: FxHashSet<_> = ALL_BLOCKS.iter().map(|b| b.identifier.as_str()).collect();
        assert_eq!(names.len(), ALL_BLOCKS.len());
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!(block_by_name("minecraft:grass_block"), Some(&GRASS_BLOCK));
        assert_eq!(block_by_name("arbor:oak_branch"), Some(&OAK_BRANCH));
        assert_eq!(block_by_name("arbor:missing"), None);
    }

    #[test]
    fn plugin_adds_block_plugins() {
        let mut app = App::new();
        app.add_plugins(ArborBlockPlugin);
        assert!(app.is_plugin_added::<sapling::SaplingBlockPlugin>());
    }
}
