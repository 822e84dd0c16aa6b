use crate::world::LevelSystems;
use crate::world::block::BlockUpdateFlags;
use crate::world::block::arbor::AIR;
use crate::world::item::ItemStack;
use crate::world::level::{BlockGetter, Level, LevelAccess};
use crate::world::tick::TickRandom;
use arbor_engine::world::block::BlockPos;
use bevy_app::{App, FixedUpdate, Plugin};
use bevy_ecs::message::{Message, MessageReader};
use bevy_ecs::schedule::IntoScheduleConfigs;
use bevy_ecs::system::ResMut;
use rand::RngCore;
use tracing::debug;

pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<BoneMealUsed>();
        app.add_message::<PlayerWillDestroyBlock>();
        app.add_systems(
            FixedUpdate,
            (handle_bone_meal, handle_player_will_destroy_block)
                .chain()
                .in_set(LevelSystems::Interact),
        );
    }
}

#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoneMealUsed {
    pub pos: BlockPos,
}

#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerWillDestroyBlock {
    pub pos: BlockPos,
    pub creative: bool,
}

/// Uses bone meal on the block at `pos`. Returns whether it was consumed.
pub fn apply_bone_meal(level: &mut Level, pos: BlockPos, random: &mut dyn RngCore) -> bool {
    let block = level.get_block(pos);
    if !block.behaviour.is_valid_bonemeal_target(level, pos) {
        return false;
    }
    if block.behaviour.is_bonemeal_success(level, random, pos) {
        block.behaviour.perform_bonemeal(level, pos, random);
    }
    true
}

/// Breaks the block at `pos` for a player and spawns what it drops.
///
/// The block stays in place until its drops have been collected.
pub fn harvest_block(level: &mut Level, pos: BlockPos, creative: bool) -> Vec<ItemStack> {
    let block = level.get_block(pos);
    if block.is_air() {
        return Vec::new();
    }
    block.behaviour.player_will_destroy(level, pos, creative);
    let drops = block.behaviour.get_drops(level, pos);
    for stack in &drops {
        level.spawn_item(pos, stack.clone());
    }
    level.set_block(pos, &AIR, BlockUpdateFlags::ALL);
    debug!(
        "{} broken at {} ({} drop(s))",
        block.identifier.as_str(),
        pos,
        drops.len()
    );
    drops
}

fn handle_bone_meal(
    mut reader: MessageReader<BoneMealUsed>,
    mut level: ResMut<Level>,
    mut random: ResMut<TickRandom>,
) {
    reader.read().for_each(|event| {
        apply_bone_meal(&mut level, event.pos, &mut random.0);
    });
}

fn handle_player_will_destroy_block(
    mut reader: MessageReader<PlayerWillDestroyBlock>,
    mut level: ResMut<Level>,
) {
    reader.read().for_each(|event| {
        harvest_block(&mut level, event.pos, event.creative);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::species::{DataSpecies, Species};
    use crate::species::tests::oak;
    use crate::world::block::arbor::sapling::SaplingBlock;
    use crate::world::block::arbor::{GRASS_BLOCK, OAK_BRANCH, OAK_LEAVES, STONE};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::sync::Arc;
    use valence_ident::ident;

    const POS: BlockPos = BlockPos::new(0, 1, 0);

    fn planted(species: Arc<dyn Species>) -> Level {
        let mut level = Level::default();
        level.fill(BlockPos::new(-2, 0, -2), BlockPos::new(2, 0, 2), &GRASS_BLOCK);
        SaplingBlock::plant(&mut level, POS, species).unwrap();
        level
    }

    #[test]
    fn survival_harvest_drops_exactly_one_seed() {
        let mut level = planted(oak());
        let drops = harvest_block(&mut level, POS, false);

        assert_eq!(drops, vec![ItemStack::new(ident!("arbor:oak_seed"), 1)]);
        assert_eq!(level.dropped_items().len(), 1);
        assert!(level.is_empty_block(POS));
        assert!(!level.cells().contains(POS));
    }

    #[test]
    fn creative_harvest_drops_nothing() {
        let mut level = planted(oak());
        assert!(harvest_block(&mut level, POS, true).is_empty());
        assert!(level.dropped_items().is_empty());
        assert!(level.is_empty_block(POS));
    }

    #[test]
    fn harvesting_air_is_noop() {
        let mut level = Level::default();
        assert!(harvest_block(&mut level, POS, false).is_empty());
        assert!(!level.has_pending_changes());
    }

    #[test]
    fn plain_blocks_drop_nothing() {
        let mut level = Level::default();
        level.set_block(POS, &STONE, BlockUpdateFlags::NONE);
        assert!(harvest_block(&mut level, POS, false).is_empty());
        assert!(level.is_empty_block(POS));
    }

    #[test]
    fn bone_meal_needs_a_willing_species() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut level = Level::default();
        level.set_block(POS, &STONE, BlockUpdateFlags::NONE);
        assert!(!apply_bone_meal(&mut level, POS, &mut rng));

        let stubborn = Arc::new(DataSpecies::new(
            ident!("arbor:stubborn"),
            ident!("arbor:stubborn_seed"),
            &OAK_BRANCH,
            &OAK_LEAVES,
        ));
        let mut level = planted(stubborn);
        assert!(!apply_bone_meal(&mut level, POS, &mut rng));
        assert!(level.get_block(POS).is_sapling());
    }

    fn fertile(chance: f32) -> Arc<dyn Species> {
        Arc::new(
            DataSpecies::new(
                ident!("arbor:fertile"),
                ident!("arbor:fertile_seed"),
                &OAK_BRANCH,
                &OAK_LEAVES,
            )
            .with_bone_meal(chance),
        )
    }

    #[test]
    fn guaranteed_bone_meal_grows_tree() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut level = planted(fertile(1.0));
        assert!(apply_bone_meal(&mut level, POS, &mut rng));
        assert_eq!(level.get_block(POS), &OAK_BRANCH);
        assert_eq!(level.get_block(POS.above()), &OAK_LEAVES);
    }

    #[test]
    fn failed_roll_still_consumes_bone_meal() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut level = planted(fertile(0.0));
        for _ in 0..16 {
            assert!(apply_bone_meal(&mut level, POS, &mut rng));
        }
        assert!(level.get_block(POS).is_sapling());
        assert!(level.dropped_items().is_empty());
    }

    #[test]
    fn bone_meal_under_blocked_sky_drops_seed() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut level = planted(fertile(1.0));
        level.set_block(POS.above(), &STONE, BlockUpdateFlags::NONE);

        assert!(apply_bone_meal(&mut level, POS, &mut rng));
        assert!(level.is_empty_block(POS));
        assert_eq!(level.dropped_items().len(), 1);
        assert_eq!(
            level.dropped_items()[0].stack,
            ItemStack::new(ident!("arbor:fertile_seed"), 1)
        );
        assert!(!level.cells().contains(POS));
    }

    #[test]
    fn messages_drive_harvest() {
        let mut app = App::new();
        app.insert_resource(planted(oak()));
        app.init_resource::<TickRandom>();
        app.add_plugins(InteractionPlugin);

        app.world_mut().write_message(PlayerWillDestroyBlock {
            pos: POS,
            creative: false,
        });
        app.world_mut().run_schedule(FixedUpdate);

        let level = app.world().resource::<Level>();
        assert!(level.is_empty_block(POS));
        assert_eq!(level.dropped_items().len(), 1);
    }
}
