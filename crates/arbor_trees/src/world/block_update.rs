use crate::world::LevelSystems;
use crate::world::block::{Block, BlockUpdateFlags};
use crate::world::level::{BlockGetter, Level, LevelAccess};
use arbor_engine::direction::Direction;
use arbor_engine::world::block::BlockPos;
use bevy_app::{App, FixedUpdate, Plugin};
use bevy_ecs::message::{Message, MessageReader};
use bevy_ecs::schedule::IntoScheduleConfigs;
use bevy_ecs::system::ResMut;
use tracing::{trace, warn};

pub struct BlockUpdatePlugin;

impl Plugin for BlockUpdatePlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<BlockSetRequest>();
        app.add_message::<NeighborChanged>();
        app.add_systems(
            FixedUpdate,
            apply_set_block_request.in_set(LevelSystems::ApplyRequests),
        );
        app.add_systems(
            FixedUpdate,
            propagate_block_updates.in_set(LevelSystems::Propagate),
        );
    }
}

#[derive(Message, Clone, Copy, Debug)]
pub struct BlockSetRequest {
    pub pos: BlockPos,
    pub block: &'static Block,
    pub flags: BlockUpdateFlags,
}

impl BlockSetRequest {
    /// A change that notifies the neighbors of `pos`.
    pub fn set(pos: BlockPos, block: &'static Block) -> BlockSetRequest {
        BlockSetRequest {
            pos,
            block,
            flags: BlockUpdateFlags::ALL,
        }
    }
}

/// Asks the block at `pos` to re-check itself because `from_pos` changed.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct NeighborChanged {
    pub pos: BlockPos,
    pub from_pos: BlockPos,
}

fn apply_set_block_request(mut reader: MessageReader<BlockSetRequest>, mut level: ResMut<Level>) {
    reader.read().for_each(|request| {
        level.set_block(request.pos, request.block, request.flags);
    });
}

fn propagate_block_updates(mut reader: MessageReader<NeighborChanged>, mut level: ResMut<Level>) {
    reader.read().for_each(|event| {
        notify_neighbor(&mut level, event.pos, event.from_pos);
    });
    let max_depth = level.rules().max_update_depth;
    update_neighbors(&mut level, max_depth);
}

pub fn notify_neighbor(level: &mut Level, pos: BlockPos, from_pos: BlockPos) {
    let block = level.get_block(pos);
    block.behaviour.neighbor_changed(level, pos, from_pos);
}

/// Drains queued block changes, notifying the six neighbors of each one.
///
/// Changes made by the notified blocks are handled in the next round. Anything
/// still queued after `max_depth` rounds stays for the next call.
/// Returns the number of notifications sent.
pub fn update_neighbors(level: &mut Level, max_depth: u16) -> usize {
    let mut notified = 0;
    for _ in 0..max_depth {
        let changes = level.take_block_changes();
        if changes.is_empty() {
            return notified;
        }
        for change in changes {
            trace!(
                "{} -> {} at {}",
                change.old.identifier.as_str(),
                change.new.identifier.as_str(),
                change.pos
            );
            for direction in Direction::UPDATE_ORDER {
                notify_neighbor(level, change.pos.relative(direction), change.pos);
                notified += 1;
            }
        }
    }
    if level.has_pending_changes() {
        warn!("block updates still pending after {max_depth} rounds");
    }
    notified
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::species::tests::oak;
    use crate::world::block::arbor::sapling::SaplingBlock;
    use crate::world::block::arbor::{AIR, GRASS_BLOCK, OAK_BRANCH, SAPLING, STONE};
    use crate::world::level::GameRules;

    const POS: BlockPos = BlockPos::new(0, 1, 0);

    fn planted() -> Level {
        let mut level = Level::default();
        level.fill(BlockPos::new(-3, 0, -3), BlockPos::new(3, 0, 3), &GRASS_BLOCK);
        SaplingBlock::plant(&mut level, POS, oak()).unwrap();
        update_neighbors(&mut level, 16);
        level
    }

    #[test]
    fn quiet_level_sends_nothing() {
        let mut level = Level::default();
        assert_eq!(update_neighbors(&mut level, 16), 0);
    }

    #[test]
    fn every_change_notifies_six_neighbors() {
        let mut level = Level::default();
        level.set_block(BlockPos::new(5, 5, 5), &STONE, BlockUpdateFlags::ALL);
        level.set_block(BlockPos::new(9, 5, 5), &STONE, BlockUpdateFlags::ALL);
        assert_eq!(update_neighbors(&mut level, 16), 12);
        assert!(!level.has_pending_changes());
    }

    #[test]
    fn branch_beside_sapling_drops_it() {
        let mut level = planted();
        level.set_block(POS.relative(Direction::North), &OAK_BRANCH, BlockUpdateFlags::ALL);
        update_neighbors(&mut level, 16);

        assert_eq!(level.get_block(POS), &AIR);
        assert_eq!(level.dropped_items().len(), 1);
        assert_eq!(level.dropped_items()[0].stack.item().as_str(), "arbor:oak_seed");
    }

    #[test]
    fn silent_change_leaves_sapling_until_notified() {
        let mut level = planted();
        let branch = POS.relative(Direction::East);
        level.set_block(branch, &OAK_BRANCH, BlockUpdateFlags::NONE);
        update_neighbors(&mut level, 16);
        assert_eq!(level.get_block(POS), &SAPLING);

        notify_neighbor(&mut level, POS, branch);
        assert_eq!(level.get_block(POS), &AIR);
    }

    #[test]
    fn exhausted_depth_keeps_remaining_changes() {
        let mut level = planted();
        level.set_block(POS.relative(Direction::West), &OAK_BRANCH, BlockUpdateFlags::ALL);

        assert_eq!(update_neighbors(&mut level, 1), 6);
        // the sapling dropped in the first round and queued its own removal
        assert_eq!(level.get_block(POS), &AIR);
        assert!(level.has_pending_changes());
        assert_eq!(update_neighbors(&mut level, 1), 6);
        assert!(!level.has_pending_changes());
    }

    #[test]
    fn systems_apply_requests_and_propagate() {
        let mut app = App::new();
        let mut level = Level::new(GameRules::default());
        level.fill(BlockPos::new(-3, 0, -3), BlockPos::new(3, 0, 3), &GRASS_BLOCK);
        SaplingBlock::plant(&mut level, POS, oak()).unwrap();
        app.insert_resource(level);
        app.add_plugins(BlockUpdatePlugin);
        app.configure_sets(
            FixedUpdate,
            (LevelSystems::ApplyRequests, LevelSystems::Propagate).chain(),
        );

        app.world_mut()
            .write_message(BlockSetRequest::set(POS.relative(Direction::South), &OAK_BRANCH));
        app.world_mut().run_schedule(FixedUpdate);

        let level = app.world().resource::<Level>();
        assert_eq!(level.get_block(POS), &AIR);
        assert_eq!(level.dropped_items().len(), 1);
    }

    #[test]
    fn explicit_neighbor_message_rechecks_block() {
        let mut app = App::new();
        let mut level = Level::default();
        level.fill(BlockPos::new(-3, 0, -3), BlockPos::new(3, 0, 3), &GRASS_BLOCK);
        SaplingBlock::plant(&mut level, POS, oak()).unwrap();
        level.set_block(POS.above(), &STONE, BlockUpdateFlags::NONE);
        app.insert_resource(level);
        app.add_plugins(BlockUpdatePlugin);

        app.world_mut().write_message(NeighborChanged {
            pos: POS,
            from_pos: POS.above(),
        });
        app.world_mut().run_schedule(FixedUpdate);

        assert!(app.world().resource::<Level>().is_empty_block(POS));
    }
}
