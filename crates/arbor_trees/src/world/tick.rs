use crate::world::LevelSystems;
use crate::world::level::{BlockGetter, Level};
use arbor_engine::world::block::BlockPos;
use bevy_app::{App, FixedUpdate, Plugin};
use bevy_ecs::message::{Message, MessageReader, MessageWriter};
use bevy_ecs::prelude::Resource;
use bevy_ecs::schedule::IntoScheduleConfigs;
use bevy_ecs::system::{Res, ResMut};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Blocks in a 16x16x16 section. A block is ticked with probability `speed / SECTION_VOLUME`.
pub const SECTION_VOLUME: u32 = 16 * 16 * 16;

pub struct RandomTickPlugin;

impl Plugin for RandomTickPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<RandomTick>();
        app.init_resource::<TickRandom>();
        app.add_systems(
            FixedUpdate,
            (schedule_random_ticks, handle_random_ticks)
                .chain()
                .in_set(LevelSystems::Tick),
        );
    }
}

#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct RandomTick {
    pub pos: BlockPos,
}

/// Random source shared by ticks and bone meal.
#[derive(Resource)]
pub struct TickRandom(pub StdRng);

impl TickRandom {
    pub fn from_seed(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl Default for TickRandom {
    fn default() -> Self {
        Self::from_seed(0)
    }
}

fn schedule_random_ticks(
    level: Res<Level>,
    mut random: ResMut<TickRandom>,
    mut writer: MessageWriter<RandomTick>,
) {
    let speed = level.rules().random_tick_speed;
    if speed == 0 {
        return;
    }
    let rng = &mut random.0;
    let ticks: Vec<_> = level
        .ticking_positions()
        .filter(|_| rng.random_range(0..SECTION_VOLUME) < speed)
        .map(|pos| RandomTick { pos })
        .collect();
    writer.write_batch(ticks);
}

fn handle_random_ticks(
    mut reader: MessageReader<RandomTick>,
    mut level: ResMut<Level>,
    mut random: ResMut<TickRandom>,
) {
    reader.read().for_each(|tick| {
        let block = level.get_block(tick.pos);
        if block.is_randomly_ticking() {
            block.behaviour.random_tick(&mut *level, tick.pos, &mut random.0);
        }
    });
}
