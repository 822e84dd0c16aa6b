use crate::world::block::arbor::ArborBlockPlugin;
use crate::world::block_update::BlockUpdatePlugin;
use crate::world::interaction::InteractionPlugin;
use crate::world::item::ItemPlugin;
use crate::world::tick::RandomTickPlugin;
use bevy_app::{App, FixedUpdate, Plugin};
use bevy_ecs::schedule::{ExecutorKind, IntoScheduleConfigs, SystemSet};

pub mod block;
pub mod block_update;
pub mod interaction;
pub mod item;
pub mod level;
pub mod tick;

/// Stages of one fixed tick, run in declaration order.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LevelSystems {
    ApplyRequests,
    Place,
    Tick,
    Interact,
    Propagate,
    Report,
}

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.edit_schedule(FixedUpdate, |s| {
            s.set_executor_kind(ExecutorKind::SingleThreaded);
        });
        app.configure_sets(
            FixedUpdate,
            (
                LevelSystems::ApplyRequests,
                LevelSystems::Place,
                LevelSystems::Tick,
                LevelSystems::Interact,
                LevelSystems::Propagate,
                LevelSystems::Report,
            )
                .chain(),
        );
        app.add_plugins(BlockUpdatePlugin);
        app.add_plugins(RandomTickPlugin);
        app.add_plugins(InteractionPlugin);
        app.add_plugins(ItemPlugin);
        app.add_plugins(ArborBlockPlugin);
    }
}
