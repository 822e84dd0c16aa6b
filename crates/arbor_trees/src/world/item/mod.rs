use crate::world::LevelSystems;
use crate::world::level::Level;
use arbor_engine::world::block::BlockPos;
use bevy_app::{App, FixedUpdate, Plugin};
use bevy_ecs::message::{Message, MessageWriter};
use bevy_ecs::schedule::IntoScheduleConfigs;
use bevy_ecs::system::ResMut;
use std::fmt::{Display, Formatter};
use tracing::trace;
use valence_ident::Ident;

/// Hands items dropped into the level over as [`DroppedItem`] messages.
pub struct ItemPlugin;

impl Plugin for ItemPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<DroppedItem>();
        app.add_systems(FixedUpdate, report_dropped_items.in_set(LevelSystems::Report));
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemStack {
    item: Ident<String>,
    count: u8,
}

impl ItemStack {
    pub fn new(item: impl Into<Ident<String>>, count: u8) -> Self {
        Self {
            item: item.into(),
            count,
        }
    }

    pub fn item(&self) -> &Ident<String> {
        &self.item
    }

    pub fn count(&self) -> u8 {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

impl Display for ItemStack {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x {}", self.count, self.item.as_str())
    }
}

/// An item stack spawned into the level at a block position.
#[derive(Message, Clone, Debug, PartialEq, Eq)]
pub struct DroppedItem {
    pub pos: BlockPos,
    pub stack: ItemStack,
}

fn report_dropped_items(mut level: ResMut<Level>, mut writer: MessageWriter<DroppedItem>) {
    let dropped = level.take_dropped_items();
    for item in &dropped {
        trace!("{} dropped at {}", item.stack, item.pos);
    }
    writer.write_batch(dropped);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::level::LevelAccess;
    use bevy_ecs::message::Messages;
    use valence_ident::ident;

    #[test]
    fn dropped_items_leave_the_level_as_messages() {
        let mut app = App::new();
        app.init_resource::<Level>();
        app.add_plugins(ItemPlugin);

        let pos = BlockPos::new(2, 1, 2);
        app.world_mut()
            .resource_mut::<Level>()
            .spawn_item(pos, ItemStack::new(ident!("arbor:oak_seed"), 1));
        app.world_mut().run_schedule(FixedUpdate);

        assert!(app.world().resource::<Level>().dropped_items().is_empty());
        let messages: Vec<_> = app
            .world_mut()
            .resource_mut::<Messages<DroppedItem>>()
            .drain()
            .collect();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].pos, pos);
        assert_eq!(messages[0].stack.to_string(), "1x arbor:oak_seed");
    }
}
