use crate::species::SpeciesRegistry;
use crate::world::LevelSystems;
use crate::world::block::arbor::sapling::{PlantError, SaplingBlock, SaplingChanged};
use crate::world::level::Level;
use arbor_engine::world::block::BlockPos;
use bevy_app::{App, FixedUpdate, Plugin};
use bevy_ecs::message::{Message, MessageReader, MessageWriter};
use bevy_ecs::schedule::IntoScheduleConfigs;
use bevy_ecs::system::{Res, ResMut};
use tracing::{debug, warn};
use valence_ident::Ident;

pub struct SaplingBlockPlugin;

impl Plugin for SaplingBlockPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<SeedPlanted>();
        app.add_message::<SaplingChanged>();
        app.add_systems(FixedUpdate, plant_seeds.in_set(LevelSystems::Place));
        app.add_systems(FixedUpdate, report_sapling_changes.in_set(LevelSystems::Report));
    }
}

/// A seed of `species` put into the ground at `pos`.
#[derive(Message, Clone, Debug)]
pub struct SeedPlanted {
    pub pos: BlockPos,
    pub species: Ident<String>,
}

fn plant_seeds(
    mut messages: MessageReader<SeedPlanted>,
    mut level: ResMut<Level>,
    registry: Res<SpeciesRegistry>,
) {
    messages.read().for_each(|event| {
        let result = match registry.get(&event.species) {
            Some(species) => SaplingBlock::plant(&mut *level, event.pos, species.clone()),
            None => Err(PlantError::UnknownSpecies(event.species.as_str().to_owned())),
        };
        if let Err(err) = result {
            warn!("seed not planted: {err}");
        }
    });
}

fn report_sapling_changes(mut level: ResMut<Level>, mut writer: MessageWriter<SaplingChanged>) {
    let changes = level.take_sapling_changes();
    if changes.is_empty() {
        return;
    }
    debug!("{} sapling(s) changed", changes.len());
    writer.write_batch(changes);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::species::tests::oak;
    use crate::world::block::BlockUpdateFlags;
    use crate::world::block::arbor::{GRASS_BLOCK, SAPLING};
    use crate::world::block::arbor::sapling::SaplingOutcome;
    use crate::world::level::{BlockGetter, LevelAccess};
    use bevy_ecs::message::Messages;
    use std::str::FromStr;

    fn app() -> App {
        let mut app = App::new();
        let mut registry = SpeciesRegistry::default();
        let oak = oak();
        registry.insert(oak.identifier().clone(), oak);
        app.insert_resource(registry);

        let mut level = Level::default();
        level.fill(BlockPos::new(-2, 0, -2), BlockPos::new(2, 0, 2), &GRASS_BLOCK);
        app.insert_resource(level);
        app.add_plugins(SaplingBlockPlugin);
        app
    }

    #[test]
    fn planting_message_places_sapling() {
        let mut app = app();
        let pos = BlockPos::new(0, 1, 0);
        app.world_mut().write_message(SeedPlanted {
            pos,
            species: Ident::from_str("arbor:oak").unwrap(),
        });
        app.world_mut().run_schedule(FixedUpdate);

        let level = app.world().resource::<Level>();
        assert_eq!(level.get_block(pos), &SAPLING);
        assert!(SaplingBlock::species_at(level, pos).is_some());
    }

    #[test]
    fn unknown_species_is_skipped() {
        let mut app = app();
        let pos = BlockPos::new(0, 1, 0);
        app.world_mut().write_message(SeedPlanted {
            pos,
            species: Ident::from_str("arbor:baobab").unwrap(),
        });
        app.world_mut().run_schedule(FixedUpdate);

        assert!(app.world().resource::<Level>().is_empty_block(pos));
    }

    #[test]
    fn changes_are_forwarded_as_messages() {
        let mut app = app();
        let pos = BlockPos::new(1, 1, 1);
        {
            let mut level = app.world_mut().resource_mut::<Level>();
            SaplingBlock::plant(&mut *level, pos, oak()).unwrap();
            level.set_block(pos.above(), &GRASS_BLOCK, BlockUpdateFlags::NONE);
            SaplingBlock::grow(&mut *level, pos);
        }
        app.world_mut().run_schedule(FixedUpdate);

        let changes: Vec<_> = app
            .world_mut()
            .resource_mut::<Messages<SaplingChanged>>()
            .drain()
            .collect();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].pos, pos);
        assert_eq!(changes[0].outcome, SaplingOutcome::DropAndClear);
    }
}
