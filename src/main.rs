use anyhow::Context;
use arbor_engine::world::block::BlockPos;
use arbor_trees::species::{Species, load_species_file};
use arbor_trees::world::block::arbor::sapling::{SaplingChanged, SaplingOutcome, SeedPlanted};
use arbor_trees::world::block::arbor::{GRASS_BLOCK, SAND};
use arbor_trees::world::item::DroppedItem;
use arbor_trees::world::level::Level;
use arbor_trees::{ArborConfig, ArborPlugin};
use bevy_app::{App, FixedUpdate, Startup};
use bevy_ecs::prelude::*;
use bevy_log::LogPlugin;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{info, warn};
use valence_ident::Ident;

const TICKS: usize = 2400;

fn main() -> anyhow::Result<()> {
    let config_path = std::env::args().nth(1).unwrap_or_else(|| "arbor.json".to_owned());
    let config = ArborConfig::load(&config_path)
        .with_context(|| format!("loading config {config_path}"))?;

    let mut plugin = ArborPlugin::new(config.clone());
    if let Some(species) = custom_species(&config)? {
        plugin = plugin.with_species(species);
    }

    let mut app = App::new();
    app.add_plugins(LogPlugin::default())
        .add_plugins(plugin)
        .add_systems(Startup, setup)
        .add_systems(FixedUpdate, count_outcomes.after(arbor_trees::world::LevelSystems::Report));
    app.init_resource::<Outcomes>();

    app.update();
    for _ in 0..TICKS {
        app.world_mut().run_schedule(FixedUpdate);
    }

    let outcomes = app.world().resource::<Outcomes>();
    let level = app.world().resource::<Level>();
    info!(
        "after {TICKS} ticks: {} grown, {} dropped, {} still growing, {} item(s) on the ground",
        outcomes.grown,
        outcomes.dropped,
        level.ticking_positions().count(),
        outcomes.items
    );
    Ok(())
}

fn custom_species(config: &ArborConfig) -> anyhow::Result<Option<Vec<Arc<dyn Species>>>> {
    if !config.species_file.exists() {
        return Ok(None);
    }
    let species = load_species_file(&config.species_file)
        .with_context(|| format!("loading species {}", config.species_file.display()))?;
    Ok(Some(species))
}

#[derive(Resource, Default)]
struct Outcomes {
    grown: usize,
    dropped: usize,
    items: usize,
}

fn setup(mut level: ResMut<Level>, mut seeds: MessageWriter<SeedPlanted>) {
    level.fill(BlockPos::new(-16, 0, -16), BlockPos::new(15, 0, 15), &GRASS_BLOCK);
    level.fill(BlockPos::new(8, 0, -16), BlockPos::new(15, 0, 15), &SAND);

    let groves = [("arbor:oak", -12), ("arbor:spruce", -2), ("arbor:acacia", 10)];
    for (species, x0) in groves {
        let Ok(species) = Ident::from_str(species) else {
            warn!("bad species id {species}");
            continue;
        };
        // every other column; the seed between two columns is refused
        for x in (x0..x0 + 6).step_by(2) {
            for z in (-14..14).step_by(3) {
                seeds.write(SeedPlanted {
                    pos: BlockPos::new(x, 1, z),
                    species: species.clone(),
                });
            }
        }
        seeds.write(SeedPlanted {
            pos: BlockPos::new(x0 + 1, 1, 1),
            species,
        });
    }
}

fn count_outcomes(
    mut changes: MessageReader<SaplingChanged>,
    mut items: MessageReader<DroppedItem>,
    mut outcomes: ResMut<Outcomes>,
) {
    changes.read().for_each(|change| match change.outcome {
        SaplingOutcome::ConvertToTree => outcomes.grown += 1,
        SaplingOutcome::DropAndClear => outcomes.dropped += 1,
        SaplingOutcome::NoOp => {}
    });
    outcomes.items += items.read().map(|item| item.stack.count() as usize).sum::<usize>();
}
