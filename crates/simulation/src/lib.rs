//! Tile-based city-builder simulation core: grid, warehouses, water coverage,
//! service walkers, house evolution, workforce and production, driven as a set of
//! Bevy plugins over a fixed order of schedule sets.

use bevy::prelude::*;

pub mod clock;
pub mod config;
pub mod game_params;
pub mod grid;
pub mod houses;
pub mod inspect;
pub mod invariant_checks;
pub mod placement;
mod plugin_registration;
pub mod production;
pub mod simulation_sets;
pub mod spatial;
pub mod state_hash;
pub mod stats;
pub mod terrain;
pub mod walkers;
pub mod warehouse;
pub mod workforce;

#[cfg(any(test, feature = "bench"))]
pub mod test_harness;


pub use simulation_sets::{SimulationSet, SimulationUpdateSet};

use clock::{
    advance_sim_clock, sync_fixed_timestep, sync_virtual_pause, unclamp_virtual_time, SimClock,
};
use game_params::GameParams;
use grid::TileGrid;
use houses::HouseGrid;
use terrain::TerrainGrid;
use walkers::ServiceExpiryGrid;
use warehouse::WarehouseLedger;

// ---------------------------------------------------------------------------
// Core resources
// ---------------------------------------------------------------------------

/// Global tick counter incremented each FixedUpdate.
#[derive(Resource, Default)]
pub struct TickCounter(pub u64);

/// Shared throttle timer for checks that don't need to run every fixed step.
#[derive(Resource, Default)]
pub struct SlowTickTimer {
    pub counter: u32,
}

impl SlowTickTimer {
    pub const INTERVAL: u32 = 10; // every 10 fixed steps (10 s at the default step)

    pub fn tick(&mut self) {
        self.counter += 1;
    }

    pub fn should_run(&self) -> bool {
        self.counter.is_multiple_of(Self::INTERVAL)
    }
}

pub fn tick_slow_timer(mut timer: ResMut<SlowTickTimer>, mut tick: ResMut<TickCounter>) {
    timer.tick();
    tick.0 = tick.0.wrapping_add(1);
}

/// The whole simulation. Insert a [`GameParams`] (and optionally a [`TileGrid`] /
/// [`TerrainGrid`]) before adding the plugin to override the defaults; grid-sized
/// resources are created from `GameParams::grid` when absent.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        let params = app
            .world()
            .get_resource::<GameParams>()
            .cloned()
            .unwrap_or_default()
            .sanitized();
        let (cols, rows) = (params.grid.cols, params.grid.rows);
        let cells = cols * rows;

        if !app.world().contains_resource::<TileGrid>() {
            app.insert_resource(TileGrid::new(cols, rows));
        }
        if !app.world().contains_resource::<TerrainGrid>() {
            app.insert_resource(TerrainGrid::new(cols, rows));
        }
        app.insert_resource(params)
            .insert_resource(HouseGrid::new(cells))
            .insert_resource(ServiceExpiryGrid::new(cells))
            .init_resource::<WarehouseLedger>()
            .init_resource::<SimClock>()
            .init_resource::<TickCounter>()
            .init_resource::<SlowTickTimer>();

        app.configure_sets(
            FixedUpdate,
            (
                SimulationSet::PreSim,
                SimulationSet::Simulation,
                SimulationSet::PostSim,
            )
                .chain(),
        )
        .configure_sets(
            Update,
            (
                SimulationUpdateSet::Input,
                SimulationUpdateSet::Layers,
                SimulationUpdateSet::Walkers,
                SimulationUpdateSet::Houses,
                SimulationUpdateSet::Reporting,
            )
                .chain(),
        );

        app.add_systems(Startup, unclamp_virtual_time)
            .add_systems(First, sync_virtual_pause.before(bevy::time::TimeSystem))
            .add_systems(
                First,
                (advance_sim_clock, sync_fixed_timestep)
                    .chain()
                    .after(bevy::time::TimeSystem),
            )
            .add_systems(FixedUpdate, tick_slow_timer.in_set(SimulationSet::PreSim));

        plugin_registration::register_feature_plugins(app);
    }
}
