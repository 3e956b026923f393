//! # TestCity — headless integration test harness
//!
//! Provides a fluent builder that wraps `bevy::app::App` + `SimulationPlugin`
//! for running integration tests without a window, renderer or wall clock.

mod assertions;
mod queries;
mod setup;

use bevy::app::App;
use bevy::prelude::*;

use crate::game_params::GameParams;
use crate::SimulationPlugin;

/// A headless Bevy App wrapping `SimulationPlugin` for integration testing.
///
/// No `TimePlugin` is installed: [`TestCity::frame`] advances the simulation
/// clock by an exact number of milliseconds, runs `FixedUpdate` once per whole
/// production step that elapsed, then runs `Update`. Runs are fully
/// reproducible.
pub struct TestCity {
    app: App,
    /// Milliseconds not yet consumed by a fixed step.
    fixed_accumulator_ms: f64,
}

impl Default for TestCity {
    fn default() -> Self {
        Self::new()
    }
}

impl TestCity {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// An empty 64x64 city with default parameters.
    pub fn new() -> Self {
        Self::with_params(GameParams::default())
    }

    /// An empty city of the given size.
    pub fn with_size(cols: usize, rows: usize) -> Self {
        let mut params = GameParams::default();
        params.grid.cols = cols;
        params.grid.rows = rows;
        Self::with_params(params)
    }

    pub fn with_params(params: GameParams) -> Self {
        let mut app = App::new();
        app.insert_resource(params);
        app.add_plugins(SimulationPlugin);
        app.world_mut().run_schedule(Startup);
        Self {
            app,
            fixed_accumulator_ms: 0.0,
        }
    }
}
