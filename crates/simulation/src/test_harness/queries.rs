//! Query and simulation-stepping methods for `TestCity`.

use bevy::prelude::*;

use crate::clock::SimClock;
use crate::game_params::GameParams;
use crate::grid::{TileGrid, TileKind};
use crate::houses::HouseGrid;
use crate::inspect::{capture_snapshot, inspect_building, BuildingInspection, CitySnapshot};
use crate::invariant_checks::CoreInvariantViolations;
use crate::placement::TileEdit;
use crate::production::{BuildingReport, BuildingReports};
use crate::spatial::WaterPotentialGrid;
use crate::state_hash::StateHash;
use crate::stats::CityStats;
use crate::walkers::{ServiceExpiryGrid, Walker, WalkerKind};
use crate::warehouse::{ResourceKind, WarehouseLedger};
use crate::workforce::{Assignment, Workforce};

use super::TestCity;

impl TestCity {
    // -----------------------------------------------------------------------
    // Simulation
    // -----------------------------------------------------------------------

    /// One frame of `dt_ms`: advance the clock, run every whole fixed step that
    /// elapsed, then run `Update`. A paused clock accumulates no fixed steps.
    pub fn frame(&mut self, dt_ms: f64) {
        let step_ms = self.params().production.step_ms as f64;
        let world = self.app.world_mut();
        let paused = {
            let mut clock = world.resource_mut::<SimClock>();
            clock.advance(dt_ms);
            clock.paused
        };
        if !paused {
            self.fixed_accumulator_ms += dt_ms.max(0.0);
        }
        while self.fixed_accumulator_ms >= step_ms {
            self.fixed_accumulator_ms -= step_ms;
            world.run_schedule(FixedUpdate);
        }
        world.run_schedule(Update);
    }

    /// Frames of `frame_ms` until `total_ms` has elapsed; the last frame is
    /// shortened to land exactly on `total_ms`.
    pub fn run_for_ms(&mut self, total_ms: f64, frame_ms: f64) {
        let frame_ms = frame_ms.max(1.0);
        let mut left = total_ms;
        while left > 0.0 {
            let dt = frame_ms.min(left);
            self.frame(dt);
            left -= dt;
        }
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.app.world_mut().resource_mut::<SimClock>().paused = paused;
    }

    /// Run N fixed steps directly, without advancing the clock or `Update`.
    pub fn tick(&mut self, n: u32) {
        for _ in 0..n {
            self.app.world_mut().run_schedule(FixedUpdate);
        }
    }

    // -----------------------------------------------------------------------
    // Input
    // -----------------------------------------------------------------------

    /// Queue an edit; it is applied by the next frame.
    pub fn send_edit(&mut self, edit: TileEdit) {
        self.app.world_mut().send_event(edit);
    }

    /// Write straight into the grid, bypassing events.
    pub fn set_tile(&mut self, x: usize, y: usize, kind: TileKind) {
        self.app
            .world_mut()
            .resource_mut::<TileGrid>()
            .set(x, y, kind);
    }

    // -----------------------------------------------------------------------
    // Queries (note: Bevy's World::query() requires &mut World)
    // -----------------------------------------------------------------------

    pub fn world(&self) -> &World {
        self.app.world()
    }

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    pub fn params(&self) -> &GameParams {
        self.app.world().resource::<GameParams>()
    }

    pub fn now_ms(&self) -> f64 {
        self.app.world().resource::<SimClock>().now_ms
    }

    pub fn grid(&self) -> &TileGrid {
        self.app.world().resource::<TileGrid>()
    }

    pub fn cell(&self, x: usize, y: usize) -> usize {
        self.grid().index(x, y)
    }

    pub fn houses(&self) -> &HouseGrid {
        self.app.world().resource::<HouseGrid>()
    }

    pub fn house_level(&self, x: usize, y: usize) -> u8 {
        self.houses().level(self.cell(x, y))
    }

    pub fn potential(&self) -> &WaterPotentialGrid {
        self.app.world().resource::<WaterPotentialGrid>()
    }

    pub fn expiry(&self) -> &ServiceExpiryGrid {
        self.app.world().resource::<ServiceExpiryGrid>()
    }

    pub fn ledger(&self) -> &WarehouseLedger {
        self.app.world().resource::<WarehouseLedger>()
    }

    /// Quantity of `resource` in the warehouse at (x, y); 0 if there is none.
    pub fn stock_at(&self, x: usize, y: usize, resource: ResourceKind) -> u32 {
        self.ledger()
            .stock(self.cell(x, y))
            .map_or(0, |s| s.get(resource))
    }

    pub fn workforce(&self) -> &Workforce {
        self.app.world().resource::<Workforce>()
    }

    pub fn assignment(&self, x: usize, y: usize) -> Option<Assignment> {
        self.workforce().assignment(self.cell(x, y)).copied()
    }

    pub fn report(&self, x: usize, y: usize) -> Option<&BuildingReport> {
        self.app
            .world()
            .resource::<BuildingReports>()
            .get(self.cell(x, y))
    }

    pub fn stats(&self) -> &CityStats {
        self.app.world().resource::<CityStats>()
    }

    pub fn state_hash(&self) -> u64 {
        self.app.world().resource::<StateHash>().hash
    }

    pub fn violations(&self) -> &CoreInvariantViolations {
        self.app.world().resource::<CoreInvariantViolations>()
    }

    /// All walkers, sorted by id.
    pub fn walkers(&mut self) -> Vec<Walker> {
        let world = self.app.world_mut();
        let mut walkers: Vec<Walker> = world.query::<&Walker>().iter(world).cloned().collect();
        walkers.sort_by_key(|w| w.id);
        walkers
    }

    pub fn walker_count(&mut self, kind: WalkerKind) -> usize {
        self.walkers().iter().filter(|w| w.kind == kind).count()
    }

    pub fn inspect(&self, x: usize, y: usize) -> Option<BuildingInspection> {
        inspect_building(self.app.world(), x, y)
    }

    pub fn snapshot(&mut self) -> CitySnapshot {
        capture_snapshot(self.app.world_mut())
    }
}
