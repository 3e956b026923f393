//! Runtime invariant guards for warehouse stock, house levels and production
//! progress.
//!
//! These systems run every slow-tick cycle and validate that core state hasn't
//! become corrupted. On violation, a warning is logged, the violation counted and
//! the value clamped back into range.

use bevy::prelude::*;

use crate::config::HOUSE_MAX_LEVEL;
use crate::game_params::GameParams;
use crate::grid::TileGrid;
use crate::houses::HouseGrid;
use crate::production::{recipe_streams, ProductionProgress};
use crate::warehouse::{ResourceKind, WarehouseLedger, WarehouseStock};
use crate::SlowTickTimer;

/// Number of violations found by the last validation pass. Used by tests.
#[derive(Resource, Default, Debug)]
pub struct CoreInvariantViolations {
    pub warehouse_over_capacity: u32,
    pub house_level: u32,
    pub production_progress: u32,
}

/// Takes the excess over `capacity` from the largest entries first. Returns the
/// quantity removed.
pub fn clamp_stock_to_capacity(stock: &mut WarehouseStock, capacity: u32) -> u32 {
    let mut excess = stock.total().saturating_sub(capacity);
    let removed = excess;
    while excess > 0 {
        let Some(&largest) = ResourceKind::ALL.iter().max_by_key(|&&r| stock.get(r)) else {
            break;
        };
        let taken = stock.take(largest, excess);
        if taken == 0 {
            break;
        }
        excess -= taken;
    }
    removed - excess
}

// ---------------------------------------------------------------------------
// Warehouse checks
// ---------------------------------------------------------------------------

/// Every warehouse holds at most `capacity` units in total.
pub fn validate_warehouses(
    slow_tick: Res<SlowTickTimer>,
    params: Res<GameParams>,
    mut ledger: ResMut<WarehouseLedger>,
    mut violations: ResMut<CoreInvariantViolations>,
) {
    if !slow_tick.should_run() {
        return;
    }
    violations.warehouse_over_capacity = 0;
    let capacity = params.warehouse.capacity;

    for (&cell, stock) in ledger.stocks.iter_mut() {
        let total = stock.total();
        if total <= capacity {
            continue;
        }
        let removed = clamp_stock_to_capacity(stock, capacity);
        warn!(
            "Invariant violation: warehouse {} holds {} > capacity {}. Removed {}.",
            cell, total, capacity, removed
        );
        violations.warehouse_over_capacity += 1;
    }
}

// ---------------------------------------------------------------------------
// House and production checks
// ---------------------------------------------------------------------------

pub fn validate_houses(
    slow_tick: Res<SlowTickTimer>,
    mut houses: ResMut<HouseGrid>,
    mut violations: ResMut<CoreInvariantViolations>,
) {
    if !slow_tick.should_run() {
        return;
    }
    violations.house_level = 0;
    for level in houses.levels.iter_mut() {
        if *level > HOUSE_MAX_LEVEL {
            warn!(
                "Invariant violation: house level {}. Clamping to {}.",
                level, HOUSE_MAX_LEVEL
            );
            *level = HOUSE_MAX_LEVEL;
            violations.house_level += 1;
        }
    }
}

/// Progress accumulators stay finite and within one cycle.
pub fn validate_production_progress(
    slow_tick: Res<SlowTickTimer>,
    grid: Res<TileGrid>,
    mut progress: ResMut<ProductionProgress>,
    mut violations: ResMut<CoreInvariantViolations>,
) {
    if !slow_tick.should_run() {
        return;
    }
    violations.production_progress = 0;
    for (&cell, accumulators) in progress.streams.iter_mut() {
        let kind = grid.cells.get(cell).copied().unwrap_or_default();
        let streams = recipe_streams(kind);
        for (i, acc) in accumulators.iter_mut().enumerate() {
            let max = streams.get(i).map_or(0.0, |r| r.duration_ms as f64);
            if acc.is_finite() && (0.0..=max).contains(acc) {
                continue;
            }
            warn!(
                "Invariant violation: progress {} of stream {} at cell {}. Resetting to 0.",
                acc, i, cell
            );
            *acc = 0.0;
            violations.production_progress += 1;
        }
    }
}

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

pub struct InvariantChecksPlugin;

impl Plugin for InvariantChecksPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CoreInvariantViolations>().add_systems(
            FixedUpdate,
            (
                validate_warehouses,
                validate_houses,
                validate_production_progress,
            )
                .in_set(crate::SimulationSet::PostSim),
        );
    }
}
