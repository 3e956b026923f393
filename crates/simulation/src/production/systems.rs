use std::collections::BTreeMap;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::game_params::GameParams;
use crate::grid::{TileGrid, TileKind};
use crate::spatial::placement_valid;
use crate::terrain::TerrainGrid;
use crate::warehouse::{find_warehouse, WarehouseLedger, WarehouseStock};
use crate::workforce::Workforce;

use super::recipes::{recipe_streams, warehouse_policy, Recipe};
use super::reports::{BuildingReport, BuildingReports, StreamReport};
use super::step::{step_production, StepInput};

/// Elapsed-time accumulator per recipe stream, keyed by building cell index.
#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductionProgress {
    pub streams: BTreeMap<usize, Vec<f64>>,
}

impl ProductionProgress {
    /// Accumulators for `cell`, sized to its stream count.
    pub fn streams_mut(&mut self, cell: usize, count: usize) -> &mut Vec<f64> {
        let streams = self.streams.entry(cell).or_default();
        if streams.len() != count {
            streams.resize(count, 0.0);
        }
        streams
    }
}

/// Picks the warehouse a building works with this step.
fn choose_warehouse(
    kind: TileKind,
    origin: (usize, usize),
    streams: &[Recipe],
    grid: &TileGrid,
    ledger: &WarehouseLedger,
    params: &GameParams,
) -> Option<usize> {
    let policy = warehouse_policy(kind)?;
    let capacity = params.warehouse.capacity;
    let accepts =
        |stock: &WarehouseStock| streams.iter().any(|r| r.can_run_cycle(stock, capacity));
    let chosen = find_warehouse(
        ledger,
        grid,
        origin,
        params.production.warehouse_radius,
        policy,
        &accepts,
    )?;
    if ledger.stock(chosen).is_some_and(|s| !accepts(s)) {
        debug!(
            "{} at {:?}: no warehouse can run a cycle, using nearest {}",
            kind.name(),
            origin,
            chosen
        );
    }
    Some(chosen)
}

// =============================================================================
// System: run_production
// =============================================================================

/// One fixed step of production for every labor-demanding building, in cell
/// order. Markets get a workforce-only report.
pub fn run_production(
    grid: Res<TileGrid>,
    terrain: Res<TerrainGrid>,
    workforce: Res<Workforce>,
    params: Res<GameParams>,
    mut ledger: ResMut<WarehouseLedger>,
    mut progress: ResMut<ProductionProgress>,
    mut reports: ResMut<BuildingReports>,
) {
    let dt_ms = params.production.step_ms as f64;
    let capacity = params.warehouse.capacity;

    for (cell, &kind) in grid.cells.iter().enumerate() {
        if kind.workers_required() == 0 {
            continue;
        }
        let origin = grid.coords(cell);
        let streams = recipe_streams(kind);
        let assignment = workforce.assignment(cell).copied().unwrap_or_default();
        let efficiency = workforce.efficiency(cell);

        let report = reports
            .reports
            .entry(cell)
            .or_insert_with(|| BuildingReport::new(kind));
        if report.kind != kind {
            *report = BuildingReport::new(kind);
        }
        report.workers_assigned = assignment.assigned;
        report.workers_required = kind.workers_required();
        report.nearby_supply = assignment.nearby_supply;
        report.efficiency = efficiency;

        if streams.is_empty() {
            continue;
        }

        let warehouse = choose_warehouse(kind, origin, streams, &grid, &ledger, &params);
        let placement_ok = placement_valid(kind, &grid, &terrain, origin.0, origin.1);
        report.warehouse = warehouse;
        report.streams.clear();

        let accumulators = progress.streams_mut(cell, streams.len());
        for (recipe, acc) in streams.iter().zip(accumulators.iter_mut()) {
            let input = StepInput {
                dt_ms,
                progress_ms: *acc,
                efficiency,
                recipe,
                placement_ok,
                capacity,
            };
            let stock = warehouse.and_then(|w| ledger.stock_mut(w));
            let outcome = step_production(&input, stock);
            *acc = outcome.next_progress_ms;
            report.cycles_total += outcome.made_cycles as u64;
            report.streams.push(StreamReport {
                progress: outcome.next_progress_ms / recipe.duration_ms.max(1) as f64,
                eta_secs: outcome.eta_secs,
                blocked: outcome.blocked,
            });
        }
    }
}
