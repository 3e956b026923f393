//! Tile edits and the building-state sync pass.
//!
//! Edits arrive as [`TileEdit`] events or as direct writes to [`TileGrid`]. Either
//! way, `sync_building_state` diffs the grid against the previous frame and
//! cascade-deletes the per-building state of every cell whose kind changed.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::grid::{TileGrid, TileKind};
use crate::houses::HouseGrid;
use crate::production::{BuildingReports, ProductionProgress};
use crate::warehouse::{WarehouseLedger, WarehouseStock};
use crate::SimulationUpdateSet;

pub struct PlacementPlugin;

impl Plugin for PlacementPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<TileEdit>()
            .add_systems(
                Update,
                apply_tile_edits.in_set(SimulationUpdateSet::Input),
            )
            .add_systems(
                Update,
                sync_building_state.in_set(SimulationUpdateSet::Layers),
            );
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileAction {
    Place(TileKind),
    Bulldoze,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileEdit {
    pub x: usize,
    pub y: usize,
    pub action: TileAction,
}

impl TileEdit {
    pub fn place(x: usize, y: usize, kind: TileKind) -> Self {
        Self {
            x,
            y,
            action: TileAction::Place(kind),
        }
    }

    pub fn bulldoze(x: usize, y: usize) -> Self {
        Self {
            x,
            y,
            action: TileAction::Bulldoze,
        }
    }

    /// Kind the cell holds once the edit is applied.
    pub fn resulting_kind(&self) -> TileKind {
        match self.action {
            TileAction::Place(kind) => kind,
            TileAction::Bulldoze => TileKind::Empty,
        }
    }
}

/// Writes queued edits into the grid. Cost and placement rules are the host's
/// business; out-of-bounds edits are dropped.
pub fn apply_tile_edits(mut edits: EventReader<TileEdit>, mut grid: ResMut<TileGrid>) {
    for edit in edits.read() {
        if !grid.in_bounds(edit.x, edit.y) {
            debug!("Tile edit at ({}, {}) is off the map", edit.x, edit.y);
            continue;
        }
        let kind = edit.resulting_kind();
        if grid.get(edit.x, edit.y) == kind {
            continue;
        }
        grid.set(edit.x, edit.y, kind);
    }
}

/// Drops every piece of per-building state keyed by `cell`.
pub fn clear_building_state(
    cell: usize,
    ledger: &mut WarehouseLedger,
    progress: &mut ProductionProgress,
    houses: &mut HouseGrid,
    reports: &mut BuildingReports,
) {
    ledger.stocks.remove(&cell);
    progress.streams.remove(&cell);
    reports.reports.remove(&cell);
    houses.clear(cell);
}

// =============================================================================
// System: sync_building_state
// =============================================================================

/// Cascade-deletes state of changed cells and opens empty stock for new
/// warehouses. `previous` is the grid as of the last run.
pub fn sync_building_state(
    grid: Res<TileGrid>,
    mut previous: Local<Vec<TileKind>>,
    mut ledger: ResMut<WarehouseLedger>,
    mut progress: ResMut<ProductionProgress>,
    mut houses: ResMut<HouseGrid>,
    mut reports: ResMut<BuildingReports>,
) {
    if !grid.is_changed() && previous.len() == grid.cells.len() {
        return;
    }
    houses.ensure_size(grid.cells.len());

    if previous.len() != grid.cells.len() {
        previous.clear();
        previous.resize(grid.cells.len(), TileKind::Empty);
        // Keys from a differently sized grid point at unrelated cells.
        ledger.stocks.retain(|&cell, _| grid.cells.get(cell) == Some(&TileKind::Warehouse));
        progress
            .streams
            .retain(|&cell, _| grid.cells.get(cell).is_some_and(|k| k.is_production()));
        reports
            .reports
            .retain(|&cell, r| grid.cells.get(cell) == Some(&r.kind));
    }

    let mut changed = 0usize;
    for (cell, (&now, before)) in grid.cells.iter().zip(previous.iter_mut()).enumerate() {
        if now == *before {
            continue;
        }
        if before.is_building() {
            clear_building_state(cell, &mut ledger, &mut progress, &mut houses, &mut reports);
        }
        *before = now;
        changed += 1;
    }

    for cell in grid.cells_of_kind(TileKind::Warehouse) {
        ledger.stocks.entry(cell).or_insert_with(WarehouseStock::new);
    }

    if changed > 0 {
        debug!("Building state synced: {} cells changed", changed);
    }
}
