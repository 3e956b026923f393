use std::collections::BTreeMap;

use bevy::prelude::*;

use crate::clock::SimClock;
use crate::game_params::GameParams;
use crate::grid::{manhattan, TileGrid, TileKind};
use crate::houses::{population_at, HouseGrid};
use crate::spatial::WaterPotentialGrid;
use crate::walkers::ServiceExpiryGrid;

use super::{Assignment, Workforce};

/// Every house with a non-zero population, as `(cell, population)` in cell order.
pub fn collect_supply(
    grid: &TileGrid,
    houses: &HouseGrid,
    potential: &WaterPotentialGrid,
    expiry: &ServiceExpiryGrid,
    now: f64,
) -> Vec<(usize, u32)> {
    grid.cells_of_kind(TileKind::House)
        .into_iter()
        .map(|idx| (idx, population_at(grid, houses, potential, expiry, idx, now)))
        .filter(|&(_, pop)| pop > 0)
        .collect()
}

/// Single-pass greedy matching of `supply` to every labor-demanding cell, using
/// each kind's [`TileKind::workers_required`].
pub fn allocate_workforce(
    grid: &TileGrid,
    supply: &[(usize, u32)],
    radius: u32,
) -> BTreeMap<usize, Assignment> {
    allocate_workforce_with(grid, supply, radius, TileKind::workers_required)
}

/// Greedy matching with the per-kind requirement supplied by `required_for`.
/// Kinds that require zero workers are not demands.
///
/// Demands are served in cell-index order from one shared pool. Each draws from
/// the houses within `radius` nearest first (ties by cell index) until it has its
/// requirement or the reachable pool is dry. Later demands may starve.
pub fn allocate_workforce_with(
    grid: &TileGrid,
    supply: &[(usize, u32)],
    radius: u32,
    required_for: impl Fn(TileKind) -> u32,
) -> BTreeMap<usize, Assignment> {
    let mut remaining: Vec<u32> = supply.iter().map(|&(_, pop)| pop).collect();
    let mut assignments = BTreeMap::new();

    for (cell, &kind) in grid.cells.iter().enumerate() {
        let required = required_for(kind);
        if required == 0 {
            continue;
        }
        let origin = grid.coords(cell);

        let mut nearby_supply = 0;
        let mut candidates: Vec<(u32, usize, usize)> = Vec::new();
        for (slot, &(house, pop)) in supply.iter().enumerate() {
            let dist = manhattan(origin, grid.coords(house));
            if dist > radius {
                continue;
            }
            nearby_supply += pop;
            if remaining[slot] > 0 {
                candidates.push((dist, house, slot));
            }
        }
        candidates.sort_unstable();

        let mut assigned = 0;
        for (_, _, slot) in candidates {
            if assigned >= required {
                break;
            }
            let take = (required - assigned).min(remaining[slot]);
            remaining[slot] -= take;
            assigned += take;
        }

        assignments.insert(
            cell,
            Assignment {
                required,
                assigned,
                nearby_supply,
            },
        );
    }
    assignments
}

// =============================================================================
// System: allocate_workforce_system
// =============================================================================

/// Recomputes every assignment from scratch each fixed step.
pub fn allocate_workforce_system(
    grid: Res<TileGrid>,
    houses: Res<HouseGrid>,
    potential: Res<WaterPotentialGrid>,
    expiry: Res<ServiceExpiryGrid>,
    clock: Res<SimClock>,
    params: Res<GameParams>,
    mut workforce: ResMut<Workforce>,
) {
    let supply = collect_supply(&grid, &houses, &potential, &expiry, clock.now_ms);
    workforce.assignments = allocate_workforce(&grid, &supply, params.workforce.radius);
}
