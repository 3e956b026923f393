use std::collections::BTreeSet;

use bevy::prelude::*;

use crate::clock::SimClock;
use crate::game_params::GameParams;
use crate::grid::{TileGrid, TileKind};
use crate::spatial::WaterPotentialGrid;

use super::movement::{choose_next_tile, home_qualifies, paint_service, spawn_tile};
use super::types::{ServiceExpiryGrid, Walker, WalkerIds, WalkerKind};

// =============================================================================
// System: spawn_and_prune_walkers
// =============================================================================

/// Full validity recompute every frame: walkers whose home stopped qualifying are
/// despawned, and every qualifying home without a walker gets one.
///
/// Idempotent. Houses are visited before markets, each in cell-index order, so id
/// assignment is deterministic.
pub fn spawn_and_prune_walkers(
    mut commands: Commands,
    grid: Res<TileGrid>,
    potential: Res<WaterPotentialGrid>,
    clock: Res<SimClock>,
    params: Res<GameParams>,
    mut ids: ResMut<WalkerIds>,
    mut walkers: Query<(Entity, &mut Walker)>,
) {
    let mut homes: BTreeSet<(WalkerKind, usize)> = BTreeSet::new();

    for (entity, mut walker) in &mut walkers {
        let key = (walker.kind, walker.home);
        if !home_qualifies(walker.kind, walker.home, &grid, &potential) || homes.contains(&key) {
            debug!(
                "Walker {} ({:?}) pruned: home {} no longer qualifies",
                walker.id, walker.kind, walker.home
            );
            commands.entity(entity).despawn();
            continue;
        }
        homes.insert(key);

        // The road under the walker was removed: restart from the home's spawn tile.
        if grid.get(walker.pos.0, walker.pos.1) != TileKind::Road {
            if let Some(tile) = spawn_tile(&grid, walker.home) {
                walker.pos = tile;
                walker.prev = tile;
            }
        }
    }

    let interval = params.walkers.move_interval_ms;
    for kind in [WalkerKind::WaterCarrier, WalkerKind::MarketLady] {
        for home in grid.cells_of_kind(kind.home_kind()) {
            if homes.contains(&(kind, home)) || !home_qualifies(kind, home, &grid, &potential) {
                continue;
            }
            let Some(tile) = spawn_tile(&grid, home) else {
                continue;
            };
            let id = ids.allocate();
            debug!("Walker {} ({:?}) spawned for home {} at {:?}", id, kind, home, tile);
            commands.spawn(Walker::new(id, kind, home, tile, clock.now_ms, interval));
            homes.insert((kind, home));
        }
    }
}

// =============================================================================
// System: move_walkers
// =============================================================================

/// Moves every walker whose scheduled instant has arrived by one tile, paints
/// service onto adjacent houses and schedules the next move.
pub fn move_walkers(
    grid: Res<TileGrid>,
    clock: Res<SimClock>,
    params: Res<GameParams>,
    mut expiry: ResMut<ServiceExpiryGrid>,
    mut walkers: Query<&mut Walker>,
) {
    expiry.ensure_size(grid.cells.len());
    let now = clock.now_ms;
    let radius = params.walkers.market_radius;
    let until = now + params.walkers.service_duration_ms;

    for mut walker in &mut walkers {
        if now < walker.next_move_at {
            continue;
        }
        // A walker with no road neighbor at all stays put but still serves its tile.
        if let Some(next) = choose_next_tile(&grid, &walker, radius) {
            walker.prev = walker.pos;
            walker.pos = next;
            walker.steps = walker.steps.wrapping_add(1);
        }
        paint_service(&mut expiry, &grid, &walker, until, radius);
        walker.next_move_at = now + params.walkers.move_interval_ms;
    }
}
