//! Pure walker rules: eligibility, spawn tile, candidate enumeration, the
//! deterministic choice and service painting. Systems only wire these to the ECS.

use crate::config::WALKER_ID_STRIDE;
use crate::grid::{manhattan, TileGrid, TileKind};
use crate::spatial::{has_adjacent_road, WaterPotentialGrid};

use super::types::{ServiceExpiryGrid, Walker, WalkerKind};

/// Whether the home cell still warrants a walker of `kind`: carriers need a
/// road-adjacent house with water potential, ladies a road-adjacent market.
pub fn home_qualifies(
    kind: WalkerKind,
    home: usize,
    grid: &TileGrid,
    potential: &WaterPotentialGrid,
) -> bool {
    if home >= grid.cells.len() || grid.cells[home] != kind.home_kind() {
        return false;
    }
    let (x, y) = grid.coords(home);
    if !has_adjacent_road(grid, x, y) {
        return false;
    }
    match kind {
        WalkerKind::WaterCarrier => potential.has_potential_at(home),
        WalkerKind::MarketLady => true,
    }
}

/// First road neighbor of the home in N, E, S, W order.
pub fn spawn_tile(grid: &TileGrid, home: usize) -> Option<(usize, usize)> {
    let (x, y) = grid.coords(home);
    let (neighbors, count) = grid.neighbors4(x, y);
    neighbors[..count]
        .iter()
        .copied()
        .find(|&(nx, ny)| grid.get(nx, ny) == TileKind::Road)
}

fn within_market_radius(
    grid: &TileGrid,
    walker: &Walker,
    tile: (usize, usize),
    radius: u32,
) -> bool {
    walker.kind != WalkerKind::MarketLady || manhattan(grid.coords(walker.home), tile) <= radius
}

/// Road neighbors the walker may step onto, in N, E, S, W order.
///
/// The previous tile is excluded unless that leaves nothing (dead end), in which
/// case turning back is allowed. Market ladies never leave the market radius.
pub fn candidate_tiles(
    grid: &TileGrid,
    walker: &Walker,
    market_radius: u32,
) -> Vec<(usize, usize)> {
    let (neighbors, count) = grid.neighbors4(walker.pos.0, walker.pos.1);
    let roads: Vec<(usize, usize)> = neighbors[..count]
        .iter()
        .copied()
        .filter(|&(nx, ny)| grid.get(nx, ny) == TileKind::Road)
        .filter(|&tile| within_market_radius(grid, walker, tile, market_radius))
        .collect();

    let forward: Vec<(usize, usize)> = roads
        .iter()
        .copied()
        .filter(|&tile| tile != walker.prev)
        .collect();

    if forward.is_empty() {
        roads
    } else {
        forward
    }
}

/// `(steps + id * 17) mod candidates`. No randomness: paths are reproducible from
/// the grid, the walker id and its step count.
pub fn choose_next_tile(
    grid: &TileGrid,
    walker: &Walker,
    market_radius: u32,
) -> Option<(usize, usize)> {
    let candidates = candidate_tiles(grid, walker, market_radius);
    if candidates.is_empty() {
        return None;
    }
    let pick =
        (walker.steps as u64 + walker.id as u64 * WALKER_ID_STRIDE) % candidates.len() as u64;
    Some(candidates[pick as usize])
}

/// Refreshes service expiry on every house next to the walker's tile. Market
/// ladies only serve houses inside their market radius.
pub fn paint_service(
    expiry: &mut ServiceExpiryGrid,
    grid: &TileGrid,
    walker: &Walker,
    until: f64,
    market_radius: u32,
) -> usize {
    let (neighbors, count) = grid.neighbors4(walker.pos.0, walker.pos.1);
    let mut painted = 0;
    for &(nx, ny) in &neighbors[..count] {
        if grid.get(nx, ny) != TileKind::House {
            continue;
        }
        if !within_market_radius(grid, walker, (nx, ny), market_radius) {
            continue;
        }
        expiry.refresh(walker.kind.service(), grid.index(nx, ny), until);
        painted += 1;
    }
    painted
}
