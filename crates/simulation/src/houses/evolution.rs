use bevy::prelude::*;

use crate::clock::SimClock;
use crate::config::HOUSE_MAX_LEVEL;
use crate::game_params::GameParams;
use crate::grid::{TileGrid, TileKind};
use crate::spatial::{has_adjacent_road, WaterPotentialGrid};
use crate::walkers::{ServiceExpiryGrid, ServiceKind};

use super::HouseGrid;

/// Residents of a house.
///
/// | road | potential | food | population |
/// |------|-----------|------|------------|
/// | no   | -         | -    | 0          |
/// | yes  | no        | -    | 1          |
/// | yes  | yes       | no   | max(1, base / 2) |
/// | yes  | yes       | yes  | base       |
///
/// `base` is 2 at level 1 (or below), 4 at level 2, 8 at level 3 and above.
pub fn house_population(level: u8, road: bool, potential: bool, food_served: bool) -> u32 {
    if !road {
        return 0;
    }
    let base = match level {
        0 | 1 => 2,
        2 => 4,
        _ => 8,
    };
    if !potential {
        return 1;
    }
    if !food_served {
        return (base / 2).max(1);
    }
    base
}

/// Population of the house at `idx` right now; 0 for anything that is not a house.
pub fn population_at(
    grid: &TileGrid,
    houses: &HouseGrid,
    potential: &WaterPotentialGrid,
    expiry: &ServiceExpiryGrid,
    idx: usize,
    now: f64,
) -> u32 {
    if grid.cells.get(idx) != Some(&TileKind::House) {
        return 0;
    }
    let (x, y) = grid.coords(idx);
    house_population(
        houses.level(idx),
        has_adjacent_road(grid, x, y),
        potential.has_potential_at(idx),
        expiry.is_served(ServiceKind::Food, idx, now),
    )
}

/// Road access, water potential and both services live at `now`.
pub fn house_satisfied(
    grid: &TileGrid,
    potential: &WaterPotentialGrid,
    expiry: &ServiceExpiryGrid,
    idx: usize,
    now: f64,
) -> bool {
    let (x, y) = grid.coords(idx);
    has_adjacent_road(grid, x, y)
        && potential.has_potential_at(idx)
        && expiry.is_served(ServiceKind::Water, idx, now)
        && expiry.is_served(ServiceKind::Food, idx, now)
}

/// One evolution step for a single cell. Returns true when the house gained a level.
pub fn advance_house(
    level: &mut u8,
    since: &mut Option<f64>,
    is_house: bool,
    satisfied: bool,
    now: f64,
    delay_ms: f64,
) -> bool {
    if !is_house {
        *level = 0;
        *since = None;
        return false;
    }
    if *level == 0 {
        *level = 1;
    }
    if *level >= HOUSE_MAX_LEVEL {
        return false;
    }
    if !satisfied {
        *since = None;
        return false;
    }
    let start = *since.get_or_insert(now);
    if now - start >= delay_ms {
        *level += 1;
        *since = None;
        return true;
    }
    false
}

// =============================================================================
// System: evolve_houses
// =============================================================================

/// Walks every cell each frame. Runs after walker movement so service painted this
/// frame counts toward satisfaction.
pub fn evolve_houses(
    grid: Res<TileGrid>,
    potential: Res<WaterPotentialGrid>,
    expiry: Res<ServiceExpiryGrid>,
    clock: Res<SimClock>,
    params: Res<GameParams>,
    mut houses: ResMut<HouseGrid>,
) {
    let now = clock.now_ms;
    let delay = params.houses.upgrade_delay_ms;
    houses.ensure_size(grid.cells.len());
    let houses = &mut *houses;

    for (idx, &kind) in grid.cells.iter().enumerate() {
        let is_house = kind == TileKind::House;
        let satisfied = is_house && house_satisfied(&grid, &potential, &expiry, idx, now);
        let upgraded = advance_house(
            &mut houses.levels[idx],
            &mut houses.satisfied_since[idx],
            is_house,
            satisfied,
            now,
            delay,
        );
        if upgraded {
            let (x, y) = grid.coords(idx);
            info!(
                "House at ({}, {}) upgraded to level {}",
                x, y, houses.levels[idx]
            );
        }
    }
}
