use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::clock::SimClock;
use crate::grid::{TileGrid, TileKind};
use crate::houses::{population_at, HouseGrid};
use crate::spatial::WaterPotentialGrid;
use crate::walkers::{ServiceExpiryGrid, ServiceKind, Walker, WalkerKind};
use crate::warehouse::{ResourceKind, WarehouseLedger};
use crate::workforce::Workforce;

pub struct StatsPlugin;

impl Plugin for StatsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CityStats>().add_systems(
            Update,
            update_city_stats.in_set(crate::SimulationUpdateSet::Reporting),
        );
    }
}

/// HUD aggregates, recomputed every frame.
#[derive(Resource, Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityStats {
    pub population: u32,
    pub houses: u32,
    /// Houses at level 1, 2 and 3.
    pub houses_by_level: [u32; 3],
    pub houses_with_potential: u32,
    pub houses_water_served: u32,
    pub houses_food_served: u32,
    pub water_carriers: u32,
    pub market_ladies: u32,
    pub workers_employed: u32,
    /// City-wide warehouse totals in resource order.
    pub stored: [u32; ResourceKind::COUNT],
}

/// Pure aggregation over the simulation layers.
pub fn compute_city_stats<'a>(
    grid: &TileGrid,
    houses: &HouseGrid,
    potential: &WaterPotentialGrid,
    expiry: &ServiceExpiryGrid,
    now: f64,
    walkers: impl IntoIterator<Item = &'a Walker>,
) -> CityStats {
    let mut stats = CityStats::default();
    for idx in grid.cells_of_kind(TileKind::House) {
        stats.houses += 1;
        stats.population += population_at(grid, houses, potential, expiry, idx, now);
        let level = houses.level(idx).clamp(1, 3);
        stats.houses_by_level[(level - 1) as usize] += 1;
        if potential.has_potential_at(idx) {
            stats.houses_with_potential += 1;
        }
        if expiry.is_served(ServiceKind::Water, idx, now) {
            stats.houses_water_served += 1;
        }
        if expiry.is_served(ServiceKind::Food, idx, now) {
            stats.houses_food_served += 1;
        }
    }
    for walker in walkers {
        match walker.kind {
            WalkerKind::WaterCarrier => stats.water_carriers += 1,
            WalkerKind::MarketLady => stats.market_ladies += 1,
        }
    }
    stats
}

#[allow(clippy::too_many_arguments)]
pub fn update_city_stats(
    grid: Res<TileGrid>,
    houses: Res<HouseGrid>,
    potential: Res<WaterPotentialGrid>,
    expiry: Res<ServiceExpiryGrid>,
    clock: Res<SimClock>,
    workforce: Res<Workforce>,
    ledger: Res<WarehouseLedger>,
    walkers: Query<&Walker>,
    mut stats: ResMut<CityStats>,
) {
    let mut next = compute_city_stats(
        &grid,
        &houses,
        &potential,
        &expiry,
        clock.now_ms,
        walkers.iter(),
    );
    next.workers_employed = workforce.total_assigned();
    for resource in ResourceKind::ALL {
        next.stored[resource.index()] = ledger.city_total(resource);
    }
    if *stats != next {
        *stats = next;
    }
}
