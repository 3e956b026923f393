//! Read-only views for hosts: the per-building inspector and the per-frame city
//! snapshot consumed by renderers.

use std::collections::BTreeMap;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::clock::SimClock;
use crate::grid::{TileGrid, TileKind};
use crate::houses::{population_at, HouseGrid};
use crate::production::{BuildingReport, BuildingReports};
use crate::spatial::WaterPotentialGrid;
use crate::stats::CityStats;
use crate::walkers::{ServiceExpiryGrid, Walker, WalkerKind};
use crate::warehouse::{ResourceKind, WarehouseLedger};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingInspection {
    pub x: usize,
    pub y: usize,
    pub kind: TileKind,
    pub name: String,
    /// Workforce and production status for labor-demanding buildings.
    pub report: Option<BuildingReport>,
    /// Non-empty stock entries for warehouses.
    pub stock: Option<Vec<(ResourceKind, u32)>>,
    pub stock_total: Option<u32>,
    pub house_level: Option<u8>,
    pub population: Option<u32>,
}

/// Inspector summary for the building at (x, y). `None` for empty ground, roads
/// and off-map coordinates.
pub fn inspect_building(world: &World, x: usize, y: usize) -> Option<BuildingInspection> {
    let grid = world.get_resource::<TileGrid>()?;
    if !grid.in_bounds(x, y) {
        return None;
    }
    let kind = grid.get(x, y);
    if !kind.is_building() {
        return None;
    }
    let cell = grid.index(x, y);

    let mut inspection = BuildingInspection {
        x,
        y,
        kind,
        name: kind.name().to_string(),
        report: world
            .get_resource::<BuildingReports>()
            .and_then(|r| r.get(cell).cloned()),
        stock: None,
        stock_total: None,
        house_level: None,
        population: None,
    };

    if kind == TileKind::Warehouse {
        if let Some(stock) = world
            .get_resource::<WarehouseLedger>()
            .and_then(|l| l.stock(cell))
        {
            inspection.stock = Some(stock.entries());
            inspection.stock_total = Some(stock.total());
        }
    }

    if kind == TileKind::House {
        let houses = world.get_resource::<HouseGrid>()?;
        let potential = world.get_resource::<WaterPotentialGrid>()?;
        let expiry = world.get_resource::<ServiceExpiryGrid>()?;
        let now = world.get_resource::<SimClock>().map_or(0.0, |c| c.now_ms);
        inspection.house_level = Some(houses.level(cell));
        inspection.population = Some(population_at(grid, houses, potential, expiry, cell, now));
    }

    Some(inspection)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalkerView {
    pub id: u32,
    pub kind: WalkerKind,
    pub pos: (usize, usize),
    pub prev: (usize, usize),
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CitySnapshot {
    pub now_ms: f64,
    pub cols: usize,
    pub rows: usize,
    pub grid: Vec<u8>,
    pub water_potential: Vec<bool>,
    pub water_expiry: Vec<f64>,
    pub food_expiry: Vec<f64>,
    pub house_levels: Vec<u8>,
    /// Sorted by id.
    pub walkers: Vec<WalkerView>,
    pub reports: BTreeMap<usize, BuildingReport>,
    pub stats: CityStats,
}

impl CitySnapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

pub fn capture_snapshot(world: &mut World) -> CitySnapshot {
    let mut walkers: Vec<WalkerView> = world
        .query::<&Walker>()
        .iter(world)
        .map(|w| WalkerView {
            id: w.id,
            kind: w.kind,
            pos: w.pos,
            prev: w.prev,
        })
        .collect();
    walkers.sort_by_key(|w| w.id);

    let mut snapshot = CitySnapshot {
        walkers,
        ..Default::default()
    };
    if let Some(clock) = world.get_resource::<SimClock>() {
        snapshot.now_ms = clock.now_ms;
    }
    if let Some(grid) = world.get_resource::<TileGrid>() {
        snapshot.cols = grid.cols;
        snapshot.rows = grid.rows;
        snapshot.grid = grid.codes();
    }
    if let Some(potential) = world.get_resource::<WaterPotentialGrid>() {
        snapshot.water_potential = potential.covered.clone();
    }
    if let Some(expiry) = world.get_resource::<ServiceExpiryGrid>() {
        snapshot.water_expiry = expiry.water.clone();
        snapshot.food_expiry = expiry.food.clone();
    }
    if let Some(houses) = world.get_resource::<HouseGrid>() {
        snapshot.house_levels = houses.levels.clone();
    }
    if let Some(reports) = world.get_resource::<BuildingReports>() {
        snapshot.reports = reports.reports.clone();
    }
    if let Some(stats) = world.get_resource::<CityStats>() {
        snapshot.stats = stats.clone();
    }
    snapshot
}
