//! The starter town the headless binary simulates: a main street with houses,
//! wells and a market, plus a lumber and bread chain feeding one warehouse.

use bevy::prelude::*;

use simulation::grid::{TileGrid, TileKind};
use simulation::terrain::{Terrain, TerrainGrid};

pub fn seed_demo_town(mut grid: ResMut<TileGrid>, mut terrain: ResMut<TerrainGrid>) {
    if grid.cols < 24 || grid.rows < 16 {
        warn!(
            "Grid {}x{} is too small for the demo town; starting empty",
            grid.cols, grid.rows
        );
        return;
    }
    let (ox, oy) = ((grid.cols - 24) / 2, (grid.rows - 16) / 2);

    // Main street along y=8, a side street down x=12 and a loop closing at
    // (20, 14).
    for x in 1..23 {
        grid.set(ox + x, oy + 8, TileKind::Road);
    }
    for y in 2..15 {
        grid.set(ox + 12, oy + y, TileKind::Road);
    }
    for x in 12..21 {
        grid.set(ox + x, oy + 14, TileKind::Road);
    }
    for y in 8..15 {
        grid.set(ox + 20, oy + y, TileKind::Road);
    }

    // Houses on both sides of the main street, a well every fourth lot.
    for x in 2..11 {
        let kind = if x % 4 == 0 {
            TileKind::Well
        } else {
            TileKind::House
        };
        grid.set(ox + x, oy + 7, kind);
        grid.set(ox + x, oy + 9, TileKind::House);
    }
    grid.set(ox + 6, oy + 10, TileKind::Well);
    grid.set(ox + 11, oy + 7, TileKind::Market);

    // Lumber camp and sawmill on the forest edge.
    for x in 14..18 {
        terrain.set(ox + x, oy + 5, Terrain::Forest);
    }
    grid.set(ox + 14, oy + 6, TileKind::LumberCamp);
    grid.set(ox + 16, oy + 6, TileKind::Sawmill);

    // Farm, mill and bakery south of the main street.
    grid.set(ox + 14, oy + 10, TileKind::Farm);
    grid.set(ox + 16, oy + 10, TileKind::Mill);
    grid.set(ox + 18, oy + 10, TileKind::Bakery);
    grid.set(ox + 15, oy + 7, TileKind::Warehouse);
    grid.set(ox + 17, oy + 9, TileKind::Warehouse);

    info!(
        "Demo town seeded: {} houses, {} wells",
        grid.count(TileKind::House),
        grid.count(TileKind::Well)
    );
}
