//! Builder methods for tiles, roads, terrain and warehouse stock.

use crate::grid::{TileGrid, TileKind};
use crate::houses::HouseGrid;
use crate::terrain::{Terrain, TerrainGrid};
use crate::warehouse::{ResourceKind, WarehouseLedger, WarehouseStock};

use super::TestCity;

impl TestCity {
    // -----------------------------------------------------------------------
    // Grid, terrain and stock
    // -----------------------------------------------------------------------

    /// Write a tile directly into the grid.
    pub fn with_tile(mut self, x: usize, y: usize, kind: TileKind) -> Self {
        self.set_tile(x, y, kind);
        self
    }

    /// Road from (x0, y0) to (x1, y1): horizontal leg first, then vertical.
    pub fn with_road_line(mut self, x0: usize, y0: usize, x1: usize, y1: usize) -> Self {
        let mut grid = self.app.world_mut().resource_mut::<TileGrid>();
        for x in x0.min(x1)..=x0.max(x1) {
            grid.set(x, y0, TileKind::Road);
        }
        for y in y0.min(y1)..=y0.max(y1) {
            grid.set(x1, y, TileKind::Road);
        }
        drop(grid);
        self
    }

    pub fn with_terrain(mut self, x: usize, y: usize, terrain: Terrain) -> Self {
        self.app
            .world_mut()
            .resource_mut::<TerrainGrid>()
            .set(x, y, terrain);
        self
    }

    /// A house already at `level`, as if it had evolved.
    pub fn with_house_level(mut self, x: usize, y: usize, level: u8) -> Self {
        self.set_tile(x, y, TileKind::House);
        let world = self.app.world_mut();
        let cell = world.resource::<TileGrid>().index(x, y);
        let mut houses = world.resource_mut::<HouseGrid>();
        if let Some(slot) = houses.levels.get_mut(cell) {
            *slot = level;
        }
        drop(houses);
        self
    }

    /// Put a warehouse at (x, y) (if there is none) holding `amount` of `resource`.
    pub fn with_stock(mut self, x: usize, y: usize, resource: ResourceKind, amount: u32) -> Self {
        let capacity = self.params().warehouse.capacity;
        self.set_tile(x, y, TileKind::Warehouse);
        let world = self.app.world_mut();
        let cell = world.resource::<TileGrid>().index(x, y);
        world
            .resource_mut::<WarehouseLedger>()
            .stocks
            .entry(cell)
            .or_insert_with(WarehouseStock::new)
            .store(resource, amount, capacity);
        self
    }
}
