//! Read-only terrain classification supplied by the host.
//!
//! The core never generates terrain; it only consults it for placement rules
//! (lumber camps need forest, quarries need mountain, fishing huts need water).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_GRID_COLS, DEFAULT_GRID_ROWS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Terrain {
    #[default]
    Plain,
    Forest,
    Water,
    Mountain,
    FishSpot,
}

impl Terrain {
    /// Tiles that cannot hold any building or road.
    pub fn blocks_building(self) -> bool {
        matches!(self, Terrain::Water | Terrain::Mountain | Terrain::FishSpot)
    }

    pub fn is_water(self) -> bool {
        matches!(self, Terrain::Water | Terrain::FishSpot)
    }
}

#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct TerrainGrid {
    pub tiles: Vec<Terrain>,
    pub cols: usize,
    pub rows: usize,
}

impl Default for TerrainGrid {
    fn default() -> Self {
        Self::new(DEFAULT_GRID_COLS, DEFAULT_GRID_ROWS)
    }
}

impl TerrainGrid {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            tiles: vec![Terrain::Plain; cols * rows],
            cols,
            rows,
        }
    }

    /// Off-map tiles read as `Plain`.
    pub fn get(&self, x: usize, y: usize) -> Terrain {
        if x < self.cols && y < self.rows {
            self.tiles[y * self.cols + x]
        } else {
            Terrain::Plain
        }
    }

    pub fn set(&mut self, x: usize, y: usize, terrain: Terrain) {
        if x < self.cols && y < self.rows {
            self.tiles[y * self.cols + x] = terrain;
        }
    }
}
