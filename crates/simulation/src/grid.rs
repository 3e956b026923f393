use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_GRID_COLS, DEFAULT_GRID_ROWS};

/// Land use of a single tile. Codes are mutually exclusive: one kind per cell.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[repr(u8)]
pub enum TileKind {
    #[default]
    Empty = 0,
    Road = 1,
    House = 2,
    Well = 3,
    Market = 4,
    Warehouse = 5,
    // Harvesters: no inputs
    LumberCamp = 6,
    Quarry = 7,
    Farm = 8,
    FishingHut = 9,
    Livestock = 10,
    // Processors: consume warehouse stock
    Sawmill = 11,
    Mill = 12,
    Bakery = 13,
}

impl TileKind {
    pub const ALL: [TileKind; 14] = [
        TileKind::Empty,
        TileKind::Road,
        TileKind::House,
        TileKind::Well,
        TileKind::Market,
        TileKind::Warehouse,
        TileKind::LumberCamp,
        TileKind::Quarry,
        TileKind::Farm,
        TileKind::FishingHut,
        TileKind::Livestock,
        TileKind::Sawmill,
        TileKind::Mill,
        TileKind::Bakery,
    ];

    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<TileKind> {
        Self::ALL.get(code as usize).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            TileKind::Empty => "Empty",
            TileKind::Road => "Road",
            TileKind::House => "House",
            TileKind::Well => "Well",
            TileKind::Market => "Market",
            TileKind::Warehouse => "Warehouse",
            TileKind::LumberCamp => "Lumber Camp",
            TileKind::Quarry => "Quarry",
            TileKind::Farm => "Farm",
            TileKind::FishingHut => "Fishing Hut",
            TileKind::Livestock => "Livestock Farm",
            TileKind::Sawmill => "Sawmill",
            TileKind::Mill => "Mill",
            TileKind::Bakery => "Bakery",
        }
    }

    /// Fixed labor requirement. Zero means the building never demands workers.
    pub fn workers_required(self) -> u32 {
        match self {
            TileKind::Market => 2,
            TileKind::LumberCamp => 4,
            TileKind::Quarry => 6,
            TileKind::Farm => 5,
            TileKind::FishingHut => 3,
            TileKind::Livestock => 5,
            TileKind::Sawmill => 6,
            TileKind::Mill => 4,
            TileKind::Bakery => 4,
            TileKind::Empty
            | TileKind::Road
            | TileKind::House
            | TileKind::Well
            | TileKind::Warehouse => 0,
        }
    }

    pub fn is_production(self) -> bool {
        self.is_harvester() || self.is_processor()
    }

    pub fn is_harvester(self) -> bool {
        matches!(
            self,
            TileKind::LumberCamp
                | TileKind::Quarry
                | TileKind::Farm
                | TileKind::FishingHut
                | TileKind::Livestock
        )
    }

    pub fn is_processor(self) -> bool {
        matches!(self, TileKind::Sawmill | TileKind::Mill | TileKind::Bakery)
    }

    /// Anything other than empty ground or road.
    pub fn is_building(self) -> bool {
        !matches!(self, TileKind::Empty | TileKind::Road)
    }
}

/// The city tile array. Building state lives in sparse maps keyed by [`TileGrid::index`],
/// never inside the cells themselves.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct TileGrid {
    pub cells: Vec<TileKind>,
    pub cols: usize,
    pub rows: usize,
}

impl Default for TileGrid {
    fn default() -> Self {
        Self::new(DEFAULT_GRID_COLS, DEFAULT_GRID_ROWS)
    }
}

impl TileGrid {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cells: vec![TileKind::Empty; cols * rows],
            cols,
            rows,
        }
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.cols + x
    }

    #[inline]
    pub fn coords(&self, idx: usize) -> (usize, usize) {
        (idx % self.cols, idx / self.cols)
    }

    #[inline]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.cols && y < self.rows
    }

    /// Tile kind at (x, y); anything outside the grid reads as `Empty`.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> TileKind {
        if self.in_bounds(x, y) {
            self.cells[self.index(x, y)]
        } else {
            TileKind::Empty
        }
    }

    /// Out-of-bounds writes are ignored.
    pub fn set(&mut self, x: usize, y: usize, kind: TileKind) {
        if self.in_bounds(x, y) {
            let idx = self.index(x, y);
            self.cells[idx] = kind;
        }
    }

    /// Up to 4 cardinal neighbors in fixed N, E, S, W order, and the count of valid
    /// entries. Use `&result[..count]`.
    pub fn neighbors4(&self, x: usize, y: usize) -> ([(usize, usize); 4], usize) {
        let mut result = [(0, 0); 4];
        let mut count = 0;
        if y > 0 {
            result[count] = (x, y - 1);
            count += 1;
        }
        if x + 1 < self.cols {
            result[count] = (x + 1, y);
            count += 1;
        }
        if y + 1 < self.rows {
            result[count] = (x, y + 1);
            count += 1;
        }
        if x > 0 {
            result[count] = (x - 1, y);
            count += 1;
        }
        (result, count)
    }

    /// Cell indices holding `kind`, ascending.
    pub fn cells_of_kind(&self, kind: TileKind) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &k)| k == kind)
            .map(|(idx, _)| idx)
            .collect()
    }

    pub fn count(&self, kind: TileKind) -> usize {
        self.cells.iter().filter(|&&k| k == kind).count()
    }

    pub fn codes(&self) -> Vec<u8> {
        self.cells.iter().map(|k| k.code()).collect()
    }
}

#[inline]
pub fn manhattan(a: (usize, usize), b: (usize, usize)) -> u32 {
    (a.0.abs_diff(b.0) + a.1.abs_diff(b.1)) as u32
}
