//! House evolution: levels 1..=3 driven by sustained satisfaction, and the
//! population formula used by workforce supply and city stats.

mod evolution;

pub use evolution::{
    advance_house, evolve_houses, house_population, house_satisfied, population_at,
};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::SimulationUpdateSet;

pub struct HousesPlugin;

impl Plugin for HousesPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, evolve_houses.in_set(SimulationUpdateSet::Houses));
    }
}

/// Per-cell house level (0 = not a house) and the instant the house became
/// satisfied (`None` while it is not).
#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct HouseGrid {
    pub levels: Vec<u8>,
    pub satisfied_since: Vec<Option<f64>>,
}

impl HouseGrid {
    pub fn new(cells: usize) -> Self {
        Self {
            levels: vec![0; cells],
            satisfied_since: vec![None; cells],
        }
    }

    pub fn ensure_size(&mut self, cells: usize) {
        if self.levels.len() != cells {
            self.levels.resize(cells, 0);
        }
        if self.satisfied_since.len() != cells {
            self.satisfied_since.resize(cells, None);
        }
    }

    #[inline]
    pub fn level(&self, idx: usize) -> u8 {
        self.levels.get(idx).copied().unwrap_or(0)
    }

    /// Forgets everything about the cell. Used when the building is removed.
    pub fn clear(&mut self, idx: usize) {
        if let Some(level) = self.levels.get_mut(idx) {
            *level = 0;
        }
        if let Some(since) = self.satisfied_since.get_mut(idx) {
            *since = None;
        }
    }
}
