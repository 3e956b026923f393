//! Deterministic state hashing for replay and determinism checks.
//!
//! The hash covers, in this order: the fixed-step tick, grid codes in row-major
//! order, house levels, walkers sorted by id, and warehouse stock in cell order.
//! Floats are hashed through their bit patterns.

use std::hash::{Hash, Hasher};

use bevy::prelude::*;

use crate::grid::TileGrid;
use crate::houses::HouseGrid;
use crate::walkers::Walker;
use crate::warehouse::WarehouseLedger;
use crate::{SimulationUpdateSet, TickCounter};

#[derive(Resource, Default, Clone, Debug)]
pub struct StateHash {
    /// Fixed-step tick at which this hash was computed.
    pub tick: u64,
    pub hash: u64,
}

// ---------------------------------------------------------------------------
// FNV-1a hasher (deterministic, no random seed)
// ---------------------------------------------------------------------------

struct Fnv1aHasher {
    state: u64,
}

impl Fnv1aHasher {
    const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
    const FNV_PRIME: u64 = 0x00000100000001B3;

    fn new() -> Self {
        Self {
            state: Self::FNV_OFFSET_BASIS,
        }
    }
}

impl Hasher for Fnv1aHasher {
    fn finish(&self) -> u64 {
        self.state
    }

    fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.state ^= byte as u64;
            self.state = self.state.wrapping_mul(Self::FNV_PRIME);
        }
    }
}

/// Hash of the simulation state. `walkers` may come in any order.
pub fn compute_state_hash<'a>(
    tick: u64,
    grid: &TileGrid,
    houses: &HouseGrid,
    walkers: impl IntoIterator<Item = &'a Walker>,
    ledger: &WarehouseLedger,
) -> u64 {
    let mut hasher = Fnv1aHasher::new();
    tick.hash(&mut hasher);

    grid.cols.hash(&mut hasher);
    grid.rows.hash(&mut hasher);
    for kind in &grid.cells {
        kind.code().hash(&mut hasher);
    }

    houses.levels.hash(&mut hasher);

    let mut walkers: Vec<&Walker> = walkers.into_iter().collect();
    walkers.sort_by_key(|w| w.id);
    for w in walkers {
        w.id.hash(&mut hasher);
        w.kind.hash(&mut hasher);
        w.home.hash(&mut hasher);
        w.pos.hash(&mut hasher);
        w.prev.hash(&mut hasher);
        w.steps.hash(&mut hasher);
        w.next_move_at.to_bits().hash(&mut hasher);
    }

    for (cell, stock) in &ledger.stocks {
        cell.hash(&mut hasher);
        stock.hash(&mut hasher);
    }

    hasher.finish()
}

pub fn update_state_hash(
    tick: Res<TickCounter>,
    grid: Res<TileGrid>,
    houses: Res<HouseGrid>,
    ledger: Res<WarehouseLedger>,
    walkers: Query<&Walker>,
    mut state_hash: ResMut<StateHash>,
) {
    state_hash.tick = tick.0;
    state_hash.hash = compute_state_hash(tick.0, &grid, &houses, walkers.iter(), &ledger);
}

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

pub struct StateHashPlugin;

impl Plugin for StateHashPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<StateHash>().add_systems(
            Update,
            update_state_hash.in_set(SimulationUpdateSet::Reporting),
        );
    }
}
