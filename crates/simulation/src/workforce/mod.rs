//! Workforce allocation: house population is the labor pool, matched greedily to
//! the fixed worker requirement of every labor-demanding building.

mod allocation;

pub use allocation::{
    allocate_workforce, allocate_workforce_system, allocate_workforce_with, collect_supply,
};

use std::collections::BTreeMap;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::SimulationSet;

pub struct WorkforcePlugin;

impl Plugin for WorkforcePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Workforce>().add_systems(
            FixedUpdate,
            allocate_workforce_system.in_set(SimulationSet::Simulation),
        );
    }
}

/// Labor assigned to one building for the current pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub required: u32,
    pub assigned: u32,
    /// Total population of houses within the workforce radius, drawn on or not.
    pub nearby_supply: u32,
}

impl Assignment {
    /// `min(1, assigned / required)`; a building that needs nobody runs at full rate.
    pub fn efficiency(&self) -> f64 {
        if self.required == 0 {
            return 1.0;
        }
        (self.assigned as f64 / self.required as f64).min(1.0)
    }
}

/// Result of the last allocation pass, keyed by building cell index.
#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct Workforce {
    pub assignments: BTreeMap<usize, Assignment>,
}

impl Workforce {
    pub fn assignment(&self, cell: usize) -> Option<&Assignment> {
        self.assignments.get(&cell)
    }

    /// Efficiency of the building at `cell`; 0 until it has been allocated once.
    pub fn efficiency(&self, cell: usize) -> f64 {
        self.assignments.get(&cell).map_or(0.0, Assignment::efficiency)
    }

    pub fn total_assigned(&self) -> u32 {
        self.assignments.values().map(|a| a.assigned).sum()
    }
}
