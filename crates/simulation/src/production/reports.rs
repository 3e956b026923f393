use std::collections::BTreeMap;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::grid::TileKind;

use super::step::BlockReason;

/// Status of one recipe stream after the last production step.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StreamReport {
    /// Fraction of the current cycle done, `0..=1`.
    pub progress: f64,
    pub eta_secs: Option<u64>,
    pub blocked: Vec<BlockReason>,
}

/// Inspector summary of a labor-demanding building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingReport {
    pub kind: TileKind,
    pub workers_assigned: u32,
    pub workers_required: u32,
    pub nearby_supply: u32,
    pub efficiency: f64,
    /// Cell index of the warehouse used this step.
    pub warehouse: Option<usize>,
    pub streams: Vec<StreamReport>,
    /// Cycles completed since the building was placed, all streams together.
    pub cycles_total: u64,
}

impl BuildingReport {
    pub fn new(kind: TileKind) -> Self {
        Self {
            kind,
            workers_assigned: 0,
            workers_required: kind.workers_required(),
            nearby_supply: 0,
            efficiency: 0.0,
            warehouse: None,
            streams: Vec::new(),
            cycles_total: 0,
        }
    }

    /// Every block reason across streams, sorted and deduplicated.
    pub fn block_reasons(&self) -> Vec<BlockReason> {
        let mut reasons: Vec<BlockReason> = self
            .streams
            .iter()
            .flat_map(|s| s.blocked.iter().copied())
            .collect();
        reasons.sort_unstable();
        reasons.dedup();
        reasons
    }
}

#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildingReports {
    pub reports: BTreeMap<usize, BuildingReport>,
}

impl BuildingReports {
    pub fn get(&self, cell: usize) -> Option<&BuildingReport> {
        self.reports.get(&cell)
    }
}
