//! Data-driven simulation parameters.
//!
//! Collects the tunable constants (walker cadence, service duration, upgrade delay,
//! radii, warehouse capacity, fixed step) into one [`GameParams`] resource. Hosts
//! override values by inserting a `GameParams` before adding `SimulationPlugin`, or
//! by parsing one from JSON with [`GameParams::from_json`].

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridParams {
    pub cols: usize,
    pub rows: usize,
}

impl Default for GridParams {
    fn default() -> Self {
        Self {
            cols: config::DEFAULT_GRID_COLS,
            rows: config::DEFAULT_GRID_ROWS,
        }
    }
}

/// Tunables for water carriers and market ladies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkerParams {
    /// Milliseconds between two steps of the same walker.
    pub move_interval_ms: f64,
    /// How long a house stays served after a walker passes by.
    pub service_duration_ms: f64,
    /// Manhattan radius around its market a market lady may roam and serve.
    pub market_radius: u32,
}

impl Default for WalkerParams {
    fn default() -> Self {
        Self {
            move_interval_ms: config::WALKER_MOVE_INTERVAL_MS,
            service_duration_ms: config::SERVICE_DURATION_MS,
            market_radius: config::MARKET_RADIUS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HouseParams {
    /// Sustained satisfaction required before a house gains one level.
    pub upgrade_delay_ms: f64,
}

impl Default for HouseParams {
    fn default() -> Self {
        Self {
            upgrade_delay_ms: config::HOUSE_UPGRADE_DELAY_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterParams {
    pub well_radius: u32,
}

impl Default for WaterParams {
    fn default() -> Self {
        Self {
            well_radius: config::WELL_RADIUS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkforceParams {
    /// Houses farther than this (Manhattan) never supply a building.
    pub radius: u32,
}

impl Default for WorkforceParams {
    fn default() -> Self {
        Self {
            radius: config::WORKFORCE_RADIUS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductionParams {
    /// Fixed timestep for workforce allocation and production.
    pub step_ms: u64,
    /// Warehouses beyond this Manhattan distance are unreachable.
    pub warehouse_radius: u32,
}

impl Default for ProductionParams {
    fn default() -> Self {
        Self {
            step_ms: config::FIXED_STEP_MS,
            warehouse_radius: config::WAREHOUSE_SEARCH_RADIUS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarehouseParams {
    /// Bound on the sum of all resources held by one warehouse.
    pub capacity: u32,
}

impl Default for WarehouseParams {
    fn default() -> Self {
        Self {
            capacity: config::WAREHOUSE_CAPACITY,
        }
    }
}

// ---------------------------------------------------------------------------
// Top-level GameParams resource
// ---------------------------------------------------------------------------

/// All simulation tunables. Systems read `Res<GameParams>` instead of constants.
#[derive(Resource, Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameParams {
    pub grid: GridParams,
    pub walkers: WalkerParams,
    pub houses: HouseParams,
    pub water: WaterParams,
    pub workforce: WorkforceParams,
    pub production: ProductionParams,
    pub warehouse: WarehouseParams,
}

impl GameParams {
    /// Parses a (possibly partial) JSON document; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<GameParams>(json).map(GameParams::sanitized)
    }

    /// Replaces values the simulation cannot run with, logging each correction.
    pub fn sanitized(mut self) -> Self {
        let defaults = GameParams::default();
        if self.grid.cols == 0 || self.grid.rows == 0 {
            warn!(
                "GameParams: grid {}x{} is empty, using {}x{}",
                self.grid.cols, self.grid.rows, defaults.grid.cols, defaults.grid.rows
            );
            self.grid = defaults.grid;
        }
        if !(self.walkers.move_interval_ms.is_finite() && self.walkers.move_interval_ms > 0.0) {
            warn!(
                "GameParams: walker move interval {} is invalid, using {}",
                self.walkers.move_interval_ms, defaults.walkers.move_interval_ms
            );
            self.walkers.move_interval_ms = defaults.walkers.move_interval_ms;
        }
        if !(self.walkers.service_duration_ms.is_finite()
            && self.walkers.service_duration_ms >= 0.0)
        {
            warn!(
                "GameParams: service duration {} is invalid, using {}",
                self.walkers.service_duration_ms, defaults.walkers.service_duration_ms
            );
            self.walkers.service_duration_ms = defaults.walkers.service_duration_ms;
        }
        if !(self.houses.upgrade_delay_ms.is_finite() && self.houses.upgrade_delay_ms >= 0.0) {
            warn!(
                "GameParams: upgrade delay {} is invalid, using {}",
                self.houses.upgrade_delay_ms, defaults.houses.upgrade_delay_ms
            );
            self.houses.upgrade_delay_ms = defaults.houses.upgrade_delay_ms;
        }
        if self.production.step_ms == 0 {
            warn!(
                "GameParams: production step of 0ms, using {}ms",
                defaults.production.step_ms
            );
            self.production.step_ms = defaults.production.step_ms;
        }
        if self.warehouse.capacity == 0 {
            warn!(
                "GameParams: warehouse capacity 0, using {}",
                defaults.warehouse.capacity
            );
            self.warehouse.capacity = defaults.warehouse.capacity;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_constants() {
        let params = GameParams::default();
        assert_eq!(params.walkers.move_interval_ms, 450.0);
        assert_eq!(params.walkers.service_duration_ms, 12_000.0);
        assert_eq!(params.walkers.market_radius, 4);
        assert_eq!(params.houses.upgrade_delay_ms, 10_000.0);
        assert_eq!(params.water.well_radius, 3);
        assert_eq!(params.workforce.radius, 10);
        assert_eq!(params.production.step_ms, 1_000);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{ "walkers": { "market_radius": 6 }, "warehouse": { "capacity": 50 } }"#;
        let params = GameParams::from_json(json).expect("valid json");
        assert_eq!(params.walkers.market_radius, 6);
        assert_eq!(params.walkers.move_interval_ms, 450.0);
        assert_eq!(params.warehouse.capacity, 50);
        assert_eq!(params.houses, HouseParams::default());
    }

    #[test]
    fn test_invalid_values_are_sanitized() {
        let json = r#"{
            "production": { "step_ms": 0 },
            "walkers": { "move_interval_ms": -1.0 },
            "grid": { "cols": 0 }
        }"#;
        let params = GameParams::from_json(json).expect("valid json");
        assert_eq!(params.production.step_ms, 1_000);
        assert_eq!(params.walkers.move_interval_ms, 450.0);
        assert_eq!(params.grid, GridParams::default());
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(GameParams::from_json("{ not json").is_err());
        assert!(GameParams::from_json(r#"{ "warehouse": { "capacity": "lots" } }"#).is_err());
    }
}
