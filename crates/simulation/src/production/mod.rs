//! Production engine: per-building recipe streams advanced on the fixed step,
//! drawing inputs from and depositing outputs into warehouses.

mod recipes;
mod reports;
mod step;
pub(crate) mod systems;
#[cfg(test)]
mod tests;

pub use recipes::{recipe_streams, warehouse_policy, Recipe};
pub use reports::{BuildingReport, BuildingReports, StreamReport};
pub use step::{step_production, BlockReason, StepInput, StepOutcome};
pub use systems::{run_production, ProductionProgress};

use bevy::prelude::*;

pub struct ProductionPlugin;

impl Plugin for ProductionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ProductionProgress>()
            .init_resource::<BuildingReports>()
            .add_systems(
                FixedUpdate,
                run_production
                    .after(crate::workforce::allocate_workforce_system)
                    .in_set(crate::SimulationSet::Simulation),
            );
    }
}
