use bevy::prelude::*;

use crate::*;

/// Register all simulation feature plugins.
///
/// Each plugin places its systems in a `SimulationSet` / `SimulationUpdateSet`
/// phase, so registration order does not affect execution order.
pub(crate) fn register_feature_plugins(app: &mut App) {
    // Input and derived layers
    app.add_plugins(placement::PlacementPlugin);
    app.add_plugins(spatial::SpatialPlugin);

    // Per-frame agents
    app.add_plugins(walkers::WalkersPlugin);
    app.add_plugins(houses::HousesPlugin);

    // Fixed-step economy
    app.add_plugins(workforce::WorkforcePlugin);
    app.add_plugins(production::ProductionPlugin);

    // Reporting and guards
    app.add_plugins(stats::StatsPlugin);
    app.add_plugins(state_hash::StateHashPlugin);
    app.add_plugins(invariant_checks::InvariantChecksPlugin);
}
