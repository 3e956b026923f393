//! Service walkers: water carriers bound to a house and market ladies bound to a
//! market. Each walks the road network one tile per move interval, choosing among
//! road neighbors deterministically, and refreshes service expiry on the houses
//! next to every tile it steps on.

mod movement;
mod systems;
mod types;

pub use movement::{candidate_tiles, choose_next_tile, home_qualifies, paint_service, spawn_tile};
pub use systems::{move_walkers, spawn_and_prune_walkers};
pub use types::{ServiceExpiryGrid, ServiceKind, Walker, WalkerIds, WalkerKind};

use bevy::prelude::*;

use crate::SimulationUpdateSet;

pub struct WalkersPlugin;

impl Plugin for WalkersPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WalkerIds>().add_systems(
            Update,
            (spawn_and_prune_walkers, move_walkers)
                .chain()
                .in_set(SimulationUpdateSet::Walkers),
        );
    }
}
