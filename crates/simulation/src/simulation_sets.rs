//! Deterministic simulation ordering via `SystemSet` phases.
//!
//! # FixedUpdate phases (`SimulationSet`)
//!
//! ```text
//! PreSim  →  Simulation  →  PostSim
//! ```
//!
//! * **PreSim** – Tick counter and slow-tick timer.
//! * **Simulation** – Workforce allocation, then production. Production reads the
//!   assignments made earlier in the same step.
//! * **PostSim** – Invariant checks over warehouse stock.
//!
//! # Update phases (`SimulationUpdateSet`)
//!
//! ```text
//! Input  →  Layers  →  Walkers  →  Houses  →  Reporting
//! ```
//!
//! * **Input** – Tile edit events are written into the grid.
//! * **Layers** – Building-state sync and the water-potential layer.
//! * **Walkers** – Spawn/prune, then movement and service painting.
//! * **Houses** – House evolution, reading the expiry painted this frame.
//! * **Reporting** – Stats and state hash. Read-only.

use bevy::prelude::*;

/// Ordered phases for systems running in the `FixedUpdate` schedule.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    PreSim,
    Simulation,
    PostSim,
}

/// Ordered phases for systems running in the `Update` schedule.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationUpdateSet {
    Input,
    Layers,
    Walkers,
    Houses,
    Reporting,
}
