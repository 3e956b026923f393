use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::grid::TileKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WalkerKind {
    WaterCarrier,
    MarketLady,
}

impl WalkerKind {
    /// Tile kind of the building a walker of this kind belongs to.
    pub fn home_kind(self) -> TileKind {
        match self {
            WalkerKind::WaterCarrier => TileKind::House,
            WalkerKind::MarketLady => TileKind::Market,
        }
    }

    pub fn service(self) -> ServiceKind {
        match self {
            WalkerKind::WaterCarrier => ServiceKind::Water,
            WalkerKind::MarketLady => ServiceKind::Food,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceKind {
    Water,
    Food,
}

/// A mobile service agent. Bound to exactly one home cell for its whole life.
#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Walker {
    /// Stable identity; feeds the deterministic tile choice.
    pub id: u32,
    pub kind: WalkerKind,
    /// Cell index of the home house (carriers) or home market (ladies).
    pub home: usize,
    pub pos: (usize, usize),
    /// Tile occupied before the last move. Used for anti-backtracking and by the
    /// renderer to interpolate.
    pub prev: (usize, usize),
    pub steps: u32,
    pub next_move_at: f64,
}

impl Walker {
    pub fn new(
        id: u32,
        kind: WalkerKind,
        home: usize,
        spawn: (usize, usize),
        now: f64,
        interval: f64,
    ) -> Self {
        Self {
            id,
            kind,
            home,
            pos: spawn,
            prev: spawn,
            steps: 0,
            next_move_at: now + interval,
        }
    }
}

/// Monotonic walker id allocator. Ids are never reused.
#[derive(Resource, Debug, Clone, Default)]
pub struct WalkerIds {
    pub next: u32,
}

impl WalkerIds {
    pub fn allocate(&mut self) -> u32 {
        let id = self.next;
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// Per-cell "served until" instants, one layer per service. Only walker movement
/// writes them; entries simply go stale once `now` passes them.
#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceExpiryGrid {
    pub water: Vec<f64>,
    pub food: Vec<f64>,
}

impl ServiceExpiryGrid {
    pub fn new(cells: usize) -> Self {
        Self {
            water: vec![0.0; cells],
            food: vec![0.0; cells],
        }
    }

    /// Grows the layers to `cells` entries; existing instants are kept.
    pub fn ensure_size(&mut self, cells: usize) {
        if self.water.len() != cells {
            self.water.resize(cells, 0.0);
        }
        if self.food.len() != cells {
            self.food.resize(cells, 0.0);
        }
    }

    pub fn layer(&self, service: ServiceKind) -> &[f64] {
        match service {
            ServiceKind::Water => &self.water,
            ServiceKind::Food => &self.food,
        }
    }

    fn layer_mut(&mut self, service: ServiceKind) -> &mut Vec<f64> {
        match service {
            ServiceKind::Water => &mut self.water,
            ServiceKind::Food => &mut self.food,
        }
    }

    pub fn expiry(&self, service: ServiceKind, idx: usize) -> f64 {
        self.layer(service).get(idx).copied().unwrap_or(0.0)
    }

    pub fn is_served(&self, service: ServiceKind, idx: usize, now: f64) -> bool {
        self.expiry(service, idx) > now
    }

    /// `expiry = max(expiry, until)`. Never shortens existing coverage.
    pub fn refresh(&mut self, service: ServiceKind, idx: usize, until: f64) {
        if let Some(slot) = self.layer_mut(service).get_mut(idx) {
            if until > *slot {
                *slot = until;
            }
        }
    }
}
