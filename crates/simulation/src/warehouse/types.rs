use std::collections::BTreeMap;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

// =============================================================================
// ResourceKind — goods stored in warehouses
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ResourceKind {
    // Raw goods from harvesters
    Wood,
    Stone,
    Wheat,
    Fish,
    Meat,
    Hides,
    // Processed goods
    Planks,
    Flour,
    Bread,
}

impl ResourceKind {
    pub const COUNT: usize = 9;

    pub const ALL: [ResourceKind; Self::COUNT] = [
        ResourceKind::Wood,
        ResourceKind::Stone,
        ResourceKind::Wheat,
        ResourceKind::Fish,
        ResourceKind::Meat,
        ResourceKind::Hides,
        ResourceKind::Planks,
        ResourceKind::Flour,
        ResourceKind::Bread,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Wood => "Wood",
            Self::Stone => "Stone",
            Self::Wheat => "Wheat",
            Self::Fish => "Fish",
            Self::Meat => "Meat",
            Self::Hides => "Hides",
            Self::Planks => "Planks",
            Self::Flour => "Flour",
            Self::Bread => "Bread",
        }
    }
}

// =============================================================================
// WarehouseStock — one warehouse's contents
// =============================================================================

/// Dense quantity array indexed by [`ResourceKind`]. The sum of all entries never
/// exceeds the capacity passed to [`WarehouseStock::store`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WarehouseStock {
    quantities: [u32; ResourceKind::COUNT],
}

impl WarehouseStock {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, resource: ResourceKind) -> u32 {
        self.quantities[resource.index()]
    }

    pub fn total(&self) -> u32 {
        self.quantities.iter().sum()
    }

    pub fn free_space(&self, capacity: u32) -> u32 {
        capacity.saturating_sub(self.total())
    }

    /// Stores up to `amount`, limited by the free space left under `capacity`.
    /// Returns the quantity actually stored; callers must not assume a full store.
    pub fn store(&mut self, resource: ResourceKind, amount: u32, capacity: u32) -> u32 {
        let stored = amount.min(self.free_space(capacity));
        self.quantities[resource.index()] += stored;
        stored
    }

    /// Removes up to `amount`. Returns the quantity actually removed.
    pub fn take(&mut self, resource: ResourceKind, amount: u32) -> u32 {
        let slot = &mut self.quantities[resource.index()];
        let taken = amount.min(*slot);
        *slot -= taken;
        taken
    }

    /// Non-empty entries in resource order.
    pub fn entries(&self) -> Vec<(ResourceKind, u32)> {
        ResourceKind::ALL
            .iter()
            .map(|&r| (r, self.get(r)))
            .filter(|&(_, q)| q > 0)
            .collect()
    }

    pub fn as_array(&self) -> &[u32; ResourceKind::COUNT] {
        &self.quantities
    }
}

// =============================================================================
// WarehouseLedger — all warehouses, keyed by cell index
// =============================================================================

/// Sparse map from warehouse cell index to its stock. Kept in sync with the grid by
/// `sync_building_state`; ordered so scans and hashes are deterministic.
#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct WarehouseLedger {
    pub stocks: BTreeMap<usize, WarehouseStock>,
}

impl WarehouseLedger {
    pub fn stock(&self, cell: usize) -> Option<&WarehouseStock> {
        self.stocks.get(&cell)
    }

    pub fn stock_mut(&mut self, cell: usize) -> Option<&mut WarehouseStock> {
        self.stocks.get_mut(&cell)
    }

    /// Stores into the warehouse at `cell`. Unknown cells store nothing.
    pub fn store(
        &mut self,
        cell: usize,
        resource: ResourceKind,
        amount: u32,
        capacity: u32,
    ) -> u32 {
        self.stocks
            .get_mut(&cell)
            .map_or(0, |s| s.store(resource, amount, capacity))
    }

    /// Takes from the warehouse at `cell`. Unknown cells yield nothing.
    pub fn take(&mut self, cell: usize, resource: ResourceKind, amount: u32) -> u32 {
        self.stocks
            .get_mut(&cell)
            .map_or(0, |s| s.take(resource, amount))
    }

    /// City-wide total of one resource across every warehouse.
    pub fn city_total(&self, resource: ResourceKind) -> u32 {
        self.stocks.values().map(|s| s.get(resource)).sum()
    }
}
