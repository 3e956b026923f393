//! Warehouse ledger: per-warehouse dense resource stock bounded by one shared
//! capacity, plus the warehouse selection policies used by production buildings.

mod selection;
mod types;

pub use selection::{find_warehouse, WarehousePolicy};
pub use types::{ResourceKind, WarehouseLedger, WarehouseStock};
