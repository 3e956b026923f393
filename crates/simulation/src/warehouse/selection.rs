use serde::{Deserialize, Serialize};

use crate::grid::{manhattan, TileGrid};

use super::types::{ResourceKind, WarehouseLedger, WarehouseStock};

/// How a production building chooses among reachable warehouses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarehousePolicy {
    /// Harvesters: among accepting warehouses, the one already holding the most of the
    /// given resource, then the nearest, then the lowest cell index.
    Concentrate(ResourceKind),
    /// Processors: the nearest accepting warehouse, then the lowest cell index.
    NearestSupplied,
}

/// Linear scan over every warehouse within `max_radius` (Manhattan) of `origin`.
///
/// `accepts` filters warehouses that can run a cycle right now (inputs present,
/// headroom left). When none accept, the nearest warehouse in range is returned so
/// the production step can report why it is blocked. `None` means nothing in range.
pub fn find_warehouse(
    ledger: &WarehouseLedger,
    grid: &TileGrid,
    origin: (usize, usize),
    max_radius: u32,
    policy: WarehousePolicy,
    accepts: impl Fn(&WarehouseStock) -> bool,
) -> Option<usize> {
    let in_range: Vec<(u32, usize, &WarehouseStock)> = ledger
        .stocks
        .iter()
        .map(|(&cell, stock)| (manhattan(origin, grid.coords(cell)), cell, stock))
        .filter(|&(dist, _, _)| dist <= max_radius)
        .collect();

    let nearest = in_range
        .iter()
        .min_by_key(|&&(dist, cell, _)| (dist, cell))
        .map(|&(_, cell, _)| cell)?;

    let accepted = in_range.iter().filter(|&&(_, _, stock)| accepts(stock));
    let preferred = match policy {
        WarehousePolicy::Concentrate(resource) => accepted
            .min_by_key(|&&(dist, cell, stock)| {
                (std::cmp::Reverse(stock.get(resource)), dist, cell)
            })
            .map(|&(_, cell, _)| cell),
        WarehousePolicy::NearestSupplied => accepted
            .min_by_key(|&&(dist, cell, _)| (dist, cell))
            .map(|&(_, cell, _)| cell),
    };

    Some(preferred.unwrap_or(nearest))
}
