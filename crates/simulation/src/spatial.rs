//! Derived, read-only spatial layers computed from the tile grid: adjacency tests,
//! the water-potential coverage layer around wells, and placement validity.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::game_params::GameParams;
use crate::grid::{TileGrid, TileKind};
use crate::terrain::{Terrain, TerrainGrid};

/// Cells within the well radius of at least one well. A cached geometric fact:
/// rebuilt from scratch only when the set of wells changes.
#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaterPotentialGrid {
    pub covered: Vec<bool>,
    pub cols: usize,
    /// Well cells the layer was built from, ascending.
    pub wells: Vec<usize>,
    pub radius: u32,
}

impl WaterPotentialGrid {
    pub fn has_potential(&self, x: usize, y: usize) -> bool {
        if self.cols == 0 || x >= self.cols {
            return false;
        }
        self.covered.get(y * self.cols + x).copied().unwrap_or(false)
    }

    #[inline]
    pub fn has_potential_at(&self, idx: usize) -> bool {
        self.covered.get(idx).copied().unwrap_or(false)
    }
}

/// OR-combines a Manhattan diamond of `radius` around every well.
pub fn compute_water_potential(grid: &TileGrid, radius: u32) -> WaterPotentialGrid {
    let wells = grid.cells_of_kind(TileKind::Well);
    let mut covered = vec![false; grid.cells.len()];
    let r = radius as i64;
    for &well in &wells {
        let (wx, wy) = grid.coords(well);
        for dy in -r..=r {
            let span = r - dy.abs();
            let y = wy as i64 + dy;
            if y < 0 || y >= grid.rows as i64 {
                continue;
            }
            for dx in -span..=span {
                let x = wx as i64 + dx;
                if x < 0 || x >= grid.cols as i64 {
                    continue;
                }
                covered[y as usize * grid.cols + x as usize] = true;
            }
        }
    }
    WaterPotentialGrid {
        covered,
        cols: grid.cols,
        wells,
        radius,
    }
}

pub fn has_adjacent_kind(grid: &TileGrid, x: usize, y: usize, kind: TileKind) -> bool {
    let (neighbors, count) = grid.neighbors4(x, y);
    neighbors[..count]
        .iter()
        .any(|&(nx, ny)| grid.get(nx, ny) == kind)
}

pub fn has_adjacent_road(grid: &TileGrid, x: usize, y: usize) -> bool {
    has_adjacent_kind(grid, x, y, TileKind::Road)
}

fn has_adjacent_terrain(
    terrain: &TerrainGrid,
    x: usize,
    y: usize,
    matches: impl Fn(Terrain) -> bool,
) -> bool {
    let (cols, rows) = (terrain.cols, terrain.rows);
    // N, E, S, W, matching `TileGrid::neighbors4`.
    let neighbors = [
        (y > 0).then(|| (x, y - 1)),
        (x + 1 < cols).then_some((x + 1, y)),
        (y + 1 < rows).then_some((x, y + 1)),
        (x > 0).then(|| (x - 1, y)),
    ];
    neighbors
        .into_iter()
        .flatten()
        .any(|(nx, ny)| matches(terrain.get(nx, ny)))
}

pub fn has_adjacent_forest(terrain: &TerrainGrid, x: usize, y: usize) -> bool {
    has_adjacent_terrain(terrain, x, y, |t| t == Terrain::Forest)
}

pub fn has_adjacent_water(terrain: &TerrainGrid, x: usize, y: usize) -> bool {
    has_adjacent_terrain(terrain, x, y, Terrain::is_water)
}

pub fn has_adjacent_mountain(terrain: &TerrainGrid, x: usize, y: usize) -> bool {
    has_adjacent_terrain(terrain, x, y, |t| t == Terrain::Mountain)
}

/// Structural placement rules for `kind` at (x, y). Economic cost and road
/// adjacency at placement time are the host's concern.
pub fn placement_valid(
    kind: TileKind,
    grid: &TileGrid,
    terrain: &TerrainGrid,
    x: usize,
    y: usize,
) -> bool {
    if !grid.in_bounds(x, y) {
        return false;
    }
    if kind == TileKind::Empty {
        return true;
    }
    if terrain.get(x, y).blocks_building() {
        return false;
    }
    match kind {
        TileKind::LumberCamp => has_adjacent_forest(terrain, x, y),
        TileKind::Quarry => has_adjacent_mountain(terrain, x, y),
        TileKind::FishingHut => has_adjacent_water(terrain, x, y),
        _ => true,
    }
}

pub struct SpatialPlugin;

impl Plugin for SpatialPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WaterPotentialGrid>().add_systems(
            Update,
            recompute_water_potential
                .after(crate::placement::sync_building_state)
                .in_set(crate::SimulationUpdateSet::Layers),
        );
    }
}

/// Rebuilds the water-potential layer when the set of wells (or the radius) changed.
pub fn recompute_water_potential(
    grid: Res<TileGrid>,
    params: Res<GameParams>,
    mut potential: ResMut<WaterPotentialGrid>,
) {
    let radius = params.water.well_radius;
    let size_changed = potential.covered.len() != grid.cells.len();
    if !grid.is_changed() && !size_changed && potential.radius == radius {
        return;
    }
    let wells = grid.cells_of_kind(TileKind::Well);
    if !size_changed && potential.radius == radius && wells == potential.wells {
        return;
    }
    *potential = compute_water_potential(&grid, radius);
    info!(
        "Water potential rebuilt: {} wells, {} covered cells",
        potential.wells.len(),
        potential.covered.iter().filter(|&&c| c).count()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_coverage_radius_boundary() {
        let mut grid = TileGrid::new(32, 32);
        grid.set(10, 10, TileKind::Well);
        let layer = compute_water_potential(&grid, 3);
        assert!(layer.has_potential(13, 10), "distance 3 is covered");
        assert!(!layer.has_potential(14, 10), "distance 4 is not");
        assert!(layer.has_potential(11, 12));
        assert!(!layer.has_potential(12, 12), "diagonal distance 4 is not");
        assert!(layer.has_potential(10, 7));
    }

    #[test]
    fn test_coverage_clipped_at_grid_edge() {
        let mut grid = TileGrid::new(8, 8);
        grid.set(0, 0, TileKind::Well);
        let layer = compute_water_potential(&grid, 3);
        let count = layer.covered.iter().filter(|&&c| c).count();
        // Quarter diamond of radius 3: 1 + 2 + 3 + 4 cells.
        assert_eq!(count, 10);
    }

    #[test]
    fn test_multiple_wells_union() {
        let mut grid = TileGrid::new(32, 32);
        grid.set(5, 5, TileKind::Well);
        grid.set(20, 5, TileKind::Well);
        let layer = compute_water_potential(&grid, 2);
        assert!(layer.has_potential(7, 5));
        assert!(layer.has_potential(18, 5));
        assert!(!layer.has_potential(12, 5));
        assert_eq!(layer.wells.len(), 2);
    }

    #[test]
    fn test_no_wells_no_potential() {
        let grid = TileGrid::new(16, 16);
        let layer = compute_water_potential(&grid, 3);
        assert!(layer.covered.iter().all(|&c| !c));
        assert!(!layer.has_potential(100, 100));
    }

    #[test]
    fn test_adjacency_ignores_diagonals() {
        let mut grid = TileGrid::new(8, 8);
        grid.set(3, 3, TileKind::Road);
        assert!(has_adjacent_road(&grid, 3, 4));
        assert!(has_adjacent_road(&grid, 2, 3));
        assert!(!has_adjacent_road(&grid, 4, 4));
        assert!(!has_adjacent_road(&grid, 3, 3));
    }

    #[test]
    fn test_terrain_adjacency() {
        let mut terrain = TerrainGrid::new(8, 8);
        terrain.set(0, 1, Terrain::Forest);
        terrain.set(5, 5, Terrain::FishSpot);
        assert!(has_adjacent_forest(&terrain, 0, 0));
        assert!(has_adjacent_forest(&terrain, 1, 1));
        assert!(!has_adjacent_forest(&terrain, 1, 0));
        assert!(has_adjacent_water(&terrain, 5, 4));
        assert!(!has_adjacent_water(&terrain, 6, 6));
    }

    #[test]
    fn test_terrain_adjacency_stops_at_east_and_south_edges() {
        let mut terrain = TerrainGrid::new(8, 8);
        // Next row's first tile: only reachable by wrapping past the east edge.
        terrain.set(0, 4, Terrain::Forest);
        assert!(!has_adjacent_forest(&terrain, 7, 3));
        terrain.set(7, 7, Terrain::Water);
        assert!(has_adjacent_water(&terrain, 7, 6));
        assert!(has_adjacent_water(&terrain, 6, 7));
        assert!(!has_adjacent_water(&terrain, 7, 7));
    }

    #[test]
    fn test_placement_rules() {
        let grid = TileGrid::new(8, 8);
        let mut terrain = TerrainGrid::new(8, 8);
        terrain.set(2, 2, Terrain::Forest);
        terrain.set(6, 6, Terrain::Water);
        terrain.set(0, 7, Terrain::Mountain);

        assert!(placement_valid(TileKind::LumberCamp, &grid, &terrain, 2, 3));
        assert!(!placement_valid(TileKind::LumberCamp, &grid, &terrain, 4, 4));
        assert!(placement_valid(TileKind::FishingHut, &grid, &terrain, 6, 5));
        assert!(!placement_valid(TileKind::House, &grid, &terrain, 6, 6));
        assert!(placement_valid(TileKind::Quarry, &grid, &terrain, 1, 7));
        assert!(placement_valid(TileKind::Farm, &grid, &terrain, 4, 4));
        assert!(!placement_valid(TileKind::Farm, &grid, &terrain, 8, 0));
    }
}
