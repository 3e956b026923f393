//! Production through the full stack: workforce from houses, warehouse choice,
//! fixed-step cycles and building reports.

use crate::grid::TileKind;
use crate::production::BlockReason;
use crate::terrain::Terrain;
use crate::test_harness::TestCity;
use crate::warehouse::ResourceKind;

/// A level-3 house at (3,9) with road and well: four workers once the water
/// layer is up.
fn staffed_street() -> TestCity {
    TestCity::with_size(32, 32)
        .with_road_line(2, 10, 12, 10)
        .with_house_level(3, 9, 3)
        .with_tile(3, 8, TileKind::Well)
}

#[test]
fn test_lumber_camp_fills_warehouse() {
    let mut city = staffed_street()
        .with_terrain(6, 8, Terrain::Forest)
        .with_tile(6, 9, TileKind::LumberCamp)
        .with_tile(9, 9, TileKind::Warehouse);
    // The first step has neither a warehouse stock nor the water layer; every
    // later step runs at full efficiency, one cycle per 8 s.
    for _ in 0..20 {
        city.frame(1_000.0);
    }
    assert_eq!(city.stock_at(9, 9, ResourceKind::Wood), 4);

    let report = city.report(6, 9).expect("lumber camp report");
    assert_eq!(report.workers_assigned, 4);
    assert_eq!(report.efficiency, 1.0);
    assert_eq!(report.warehouse, Some(city.cell(9, 9)));
    assert_eq!(report.cycles_total, 2);
    assert!(report.block_reasons().is_empty());
    // 3 s into an 8 s cycle.
    assert_eq!(report.streams[0].eta_secs, Some(5));
}

#[test]
fn test_paused_clock_freezes_production_and_walkers() {
    let mut city = staffed_street()
        .with_terrain(6, 8, Terrain::Forest)
        .with_tile(6, 9, TileKind::LumberCamp)
        .with_tile(9, 9, TileKind::Warehouse);
    for _ in 0..3 {
        city.frame(1_000.0);
    }
    let steps = |city: &mut TestCity| -> Vec<u32> {
        city.walkers().iter().map(|w| w.steps).collect()
    };
    let steps_before = steps(&mut city);
    let cycles_before = city.report(6, 9).map(|r| r.cycles_total);

    city.set_paused(true);
    for _ in 0..30 {
        city.frame(1_000.0);
    }
    assert_eq!(city.now_ms(), 3_000.0);
    assert_eq!(steps(&mut city), steps_before);
    assert_eq!(city.stock_at(9, 9, ResourceKind::Wood), 0);
    assert_eq!(city.report(6, 9).map(|r| r.cycles_total), cycles_before);

    city.set_paused(false);
    for _ in 0..20 {
        city.frame(1_000.0);
    }
    city.assert_stock_at_least(9, 9, ResourceKind::Wood, 1);
}

#[test]
fn test_mill_consumes_wheat_until_empty() {
    let mut city = staffed_street()
        .with_tile(6, 9, TileKind::Mill)
        .with_stock(9, 9, ResourceKind::Wheat, 4);
    for _ in 0..25 {
        city.frame(1_000.0);
    }
    assert_eq!(city.stock_at(9, 9, ResourceKind::Flour), 4);
    assert_eq!(city.stock_at(9, 9, ResourceKind::Wheat), 0);
    city.assert_blocked_by(6, 9, BlockReason::NoInputs);
    let report = city.report(6, 9).expect("mill report");
    assert_eq!(report.streams[0].eta_secs, None);
}

#[test]
fn test_lumber_feeds_sawmill() {
    let mut city = TestCity::with_size(32, 32)
        .with_road_line(2, 10, 12, 10)
        .with_house_level(3, 9, 3)
        .with_house_level(4, 9, 3)
        .with_house_level(5, 9, 3)
        .with_tile(3, 8, TileKind::Well)
        .with_terrain(7, 8, Terrain::Forest)
        .with_tile(7, 9, TileKind::LumberCamp)
        .with_tile(8, 9, TileKind::Sawmill)
        .with_tile(10, 9, TileKind::Warehouse);
    for _ in 0..30 {
        city.frame(1_000.0);
    }
    city.assert_stock_at_least(10, 9, ResourceKind::Planks, 1);
    assert_eq!(city.report(8, 9).map(|r| r.workers_assigned), Some(6));
}

#[test]
fn test_missing_warehouse_blocks_harvester() {
    let mut city = staffed_street()
        .with_terrain(6, 8, Terrain::Forest)
        .with_tile(6, 9, TileKind::LumberCamp);
    for _ in 0..10 {
        city.frame(1_000.0);
    }
    city.assert_blocked_by(6, 9, BlockReason::NoWarehouse);
    let report = city.report(6, 9).expect("report");
    assert_eq!(report.warehouse, None);
    assert_eq!(report.streams[0].progress, 0.0);
}

#[test]
fn test_unstaffed_building_reports_no_workers() {
    let mut city = TestCity::with_size(32, 32)
        .with_terrain(6, 8, Terrain::Forest)
        .with_tile(6, 9, TileKind::LumberCamp)
        .with_tile(9, 9, TileKind::Warehouse);
    for _ in 0..10 {
        city.frame(1_000.0);
    }
    city.assert_blocked_by(6, 9, BlockReason::NoWorkers);
    assert_eq!(city.report(6, 9).map(|r| r.efficiency), Some(0.0));
    assert_eq!(city.stock_at(9, 9, ResourceKind::Wood), 0);
}

#[test]
fn test_lumber_camp_away_from_forest_is_badly_placed() {
    let mut city = staffed_street()
        .with_tile(6, 9, TileKind::LumberCamp)
        .with_tile(9, 9, TileKind::Warehouse);
    for _ in 0..10 {
        city.frame(1_000.0);
    }
    city.assert_blocked_by(6, 9, BlockReason::BadPlacement);
    assert_eq!(city.stock_at(9, 9, ResourceKind::Wood), 0);
}

#[test]
fn test_market_gets_workforce_report_only() {
    let mut city = staffed_street().with_tile(6, 9, TileKind::Market);
    for _ in 0..3 {
        city.frame(1_000.0);
    }
    let report = city.report(6, 9).expect("market report");
    assert_eq!(report.workers_required, 2);
    assert_eq!(report.workers_assigned, 2);
    assert!(report.streams.is_empty());
}

#[test]
fn test_production_ignores_frame_rate() {
    let build = || {
        staffed_street()
            .with_terrain(6, 8, Terrain::Forest)
            .with_tile(6, 9, TileKind::LumberCamp)
            .with_tile(9, 9, TileKind::Warehouse)
    };
    let mut coarse = build();
    let mut fine = build();
    coarse.frame(16.0);
    fine.frame(16.0);
    coarse.run_for_ms(40_000.0, 1_000.0);
    fine.run_for_ms(40_000.0, 20.0);
    assert_eq!(
        coarse.stock_at(9, 9, ResourceKind::Wood),
        fine.stock_at(9, 9, ResourceKind::Wood)
    );
}
