//! Host-facing views: the building inspector and the per-frame snapshot.

use crate::grid::TileKind;
use crate::production::BlockReason;
use crate::test_harness::TestCity;
use crate::walkers::WalkerKind;
use crate::warehouse::ResourceKind;

fn small_town() -> TestCity {
    TestCity::with_size(24, 24)
        .with_road_line(3, 10, 9, 10)
        .with_tile(4, 9, TileKind::Market)
        .with_tile(5, 9, TileKind::House)
        .with_tile(6, 9, TileKind::Well)
        .with_house_level(7, 9, 3)
        .with_stock(8, 9, ResourceKind::Wheat, 6)
        .with_tile(8, 11, TileKind::Bakery)
}

#[test]
fn test_inspect_house() {
    let mut city = small_town();
    city.frame(16.0);
    let view = city.inspect(5, 9).expect("house");
    assert_eq!(view.kind, TileKind::House);
    assert_eq!(view.house_level, Some(1));
    // Potential and road but no food yet.
    assert_eq!(view.population, Some(1));
    assert!(view.report.is_none());
}

#[test]
fn test_inspect_warehouse_lists_stock() {
    let mut city = small_town();
    city.frame(16.0);
    let view = city.inspect(8, 9).expect("warehouse");
    assert_eq!(view.stock, Some(vec![(ResourceKind::Wheat, 6)]));
    assert_eq!(view.stock_total, Some(6));
}

#[test]
fn test_inspect_bakery_explains_block() {
    let mut city = small_town();
    for _ in 0..3 {
        city.frame(1_000.0);
    }
    let view = city.inspect(8, 11).expect("bakery");
    let report = view.report.expect("report");
    assert_eq!(report.workers_required, 4);
    assert!(report.block_reasons().contains(&BlockReason::NoInputs));
    city.assert_blocked_by(8, 11, BlockReason::NoInputs);
}

#[test]
fn test_inspect_ignores_ground_and_roads() {
    let mut city = small_town();
    city.frame(16.0);
    assert!(city.inspect(0, 0).is_none());
    assert!(city.inspect(3, 10).is_none());
    assert!(city.inspect(99, 99).is_none());
}

#[test]
fn test_snapshot_carries_layers_and_walkers() {
    let mut city = small_town();
    city.run_for_ms(3_000.0, 50.0);
    let snapshot = city.snapshot();
    assert_eq!((snapshot.cols, snapshot.rows), (24, 24));
    assert_eq!(snapshot.grid.len(), 24 * 24);
    assert_eq!(snapshot.grid[city.cell(6, 9)], TileKind::Well.code());
    assert!(snapshot.water_potential[city.cell(5, 9)]);
    let kinds: Vec<WalkerKind> = snapshot.walkers.iter().map(|w| w.kind).collect();
    assert_eq!(
        kinds,
        vec![
            WalkerKind::WaterCarrier,
            WalkerKind::WaterCarrier,
            WalkerKind::MarketLady
        ]
    );
    assert_eq!(snapshot.now_ms, city.now_ms());

    let json = snapshot.to_json().expect("serialize");
    assert!(json.contains("\"walkers\""));
    assert!(json.contains("no_inputs"));
}
