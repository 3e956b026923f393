//! Walker lifecycle: spawning for qualifying homes, pruning when a home stops
//! qualifying, and service painting along the road.

use crate::grid::TileKind;
use crate::placement::TileEdit;
use crate::test_harness::TestCity;
use crate::walkers::{ServiceKind, WalkerKind};

/// Road along y=10 from x=3 to x=7, a house at (5,9) and a well at (6,9).
fn watered_house() -> TestCity {
    TestCity::with_size(32, 32)
        .with_road_line(3, 10, 7, 10)
        .with_tile(5, 9, TileKind::House)
        .with_tile(6, 9, TileKind::Well)
}

#[test]
fn test_carrier_spawns_for_watered_house() {
    let mut city = watered_house();
    city.frame(16.0);
    city.assert_walker_count(WalkerKind::WaterCarrier, 1);
    let walker = city.walkers()[0].clone();
    assert_eq!(walker.pos, (5, 10), "spawned on the first road neighbor");
    assert_eq!(walker.home, city.cell(5, 9));
}

#[test]
fn test_no_carrier_without_water_potential() {
    let mut city = TestCity::with_size(32, 32)
        .with_road_line(3, 10, 7, 10)
        .with_tile(5, 9, TileKind::House);
    city.run_for_ms(2_000.0, 50.0);
    city.assert_walker_count(WalkerKind::WaterCarrier, 0);
}

#[test]
fn test_no_carrier_without_road() {
    let mut city = TestCity::with_size(32, 32)
        .with_tile(5, 9, TileKind::House)
        .with_tile(6, 9, TileKind::Well);
    city.run_for_ms(2_000.0, 50.0);
    city.assert_walker_count(WalkerKind::WaterCarrier, 0);
}

#[test]
fn test_spawning_is_idempotent() {
    let mut city = watered_house();
    city.run_for_ms(3_000.0, 16.0);
    city.assert_walker_count(WalkerKind::WaterCarrier, 1);
}

#[test]
fn test_bulldozing_house_prunes_carrier() {
    let mut city = watered_house();
    city.frame(16.0);
    city.assert_walker_count(WalkerKind::WaterCarrier, 1);

    city.send_edit(TileEdit::bulldoze(5, 9));
    city.frame(16.0);
    city.assert_walker_count(WalkerKind::WaterCarrier, 0);
    assert_eq!(city.grid().get(5, 9), TileKind::Empty);
}

#[test]
fn test_removing_well_prunes_carrier() {
    let mut city = watered_house();
    city.frame(16.0);
    city.send_edit(TileEdit::bulldoze(6, 9));
    city.frame(16.0);
    assert!(!city.potential().has_potential_at(city.cell(5, 9)));
    city.assert_walker_count(WalkerKind::WaterCarrier, 0);
}

#[test]
fn test_market_lady_spawns_next_to_market() {
    let mut city = TestCity::with_size(32, 32)
        .with_road_line(3, 10, 7, 10)
        .with_tile(4, 9, TileKind::Market);
    city.frame(16.0);
    city.assert_walker_count(WalkerKind::MarketLady, 1);
    city.assert_walker_count(WalkerKind::WaterCarrier, 0);
    assert_eq!(city.walkers()[0].pos, (4, 10));
}

#[test]
fn test_walker_ids_are_stable_across_frames() {
    let mut city = watered_house().with_tile(4, 9, TileKind::Market);
    city.frame(16.0);
    let ids: Vec<u32> = city.walkers().iter().map(|w| w.id).collect();
    assert_eq!(ids, vec![0, 1], "houses are visited before markets");
    city.run_for_ms(5_000.0, 33.0);
    let later: Vec<u32> = city.walkers().iter().map(|w| w.id).collect();
    assert_eq!(ids, later);
}

#[test]
fn test_carrier_walks_one_tile_per_interval() {
    let mut city = watered_house();
    city.frame(16.0);
    city.run_for_ms(400.0, 50.0);
    assert_eq!(city.walkers()[0].steps, 0, "first move is one interval away");
    city.run_for_ms(100.0, 50.0);
    let walker = city.walkers()[0].clone();
    assert_eq!(walker.steps, 1);
    assert_eq!(walker.prev, (5, 10));
    assert_eq!(walker.pos, (6, 10));
}

#[test]
fn test_carrier_paints_water_on_passing_house() {
    let mut city = watered_house();
    city.frame(16.0);
    // Spawn (5,10) -> (6,10) -> (7,10) -> back to (6,10) -> (5,10).
    city.run_for_ms(2_000.0, 50.0);
    let house = city.cell(5, 9);
    let now = city.now_ms();
    assert!(city.expiry().is_served(ServiceKind::Water, house, now));
    assert!(!city.expiry().is_served(ServiceKind::Food, house, now));
}

#[test]
fn test_road_removed_under_walker_resets_to_spawn_tile() {
    let mut city = watered_house();
    city.frame(16.0);
    city.run_for_ms(500.0, 50.0);
    assert_eq!(city.walkers()[0].pos, (6, 10));

    city.send_edit(TileEdit::bulldoze(6, 10));
    city.frame(16.0);
    let walker = city.walkers()[0].clone();
    assert_eq!(walker.pos, (5, 10));
    assert_eq!(walker.prev, (5, 10));
}
