#[cfg(test)]
mod tests {
    use crate::grid::TileKind;
    use crate::production::{
        recipe_streams, step_production, warehouse_policy, BlockReason, ProductionProgress,
        Recipe, StepInput,
    };
    use crate::warehouse::{ResourceKind, WarehousePolicy, WarehouseStock};

    const QUICK_WOOD: Recipe = Recipe {
        duration_ms: 1_000,
        inputs: &[],
        outputs: &[(ResourceKind::Wood, 1)],
    };

    fn input(recipe: &Recipe, progress_ms: f64, dt_ms: f64, capacity: u32) -> StepInput<'_> {
        StepInput {
            dt_ms,
            progress_ms,
            efficiency: 1.0,
            recipe,
            placement_ok: true,
            capacity,
        }
    }

    fn sawmill() -> &'static Recipe {
        &recipe_streams(TileKind::Sawmill)[0]
    }

    #[test]
    fn test_catch_up_runs_every_ready_cycle() {
        let mut stock = WarehouseStock::new();
        let outcome = step_production(&input(&QUICK_WOOD, 0.0, 5_000.0, 100), Some(&mut stock));
        assert_eq!(outcome.made_cycles, 5);
        assert_eq!(outcome.next_progress_ms, 0.0);
        assert!(outcome.blocked.is_empty());
        assert_eq!(stock.get(ResourceKind::Wood), 5);
    }

    #[test]
    fn test_catch_up_capped_by_capacity() {
        let recipe = Recipe {
            duration_ms: 1_000,
            inputs: &[],
            outputs: &[(ResourceKind::Stone, 2)],
        };
        let mut stock = WarehouseStock::new();
        let outcome = step_production(&input(&recipe, 0.0, 5_000.0, 7), Some(&mut stock));
        assert_eq!(outcome.made_cycles, 3);
        assert_eq!(stock.get(ResourceKind::Stone), 6);
        // Unspent ready time is clamped to one full cycle.
        assert_eq!(outcome.next_progress_ms, 1_000.0);
    }

    #[test]
    fn test_catch_up_capped_by_inputs() {
        let mut stock = WarehouseStock::new();
        stock.store(ResourceKind::Wood, 5, 400);
        let outcome = step_production(&input(sawmill(), 0.0, 30_000.0, 400), Some(&mut stock));
        assert_eq!(outcome.made_cycles, 2);
        assert_eq!(stock.get(ResourceKind::Wood), 1);
        assert_eq!(stock.get(ResourceKind::Planks), 2);
        assert_eq!(outcome.next_progress_ms, 10_000.0);
    }

    #[test]
    fn test_missing_inputs_freeze_ready_progress() {
        let mut stock = WarehouseStock::new();
        stock.store(ResourceKind::Wood, 1, 400);
        let outcome = step_production(&input(sawmill(), 12_500.0, 1_000.0, 400), Some(&mut stock));
        assert_eq!(outcome.next_progress_ms, 12_500.0);
        assert_eq!(outcome.made_cycles, 0);
        assert_eq!(outcome.blocked, vec![BlockReason::NoInputs]);
        assert_eq!(outcome.eta_secs, None);
        assert_eq!(stock.get(ResourceKind::Wood), 1, "nothing consumed");
    }

    #[test]
    fn test_missing_inputs_freeze_partial_progress() {
        let mut stock = WarehouseStock::new();
        let outcome = step_production(&input(sawmill(), 4_000.0, 1_000.0, 400), Some(&mut stock));
        assert_eq!(outcome.next_progress_ms, 4_000.0);
        assert!(outcome.blocked.contains(&BlockReason::NoInputs));
    }

    #[test]
    fn test_full_warehouse_blocks_growing_recipe() {
        let mut stock = WarehouseStock::new();
        stock.store(ResourceKind::Fish, 10, 10);
        let outcome = step_production(&input(&QUICK_WOOD, 300.0, 1_000.0, 10), Some(&mut stock));
        assert_eq!(outcome.blocked, vec![BlockReason::WarehouseFull]);
        assert_eq!(outcome.next_progress_ms, 300.0);
    }

    #[test]
    fn test_full_warehouse_allows_shrinking_recipe() {
        let mut stock = WarehouseStock::new();
        stock.store(ResourceKind::Wood, 10, 10);
        let outcome = step_production(&input(sawmill(), 9_500.0, 1_000.0, 10), Some(&mut stock));
        assert_eq!(outcome.made_cycles, 1);
        assert_eq!(stock.get(ResourceKind::Wood), 8);
        assert_eq!(stock.get(ResourceKind::Planks), 1);
        assert_eq!(outcome.next_progress_ms, 500.0);
    }

    #[test]
    fn test_structural_reasons_are_co_reported() {
        let mut step = input(&QUICK_WOOD, 250.0, 1_000.0, 100);
        step.efficiency = 0.0;
        step.placement_ok = false;
        let outcome = step_production(&step, None);
        assert_eq!(
            outcome.blocked,
            vec![
                BlockReason::NoWorkers,
                BlockReason::NoWarehouse,
                BlockReason::BadPlacement
            ]
        );
        assert_eq!(outcome.next_progress_ms, 250.0);
        assert!(outcome.is_blocked());
    }

    #[test]
    fn test_no_workers_with_warehouse() {
        let mut stock = WarehouseStock::new();
        let mut step = input(&QUICK_WOOD, 0.0, 1_000.0, 100);
        step.efficiency = 0.0;
        let outcome = step_production(&step, Some(&mut stock));
        assert_eq!(outcome.blocked, vec![BlockReason::NoWorkers]);
        assert_eq!(stock.total(), 0);
    }

    #[test]
    fn test_partial_efficiency_and_eta() {
        let lumber = &recipe_streams(TileKind::LumberCamp)[0];
        let mut stock = WarehouseStock::new();
        let mut step = input(lumber, 0.0, 1_000.0, 400);
        step.efficiency = 0.5;
        let outcome = step_production(&step, Some(&mut stock));
        assert_eq!(outcome.next_progress_ms, 500.0);
        assert_eq!(outcome.made_cycles, 0);
        // (8000 - 500) / 500 = 15 seconds.
        assert_eq!(outcome.eta_secs, Some(15));
    }

    #[test]
    fn test_eta_rounds_up() {
        let lumber = &recipe_streams(TileKind::LumberCamp)[0];
        let mut stock = WarehouseStock::new();
        let outcome = step_production(&input(lumber, 6_500.0, 1_000.0, 400), Some(&mut stock));
        assert_eq!(outcome.next_progress_ms, 7_500.0);
        assert_eq!(outcome.eta_secs, Some(1));
    }

    #[test]
    fn test_catalog_streams() {
        for kind in TileKind::ALL {
            assert_eq!(recipe_streams(kind).is_empty(), !kind.is_production(), "{kind:?}");
        }
        assert_eq!(recipe_streams(TileKind::Livestock).len(), 2);
        let farm = recipe_streams(TileKind::Farm)[0];
        assert_eq!(farm.duration_ms, 15_000);
        assert_eq!(farm.outputs, &[(ResourceKind::Wheat, 3)]);
        assert_eq!(sawmill().net_growth(), -1);
        assert_eq!(recipe_streams(TileKind::Mill)[0].net_growth(), 0);
    }

    #[test]
    fn test_warehouse_policy_by_category() {
        assert_eq!(
            warehouse_policy(TileKind::Quarry),
            Some(WarehousePolicy::Concentrate(ResourceKind::Stone))
        );
        assert_eq!(
            warehouse_policy(TileKind::Livestock),
            Some(WarehousePolicy::Concentrate(ResourceKind::Meat))
        );
        assert_eq!(
            warehouse_policy(TileKind::Bakery),
            Some(WarehousePolicy::NearestSupplied)
        );
        assert_eq!(warehouse_policy(TileKind::Market), None);
        assert_eq!(warehouse_policy(TileKind::House), None);
    }

    #[test]
    fn test_progress_accumulators_resize() {
        let mut progress = ProductionProgress::default();
        progress.streams_mut(7, 1)[0] = 1_200.0;
        let streams = progress.streams_mut(7, 2);
        assert_eq!(streams, &vec![1_200.0, 0.0]);
    }
}
