use crate::grid::TileKind;
use crate::warehouse::{ResourceKind, WarehousePolicy, WarehouseStock};

/// One production stream: a fixed cycle duration, the inputs one cycle consumes
/// and the outputs it yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recipe {
    pub duration_ms: u32,
    pub inputs: &'static [(ResourceKind, u32)],
    pub outputs: &'static [(ResourceKind, u32)],
}

impl Recipe {
    pub fn input_total(&self) -> u32 {
        self.inputs.iter().map(|&(_, q)| q).sum()
    }

    pub fn output_total(&self) -> u32 {
        self.outputs.iter().map(|&(_, q)| q).sum()
    }

    /// Change of a warehouse's total per cycle. Negative for shrinking recipes.
    pub fn net_growth(&self) -> i64 {
        self.output_total() as i64 - self.input_total() as i64
    }

    pub fn primary_output(&self) -> Option<ResourceKind> {
        self.outputs.first().map(|&(r, _)| r)
    }

    /// Whole cycles the stock can pay for. Unbounded (`u32::MAX`) without inputs.
    pub fn cycles_affordable_by_inputs(&self, stock: &WarehouseStock) -> u32 {
        self.inputs
            .iter()
            .map(|&(r, q)| if q == 0 { u32::MAX } else { stock.get(r) / q })
            .min()
            .unwrap_or(u32::MAX)
    }

    /// Whole cycles whose net growth fits under `capacity`. Unbounded when a cycle
    /// does not grow the stock.
    pub fn cycles_affordable_by_capacity(&self, stock: &WarehouseStock, capacity: u32) -> u32 {
        let net = self.net_growth();
        if net <= 0 {
            return u32::MAX;
        }
        let cycles = stock.free_space(capacity) as i64 / net;
        cycles.min(u32::MAX as i64) as u32
    }

    /// Whether one cycle could run against `stock` right now.
    pub fn can_run_cycle(&self, stock: &WarehouseStock, capacity: u32) -> bool {
        self.cycles_affordable_by_inputs(stock) > 0
            && self.cycles_affordable_by_capacity(stock, capacity) > 0
    }
}

const fn stream(
    duration_ms: u32,
    inputs: &'static [(ResourceKind, u32)],
    outputs: &'static [(ResourceKind, u32)],
) -> Recipe {
    Recipe {
        duration_ms,
        inputs,
        outputs,
    }
}

static LUMBER_CAMP: [Recipe; 1] = [stream(8_000, &[], &[(ResourceKind::Wood, 2)])];
static QUARRY: [Recipe; 1] = [stream(12_000, &[], &[(ResourceKind::Stone, 1)])];
static FARM: [Recipe; 1] = [stream(15_000, &[], &[(ResourceKind::Wheat, 3)])];
static FISHING_HUT: [Recipe; 1] = [stream(9_000, &[], &[(ResourceKind::Fish, 2)])];
static LIVESTOCK: [Recipe; 2] = [
    stream(12_000, &[], &[(ResourceKind::Meat, 1)]),
    stream(20_000, &[], &[(ResourceKind::Hides, 1)]),
];
static SAWMILL: [Recipe; 1] = [stream(
    10_000,
    &[(ResourceKind::Wood, 2)],
    &[(ResourceKind::Planks, 1)],
)];
static MILL: [Recipe; 1] = [stream(
    10_000,
    &[(ResourceKind::Wheat, 2)],
    &[(ResourceKind::Flour, 2)],
)];
static BAKERY: [Recipe; 1] = [stream(
    8_000,
    &[(ResourceKind::Flour, 1)],
    &[(ResourceKind::Bread, 2)],
)];

/// Recipe streams of a production building, each with its own progress
/// accumulator. Empty for anything that does not produce.
pub fn recipe_streams(kind: TileKind) -> &'static [Recipe] {
    match kind {
        TileKind::LumberCamp => &LUMBER_CAMP,
        TileKind::Quarry => &QUARRY,
        TileKind::Farm => &FARM,
        TileKind::FishingHut => &FISHING_HUT,
        TileKind::Livestock => &LIVESTOCK,
        TileKind::Sawmill => &SAWMILL,
        TileKind::Mill => &MILL,
        TileKind::Bakery => &BAKERY,
        _ => &[],
    }
}

/// Harvesters concentrate their primary output; processors go to the nearest
/// warehouse that can feed them.
pub fn warehouse_policy(kind: TileKind) -> Option<WarehousePolicy> {
    if kind.is_processor() {
        return Some(WarehousePolicy::NearestSupplied);
    }
    recipe_streams(kind)
        .first()
        .and_then(Recipe::primary_output)
        .map(WarehousePolicy::Concentrate)
}
