use serde::{Deserialize, Serialize};

use crate::warehouse::WarehouseStock;

use super::recipes::Recipe;

/// Why a production stream did not advance this step. Several may apply at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockReason {
    NoWorkers,
    NoWarehouse,
    WarehouseFull,
    BadPlacement,
    NoInputs,
}

impl BlockReason {
    pub fn label(self) -> &'static str {
        match self {
            BlockReason::NoWorkers => "No workers",
            BlockReason::NoWarehouse => "No warehouse in range",
            BlockReason::WarehouseFull => "Warehouse full",
            BlockReason::BadPlacement => "Bad placement",
            BlockReason::NoInputs => "Missing inputs",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct StepInput<'a> {
    pub dt_ms: f64,
    pub progress_ms: f64,
    /// Workforce efficiency in `0..=1`.
    pub efficiency: f64,
    pub recipe: &'a Recipe,
    pub placement_ok: bool,
    pub capacity: u32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct StepOutcome {
    pub next_progress_ms: f64,
    pub made_cycles: u32,
    /// Sorted, without duplicates. Empty when the stream advanced.
    pub blocked: Vec<BlockReason>,
    /// Whole seconds until the next cycle completes at the current efficiency.
    /// `None` while blocked.
    pub eta_secs: Option<u64>,
}

impl StepOutcome {
    fn frozen(progress_ms: f64, mut blocked: Vec<BlockReason>) -> Self {
        blocked.sort_unstable();
        blocked.dedup();
        Self {
            next_progress_ms: progress_ms,
            made_cycles: 0,
            blocked,
            eta_secs: None,
        }
    }

    pub fn is_blocked(&self) -> bool {
        !self.blocked.is_empty()
    }
}

fn eta_secs(duration_ms: f64, progress_ms: f64, efficiency: f64) -> u64 {
    ((duration_ms - progress_ms).max(0.0) / (1000.0 * efficiency)).ceil() as u64
}

/// Advances one production stream by `dt_ms`.
///
/// Progress freezes at its pre-step value whenever the stream is blocked: no
/// workers, bad placement or no warehouse (all co-reported), or not enough inputs
/// or headroom in the warehouse for a single cycle. Otherwise progress grows by
/// `dt * efficiency` and every whole cycle that is ready is completed, capped by
/// what the warehouse can pay for and hold. A stream left untouched for a long
/// interval catches up all of its cycles in one call.
pub fn step_production(input: &StepInput, warehouse: Option<&mut WarehouseStock>) -> StepOutcome {
    let recipe = input.recipe;
    let duration = recipe.duration_ms.max(1) as f64;
    let progress = input.progress_ms;

    let mut blocked = Vec::new();
    if input.efficiency <= 0.0 {
        blocked.push(BlockReason::NoWorkers);
    }
    if !input.placement_ok {
        blocked.push(BlockReason::BadPlacement);
    }
    let Some(stock) = warehouse else {
        blocked.push(BlockReason::NoWarehouse);
        return StepOutcome::frozen(progress, blocked);
    };
    if !blocked.is_empty() {
        return StepOutcome::frozen(progress, blocked);
    }

    let by_inputs = recipe.cycles_affordable_by_inputs(stock);
    let by_capacity = recipe.cycles_affordable_by_capacity(stock, input.capacity);
    if by_inputs == 0 {
        blocked.push(BlockReason::NoInputs);
    }
    if by_capacity == 0 {
        blocked.push(BlockReason::WarehouseFull);
    }
    if !blocked.is_empty() {
        return StepOutcome::frozen(progress, blocked);
    }

    let efficiency = input.efficiency.min(1.0);
    let advanced = progress + input.dt_ms.max(0.0) * efficiency;
    if advanced < duration {
        return StepOutcome {
            next_progress_ms: advanced,
            made_cycles: 0,
            blocked: Vec::new(),
            eta_secs: Some(eta_secs(duration, advanced, efficiency)),
        };
    }

    let ready = (advanced / duration).floor().min(u32::MAX as f64) as u32;
    let cycles = ready.min(by_inputs).min(by_capacity);

    for _ in 0..cycles {
        for &(resource, qty) in recipe.inputs {
            stock.take(resource, qty);
        }
        for &(resource, qty) in recipe.outputs {
            stock.store(resource, qty, input.capacity);
        }
    }

    let remaining = (advanced - cycles as f64 * duration).clamp(0.0, duration);
    StepOutcome {
        next_progress_ms: remaining,
        made_cycles: cycles,
        blocked: Vec::new(),
        eta_secs: Some(eta_secs(duration, remaining, efficiency)),
    }
}
