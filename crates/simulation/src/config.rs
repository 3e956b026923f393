pub const DEFAULT_GRID_COLS: usize = 64;
pub const DEFAULT_GRID_ROWS: usize = 64;

/// Fixed production/workforce timestep. Production catch-up math assumes a bounded dt.
pub const FIXED_STEP_MS: u64 = 1_000;

pub const WALKER_MOVE_INTERVAL_MS: f64 = 450.0;
pub const SERVICE_DURATION_MS: f64 = 12_000.0;
/// Manhattan radius bounding both movement and service painting of market ladies.
pub const MARKET_RADIUS: u32 = 4;
/// Multiplier applied to the walker id when picking a candidate tile.
pub const WALKER_ID_STRIDE: u64 = 17;

pub const HOUSE_UPGRADE_DELAY_MS: f64 = 10_000.0;
pub const HOUSE_MAX_LEVEL: u8 = 3;

pub const WELL_RADIUS: u32 = 3;
pub const WORKFORCE_RADIUS: u32 = 10;

pub const WAREHOUSE_CAPACITY: u32 = 400;
pub const WAREHOUSE_SEARCH_RADIUS: u32 = 24;
