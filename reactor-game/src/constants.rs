//! Centralized tuning constants for the Reactor Ops mini-games.
//!
//! These values define the math of both state machines. Keeping them
//! together means gameplay can only be adjusted through reviewed code
//! changes, never through whatever the remote server happens to return.

// Notice keys --------------------------------------------------------------
pub(crate) const NOTICE_DIFFICULTY: &str = "notice.difficulty";
pub(crate) const NOTICE_CANNOT_CONNECT: &str = "notice.cannot_connect";
pub(crate) const NOTICE_REPEAT_SEQUENCE: &str = "notice.repeat_sequence";
pub(crate) const NOTICE_WRONG_SEQUENCE: &str = "notice.wrong_sequence";
pub(crate) const NOTICE_ROUND_COMPLETE: &str = "notice.round_complete";
pub(crate) const NOTICE_REACTOR_STABILIZED: &str = "notice.reactor_stabilized";
pub(crate) const NOTICE_REACTOR_BREACH: &str = "notice.reactor_breach";
pub(crate) const NOTICE_WARP_BREACH: &str = "notice.warp_breach";
pub(crate) const NOTICE_BALANCE_NODES: &str = "notice.balance_nodes";
pub(crate) const NOTICE_WARP_STABILIZED: &str = "notice.warp_stabilized";

// Shared timing ------------------------------------------------------------
pub const COUNTDOWN_PERIOD_MS: u32 = 1_000;
pub const TERMINAL_DISPLAY_MS: u32 = 2_000;
pub const DEFAULT_TIME_LIMIT_SECS: u32 = 60;

// Sequence recall ----------------------------------------------------------
pub const SYMBOL_COUNT: usize = 4;
pub const DEFAULT_ROUNDS: u32 = 5;
pub const DEFAULT_SEQUENCE_SPEED_MS: u32 = 500;
pub const DEFAULT_DIFFICULTY_LABEL: &str = "Easy";
pub const FIRST_ROUND_DELAY_MS: u32 = 1_500;
pub const ROUND_TRANSITION_MS: u32 = 1_000;
pub const PRESS_FLASH_MS: u32 = 200;

// Power balancing ----------------------------------------------------------
/// One power unit expressed in centi-units.
pub const CENTI: i32 = 100;
pub const NODE_COUNT: usize = 6;
pub const POWER_TICK_MS: u32 = 200;
pub const TARGET_POWER: i32 = 50 * CENTI;
pub const SEED_POWER_MIN_UNITS: i32 = 30;
pub const SEED_POWER_MAX_UNITS: i32 = 70;
pub const POWER_FLOOR: i32 = 20 * CENTI;
pub const POWER_CEILING: i32 = 80 * CENTI;
/// No node ever holds more than this, even between ticks.
pub const POWER_MAX: i32 = 100 * CENTI;
pub const FLUCTUATION: i32 = 2 * CENTI;
pub const BALANCE_TOLERANCE: i32 = 5 * CENTI;
pub const OVERHEAT_PENALTY: i32 = 10 * CENTI;
pub const STABILITY_MAX: i32 = 100 * CENTI;
pub const TRANSFER_AMOUNT: i32 = 10 * CENTI;
pub const COOLANT_MAX: u32 = 100 * 100;
pub const COOLANT_COST: u32 = 20 * 100;
pub const COOLANT_REGEN_PER_TICK: u32 = 50;
pub const COOLDOWN_DROP: i32 = 15 * CENTI;

// HUD thresholds -----------------------------------------------------------
pub const REACTOR_TIME_CRITICAL_SECS: u32 = 15;
pub const WARP_TIME_CRITICAL_SECS: u32 = 20;
pub const COOLANT_LOW: u32 = 30 * 100;
/// Nodes further than this from target are drawn in the warning colour.
pub const NODE_DRIFT_WARNING: i32 = 15 * CENTI;
