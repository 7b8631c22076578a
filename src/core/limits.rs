/*!
 * Monitor Limits and Constants
 *
 * Thresholds used by the admission predicates, plus driver defaults.
 * Kept in one place so the predicates and the tests agree on them.
 */

use std::time::Duration;

// =============================================================================
// ADMISSION THRESHOLDS
// =============================================================================

/// Even producers are admitted only while fewer than this many even values are buffered
pub const EVEN_PRODUCE_LIMIT: usize = 10;

/// Even consumers need strictly more than this many buffered values
pub const EVEN_CONSUME_MIN_OCCUPANCY: usize = 3;

/// Odd consumers need strictly more than this many buffered values
pub const ODD_CONSUME_MIN_OCCUPANCY: usize = 7;

// =============================================================================
// SIGNAL TUNING
// =============================================================================

/// Default number of `try_acquire` attempts before parking (spin-then-park)
pub const DEFAULT_MAX_SPINS: u32 = 100;

/// Spin budget for the low-latency preset
pub const LOW_LATENCY_MAX_SPINS: u32 = 500;

// =============================================================================
// DRIVER DEFAULTS
// =============================================================================

/// Producer value streams wrap around at this modulus
pub const VALUE_STREAM_MODULUS: i64 = 50;

/// Producer value streams advance by this step (keeps parity fixed)
pub const VALUE_STREAM_STEP: i64 = 2;

/// Default scenario observation window
pub const DEFAULT_OBSERVATION_WINDOW: Duration = Duration::from_secs(1);

/// Capacity used by the mixed workload scenario
pub const FULL_MIX_CAPACITY: usize = 21;
