/*!
 * Synchronization Configuration
 *
 * Runtime configuration for signal strategy selection
 */

use crate::core::limits::{DEFAULT_MAX_SPINS, LOW_LATENCY_MAX_SPINS};
use serde::{Deserialize, Serialize};

/// Strategy type selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyType {
    /// Park on the condvar as soon as no permit is available
    Park,
    /// Retry `try_acquire` for a bounded number of spins, then park
    SpinThenPark,
    /// Auto-select based on available parallelism
    Auto,
}

/// Synchronization configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Preferred strategy
    pub strategy: StrategyType,
    /// Maximum spin iterations before parking (for SpinThenPark)
    pub max_spins: u32,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyType::Auto,
            max_spins: DEFAULT_MAX_SPINS,
        }
    }
}

impl SyncConfig {
    /// Configuration for short critical sections on multi-core hosts
    pub const fn low_latency() -> Self {
        Self {
            strategy: StrategyType::SpinThenPark,
            max_spins: LOW_LATENCY_MAX_SPINS,
        }
    }

    /// Configuration that never spins
    pub const fn parked() -> Self {
        Self {
            strategy: StrategyType::Park,
            max_spins: 0,
        }
    }

    /// Select best strategy for current host
    pub fn select_strategy(&self) -> StrategyType {
        match self.strategy {
            StrategyType::Auto => {
                // Spinning only pays off when the releasing thread can run concurrently
                let cores = std::thread::available_parallelism()
                    .map(|n| n.get())
                    .unwrap_or(1);
                if cores > 1 {
                    StrategyType::SpinThenPark
                } else {
                    StrategyType::Park
                }
            }
            other => other,
        }
    }
}
