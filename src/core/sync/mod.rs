/*!
 * Synchronization Primitives
 *
 * Blocking signals used by the monitor:
 * - A single-permit signal acts as the critical-section token
 * - Zero-permit signals act as per-role wake channels
 *
 * # Strategies
 *
 * - **Park**: park on a parking_lot condvar immediately
 * - **SpinThenPark**: bounded `try_acquire` spinning before parking
 */

mod config;
mod signal;
mod traits;

pub use config::{StrategyType, SyncConfig};
pub use signal::{Signal, SignalError, SignalResult};
pub use traits::WakeResult;
