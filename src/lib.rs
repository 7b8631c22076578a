/*!
 * Parity Monitor Library
 *
 * Monitor-style coordination of even/odd producers and consumers over one
 * bounded circular buffer.
 */

pub mod buffer;
pub mod core;
pub mod driver;
pub mod monitor;
pub mod monitoring;

// Re-exports
pub use buffer::{BoundedBuffer, BufferError, BufferSnapshot};
pub use crate::core::errors::{CoordinatorError, CoordinatorResult};
pub use crate::core::types::{Parity, Value};
pub use driver::{RoleWorker, Scenario, ScenarioReport, ValueStream};
pub use monitor::{Coordinator, CoordinatorConfig, MonitorSnapshot, Role, RoleTable, StatsSnapshot};
pub use monitoring::init_tracing;
