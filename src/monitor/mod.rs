/*!
 * Monitor
 *
 * Synchronization coordinator for the shared buffer: roles, admission
 * predicates, wake-selection and the four role entry points.
 */

pub mod admission;
mod config;
mod coordinator;
mod role;
mod stats;

pub use config::CoordinatorConfig;
pub use coordinator::{Coordinator, MonitorSnapshot};
pub use role::{Role, RoleTable};
pub use stats::StatsSnapshot;
