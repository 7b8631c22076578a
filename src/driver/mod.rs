/*!
 * Driver
 *
 * Collaborators outside the monitor core: producer value streams, threads
 * running role loops, and the fixed scenarios the binary executes.
 */

mod scenario;
mod stream;
mod worker;

pub use scenario::{Scenario, ScenarioReport};
pub use stream::ValueStream;
pub use worker::RoleWorker;
