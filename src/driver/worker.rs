/*!
 * Role Workers
 * Named threads that loop one role's entry point until shutdown
 */

use super::stream::ValueStream;
use crate::monitor::{Coordinator, Role};
use anyhow::anyhow;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, warn};

/// Handle to a running role loop
pub struct RoleWorker {
    role: Role,
    handle: JoinHandle<u64>,
}

impl RoleWorker {
    /// Start a thread named `<role>-<id>` calling the role's entry point in a loop
    pub fn spawn(role: Role, coordinator: Arc<Coordinator>, id: usize) -> std::io::Result<Self> {
        let handle = thread::Builder::new()
            .name(format!("{role}-{id}"))
            .spawn(move || run_role(role, &coordinator))?;

        Ok(Self { role, handle })
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Wait for the loop to stop; returns the number of completed operations
    pub fn join(self) -> anyhow::Result<u64> {
        let role = self.role;
        self.handle
            .join()
            .map_err(|_| anyhow!("{role} worker panicked"))
    }
}

fn run_role(role: Role, coordinator: &Coordinator) -> u64 {
    let mut values = ValueStream::for_parity(role.parity());
    let mut completed = 0;

    debug!(role = %role, "role loop started");
    loop {
        let result = match role {
            Role::ProducerEven => coordinator.produce_even(values.advance()),
            Role::ProducerOdd => coordinator.produce_odd(values.advance()),
            Role::ConsumerEven => coordinator.consume_even().map(drop),
            Role::ConsumerOdd => coordinator.consume_odd().map(drop),
        };

        match result {
            Ok(()) => completed += 1,
            Err(e) if e.is_shutdown() => break,
            Err(e) => {
                warn!(role = %role, error = %e, "role loop stopped");
                break;
            }
        }
    }
    debug!(role = %role, completed, "role loop finished");

    completed
}
