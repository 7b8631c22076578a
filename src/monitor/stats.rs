/*!
 * Coordinator Statistics
 * Lock-free counters updated from inside the critical section
 */

use super::role::{Role, RoleTable};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

pub(super) struct CoordinatorStats {
    admitted: RoleTable<AtomicU64>,
    handoffs: RoleTable<AtomicU64>,
    plain_releases: AtomicU64,
    handoff_violations: AtomicU64,
}

impl CoordinatorStats {
    pub(super) fn new() -> Self {
        Self {
            admitted: RoleTable::from_fn(|_| AtomicU64::new(0)),
            handoffs: RoleTable::from_fn(|_| AtomicU64::new(0)),
            plain_releases: AtomicU64::new(0),
            handoff_violations: AtomicU64::new(0),
        }
    }

    #[inline]
    pub(super) fn record_admission(&self, role: Role) {
        self.admitted[role].fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(super) fn record_handoff(&self, role: Role) {
        self.handoffs[role].fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(super) fn record_plain_release(&self) {
        self.plain_releases.fetch_add(1, Ordering::Relaxed);
    }

    pub(super) fn record_violation(&self) {
        self.handoff_violations.fetch_add(1, Ordering::Relaxed);
    }

    pub(super) fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            admitted: self.admitted.map(|c| c.load(Ordering::Relaxed)),
            handoffs: self.handoffs.map(|c| c.load(Ordering::Relaxed)),
            plain_releases: self.plain_releases.load(Ordering::Relaxed),
            handoff_violations: self.handoff_violations.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of the coordinator counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    /// Completed buffer operations per role
    pub admitted: RoleTable<u64>,
    /// Critical-section hand-offs to a waiting thread, per role
    pub handoffs: RoleTable<u64>,
    /// Wake-selections that found no eligible waiter and freed the token
    pub plain_releases: u64,
    /// Hand-offs whose predicate did not hold when the woken thread resumed
    pub handoff_violations: u64,
}

impl StatsSnapshot {
    pub fn total_admitted(&self) -> u64 {
        self.admitted.iter().map(|(_, n)| n).sum()
    }

    pub fn total_handoffs(&self) -> u64 {
        self.handoffs.iter().map(|(_, n)| n).sum()
    }
}
