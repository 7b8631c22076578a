/*!
 * Synchronization Coordinator
 *
 * Monitor over one bounded buffer shared by four thread roles. All buffer
 * access and all wait counters sit behind a single critical-section token.
 *
 * # Protocol
 *
 * Every entry point:
 * 1. Acquires the token
 * 2. If its admission predicate is false, registers as waiting, releases the
 *    token and blocks on its role's wake channel. A thread woken there already
 *    owns the critical section and does not evaluate its predicate again
 * 3. Performs exactly one push or pop
 * 4. Runs wake-selection: hands the critical section to the highest-priority
 *    waiting role whose predicate holds, or releases the token
 *
 * # Caller obligations
 *
 * Never terminate a thread while it is inside an entry point. A thread that
 * dies holding the critical section leaves the token unreleased and every
 * other thread blocks forever. Use [`Coordinator::shutdown`] to stop role
 * loops.
 */

use super::admission;
use super::config::CoordinatorConfig;
use super::role::{Role, RoleTable};
use super::stats::{CoordinatorStats, StatsSnapshot};
use crate::buffer::{BoundedBuffer, BufferResult, BufferSnapshot};
use crate::core::errors::{CoordinatorError, CoordinatorResult};
use crate::core::sync::Signal;
use crate::core::types::Value;
use parking_lot::{Mutex, MutexGuard};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{error, info, trace};

/// State guarded by the critical section
struct MonitorState {
    buffer: BoundedBuffer,
    waiting: RoleTable<usize>,
}

impl MonitorState {
    fn snapshot(&self) -> (BufferSnapshot, RoleTable<usize>, RoleTable<bool>) {
        (
            self.buffer.snapshot(),
            self.waiting.clone(),
            admission::admissible_roles(&self.buffer),
        )
    }
}

/// Observation of the monitor taken under the token
#[derive(Debug, Clone, Serialize)]
pub struct MonitorSnapshot {
    pub buffer: BufferSnapshot,
    /// Threads blocked on each role's wake channel
    pub waiting: RoleTable<usize>,
    /// Admission predicate of each role against `buffer`
    pub admissible: RoleTable<bool>,
    pub shutdown: bool,
}

impl MonitorSnapshot {
    #[inline]
    pub fn occupancy(&self) -> usize {
        self.buffer.occupancy
    }
}

/// Monitor coordinating producers and consumers over a bounded buffer
///
/// Shared between threads through `Arc<Coordinator>`.
pub struct Coordinator {
    /// Critical-section token, one permit when free
    token: Signal,
    /// Per-role wake channels, zero permits unless a hand-off is in flight
    wake: RoleTable<Signal>,
    /// Only locked by the thread that owns the critical section
    state: Mutex<MonitorState>,
    stats: CoordinatorStats,
    shutdown: AtomicBool,
    capacity: usize,
}

impl std::fmt::Debug for Coordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Coordinator")
            .field("capacity", &self.capacity)
            .field("token", &self.token)
            .field("shutdown", &self.is_shutdown())
            .finish()
    }
}

impl Coordinator {
    pub fn new(config: CoordinatorConfig) -> CoordinatorResult<Self> {
        config.validate()?;
        let buffer = BoundedBuffer::new(config.capacity)?;

        info!(
            capacity = config.capacity,
            strategy = ?config.sync.select_strategy(),
            "coordinator created"
        );

        Ok(Self {
            token: Signal::new(1, &config.sync),
            wake: RoleTable::from_fn(|_| Signal::new(0, &config.sync)),
            state: Mutex::new(MonitorState {
                buffer,
                waiting: RoleTable::default(),
            }),
            stats: CoordinatorStats::new(),
            shutdown: AtomicBool::new(false),
            capacity: config.capacity,
        })
    }

    /// Create with default signal configuration
    pub fn with_capacity(capacity: usize) -> CoordinatorResult<Self> {
        Self::new(CoordinatorConfig::new(capacity))
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Push an even value once the even-producer predicate holds
    pub fn produce_even(&self, value: Value) -> CoordinatorResult<()> {
        self.produce(Role::ProducerEven, value)
    }

    /// Push an odd value once the odd-producer predicate holds
    pub fn produce_odd(&self, value: Value) -> CoordinatorResult<()> {
        self.produce(Role::ProducerOdd, value)
    }

    /// Pop the front value once the even-consumer predicate holds
    pub fn consume_even(&self) -> CoordinatorResult<Value> {
        self.enter(Role::ConsumerEven, BoundedBuffer::pop)
    }

    /// Pop the front value once the odd-consumer predicate holds
    pub fn consume_odd(&self) -> CoordinatorResult<Value> {
        self.enter(Role::ConsumerOdd, BoundedBuffer::pop)
    }

    fn produce(&self, role: Role, value: Value) -> CoordinatorResult<()> {
        if !role.parity().matches(value) {
            return Err(CoordinatorError::ParityMismatch { role, value });
        }
        self.enter(role, |buffer| buffer.push(value))
    }

    /// Run one buffer operation for `role` under the monitor protocol
    fn enter<T, F>(&self, role: Role, operation: F) -> CoordinatorResult<T>
    where
        F: FnOnce(&mut BoundedBuffer) -> BufferResult<T>,
    {
        self.token.acquire()?;

        let mut state = self.lock_state(role)?;
        if !admission::is_admissible(role, &state.buffer) {
            state.waiting[role] += 1;
            drop(state);
            self.token.release();

            // Whoever released this channel handed us the critical section
            self.wake[role].acquire()?;

            state = self.lock_state(role)?;
            state.waiting[role] -= 1;

            // Instrumentation only; the thread proceeds either way
            if !admission::is_admissible(role, &state.buffer) {
                self.stats.record_violation();
                error!(role = %role, "woken without a satisfied admission predicate");
            }
        }

        let result = operation(&mut state.buffer);
        if result.is_ok() {
            self.stats.record_admission(role);
        }

        let next = admission::select_wake(&state.buffer, &state.waiting);
        drop(state);
        self.release(role, next);

        Ok(result?)
    }

    /// Leave the critical section, handing it to `next` if set
    fn release(&self, from: Role, next: Option<Role>) {
        match next {
            Some(role) => {
                trace!(from = %from, to = %role, "handing off critical section");
                self.stats.record_handoff(role);
                self.wake[role].release();
            }
            None => {
                self.stats.record_plain_release();
                self.token.release();
            }
        }
    }

    fn lock_state(&self, role: Role) -> CoordinatorResult<MutexGuard<'_, MonitorState>> {
        match self.state.try_lock() {
            Some(guard) => Ok(guard),
            None if self.is_shutdown() => Err(CoordinatorError::Shutdown),
            None => {
                error!(role = %role, "monitor state contended inside critical section");
                self.shutdown();
                Err(CoordinatorError::ProtocolViolation { role })
            }
        }
    }

    /// Observe buffer contents and wait counters
    ///
    /// Takes the token like a fresh arrival and releases it plainly; the
    /// state is unchanged so no waiter can have become eligible. After
    /// shutdown the state is read without the token.
    pub fn snapshot(&self) -> MonitorSnapshot {
        let held = self.token.acquire().is_ok();
        let (buffer, waiting, admissible) = self.state.lock().snapshot();
        if held {
            self.token.release();
        }

        MonitorSnapshot {
            buffer,
            waiting,
            admissible,
            shutdown: self.is_shutdown(),
        }
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Stop admitting threads
    ///
    /// Every blocked entry-point call and every later call returns
    /// `CoordinatorError::Shutdown`. A thread already inside the critical
    /// section completes its operation. Idempotent.
    pub fn shutdown(&self) {
        if self.shutdown.swap(true, Ordering::AcqRel) {
            return;
        }

        info!("coordinator shutting down");
        self.token.close();
        for (_, channel) in self.wake.iter() {
            channel.close();
        }
    }

    #[inline]
    pub fn is_shutdown(&self) -> bool {
        self.shutdown.load(Ordering::Acquire)
    }
}

impl Drop for Coordinator {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::{Duration, Instant};

    fn wait_until<F: Fn(&MonitorSnapshot) -> bool>(coordinator: &Coordinator, cond: F) {
        let deadline = Instant::now() + Duration::from_secs(2);
        loop {
            if cond(&coordinator.snapshot()) {
                return;
            }
            assert!(Instant::now() < deadline, "condition not reached");
            thread::sleep(Duration::from_millis(2));
        }
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(matches!(
            Coordinator::with_capacity(0),
            Err(CoordinatorError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_single_thread_produce_consume() {
        let coordinator = Coordinator::with_capacity(11).unwrap();
        for value in [0, 2, 4, 6, 8] {
            coordinator.produce_even(value).unwrap();
        }
        coordinator.produce_odd(1).unwrap();

        assert_eq!(coordinator.consume_even().unwrap(), 0);

        let snapshot = coordinator.snapshot();
        assert_eq!(snapshot.buffer.values, vec![2, 4, 6, 8, 1]);
        assert_eq!(snapshot.occupancy(), 5);

        let stats = coordinator.stats();
        assert_eq!(stats.total_admitted(), 7);
        assert_eq!(stats.total_handoffs(), 0);
        assert_eq!(stats.plain_releases, 7);
    }

    #[test]
    fn test_parity_mismatch() {
        let coordinator = Coordinator::with_capacity(4).unwrap();
        assert_eq!(
            coordinator.produce_even(3),
            Err(CoordinatorError::ParityMismatch {
                role: Role::ProducerEven,
                value: 3
            })
        );
        assert!(matches!(
            coordinator.produce_odd(-2),
            Err(CoordinatorError::ParityMismatch { .. })
        ));
        assert_eq!(coordinator.snapshot().occupancy(), 0);
    }

    #[test]
    fn test_blocked_producer_receives_handoff() {
        let coordinator = Arc::new(Coordinator::with_capacity(5).unwrap());
        for value in [0, 2, 4, 6, 8] {
            coordinator.produce_even(value).unwrap();
        }

        let producer = {
            let coordinator = coordinator.clone();
            thread::spawn(move || coordinator.produce_even(10))
        };
        wait_until(&coordinator, |s| s.waiting[Role::ProducerEven] == 1);

        assert_eq!(coordinator.consume_even().unwrap(), 0);
        producer.join().unwrap().unwrap();

        let snapshot = coordinator.snapshot();
        assert_eq!(snapshot.buffer.values, vec![2, 4, 6, 8, 10]);
        assert_eq!(snapshot.waiting[Role::ProducerEven], 0);

        let stats = coordinator.stats();
        assert_eq!(stats.handoffs[Role::ProducerEven], 1);
        assert_eq!(stats.handoff_violations, 0);
    }

    #[test]
    fn test_shutdown_releases_blocked_threads() {
        let coordinator = Arc::new(Coordinator::with_capacity(1).unwrap());

        let consumer = {
            let coordinator = coordinator.clone();
            thread::spawn(move || coordinator.consume_odd())
        };
        wait_until(&coordinator, |s| s.waiting[Role::ConsumerOdd] == 1);

        coordinator.shutdown();
        assert_eq!(consumer.join().unwrap(), Err(CoordinatorError::Shutdown));
        assert_eq!(coordinator.produce_even(0), Err(CoordinatorError::Shutdown));

        let snapshot = coordinator.snapshot();
        assert!(snapshot.shutdown);
        assert_eq!(snapshot.occupancy(), 0);
    }

    #[test]
    fn test_snapshot_serializes() {
        let coordinator = Coordinator::with_capacity(3).unwrap();
        coordinator.produce_even(4).unwrap();

        let json = serde_json::to_value(coordinator.snapshot()).unwrap();
        assert_eq!(json["buffer"]["occupancy"], 1);
        assert_eq!(json["waiting"]["consumer_odd"], 0);
        assert_eq!(json["admissible"]["producer_odd"], true);
    }
}
