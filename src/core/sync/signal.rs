/*!
 * Signal
 *
 * Counting semaphore on parking_lot's Mutex and Condvar. The monitor uses one
 * signal with a single initial permit as the critical-section token and one
 * signal with no permits per role as that role's wake channel.
 *
 * # Wake order
 *
 * `release` notifies one parked thread in parking_lot's queue order. A thread
 * that arrives between the release and the woken thread re-taking the lock may
 * consume the permit first (barging); the woken thread then parks again. The
 * monitor never relies on which waiter of a role proceeds.
 */

use super::config::{StrategyType, SyncConfig};
use super::traits::WakeResult;
use parking_lot::{Condvar, Mutex};
use thiserror::Error;

/// Result type for signal operations
pub type SignalResult<T> = Result<T, SignalError>;

/// Signal operation errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalError {
    #[error("Signal closed")]
    Closed,
}

struct SignalState {
    permits: usize,
    waiters: usize,
    closed: bool,
}

/// Blocking counting semaphore with close support
pub struct Signal {
    state: Mutex<SignalState>,
    condvar: Condvar,
    strategy: StrategyType,
    max_spins: u32,
}

impl std::fmt::Debug for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("Signal")
            .field("permits", &state.permits)
            .field("waiters", &state.waiters)
            .field("closed", &state.closed)
            .field("strategy", &self.strategy)
            .finish()
    }
}

impl Signal {
    /// Create a signal holding `permits` initial permits
    pub fn new(permits: usize, config: &SyncConfig) -> Self {
        Self {
            state: Mutex::new(SignalState {
                permits,
                waiters: 0,
                closed: false,
            }),
            condvar: Condvar::new(),
            strategy: config.select_strategy(),
            max_spins: config.max_spins,
        }
    }

    /// Block until a permit is available and take it
    ///
    /// Returns `Err(SignalError::Closed)` once the signal is closed, even if
    /// permits remain.
    pub fn acquire(&self) -> SignalResult<()> {
        if self.strategy == StrategyType::SpinThenPark {
            for _ in 0..self.max_spins {
                if self.try_acquire()? {
                    return Ok(());
                }
                std::hint::spin_loop();
            }
        }

        let mut state = self.state.lock();
        loop {
            if state.closed {
                return Err(SignalError::Closed);
            }
            if state.permits > 0 {
                state.permits -= 1;
                return Ok(());
            }
            state.waiters += 1;
            self.condvar.wait(&mut state);
            state.waiters -= 1;
        }
    }

    /// Take a permit if one is available, without blocking
    #[inline]
    pub fn try_acquire(&self) -> SignalResult<bool> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(SignalError::Closed);
        }
        if state.permits > 0 {
            state.permits -= 1;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Add one permit and wake one parked thread, if any
    pub fn release(&self) -> WakeResult {
        let mut state = self.state.lock();
        if state.closed {
            return WakeResult::Closed;
        }
        state.permits += 1;
        if state.waiters > 0 {
            self.condvar.notify_one();
            WakeResult::Woken
        } else {
            WakeResult::NoWaiters
        }
    }

    /// Close the signal and wake every parked thread
    pub fn close(&self) {
        let mut state = self.state.lock();
        state.closed = true;
        self.condvar.notify_all();
    }

    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    /// Permits currently stored
    pub fn permits(&self) -> usize {
        self.state.lock().permits
    }

    /// Threads currently parked in `acquire` (for diagnostics)
    pub fn waiter_count(&self) -> usize {
        self.state.lock().waiters
    }

    /// Name of the resolved strategy
    pub fn strategy_name(&self) -> &'static str {
        match self.strategy {
            StrategyType::Park => "park",
            StrategyType::SpinThenPark => "spin-then-park",
            StrategyType::Auto => "auto",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::{Duration, Instant};

    fn wait_for_waiters(signal: &Signal, count: usize) {
        let deadline = Instant::now() + Duration::from_secs(2);
        while signal.waiter_count() < count {
            assert!(Instant::now() < deadline, "waiters never parked");
            thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn test_initial_permit() {
        let signal = Signal::new(1, &SyncConfig::default());
        assert!(signal.try_acquire().unwrap());
        assert!(!signal.try_acquire().unwrap());
        assert_eq!(signal.permits(), 0);
    }

    #[test]
    fn test_release_without_waiters_stores_permit() {
        let signal = Signal::new(0, &SyncConfig::parked());
        assert_eq!(signal.release(), WakeResult::NoWaiters);
        assert_eq!(signal.permits(), 1);
        signal.acquire().unwrap();
        assert_eq!(signal.permits(), 0);
    }

    #[test]
    fn test_release_wakes_parked_thread() {
        let signal = Arc::new(Signal::new(0, &SyncConfig::parked()));
        let signal_clone = signal.clone();

        let handle = thread::spawn(move || signal_clone.acquire());

        wait_for_waiters(&signal, 1);
        assert!(signal.release().is_woken());

        assert!(handle.join().unwrap().is_ok());
        assert_eq!(signal.permits(), 0);
    }

    #[test]
    fn test_one_release_admits_one_thread() {
        let signal = Arc::new(Signal::new(0, &SyncConfig::parked()));

        let handles: Vec<_> = (0..3)
            .map(|_| {
                let signal_clone = signal.clone();
                thread::spawn(move || signal_clone.acquire())
            })
            .collect();

        wait_for_waiters(&signal, 3);
        signal.release();

        // Exactly one thread leaves; the other two stay parked
        let deadline = Instant::now() + Duration::from_secs(2);
        while signal.waiter_count() != 2 {
            assert!(Instant::now() < deadline);
            thread::sleep(Duration::from_millis(1));
        }
        thread::sleep(Duration::from_millis(20));
        assert_eq!(signal.waiter_count(), 2);

        signal.close();
        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert_eq!(
            results
                .iter()
                .filter(|r| **r == Err(SignalError::Closed))
                .count(),
            2
        );
    }

    #[test]
    fn test_close_wakes_all() {
        let signal = Arc::new(Signal::new(0, &SyncConfig::low_latency()));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let signal_clone = signal.clone();
                thread::spawn(move || signal_clone.acquire())
            })
            .collect();

        wait_for_waiters(&signal, 4);
        signal.close();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), Err(SignalError::Closed));
        }
        assert!(signal.is_closed());
        assert_eq!(signal.release(), WakeResult::Closed);
    }

    #[test]
    fn test_closed_rejects_even_with_permits() {
        let signal = Signal::new(2, &SyncConfig::default());
        signal.close();
        assert_eq!(signal.acquire(), Err(SignalError::Closed));
        assert_eq!(signal.try_acquire(), Err(SignalError::Closed));
    }
}
