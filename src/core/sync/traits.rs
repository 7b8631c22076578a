/*!
 * Synchronization Traits
 *
 * Shared result types for release/wake operations.
 */

/// Result of a release operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WakeResult {
    /// A parked waiter was notified
    Woken,
    /// The permit was stored for the next acquirer
    NoWaiters,
    /// The signal is closed; the release was dropped
    Closed,
}

impl WakeResult {
    /// Check if a waiter was notified
    #[inline(always)]
    pub fn is_woken(&self) -> bool {
        matches!(self, WakeResult::Woken)
    }
}
