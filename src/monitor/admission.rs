/*!
 * Admission
 *
 * Per-role admission predicates over the buffer contents, and the
 * wake-selection cascade that picks which waiting role (if any) receives the
 * critical section after a buffer operation.
 *
 * The cascade walks `Role::PRIORITY` and stops at the first role that has
 * waiters and is admissible. Lower-priority roles can starve under sustained
 * load from higher-priority ones.
 */

use super::role::{Role, RoleTable};
use crate::buffer::BoundedBuffer;
use crate::core::limits::{
    EVEN_CONSUME_MIN_OCCUPANCY, EVEN_PRODUCE_LIMIT, ODD_CONSUME_MIN_OCCUPANCY,
};
use crate::core::types::Parity;

/// Whether `role` may perform its operation against the current buffer
pub fn is_admissible(role: Role, buffer: &BoundedBuffer) -> bool {
    match role {
        Role::ProducerEven => !buffer.is_full() && buffer.even_count() < EVEN_PRODUCE_LIMIT,
        Role::ProducerOdd => !buffer.is_full() && buffer.odd_count() < buffer.even_count(),
        Role::ConsumerEven => {
            front_is(buffer, Parity::Even) && buffer.occupancy() > EVEN_CONSUME_MIN_OCCUPANCY
        }
        Role::ConsumerOdd => {
            front_is(buffer, Parity::Odd) && buffer.occupancy() > ODD_CONSUME_MIN_OCCUPANCY
        }
    }
}

#[inline]
fn front_is(buffer: &BoundedBuffer, parity: Parity) -> bool {
    buffer.front().is_some_and(|value| parity.matches(value))
}

/// Highest-priority role that has waiters and is admissible
pub fn select_wake(buffer: &BoundedBuffer, waiting: &RoleTable<usize>) -> Option<Role> {
    Role::PRIORITY
        .into_iter()
        .find(|&role| waiting[role] > 0 && is_admissible(role, buffer))
}

/// Predicate value of every role
pub fn admissible_roles(buffer: &BoundedBuffer) -> RoleTable<bool> {
    RoleTable::from_fn(|role| is_admissible(role, buffer))
}
