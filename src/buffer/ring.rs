/*!
 * Bounded Buffer
 * Fixed-capacity FIFO of values with ringbuf-based circular storage
 */

use super::types::{BufferError, BufferResult, BufferSnapshot};
use crate::core::types::{Parity, Value};
use ringbuf::{traits::*, HeapRb};

/// Fixed-capacity circular buffer
///
/// No internal locking: the owner serializes access. Push and pop are O(1);
/// parity counts scan the occupied slots.
pub struct BoundedBuffer {
    storage: HeapRb<Value>,
    capacity: usize,
}

impl std::fmt::Debug for BoundedBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundedBuffer")
            .field("capacity", &self.capacity)
            .field("occupancy", &self.occupancy())
            .field("values", &self.values())
            .finish()
    }
}

impl BoundedBuffer {
    pub fn new(capacity: usize) -> BufferResult<Self> {
        if capacity == 0 {
            return Err(BufferError::ZeroCapacity);
        }

        Ok(Self {
            storage: HeapRb::<Value>::new(capacity),
            capacity,
        })
    }

    /// Append `value` at the tail
    #[inline]
    pub fn push(&mut self, value: Value) -> BufferResult<()> {
        self.storage.try_push(value).map_err(|_| BufferError::Full {
            capacity: self.capacity,
        })
    }

    /// Remove and return the value at the head
    #[inline]
    pub fn pop(&mut self) -> BufferResult<Value> {
        self.storage.try_pop().ok_or(BufferError::Empty)
    }

    #[inline]
    pub fn occupancy(&self) -> usize {
        self.storage.occupied_len()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.storage.is_full()
    }

    /// Value at the head, if any
    #[inline]
    pub fn front(&self) -> Option<Value> {
        self.storage.iter().next().copied()
    }

    /// Value at the head; an empty buffer is a precondition violation
    pub fn try_front(&self) -> BufferResult<Value> {
        self.front().ok_or(BufferError::Empty)
    }

    /// Count occupied slots whose value satisfies `predicate`
    pub fn count_matching<F>(&self, mut predicate: F) -> usize
    where
        F: FnMut(Value) -> bool,
    {
        self.storage.iter().filter(|value| predicate(**value)).count()
    }

    pub fn even_count(&self) -> usize {
        self.count_matching(|value| Parity::Even.matches(value))
    }

    pub fn odd_count(&self) -> usize {
        self.count_matching(|value| Parity::Odd.matches(value))
    }

    /// Copy of the contents from head to tail
    pub fn values(&self) -> Vec<Value> {
        self.storage.iter().copied().collect()
    }

    pub fn snapshot(&self) -> BufferSnapshot {
        BufferSnapshot {
            capacity: self.capacity,
            occupancy: self.occupancy(),
            even_count: self.even_count(),
            odd_count: self.odd_count(),
            front: self.front(),
            values: self.values(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_capacity_rejected() {
        assert_eq!(BoundedBuffer::new(0).unwrap_err(), BufferError::ZeroCapacity);
    }

    #[test]
    fn test_fifo_order() {
        let mut buffer = BoundedBuffer::new(3).unwrap();
        buffer.push(4).unwrap();
        buffer.push(7).unwrap();
        assert_eq!(buffer.front(), Some(4));
        assert_eq!(buffer.pop().unwrap(), 4);
        assert_eq!(buffer.pop().unwrap(), 7);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_full_buffer_holds_capacity_values() {
        let mut buffer = BoundedBuffer::new(2).unwrap();
        buffer.push(1).unwrap();
        buffer.push(2).unwrap();
        assert!(buffer.is_full());
        assert_eq!(buffer.occupancy(), 2);
        assert_eq!(buffer.push(3), Err(BufferError::Full { capacity: 2 }));
        assert_eq!(buffer.values(), vec![1, 2]);
    }

    #[test]
    fn test_empty_pop_and_front() {
        let mut buffer = BoundedBuffer::new(1).unwrap();
        assert_eq!(buffer.pop(), Err(BufferError::Empty));
        assert_eq!(buffer.try_front(), Err(BufferError::Empty));
        assert_eq!(buffer.front(), None);
    }

    #[test]
    fn test_parity_counts_across_wraparound() {
        let mut buffer = BoundedBuffer::new(4).unwrap();
        for value in [0, 1, 2, 3] {
            buffer.push(value).unwrap();
        }
        buffer.pop().unwrap();
        buffer.pop().unwrap();
        buffer.push(5).unwrap();
        buffer.push(6).unwrap();

        assert_eq!(buffer.values(), vec![2, 3, 5, 6]);
        assert_eq!(buffer.even_count(), 2);
        assert_eq!(buffer.odd_count(), 2);
        assert_eq!(buffer.count_matching(|v| v > 4), 2);
    }

    #[test]
    fn test_snapshot() {
        let mut buffer = BoundedBuffer::new(5).unwrap();
        buffer.push(-3).unwrap();
        buffer.push(8).unwrap();

        let snapshot = buffer.snapshot();
        assert_eq!(snapshot.capacity, 5);
        assert_eq!(snapshot.occupancy, 2);
        assert_eq!(snapshot.even_count, 1);
        assert_eq!(snapshot.odd_count, 1);
        assert_eq!(snapshot.front, Some(-3));
    }
}
