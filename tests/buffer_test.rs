/*!
 * Bounded Buffer Property Tests
 */

use parity_monitor::{BoundedBuffer, BufferError};
use proptest::prelude::*;
use std::collections::VecDeque;

#[derive(Debug, Clone)]
enum Op {
    Push(i64),
    Pop,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![any::<i64>().prop_map(Op::Push), Just(Op::Pop)]
}

proptest! {
    #[test]
    fn prop_buffer_matches_fifo_model(
        capacity in 1usize..16,
        ops in prop::collection::vec(op_strategy(), 0..200),
    ) {
        let mut buffer = BoundedBuffer::new(capacity).unwrap();
        let mut model = VecDeque::new();

        for op in ops {
            match op {
                Op::Push(value) => {
                    let result = buffer.push(value);
                    if model.len() == capacity {
                        prop_assert_eq!(result, Err(BufferError::Full { capacity }));
                    } else {
                        prop_assert!(result.is_ok());
                        model.push_back(value);
                    }
                }
                Op::Pop => {
                    let result = buffer.pop();
                    match model.pop_front() {
                        Some(expected) => prop_assert_eq!(result, Ok(expected)),
                        None => prop_assert_eq!(result, Err(BufferError::Empty)),
                    }
                }
            }

            prop_assert!(buffer.occupancy() <= buffer.capacity());
            prop_assert_eq!(buffer.occupancy(), model.len());
            prop_assert_eq!(buffer.even_count() + buffer.odd_count(), buffer.occupancy());
            prop_assert_eq!(buffer.front(), model.front().copied());
        }
    }
}
