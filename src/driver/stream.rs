/*!
 * Value Streams
 * Endless parity-preserving sequences fed to producer loops
 */

use crate::core::limits::{VALUE_STREAM_MODULUS, VALUE_STREAM_STEP};
use crate::core::types::{Parity, Value};

/// Arithmetic sequence wrapping at a modulus
///
/// With an even step and an even modulus every value keeps the parity of the
/// start value.
#[derive(Debug, Clone)]
pub struct ValueStream {
    next: Value,
    step: Value,
    modulus: Value,
}

impl ValueStream {
    pub fn new(start: Value, step: Value, modulus: Value) -> Self {
        Self {
            next: start.rem_euclid(modulus),
            step,
            modulus,
        }
    }

    /// 0, 2, 4, ..., 48, 0, ...
    pub fn even() -> Self {
        Self::new(0, VALUE_STREAM_STEP, VALUE_STREAM_MODULUS)
    }

    /// 1, 3, 5, ..., 49, 1, ...
    pub fn odd() -> Self {
        Self::new(1, VALUE_STREAM_STEP, VALUE_STREAM_MODULUS)
    }

    pub fn for_parity(parity: Parity) -> Self {
        match parity {
            Parity::Even => Self::even(),
            Parity::Odd => Self::odd(),
        }
    }

    /// Return the current value and advance
    pub fn advance(&mut self) -> Value {
        let value = self.next;
        self.next = (self.next + self.step).rem_euclid(self.modulus);
        value
    }
}

impl Iterator for ValueStream {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        Some(self.advance())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_odd_stream_wraps_to_one() {
        let values: Vec<_> = ValueStream::odd().skip(24).take(3).collect();
        assert_eq!(values, vec![49, 1, 3]);
    }

    #[test]
    fn test_streams_keep_parity() {
        assert!(ValueStream::even().take(200).all(|v| Parity::Even.matches(v)));
        assert!(ValueStream::odd().take(200).all(|v| Parity::Odd.matches(v)));
    }
}
