/*!
 * Core Types
 * Common types used across the monitor
 */

/// Value carried by the shared buffer
pub type Value = i64;

/// Parity of a buffered value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Parity {
    Even,
    Odd,
}

impl Parity {
    /// Parity of `value`; negative values follow the mathematical definition
    #[inline(always)]
    pub fn of(value: Value) -> Self {
        if value.rem_euclid(2) == 0 {
            Parity::Even
        } else {
            Parity::Odd
        }
    }

    #[inline(always)]
    pub fn matches(self, value: Value) -> bool {
        Parity::of(value) == self
    }
}

impl std::fmt::Display for Parity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Parity::Even => f.write_str("even"),
            Parity::Odd => f.write_str("odd"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parity_of_negative_values() {
        assert_eq!(Parity::of(-3), Parity::Odd);
        assert_eq!(Parity::of(-4), Parity::Even);
        assert_eq!(Parity::of(0), Parity::Even);
        assert!(Parity::Odd.matches(49));
        assert!(!Parity::Even.matches(i64::MIN + 1));
    }
}
