/*!
 * Coordinator Configuration
 */

use crate::core::errors::{CoordinatorError, CoordinatorResult};
use crate::core::sync::SyncConfig;
use serde::{Deserialize, Serialize};

/// Construction parameters for a coordinator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoordinatorConfig {
    /// Buffer capacity; must be positive
    pub capacity: usize,
    /// Strategy for the token and wake channels
    #[serde(default)]
    pub sync: SyncConfig,
}

impl CoordinatorConfig {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            sync: SyncConfig::default(),
        }
    }

    pub fn with_sync(mut self, sync: SyncConfig) -> Self {
        self.sync = sync;
        self
    }

    pub fn validate(&self) -> CoordinatorResult<()> {
        if self.capacity == 0 {
            return Err(CoordinatorError::InvalidConfig(
                "capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sync::StrategyType;

    #[test]
    fn test_validate() {
        assert!(CoordinatorConfig::new(1).validate().is_ok());
        assert!(matches!(
            CoordinatorConfig::new(0).validate(),
            Err(CoordinatorError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_deserialize_with_default_sync() {
        let config: CoordinatorConfig = serde_json::from_str(r#"{"capacity":21}"#).unwrap();
        assert_eq!(config.capacity, 21);
        assert_eq!(config.sync.strategy, StrategyType::Auto);
    }
}
