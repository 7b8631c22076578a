/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use crate::core::types::Value;
use crate::monitor::Role;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export BufferError from buffer module
pub use crate::buffer::BufferError;

// Re-export SignalError from sync module
pub use crate::core::sync::SignalError;

/// Common result type for coordinator operations
pub type CoordinatorResult<T> = Result<T, CoordinatorError>;

/// Coordinator errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum CoordinatorError {
    #[error("Buffer error: {0}")]
    #[diagnostic(transparent)]
    Buffer(#[from] BufferError),

    #[error("Invalid configuration: {0}")]
    #[diagnostic(
        code(coordinator::invalid_config),
        help("The buffer capacity must be a positive integer.")
    )]
    InvalidConfig(String),

    #[error("{role} cannot push {value}: wrong parity")]
    #[diagnostic(
        code(coordinator::parity_mismatch),
        help("Even producers push even values and odd producers push odd values.")
    )]
    ParityMismatch { role: Role, value: Value },

    #[error("Coordinator has been shut down")]
    #[diagnostic(
        code(coordinator::shutdown),
        help("The coordinator no longer admits threads. Stop the role loop.")
    )]
    Shutdown,

    #[error("Critical section entered concurrently by {role}")]
    #[diagnostic(
        code(coordinator::protocol_violation),
        help("Two threads touched the monitor state at once. The token hand-off discipline was broken.")
    )]
    ProtocolViolation { role: Role },
}

impl CoordinatorError {
    /// True for the error every role loop treats as its stop signal
    pub fn is_shutdown(&self) -> bool {
        matches!(self, CoordinatorError::Shutdown)
    }
}

impl From<SignalError> for CoordinatorError {
    fn from(err: SignalError) -> Self {
        match err {
            SignalError::Closed => CoordinatorError::Shutdown,
        }
    }
}
