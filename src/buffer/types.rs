/*!
 * Buffer Types
 * Errors and snapshots for the bounded buffer
 */

use crate::core::types::Value;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for buffer operations
pub type BufferResult<T> = Result<T, BufferError>;

/// Precondition violations on the bounded buffer
#[derive(Error, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum BufferError {
    #[error("Buffer capacity must be positive")]
    #[diagnostic(code(buffer::zero_capacity))]
    ZeroCapacity,

    #[error("Buffer is full (capacity {capacity})")]
    #[diagnostic(
        code(buffer::full),
        help("Push was called without checking occupancy < capacity.")
    )]
    Full { capacity: usize },

    #[error("Buffer is empty")]
    #[diagnostic(
        code(buffer::empty),
        help("Pop or front was called without checking occupancy > 0.")
    )]
    Empty,
}

/// Point-in-time copy of the buffer contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BufferSnapshot {
    pub capacity: usize,
    pub occupancy: usize,
    pub even_count: usize,
    pub odd_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub front: Option<Value>,
    /// Values from head to tail
    pub values: Vec<Value>,
}
