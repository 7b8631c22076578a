/*!
 * Buffer Module
 * Bounded circular buffer shared by producers and consumers
 */

mod ring;
mod types;

pub use ring::BoundedBuffer;
pub use types::{BufferError, BufferResult, BufferSnapshot};
