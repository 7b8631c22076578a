/*!
 * Monitoring
 * Tracing subscriber setup for binaries and benchmarks
 */

mod tracer;

pub use tracer::init_tracing;
