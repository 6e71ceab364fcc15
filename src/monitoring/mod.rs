/*!
 * Monitoring
 * Tracing initialization for the demo shell
 */

pub mod tracer;

pub use tracer::init_tracing;
