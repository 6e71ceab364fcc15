/*!
 * Memsim Library
 * Segment-table memory allocator simulation exposed as a library
 */

pub mod core;
pub mod diagnostics;
pub mod memory;
pub mod monitoring;

// Re-exports
pub use diagnostics::{hexdump, render_segment_table};
pub use memory::{
    Allocator, Compactor, Handle, MemoryError, MemoryInfo, MemoryManager, MemoryResult,
    MemoryStats, Segment,
};
pub use monitoring::init_tracing;
