/*!
 * Memory Traits
 * Memory management abstractions
 */

use super::types::*;
use crate::core::types::Size;

/// Memory allocator interface
pub trait Allocator {
    /// Allocate a run of bytes, returning an opaque handle
    fn allocate(&mut self, size: Size) -> MemoryResult<Handle>;

    /// Release the allocation behind a handle, scrubbing its bytes
    fn release(&mut self, handle: Handle) -> MemoryResult<()>;

    /// Check if a handle resolves to a currently allocated segment
    fn is_valid(&self, handle: Handle) -> bool;

    /// Get the size of the segment behind a handle
    fn segment_size(&self, handle: Handle) -> Option<Size>;
}

/// Memory statistics provider
pub trait MemoryInfo {
    /// Get overall memory statistics
    fn stats(&self) -> MemoryStats;

    /// Get memory info as (total, used, available)
    fn info(&self) -> (Size, Size, Size);
}

/// Defragmentation interface
pub trait Compactor {
    /// Merge free segments and slide live data to close gaps
    fn compact(&mut self);

    /// True when free space is split across more than one segment
    fn is_fragmented(&self) -> bool;
}
