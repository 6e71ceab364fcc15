/*!
 * Memory Management
 *
 * Segment-table allocator over a fixed-size backing store.
 *
 * The store is partitioned into an ordered chain of segments, each free or
 * allocated. Allocation is strict first-fit with splitting, release marks a
 * segment free and scrubs its bytes, and compaction merges free segments
 * and slides live data so free space consolidates. The chain exactly tiles
 * `[0, capacity)` before and after every public operation.
 */

mod manager;
pub(crate) mod table;
pub mod traits;
pub mod types;

pub use manager::MemoryManager;
pub use traits::{Allocator, Compactor, MemoryInfo};
pub use types::{Handle, MemoryError, MemoryResult, MemoryStats, Segment};
