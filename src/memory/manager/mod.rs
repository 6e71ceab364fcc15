/*!
 * Memory Manager
 *
 * Owns the backing store and the segment table as one state object: no
 * ambient globals, so independent instances can coexist (and tests never
 * need a process restart). The model is single-threaded; every mutating
 * operation takes `&mut self`.
 */

mod allocator;
mod compact;

use super::table::SegmentTable;
use super::traits::{Allocator, Compactor, MemoryInfo};
use super::types::{Handle, MemoryError, MemoryResult, MemoryStats, Segment};
use crate::core::limits::DEFAULT_CAPACITY;
use crate::core::types::{Address, Size};
use log::info;

/// Segment-table allocator over a fixed-size backing store
#[derive(Debug, Clone)]
pub struct MemoryManager {
    store: Vec<u8>,
    table: SegmentTable,
}

impl MemoryManager {
    /// Create a manager with the default capacity
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a manager with custom capacity (useful for testing)
    ///
    /// The store is zero-initialized and covered by a single free segment.
    pub fn with_capacity(capacity: Size) -> Self {
        info!(
            "Memory manager initialized with {} bytes and a single free segment",
            capacity
        );
        Self {
            store: vec![0u8; capacity],
            table: SegmentTable::new(capacity),
        }
    }

    /// Backing store capacity in bytes
    pub fn capacity(&self) -> Size {
        self.table.capacity()
    }

    /// Point-in-time snapshot of the segment chain, in address order
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.table.iter()
    }

    /// Number of segments currently in the chain
    pub fn segment_count(&self) -> usize {
        self.table.len()
    }

    /// Read-only view of the whole backing store, for diagnostics
    pub fn as_bytes(&self) -> &[u8] {
        &self.store
    }

    /// Read bytes from a store address range
    pub fn read_bytes(&self, address: Address, len: Size) -> MemoryResult<&[u8]> {
        let end = address
            .checked_add(len)
            .ok_or(MemoryError::UnknownAddress(address))?;
        if end > self.capacity() {
            return Err(MemoryError::UnknownAddress(address));
        }
        Ok(&self.store[address..end])
    }

    /// Write caller bytes into an allocation
    ///
    /// The write must start at the segment's start and fit inside it; the
    /// model does not track partial-segment ownership.
    pub fn write_bytes(&mut self, handle: Handle, data: &[u8]) -> MemoryResult<()> {
        let addr = handle.address();
        let id = self
            .table
            .find_by_address(addr)
            .ok_or(MemoryError::UnknownAddress(addr))?;
        let seg = *self.table.get(id);
        if !seg.allocated {
            return Err(MemoryError::UnknownAddress(addr));
        }
        if data.len() > seg.size {
            return Err(MemoryError::TooLarge {
                requested: data.len(),
                capacity: seg.size,
            });
        }
        self.store[seg.start..seg.start + data.len()].copy_from_slice(data);
        info!(
            "Wrote {} bytes into segment at 0x{:x} (size {})",
            data.len(),
            seg.start,
            seg.size
        );
        Ok(())
    }

    pub(super) fn table(&self) -> &SegmentTable {
        &self.table
    }

    pub(super) fn table_mut(&mut self) -> &mut SegmentTable {
        &mut self.table
    }

    pub(super) fn store_mut(&mut self) -> &mut Vec<u8> {
        &mut self.store
    }

    fn used_memory(&self) -> Size {
        self.segments()
            .filter(|seg| seg.allocated)
            .map(|seg| seg.size)
            .sum()
    }
}

impl Allocator for MemoryManager {
    fn allocate(&mut self, size: Size) -> MemoryResult<Handle> {
        MemoryManager::allocate(self, size)
    }

    fn release(&mut self, handle: Handle) -> MemoryResult<()> {
        MemoryManager::release(self, handle)
    }

    fn is_valid(&self, handle: Handle) -> bool {
        self.table
            .find_by_address(handle.address())
            .map_or(false, |id| self.table.get(id).allocated)
    }

    fn segment_size(&self, handle: Handle) -> Option<Size> {
        self.table
            .find_by_address(handle.address())
            .map(|id| self.table.get(id).size)
    }
}

impl MemoryInfo for MemoryManager {
    fn stats(&self) -> MemoryStats {
        let total = self.capacity();
        let mut used = 0;
        let mut allocated_segments = 0;
        let mut free_segments = 0;
        let mut largest_free = 0;
        for seg in self.segments() {
            if seg.allocated {
                used += seg.size;
                allocated_segments += 1;
            } else {
                free_segments += 1;
                largest_free = largest_free.max(seg.size);
            }
        }
        MemoryStats {
            total_memory: total,
            used_memory: used,
            available_memory: total - used,
            usage_percentage: if total == 0 {
                0.0
            } else {
                (used as f64 / total as f64) * 100.0
            },
            allocated_segments,
            free_segments,
            largest_free,
        }
    }

    fn info(&self) -> (Size, Size, Size) {
        let total = self.capacity();
        let used = self.used_memory();
        (total, used, total - used)
    }
}

impl Compactor for MemoryManager {
    fn compact(&mut self) {
        MemoryManager::compact(self)
    }

    fn is_fragmented(&self) -> bool {
        self.segments().filter(|seg| !seg.allocated).count() > 1
    }
}

impl Default for MemoryManager {
    fn default() -> Self {
        Self::new()
    }
}
