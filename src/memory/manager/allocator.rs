/*!
 * Memory Allocator Implementation
 * First-fit allocation with splitting, and release with scrubbing
 */

use super::MemoryManager;
use crate::core::types::Size;
use crate::memory::types::{Handle, MemoryError, MemoryResult, Segment};
use log::{error, info, warn};

impl MemoryManager {
    /// Allocate `size` bytes from the first fitting free segment
    ///
    /// An oversized segment is split: the found segment shrinks to `size`
    /// and a new free segment covering the remainder is spliced in after
    /// it. An exact fit is marked allocated in place.
    pub fn allocate(&mut self, size: Size) -> MemoryResult<Handle> {
        if size < 1 {
            error!("Rejected allocation of {} bytes: size must be at least 1", size);
            return Err(MemoryError::InvalidSize { requested: size });
        }
        let capacity = self.capacity();
        if size > capacity {
            error!(
                "Rejected allocation of {} bytes: exceeds capacity of {} bytes",
                size, capacity
            );
            return Err(MemoryError::TooLarge {
                requested: size,
                capacity,
            });
        }

        let id = match self.table().find_free(size) {
            Some(id) => id,
            None => {
                let (_, used, available) = crate::memory::traits::MemoryInfo::info(self);
                error!(
                    "OOM: requested {} bytes, no free segment fits ({} used / {} total, {} available but fragmented)",
                    size, used, capacity, available
                );
                return Err(MemoryError::OutOfMemory {
                    requested: size,
                    capacity,
                    used,
                });
            }
        };

        let found = *self.table().get(id);
        if found.size > size {
            let remainder = Segment {
                start: found.start + size,
                size: found.size - size,
                allocated: false,
            };
            self.table_mut().insert_after(id, remainder);
            info!(
                "Split segment at 0x{:x}: keeping {} bytes, free remainder of {} bytes at 0x{:x}",
                found.start, size, remainder.size, remainder.start
            );
        }

        let seg = self.table_mut().get_mut(id);
        seg.size = size;
        seg.allocated = true;

        self.table().check_tiling();
        info!("Allocated {} bytes at 0x{:x}", size, found.start);
        Ok(Handle(found.start))
    }

    /// Release the segment starting at the handle's address
    ///
    /// Scrubs the segment's bytes to zero and marks it free. Free
    /// neighbors are NOT coalesced here; that only happens during
    /// compaction, so adjacent free segments may coexist in the chain.
    pub fn release(&mut self, handle: Handle) -> MemoryResult<()> {
        let addr = handle.address();
        let id = match self.table().find_by_address(addr) {
            Some(id) => id,
            None => {
                warn!(
                    "Attempted to release unknown address 0x{:x} (never allocated, or moved by compaction)",
                    addr
                );
                return Err(MemoryError::UnknownAddress(addr));
            }
        };

        let seg = *self.table().get(id);
        self.store_mut()[seg.start..seg.end()].fill(0);
        self.table_mut().get_mut(id).allocated = false;

        self.table().check_tiling();
        info!("Released {} bytes at 0x{:x}", seg.size, seg.start);
        Ok(())
    }
}
