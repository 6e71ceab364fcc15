/*!
 * Compaction (Defragmentation)
 *
 * Two passes over the chain. Pass 1 merges every free segment into the
 * first free one (the collector), which keeps its chain position. Pass 2
 * walks left to right recomputing starts (head to 0, every other segment
 * to its predecessor's final start + size) and relocates live bytes.
 *
 * Because the collector stays where it was, one call does not necessarily
 * produce the canonical all-live-first layout; that behavior is kept
 * deliberately and covered by tests.
 */

use super::MemoryManager;
use crate::core::types::Address;
use log::info;

impl MemoryManager {
    /// Merge free segments and slide live data to close gaps
    ///
    /// No-op when the chain holds no free segment. The relative order and
    /// size of allocated segments never change.
    pub fn compact(&mut self) {
        // Pass 1: pick the first free segment as the collector and fold
        // every other free segment's extent into it.
        let collector = match self.table().ids().find(|&id| !self.table().get(id).allocated) {
            Some(id) => id,
            None => {
                info!("Compaction skipped: no free segment in the chain");
                return;
            }
        };

        let mut merged = 0usize;
        let mut cursor = self.table().head();
        while let Some(id) = cursor {
            cursor = self.table().next(id);
            if id != collector && !self.table().get(id).allocated {
                let size = self.table().get(id).size;
                self.table_mut().get_mut(collector).size += size;
                self.table_mut().delete(id);
                merged += 1;
            }
        }

        // Pass 2: recompute starts left to right and move live bytes. Each
        // copy reads from a snapshot of the store taken before any write,
        // so a segment sliding past a not-yet-moved successor cannot
        // clobber the successor's bytes. Self-copies fall out naturally.
        let snapshot = self.as_bytes().to_vec();
        let mut moved_bytes = 0usize;
        let mut new_start: Address = 0;
        let mut cursor = self.table().head();
        while let Some(id) = cursor {
            let seg = *self.table().get(id);
            if seg.allocated && seg.start != new_start {
                let src = &snapshot[seg.start..seg.end()];
                self.store_mut()[new_start..new_start + seg.size].copy_from_slice(src);
                moved_bytes += seg.size;
            }
            self.table_mut().get_mut(id).start = new_start;
            new_start += seg.size;
            cursor = self.table().next(id);
        }

        // Scrub the collector's final extent; release already zeroed these
        // bytes, but relocation may have left stale copies behind.
        let col = *self.table().get(collector);
        self.store_mut()[col.start..col.end()].fill(0);

        self.table().check_tiling();
        info!(
            "Compaction complete: merged {} free segments into 0x{:x} ({} bytes free), moved {} live bytes",
            merged, col.start, col.size, moved_bytes
        );
    }
}
