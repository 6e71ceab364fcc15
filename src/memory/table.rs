/*!
 * Segment Table
 * Arena-backed chain of segment descriptors in address order
 *
 * Slots live in a flat arena and link to their successor by index, so
 * deleting a segment is a slot invalidation rather than a deallocation.
 * Freed slot ids are recycled on the next insert.
 */

use super::types::Segment;
use crate::core::types::{Address, Size};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a segment slot in the arena (32-bit for compactness)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SegmentId(pub u32);

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone)]
struct Slot {
    segment: Segment,
    next: Option<SegmentId>,
    live: bool,
}

/// Ordered chain of segments exactly tiling `[0, capacity)`
///
/// Chain order equals address order at every public-operation boundary;
/// `check_tiling` asserts it in debug builds.
#[derive(Debug, Clone)]
pub struct SegmentTable {
    slots: Vec<Slot>,
    head: Option<SegmentId>,
    recycled: Vec<SegmentId>,
    capacity: Size,
}

impl SegmentTable {
    /// Create a table with a single free segment spanning the whole store
    pub fn new(capacity: Size) -> Self {
        let root = Segment {
            start: 0,
            size: capacity,
            allocated: false,
        };
        Self {
            slots: vec![Slot {
                segment: root,
                next: None,
                live: true,
            }],
            head: Some(SegmentId(0)),
            recycled: Vec::new(),
            capacity,
        }
    }

    pub fn capacity(&self) -> Size {
        self.capacity
    }

    pub fn head(&self) -> Option<SegmentId> {
        self.head
    }

    fn slot(&self, id: SegmentId) -> &Slot {
        let slot = &self.slots[id.0 as usize];
        debug_assert!(slot.live, "stale segment id {}", id);
        slot
    }

    fn slot_mut(&mut self, id: SegmentId) -> &mut Slot {
        let slot = &mut self.slots[id.0 as usize];
        debug_assert!(slot.live, "stale segment id {}", id);
        slot
    }

    pub fn get(&self, id: SegmentId) -> &Segment {
        &self.slot(id).segment
    }

    pub fn get_mut(&mut self, id: SegmentId) -> &mut Segment {
        &mut self.slot_mut(id).segment
    }

    /// Successor of `id` in chain order
    pub fn next(&self, id: SegmentId) -> Option<SegmentId> {
        self.slot(id).next
    }

    /// Strict first-fit: first free segment in chain order with
    /// `size >= min_size`
    pub fn find_free(&self, min_size: Size) -> Option<SegmentId> {
        self.ids().find(|&id| {
            let seg = self.get(id);
            !seg.allocated && seg.size >= min_size
        })
    }

    /// Segment whose `start` equals `addr`; mid-segment addresses do not
    /// resolve
    pub fn find_by_address(&self, addr: Address) -> Option<SegmentId> {
        self.ids().find(|&id| self.get(id).start == addr)
    }

    /// Splice `segment` immediately after `existing`
    ///
    /// The caller guarantees `segment` is the immediate address-successor
    /// of `existing`, keeping chain order equal to address order.
    pub fn insert_after(&mut self, existing: SegmentId, segment: Segment) -> SegmentId {
        debug_assert!(segment.size > 0, "zero-size segment inserted");
        let old_next = self.slot(existing).next;
        let id = match self.recycled.pop() {
            Some(id) => {
                self.slots[id.0 as usize] = Slot {
                    segment,
                    next: old_next,
                    live: true,
                };
                id
            }
            None => {
                let id = SegmentId(self.slots.len() as u32);
                self.slots.push(Slot {
                    segment,
                    next: old_next,
                    live: true,
                });
                id
            }
        };
        self.slot_mut(existing).next = Some(id);
        id
    }

    /// Unlink `id` from the chain and invalidate its slot
    ///
    /// The caller must have merged the segment's extent elsewhere first.
    /// Passing an id that is not linked in the chain is a programming
    /// error, not a recoverable failure.
    pub fn delete(&mut self, id: SegmentId) {
        let next = self.slot(id).next;
        if self.head == Some(id) {
            self.head = next;
        } else {
            let prev = self
                .ids()
                .find(|&p| self.slot(p).next == Some(id))
                .unwrap_or_else(|| unreachable!("segment {} not linked in the chain", id));
            self.slot_mut(prev).next = next;
        }
        let slot = &mut self.slots[id.0 as usize];
        slot.live = false;
        slot.next = None;
        self.recycled.push(id);
    }

    /// Chain-order iterator over slot ids
    pub fn ids(&self) -> Ids<'_> {
        Ids {
            table: self,
            cursor: self.head,
        }
    }

    /// Chain-order snapshot of the segment descriptors
    pub fn iter(&self) -> impl Iterator<Item = Segment> + '_ {
        self.ids().map(|id| *self.get(id))
    }

    /// Number of segments in the chain
    pub fn len(&self) -> usize {
        self.ids().count()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Debug-build assertion that the chain exactly tiles `[0, capacity)`
    pub(crate) fn check_tiling(&self) {
        if cfg!(debug_assertions) {
            let mut expected: Address = 0;
            for seg in self.iter() {
                debug_assert_eq!(
                    seg.start, expected,
                    "segment chain has a gap or overlap at 0x{:x}",
                    expected
                );
                debug_assert!(seg.size > 0, "zero-size segment at 0x{:x}", seg.start);
                expected = seg.end();
            }
            debug_assert_eq!(
                expected, self.capacity,
                "segment chain does not reach capacity"
            );
        }
    }
}

/// Iterator over segment ids in chain order
pub struct Ids<'a> {
    table: &'a SegmentTable,
    cursor: Option<SegmentId>,
}

impl Iterator for Ids<'_> {
    type Item = SegmentId;

    fn next(&mut self) -> Option<SegmentId> {
        let id = self.cursor?;
        self.cursor = self.table.slot(id).next;
        Some(id)
    }
}
