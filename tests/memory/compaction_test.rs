/*!
 * Compaction Tests
 * Merge pass, relocation pass, and the collector-position behavior
 */

use memsim::{Compactor, Handle, MemoryError, MemoryManager, Segment};
use pretty_assertions::assert_eq;

fn segments(memory: &MemoryManager) -> Vec<Segment> {
    memory.segments().collect()
}

#[test]
fn test_compact_on_fresh_store_is_noop() {
    let mut memory = MemoryManager::with_capacity(64);
    memory.compact();

    assert_eq!(
        segments(&memory),
        vec![Segment {
            start: 0,
            size: 64,
            allocated: false
        }]
    );
}

#[test]
fn test_compact_with_no_free_segment_is_noop() {
    let mut memory = MemoryManager::with_capacity(30);
    for _ in 0..3 {
        memory.allocate(10).unwrap();
    }

    let before = segments(&memory);
    memory.compact();
    assert_eq!(segments(&memory), before);
}

#[test]
fn test_single_free_segment_between_live_data_stays_put() {
    // The sequence from the end-to-end scenario: fill a 30-byte store with
    // three allocations, release the middle one, compact. The collector is
    // the only free segment and keeps its chain position, and every
    // predecessor already tiles correctly, so nothing moves: compaction
    // with exactly one free segment is a no-op regardless of where that
    // segment sits.
    let mut memory = MemoryManager::with_capacity(30);
    let a = memory.allocate(10).unwrap();
    let b = memory.allocate(10).unwrap();
    let c = memory.allocate(10).unwrap();
    assert_eq!((a.address(), b.address(), c.address()), (0, 10, 20));

    memory.write_bytes(c, b"last chunk").unwrap();
    memory.release(b).unwrap();

    let before = segments(&memory);
    assert_eq!(
        before,
        vec![
            Segment {
                start: 0,
                size: 10,
                allocated: true
            },
            Segment {
                start: 10,
                size: 10,
                allocated: false
            },
            Segment {
                start: 20,
                size: 10,
                allocated: true
            },
        ]
    );

    memory.compact();

    assert_eq!(segments(&memory), before);
    assert_eq!(memory.read_bytes(20, 10).unwrap(), b"last chunk");

    // And it stays stable under repeated calls
    memory.compact();
    assert_eq!(segments(&memory), before);
}

#[test]
fn test_merge_pass_folds_all_free_segments_into_first() {
    // Replay of the original demo scenario at capacity 100: fragment the
    // store with released holes at 10, 30, 40, 50 plus the free tail.
    let mut memory = MemoryManager::with_capacity(100);
    let first = memory.allocate(10).unwrap();
    let hole = memory.allocate(10).unwrap();
    let live = memory.allocate(10).unwrap();
    memory.write_bytes(first, b"first ten!").unwrap();
    memory.write_bytes(live, b"keep me...").unwrap();
    memory.release(hole).unwrap();

    let churn: Vec<Handle> = (0..4).map(|_| memory.allocate(10).unwrap()).collect();
    assert_eq!(churn[0].address(), 10); // exact fit reuses the hole
    for handle in churn {
        memory.release(handle).unwrap();
    }

    // Five free segments: 10, 30, 40, 50, and the 40-byte tail at 60
    assert_eq!(memory.segments().filter(|s| !s.allocated).count(), 5);
    assert!(memory.is_fragmented());

    memory.compact();

    // Collector at 10 absorbed 10+10+10+40 extra bytes; the live segment
    // slid past it to the end of the store
    assert_eq!(
        segments(&memory),
        vec![
            Segment {
                start: 0,
                size: 10,
                allocated: true
            },
            Segment {
                start: 10,
                size: 80,
                allocated: false
            },
            Segment {
                start: 90,
                size: 10,
                allocated: true
            },
        ]
    );
    assert!(!memory.is_fragmented());

    // Live bytes moved with their segments; the collector extent is scrubbed
    assert_eq!(memory.read_bytes(0, 10).unwrap(), b"first ten!");
    assert_eq!(memory.read_bytes(90, 10).unwrap(), b"keep me...");
    assert!(memory.read_bytes(10, 80).unwrap().iter().all(|&b| b == 0));
}

#[test]
fn test_relocation_preserves_every_live_segment() {
    // Two live segments slide past the grown collector; the first one's
    // destination overlaps the second one's source, which is exactly the
    // case the snapshot staging exists for.
    let mut memory = MemoryManager::with_capacity(50);
    let a = memory.allocate(10).unwrap();
    let b = memory.allocate(10).unwrap();
    let c = memory.allocate(10).unwrap();
    let d = memory.allocate(10).unwrap();
    let e = memory.allocate(10).unwrap();

    memory.write_bytes(a, b"AAAAAAAAAA").unwrap();
    memory.write_bytes(c, b"CCCCCCCCCC").unwrap();
    memory.write_bytes(d, b"DDDDDDDDDD").unwrap();

    memory.release(b).unwrap();
    memory.release(e).unwrap();

    memory.compact();

    assert_eq!(
        segments(&memory),
        vec![
            Segment {
                start: 0,
                size: 10,
                allocated: true
            },
            Segment {
                start: 10,
                size: 20,
                allocated: false
            },
            Segment {
                start: 30,
                size: 10,
                allocated: true
            },
            Segment {
                start: 40,
                size: 10,
                allocated: true
            },
        ]
    );
    assert_eq!(memory.read_bytes(0, 10).unwrap(), b"AAAAAAAAAA");
    assert!(memory.read_bytes(10, 20).unwrap().iter().all(|&b| b == 0));
    assert_eq!(memory.read_bytes(30, 10).unwrap(), b"CCCCCCCCCC");
    assert_eq!(memory.read_bytes(40, 10).unwrap(), b"DDDDDDDDDD");
}

#[test]
fn test_stale_handle_after_relocation_is_rejected() {
    let mut memory = MemoryManager::with_capacity(100);
    memory.allocate(10).unwrap();
    let hole = memory.allocate(10).unwrap();
    let live = memory.allocate(10).unwrap();
    memory.release(hole).unwrap();

    memory.compact();

    // The live segment moved from 20 to 90; its old handle no longer
    // names any segment start
    let result = memory.release(live);
    assert_eq!(result, Err(MemoryError::UnknownAddress(20)));
    assert!(memory.release(Handle(90)).is_ok());
}

#[test]
fn test_compact_preserves_order_and_sizes_of_live_segments() {
    let mut memory = MemoryManager::with_capacity(200);
    let mut live = Vec::new();
    for size in [7usize, 13, 5, 21] {
        live.push(memory.allocate(size).unwrap());
        // A hole after each live allocation
        let hole = memory.allocate(3).unwrap();
        memory.release(hole).unwrap();
    }

    memory.compact();

    let live_sizes: Vec<_> = memory
        .segments()
        .filter(|s| s.allocated)
        .map(|s| s.size)
        .collect();
    assert_eq!(live_sizes, vec![7, 13, 5, 21]);
    assert_eq!(live.len(), 4);
}

#[test]
fn test_allocation_after_compaction_uses_merged_space() {
    let mut memory = MemoryManager::with_capacity(30);
    let a = memory.allocate(10).unwrap();
    memory.allocate(10).unwrap();
    let c = memory.allocate(10).unwrap();
    memory.release(a).unwrap();
    memory.release(c).unwrap();

    // 20 free bytes split across two segments: a 15-byte request fails
    assert!(matches!(
        memory.allocate(15),
        Err(MemoryError::OutOfMemory { .. })
    ));

    memory.compact();

    // Collector is the head segment; the live segment slid to the end and
    // the merged 20-byte run satisfies the request
    let handle = memory.allocate(15).unwrap();
    assert_eq!(handle.address(), 0);
}
