/*!
 * Segment Table Dump
 * One descriptor record per segment, in chain order
 */

use crate::memory::MemoryManager;
use std::fmt::Write;

/// Render every segment descriptor in chain order:
/// ```text
///     allocated = FALSE
///     start     = 0x0
///     size      = 1024
/// ------------
/// ```
pub fn render_segment_table(memory: &MemoryManager) -> String {
    let mut out = String::new();
    for seg in memory.segments() {
        let _ = writeln!(
            out,
            "\tallocated = {}",
            if seg.allocated { "TRUE" } else { "FALSE" }
        );
        let _ = writeln!(out, "\tstart     = 0x{:x}", seg.start);
        let _ = writeln!(out, "\tsize      = {}", seg.size);
        out.push_str("------------\n");
    }
    out
}
