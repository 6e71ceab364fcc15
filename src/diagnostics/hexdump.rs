/*!
 * Hexdump Renderer
 * Ten-bytes-per-line dump of the backing store with a printable gutter
 */

use crate::core::limits::HEXDUMP_BYTES_PER_LINE;
use std::fmt::Write;

fn printable(b: u8) -> char {
    if (0x20..=0x7e).contains(&b) {
        b as char
    } else {
        '.'
    }
}

/// Render a byte slice in the classic teaching format:
/// `[  10] 74 68 69 73 20 74 65 73 74 00 | this test.`
///
/// The offset label is decimal; the gutter shows `.` for non-printable
/// bytes. Short final lines are padded so the gutter column lines up.
pub fn hexdump(bytes: &[u8]) -> String {
    let mut out = String::new();
    for (line, chunk) in bytes.chunks(HEXDUMP_BYTES_PER_LINE).enumerate() {
        let _ = write!(out, "[{:4}]", line * HEXDUMP_BYTES_PER_LINE);
        for b in chunk {
            let _ = write!(out, " {:02x}", b);
        }
        for _ in chunk.len()..HEXDUMP_BYTES_PER_LINE {
            out.push_str("   ");
        }
        out.push_str(" | ");
        for &b in chunk {
            out.push(printable(b));
        }
        out.push('\n');
    }
    out
}
