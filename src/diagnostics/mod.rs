/*!
 * Diagnostics
 * Human-readable renderers over the allocator's public surface
 */

pub mod hexdump;
pub mod segments;

pub use hexdump::hexdump;
pub use segments::render_segment_table;
