/*!
 * System Limits and Constants
 *
 * Centralized location for system-wide limits and magic numbers.
 * All values include rationale comments explaining WHY they exist.
 */

/// Default backing store capacity (1KB)
/// Matches the classic teaching configuration: small enough that a full
/// hexdump fits on one screen, large enough to show real fragmentation
pub const DEFAULT_CAPACITY: usize = 1024;

/// Bytes rendered per hexdump line
/// Ten keeps line offsets in round decimal numbers for easy reading
pub const HEXDUMP_BYTES_PER_LINE: usize = 10;

/// Environment variable overriding the demo shell's capacity
pub const CAPACITY_ENV: &str = "MEMSIM_CAPACITY";
