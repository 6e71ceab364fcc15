/*!
 * Memory Types
 * Common types for the segment-table allocator
 */

use crate::core::types::{Address, Size};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Memory operation result
pub type MemoryResult<T> = Result<T, MemoryError>;

/// Memory errors
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemoryError {
    #[error("invalid size: requested {requested} bytes, allocations must be at least 1 byte")]
    InvalidSize { requested: Size },

    #[error("request too large: {requested} bytes exceeds capacity of {capacity} bytes")]
    TooLarge { requested: Size, capacity: Size },

    #[error("out of memory: no free segment fits {requested} bytes ({used} used / {capacity} total)")]
    OutOfMemory {
        requested: Size,
        capacity: Size,
        used: Size,
    },

    #[error("unknown address: 0x{0:x} is not the start of any tracked segment")]
    UnknownAddress(Address),
}

/// Opaque allocation handle
///
/// Wraps the byte offset returned by `allocate` so that pointer-style
/// arithmetic on it is a type error. It is a lookup key, not a borrow: the
/// segment table remains the sole owner of the descriptor behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Handle(pub Address);

impl Handle {
    /// Byte offset into the backing store
    pub fn address(self) -> Address {
        self.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

/// Segment descriptor: one contiguous run of the backing store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Address,
    pub size: Size,
    pub allocated: bool,
}

impl Segment {
    /// One-past-the-end offset of this run
    pub fn end(&self) -> Address {
        self.start + self.size
    }
}

/// Memory statistics derived from the segment chain
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryStats {
    pub total_memory: Size,
    pub used_memory: Size,
    pub available_memory: Size,
    pub usage_percentage: f64,
    pub allocated_segments: usize,
    pub free_segments: usize,
    pub largest_free: Size,
}
