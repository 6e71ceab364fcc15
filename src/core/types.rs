/*!
 * Core Types
 * Common types used across the simulator
 */

/// Byte offset into the backing store
pub type Address = usize;

/// Size type for memory operations
pub type Size = usize;
