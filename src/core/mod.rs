/*!
 * Core Module
 * Shared types and system-wide constants
 */

pub mod limits;
pub mod types;
