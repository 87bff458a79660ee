// Cache module.
// In-memory TTL cache for API responses and filesystem paths for persisted state.

#![allow(dead_code)]

pub mod memory;
pub mod paths;

pub use memory::{DEFAULT_TTL, MemoryCache};
