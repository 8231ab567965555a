//! Cache module
//!
//! Provides an in-process key/value cache with key prefixes and
//! per-entry expiry, used to memoize derived read models.

mod memory_cache;

pub use memory_cache::{CacheOptions, CachePrefix, CacheService};
