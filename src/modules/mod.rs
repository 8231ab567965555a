//! Modules layer - Infrastructure components shared across features
//!
//! Contains adapters that features use but do not own, such as caching.

pub mod cache;
