pub mod cache_dto;

pub use cache_dto::{CacheEntryStatusDto, ExpireCacheEntryDto};
