use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request DTO for resetting an entry's lifetime
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ExpireCacheEntryDto {
    #[validate(range(min = 1, max = 86400, message = "TTL must be between 1 and 86400 seconds"))]
    pub ttl_secs: u64,
}

/// Liveness of a single cache entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntryStatusDto {
    /// Fully prefixed key, e.g. `category:tree`
    pub key: String,
    pub exists: bool,
    /// Remaining seconds, or -2 when the entry is absent
    pub ttl: i64,
}
