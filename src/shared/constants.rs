/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

// =============================================================================
// CACHE KEYS
// =============================================================================

/// Key of the cached category tree, stored under `CachePrefix::Category`
pub const CATEGORY_TREE_CACHE_KEY: &str = "tree";
