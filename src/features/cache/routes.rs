use std::sync::Arc;

use axum::{
    routing::{delete, get, put},
    Router,
};

use crate::features::cache::handlers;
use crate::modules::cache::CacheService;

/// Create routes for cache administration
pub fn routes(cache: Arc<CacheService>) -> Router {
    Router::new()
        .route("/api/cache", delete(handlers::clear_cache))
        .route(
            "/api/cache/{prefix}/{key}",
            get(handlers::get_cache_entry).delete(handlers::delete_cache_entry),
        )
        .route("/api/cache/{prefix}/{key}/ttl", put(handlers::expire_cache_entry))
        .with_state(cache)
}
