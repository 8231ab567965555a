use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, State},
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::cache::dtos::{CacheEntryStatusDto, ExpireCacheEntryDto};
use crate::modules::cache::{CachePrefix, CacheService};
use crate::shared::types::ApiResponse;

fn parse_prefix(raw: &str) -> Result<CachePrefix> {
    CachePrefix::parse(raw)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown cache prefix '{}'", raw)))
}

async fn entry_status(cache: &CacheService, prefix: CachePrefix, key: &str) -> CacheEntryStatusDto {
    CacheEntryStatusDto {
        key: format!("{}{}", prefix, key),
        exists: cache.exists(key, Some(prefix)).await,
        ttl: cache.ttl(key, Some(prefix)).await,
    }
}

/// Inspect a cache entry
#[utoipa::path(
    get,
    path = "/api/cache/{prefix}/{key}",
    params(
        ("prefix" = String, Path, description = "Key namespace, e.g. category"),
        ("key" = String, Path, description = "Key within the namespace")
    ),
    responses(
        (status = 200, description = "Entry status", body = ApiResponse<CacheEntryStatusDto>),
        (status = 400, description = "Unknown prefix")
    ),
    tag = "cache"
)]
pub async fn get_cache_entry(
    State(cache): State<Arc<CacheService>>,
    Path((prefix, key)): Path<(String, String)>,
) -> Result<Json<ApiResponse<CacheEntryStatusDto>>> {
    let prefix = parse_prefix(&prefix)?;
    let status = entry_status(&cache, prefix, &key).await;
    Ok(Json(ApiResponse::success(Some(status), None, None)))
}

/// Reset the TTL of a live cache entry
#[utoipa::path(
    put,
    path = "/api/cache/{prefix}/{key}/ttl",
    params(
        ("prefix" = String, Path, description = "Key namespace, e.g. category"),
        ("key" = String, Path, description = "Key within the namespace")
    ),
    request_body = ExpireCacheEntryDto,
    responses(
        (status = 200, description = "TTL reset", body = ApiResponse<CacheEntryStatusDto>),
        (status = 400, description = "Unknown prefix or invalid TTL"),
        (status = 404, description = "No live entry")
    ),
    tag = "cache"
)]
pub async fn expire_cache_entry(
    State(cache): State<Arc<CacheService>>,
    Path((prefix, key)): Path<(String, String)>,
    AppJson(dto): AppJson<ExpireCacheEntryDto>,
) -> Result<Json<ApiResponse<CacheEntryStatusDto>>> {
    dto.validate()?;
    let prefix = parse_prefix(&prefix)?;

    if !cache
        .expire(&key, Duration::from_secs(dto.ttl_secs), Some(prefix))
        .await
    {
        return Err(AppError::NotFound(format!(
            "Cache entry {}{} not found",
            prefix, key
        )));
    }

    tracing::info!("Cache entry {}{} TTL reset to {}s", prefix, key, dto.ttl_secs);
    let status = entry_status(&cache, prefix, &key).await;
    Ok(Json(ApiResponse::success(Some(status), None, None)))
}

/// Evict a cache entry
#[utoipa::path(
    delete,
    path = "/api/cache/{prefix}/{key}",
    params(
        ("prefix" = String, Path, description = "Key namespace, e.g. category"),
        ("key" = String, Path, description = "Key within the namespace")
    ),
    responses(
        (status = 200, description = "Entry evicted (or was absent)", body = ApiResponse<CacheEntryStatusDto>),
        (status = 400, description = "Unknown prefix")
    ),
    tag = "cache"
)]
pub async fn delete_cache_entry(
    State(cache): State<Arc<CacheService>>,
    Path((prefix, key)): Path<(String, String)>,
) -> Result<Json<ApiResponse<CacheEntryStatusDto>>> {
    let prefix = parse_prefix(&prefix)?;
    cache.delete(&key, Some(prefix)).await;
    tracing::info!("Cache entry {}{} evicted", prefix, key);

    let status = entry_status(&cache, prefix, &key).await;
    Ok(Json(ApiResponse::success(Some(status), None, None)))
}

/// Evict every cache entry
#[utoipa::path(
    delete,
    path = "/api/cache",
    responses(
        (status = 200, description = "Cache cleared")
    ),
    tag = "cache"
)]
pub async fn clear_cache(State(cache): State<Arc<CacheService>>) -> Result<Json<ApiResponse<()>>> {
    cache.clear().await;
    tracing::info!("Cache cleared");
    Ok(Json(ApiResponse::success(
        None,
        Some("Cache cleared".to_string()),
        None,
    )))
}
