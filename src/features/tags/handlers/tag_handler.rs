use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::tags::dtos::{CreateTagDto, ListTagsQuery, TagResponseDto, UpdateTagDto};
use crate::features::tags::services::TagService;
use crate::shared::types::{ApiResponse, Meta};

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Tag with id {} not found", id))
}

/// List tags, optionally filtered by name
#[utoipa::path(
    get,
    path = "/api/tags",
    params(ListTagsQuery),
    responses(
        (status = 200, description = "List of tags", body = ApiResponse<Vec<TagResponseDto>>),
    ),
    tag = "tags"
)]
pub async fn list_tags(
    State(service): State<Arc<TagService>>,
    Query(query): Query<ListTagsQuery>,
) -> Json<ApiResponse<Vec<TagResponseDto>>> {
    let tags = service.list(query.search.as_deref()).await;
    let total = tags.len() as i64;
    Json(ApiResponse::success(Some(tags), None, Some(Meta { total })))
}

/// Create a tag
#[utoipa::path(
    post,
    path = "/api/tags",
    request_body = CreateTagDto,
    responses(
        (status = 201, description = "Tag created", body = ApiResponse<TagResponseDto>),
        (status = 400, description = "Validation error")
    ),
    tag = "tags"
)]
pub async fn create_tag(
    State(service): State<Arc<TagService>>,
    AppJson(dto): AppJson<CreateTagDto>,
) -> Result<(StatusCode, Json<ApiResponse<TagResponseDto>>)> {
    dto.validate()?;

    let tag = service.create(dto).await;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(tag), None, None)),
    ))
}

/// Get tag by id
#[utoipa::path(
    get,
    path = "/api/tags/{id}",
    params(
        ("id" = Uuid, Path, description = "Tag ID")
    ),
    responses(
        (status = 200, description = "Tag found", body = ApiResponse<TagResponseDto>),
        (status = 404, description = "Tag not found")
    ),
    tag = "tags"
)]
pub async fn get_tag(
    State(service): State<Arc<TagService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<TagResponseDto>>> {
    let tag = service.get(id).await.ok_or_else(|| not_found(id))?;
    Ok(Json(ApiResponse::success(Some(tag), None, None)))
}

/// Partially update a tag
#[utoipa::path(
    put,
    path = "/api/tags/{id}",
    params(
        ("id" = Uuid, Path, description = "Tag ID")
    ),
    request_body = UpdateTagDto,
    responses(
        (status = 200, description = "Tag updated", body = ApiResponse<TagResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Tag not found")
    ),
    tag = "tags"
)]
pub async fn update_tag(
    State(service): State<Arc<TagService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateTagDto>,
) -> Result<Json<ApiResponse<TagResponseDto>>> {
    dto.validate()?;

    let tag = service.update(id, dto).await.ok_or_else(|| not_found(id))?;
    Ok(Json(ApiResponse::success(Some(tag), None, None)))
}

/// Delete a tag
#[utoipa::path(
    delete,
    path = "/api/tags/{id}",
    params(
        ("id" = Uuid, Path, description = "Tag ID")
    ),
    responses(
        (status = 200, description = "Deleted tag", body = ApiResponse<TagResponseDto>),
        (status = 404, description = "Tag not found")
    ),
    tag = "tags"
)]
pub async fn delete_tag(
    State(service): State<Arc<TagService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<TagResponseDto>>> {
    let tag = service.delete(id).await.ok_or_else(|| not_found(id))?;
    Ok(Json(ApiResponse::success(Some(tag), None, None)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::tags::{routes, TagStore};
    use crate::shared::clock::MonotonicClock;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    fn server() -> TestServer {
        let store = Arc::new(TagStore::new(Arc::new(MonotonicClock::new())));
        TestServer::new(routes::routes(Arc::new(TagService::new(store)))).unwrap()
    }

    #[tokio::test]
    async fn test_search_endpoint() {
        let server = server();
        for name in ["Rust", "Go", "rust-lang"] {
            server
                .post("/api/tags")
                .json(&json!({ "name": name }))
                .await
                .assert_status(StatusCode::CREATED);
        }

        let response = server.get("/api/tags").add_query_param("search", "rust").await;
        response.assert_status_ok();
        let body = response.json::<Value>();
        assert_eq!(body["meta"]["total"], 2);
        assert_eq!(body["data"][0]["name"], "rust-lang");
        assert_eq!(body["data"][1]["name"], "Rust");
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_tag() {
        let server = server();
        let id = Uuid::new_v4();

        server
            .put(&format!("/api/tags/{}", id))
            .json(&json!({ "name": "x" }))
            .expect_failure()
            .await
            .assert_status(StatusCode::NOT_FOUND);
        server
            .delete(&format!("/api/tags/{}", id))
            .expect_failure()
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_invalid_color_is_rejected() {
        let server = server();
        server
            .post("/api/tags")
            .json(&json!({ "name": "web", "color": "blue" }))
            .expect_failure()
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}
