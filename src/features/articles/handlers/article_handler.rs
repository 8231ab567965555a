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
use crate::features::articles::dtos::{
    ArticleQueryParams, ArticleResponseDto, CreateArticleDto, UpdateArticleDto,
};
use crate::features::articles::services::ArticleService;
use crate::shared::types::{ApiResponse, Meta};

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Article with id {} not found", id))
}

/// List articles
///
/// Filters combine with AND. Results are ordered newest first; `meta.total`
/// counts every match, not just the returned page.
#[utoipa::path(
    get,
    path = "/api/articles",
    params(ArticleQueryParams),
    responses(
        (status = 200, description = "Page of articles", body = ApiResponse<Vec<ArticleResponseDto>>),
        (status = 400, description = "Invalid status or tags filter")
    ),
    tag = "articles"
)]
pub async fn list_articles(
    State(service): State<Arc<ArticleService>>,
    Query(query): Query<ArticleQueryParams>,
) -> Result<Json<ApiResponse<Vec<ArticleResponseDto>>>> {
    let (articles, total) = service.list(&query).await?;
    Ok(Json(ApiResponse::success(
        Some(articles),
        None,
        Some(Meta { total }),
    )))
}

/// Create an article
#[utoipa::path(
    post,
    path = "/api/articles",
    request_body = CreateArticleDto,
    responses(
        (status = 201, description = "Article created", body = ApiResponse<ArticleResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Slug already in use")
    ),
    tag = "articles"
)]
pub async fn create_article(
    State(service): State<Arc<ArticleService>>,
    AppJson(dto): AppJson<CreateArticleDto>,
) -> Result<(StatusCode, Json<ApiResponse<ArticleResponseDto>>)> {
    dto.validate()?;

    let article = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(article), None, None)),
    ))
}

/// Get article by id
#[utoipa::path(
    get,
    path = "/api/articles/{id}",
    params(
        ("id" = Uuid, Path, description = "Article ID")
    ),
    responses(
        (status = 200, description = "Article found", body = ApiResponse<ArticleResponseDto>),
        (status = 404, description = "Article not found")
    ),
    tag = "articles"
)]
pub async fn get_article(
    State(service): State<Arc<ArticleService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ArticleResponseDto>>> {
    let article = service.get(id).await.ok_or_else(|| not_found(id))?;
    Ok(Json(ApiResponse::success(Some(article), None, None)))
}

/// Get article by slug
#[utoipa::path(
    get,
    path = "/api/articles/slug/{slug}",
    params(
        ("slug" = String, Path, description = "Article slug")
    ),
    responses(
        (status = 200, description = "Article found", body = ApiResponse<ArticleResponseDto>),
        (status = 404, description = "Article not found")
    ),
    tag = "articles"
)]
pub async fn get_article_by_slug(
    State(service): State<Arc<ArticleService>>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<ArticleResponseDto>>> {
    let article = service
        .get_by_slug(&slug)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Article with slug '{}' not found", slug)))?;
    Ok(Json(ApiResponse::success(Some(article), None, None)))
}

/// Record one view of an article
#[utoipa::path(
    post,
    path = "/api/articles/{id}/views",
    params(
        ("id" = Uuid, Path, description = "Article ID")
    ),
    responses(
        (status = 200, description = "Article with its new view count", body = ApiResponse<ArticleResponseDto>),
        (status = 404, description = "Article not found")
    ),
    tag = "articles"
)]
pub async fn record_article_view(
    State(service): State<Arc<ArticleService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ArticleResponseDto>>> {
    let article = service
        .increment_view_count(id)
        .await
        .ok_or_else(|| not_found(id))?;
    Ok(Json(ApiResponse::success(Some(article), None, None)))
}

/// Partially update an article
#[utoipa::path(
    put,
    path = "/api/articles/{id}",
    params(
        ("id" = Uuid, Path, description = "Article ID")
    ),
    request_body = UpdateArticleDto,
    responses(
        (status = 200, description = "Article updated", body = ApiResponse<ArticleResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Article not found"),
        (status = 409, description = "Slug already in use")
    ),
    tag = "articles"
)]
pub async fn update_article(
    State(service): State<Arc<ArticleService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateArticleDto>,
) -> Result<Json<ApiResponse<ArticleResponseDto>>> {
    dto.validate()?;

    let article = service
        .update(id, dto)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(ApiResponse::success(Some(article), None, None)))
}

/// Delete an article
#[utoipa::path(
    delete,
    path = "/api/articles/{id}",
    params(
        ("id" = Uuid, Path, description = "Article ID")
    ),
    responses(
        (status = 200, description = "Deleted article", body = ApiResponse<ArticleResponseDto>),
        (status = 404, description = "Article not found")
    ),
    tag = "articles"
)]
pub async fn delete_article(
    State(service): State<Arc<ArticleService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ArticleResponseDto>>> {
    let article = service.delete(id).await.ok_or_else(|| not_found(id))?;
    Ok(Json(ApiResponse::success(Some(article), None, None)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::articles::{routes, ArticleStore};
    use crate::shared::clock::MonotonicClock;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    fn server() -> TestServer {
        let store = Arc::new(ArticleStore::new(Arc::new(MonotonicClock::new())));
        TestServer::new(routes::routes(Arc::new(ArticleService::new(store)))).unwrap()
    }

    fn body(slug: &str) -> Value {
        json!({
            "title": "Hello",
            "content": "World",
            "authorId": Uuid::new_v4(),
            "slug": slug
        })
    }

    #[tokio::test]
    async fn test_create_and_fetch() {
        let server = server();
        let response = server.post("/api/articles").json(&body("hello-world")).await;
        response.assert_status(StatusCode::CREATED);
        let created = response.json::<Value>();
        assert_eq!(created["success"], true);
        assert_eq!(created["data"]["published"], false);
        assert_eq!(created["data"]["viewCount"], 0);

        let id = created["data"]["id"].as_str().unwrap().to_string();
        let fetched = server.get(&format!("/api/articles/{}", id)).await;
        fetched.assert_status_ok();
        assert_eq!(fetched.json::<Value>()["data"]["slug"], "hello-world");
    }

    #[tokio::test]
    async fn test_duplicate_slug_returns_conflict() {
        let server = server();
        server
            .post("/api/articles")
            .json(&body("taken"))
            .await
            .assert_status(StatusCode::CREATED);

        let response = server
            .post("/api/articles")
            .json(&body("taken"))
            .expect_failure()
            .await;
        response.assert_status(StatusCode::CONFLICT);
        assert_eq!(response.json::<Value>()["success"], false);
    }

    #[tokio::test]
    async fn test_list_pagination_meta() {
        let server = server();
        for i in 0..3 {
            server
                .post("/api/articles")
                .json(&body(&format!("post-{}", i)))
                .await
                .assert_status(StatusCode::CREATED);
        }

        let response = server
            .get("/api/articles")
            .add_query_param("limit", 2)
            .await;
        response.assert_status_ok();
        let listed = response.json::<Value>();
        assert_eq!(listed["meta"]["total"], 3);
        assert_eq!(listed["data"].as_array().unwrap().len(), 2);
        assert_eq!(listed["data"][0]["slug"], "post-2");
    }

    #[tokio::test]
    async fn test_invalid_filters_are_bad_requests() {
        let server = server();
        server
            .get("/api/articles")
            .add_query_param("status", "archived")
            .expect_failure()
            .await
            .assert_status(StatusCode::BAD_REQUEST);
        server
            .get("/api/articles")
            .add_query_param("tags", "rust,c++")
            .expect_failure()
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_author_cannot_be_patched() {
        let server = server();
        let created = server
            .post("/api/articles")
            .json(&body("owned"))
            .await
            .json::<Value>();
        let id = created["data"]["id"].as_str().unwrap().to_string();

        server
            .put(&format!("/api/articles/{}", id))
            .json(&json!({ "authorId": Uuid::new_v4() }))
            .expect_failure()
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_lookup_by_slug_and_count_views() {
        let server = server();
        let created = server
            .post("/api/articles")
            .json(&body("popular-post"))
            .await
            .json::<Value>();
        let id = created["data"]["id"].as_str().unwrap().to_string();

        for _ in 0..3 {
            server
                .post(&format!("/api/articles/{}/views", id))
                .await
                .assert_status_ok();
        }

        let response = server.get("/api/articles/slug/popular-post").await;
        response.assert_status_ok();
        let fetched = response.json::<Value>();
        assert_eq!(fetched["data"]["id"], id.as_str());
        assert_eq!(fetched["data"]["viewCount"], 3);
        assert_eq!(fetched["data"]["updatedAt"], created["data"]["updatedAt"]);

        server
            .get("/api/articles/slug/unknown")
            .expect_failure()
            .await
            .assert_status(StatusCode::NOT_FOUND);
        server
            .post(&format!("/api/articles/{}/views", Uuid::new_v4()))
            .expect_failure()
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_huge_page_returns_empty_page() {
        let server = server();
        server
            .post("/api/articles")
            .json(&body("only-post"))
            .await
            .assert_status(StatusCode::CREATED);

        let response = server
            .get("/api/articles")
            .add_query_param("page", i64::MAX)
            .await;
        response.assert_status_ok();
        let listed = response.json::<Value>();
        assert_eq!(listed["meta"]["total"], 1);
        assert!(listed["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_article() {
        let server = server();
        let id = Uuid::new_v4();
        server
            .get(&format!("/api/articles/{}", id))
            .expect_failure()
            .await
            .assert_status(StatusCode::NOT_FOUND);
        server
            .delete(&format!("/api/articles/{}", id))
            .expect_failure()
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}
