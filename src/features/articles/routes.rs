use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::articles::handlers;
use crate::features::articles::services::ArticleService;

/// Create routes for the articles feature
pub fn routes(service: Arc<ArticleService>) -> Router {
    Router::new()
        .route(
            "/api/articles",
            get(handlers::list_articles).post(handlers::create_article),
        )
        .route(
            "/api/articles/{id}",
            get(handlers::get_article)
                .put(handlers::update_article)
                .delete(handlers::delete_article),
        )
        .route("/api/articles/slug/{slug}", get(handlers::get_article_by_slug))
        .route("/api/articles/{id}/views", post(handlers::record_article_view))
        .with_state(service)
}
