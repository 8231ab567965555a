mod core;
mod features;
mod modules;
mod shared;

use crate::core::config::Config;
use crate::core::middleware;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::features::articles::{routes as articles_routes, ArticleService, ArticleStore};
use crate::features::cache::routes as cache_routes;
use crate::features::categories::{routes as categories_routes, CategoryService, CategoryStore};
use crate::features::tags::{routes as tags_routes, TagService, TagStore};
use crate::features::users::{routes as users_routes, UserService, UserStore};
use crate::modules::cache::CacheService;
use crate::shared::clock::MonotonicClock;
use axum::extract::DefaultBodyLimit;
use axum::{middleware::from_fn, Router};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// How often expired cache entries are swept
const CACHE_PURGE_INTERVAL: Duration = Duration::from_secs(60);

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!(
        "System info: tokio_worker_threads={}, pid={}",
        worker_threads,
        std::process::id()
    );
    tracing::info!("Configuration loaded successfully");

    // One clock for every store so timestamps never run backwards
    let clock = Arc::new(MonotonicClock::new());

    let cache = Arc::new(CacheService::new(&config.cache));
    tracing::info!(
        "Cache initialized: default_ttl={:?}, tree_ttl={:?}",
        config.cache.default_ttl,
        config.cache.tree_ttl
    );

    let purge_cache = Arc::clone(&cache);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(CACHE_PURGE_INTERVAL);
        loop {
            interval.tick().await;
            let purged = purge_cache.purge_expired().await;
            if purged > 0 {
                tracing::debug!("Purged {} expired cache entries", purged);
            }
        }
    });

    let category_store = Arc::new(CategoryStore::new(Arc::clone(&clock)));
    let category_service = Arc::new(CategoryService::new(
        category_store,
        Arc::clone(&cache),
        config.cache.tree_ttl,
    ));
    tracing::info!("Category service initialized");

    let tag_store = Arc::new(TagStore::new(Arc::clone(&clock)));
    let tag_service = Arc::new(TagService::new(tag_store));
    tracing::info!("Tag service initialized");

    let article_store = Arc::new(ArticleStore::new(Arc::clone(&clock)));
    let article_service = Arc::new(ArticleService::new(article_store));
    tracing::info!("Article service initialized");

    let user_store = Arc::new(UserStore::new(Arc::clone(&clock)));
    let user_service = Arc::new(UserService::new(user_store));
    tracing::info!("User service initialized");

    // Build application router with dynamic swagger config
    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    // Swagger UI and cache administration share the optional basic auth
    let swagger =
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi));
    let admin = Router::new()
        .merge(swagger)
        .merge(cache_routes::routes(Arc::clone(&cache)));

    let admin = if let Some(credentials) = config.swagger.credentials() {
        tracing::info!("Basic auth enabled for Swagger UI and cache admin");
        admin.layer(from_fn(middleware::basic_auth_middleware(Arc::new(
            credentials,
        ))))
    } else {
        tracing::info!("Basic auth disabled for Swagger UI and cache admin (no credentials configured)");
        admin
    };

    async fn health_check() -> axum::http::StatusCode {
        axum::http::StatusCode::OK
    }
    let health_route = Router::new().route("/health", axum::routing::get(health_check));

    let api_routes = Router::new()
        .merge(categories_routes::routes(category_service))
        .merge(tags_routes::routes(tag_service))
        .merge(articles_routes::routes(article_service))
        .merge(users_routes::routes(user_service));

    let app = Router::new()
        .merge(admin)
        .merge(api_routes)
        .merge(health_route)
        .layer(DefaultBodyLimit::max(config.app.max_request_body_size))
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        .layer(
            ServiceBuilder::new()
                // Generate X-Request-Id using UUID v7 (or use client-provided one)
                .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(middleware::MakeSpanWithRequestId)
                        .on_request(DefaultOnRequest::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                // Propagate X-Request-Id to response headers
                .layer(PropagateRequestIdLayer::x_request_id()),
        );

    // Start server
    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    // Use socket2 for TCP listener configuration
    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    socket.set_nodelay(true)?;

    let keepalive = socket2::TcpKeepalive::new().with_time(Duration::from_secs(60));
    socket.set_tcp_keepalive(&keepalive)?;

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
