use utoipa::{Modify, OpenApi};

use crate::features::articles::{dtos as articles_dtos, handlers as articles_handlers};
use crate::features::cache::{dtos as cache_dtos, handlers as cache_handlers};
use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::tags::{dtos as tags_dtos, handlers as tags_handlers};
use crate::features::users::{dtos as users_dtos, handlers as users_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Categories
        categories_handlers::list_categories,
        categories_handlers::create_category,
        categories_handlers::get_category,
        categories_handlers::update_category,
        categories_handlers::delete_category,
        // Tags
        tags_handlers::list_tags,
        tags_handlers::create_tag,
        tags_handlers::get_tag,
        tags_handlers::update_tag,
        tags_handlers::delete_tag,
        // Articles
        articles_handlers::list_articles,
        articles_handlers::create_article,
        articles_handlers::get_article,
        articles_handlers::get_article_by_slug,
        articles_handlers::record_article_view,
        articles_handlers::update_article,
        articles_handlers::delete_article,
        // Users
        users_handlers::list_users,
        users_handlers::create_user,
        users_handlers::get_user,
        users_handlers::get_user_by_email,
        users_handlers::update_user,
        users_handlers::delete_user,
        // Cache
        cache_handlers::get_cache_entry,
        cache_handlers::expire_cache_entry,
        cache_handlers::delete_cache_entry,
        cache_handlers::clear_cache,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Categories
            categories_dtos::CreateCategoryDto,
            categories_dtos::UpdateCategoryDto,
            categories_dtos::CategoryResponseDto,
            categories_dtos::CategoryTreeDto,
            ApiResponse<categories_dtos::CategoryResponseDto>,
            ApiResponse<Vec<categories_dtos::CategoryResponseDto>>,
            ApiResponse<Vec<categories_dtos::CategoryTreeDto>>,
            // Tags
            tags_dtos::CreateTagDto,
            tags_dtos::UpdateTagDto,
            tags_dtos::TagResponseDto,
            ApiResponse<tags_dtos::TagResponseDto>,
            ApiResponse<Vec<tags_dtos::TagResponseDto>>,
            // Articles
            articles_dtos::CreateArticleDto,
            articles_dtos::UpdateArticleDto,
            articles_dtos::ArticleResponseDto,
            ApiResponse<articles_dtos::ArticleResponseDto>,
            ApiResponse<Vec<articles_dtos::ArticleResponseDto>>,
            // Users
            users_dtos::CreateUserDto,
            users_dtos::UpdateUserDto,
            users_dtos::ProfileDto,
            users_dtos::UserResponseDto,
            ApiResponse<users_dtos::UserResponseDto>,
            ApiResponse<Vec<users_dtos::UserResponseDto>>,
            // Cache
            cache_dtos::ExpireCacheEntryDto,
            cache_dtos::CacheEntryStatusDto,
            ApiResponse<cache_dtos::CacheEntryStatusDto>,
        )
    ),
    tags(
        (name = "categories", description = "Hierarchical article categories"),
        (name = "tags", description = "Article tags"),
        (name = "articles", description = "Articles with filtering and pagination"),
        (name = "users", description = "User accounts and profiles"),
        (name = "cache", description = "Cache inspection and eviction"),
    ),
    info(
        title = "CMS Core API",
        version = "0.1.0",
        description = "API documentation for the content management backend",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
