use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::articles::models::Article;
use crate::shared::types::{clamp_page_size, default_limit, default_page, page_offset};
use crate::shared::validation::{deserialize_patch, SLUG_REGEX};

/// Publication state used by the `status` list filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArticleStatus {
    Draft,
    Published,
}

impl ArticleStatus {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "draft" => Some(ArticleStatus::Draft),
            "published" => Some(ArticleStatus::Published),
            _ => None,
        }
    }

    pub fn is_published(&self) -> bool {
        matches!(self, ArticleStatus::Published)
    }
}

/// Query params for listing articles
#[derive(Debug, Clone, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
#[into_params(rename_all = "camelCase")]
pub struct ArticleQueryParams {
    pub category_id: Option<Uuid>,

    /// Articles carrying this tag
    pub tag_id: Option<Uuid>,

    pub author_id: Option<Uuid>,

    pub published: Option<bool>,

    /// `draft` or `published`
    pub status: Option<String>,

    /// Comma-separated tag ids; matches articles carrying any of them
    pub tags: Option<String>,

    /// Case-insensitive match on title or content
    pub search_query: Option<String>,

    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,

    /// Items per page (default: 10, max: 100)
    #[serde(default = "default_limit")]
    #[param(minimum = 1, maximum = 100)]
    pub limit: i64,
}

impl Default for ArticleQueryParams {
    fn default() -> Self {
        Self {
            category_id: None,
            tag_id: None,
            author_id: None,
            published: None,
            status: None,
            tags: None,
            search_query: None,
            page: default_page(),
            limit: default_limit(),
        }
    }
}

impl ArticleQueryParams {
    pub fn offset(&self) -> usize {
        page_offset(self.page, self.page_size())
    }

    /// Clamped page size
    pub fn page_size(&self) -> i64 {
        clamp_page_size(self.limit)
    }
}

/// Request DTO for creating an article
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateArticleDto {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(min = 1, message = "Content must not be empty"))]
    pub content: String,

    pub author_id: Uuid,

    #[validate(
        length(min = 1, max = 200, message = "Slug must be 1-200 characters"),
        regex(path = *SLUG_REGEX, message = "Slug must be lowercase letters and digits separated by single hyphens")
    )]
    pub slug: String,

    #[validate(length(max = 500, message = "Excerpt must not exceed 500 characters"))]
    pub excerpt: Option<String>,

    #[validate(url(message = "Cover image must be a valid URL"))]
    pub cover_image: Option<String>,

    pub category_id: Option<Uuid>,

    pub tag_ids: Option<Vec<Uuid>>,

    /// Defaults to false
    pub published: Option<bool>,
}

/// Request DTO for a partial article update.
///
/// The author cannot be changed. `null` clears `excerpt`, `coverImage` and
/// `categoryId`.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateArticleDto {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 1, message = "Content must not be empty"))]
    pub content: Option<String>,

    #[validate(
        length(min = 1, max = 200, message = "Slug must be 1-200 characters"),
        regex(path = *SLUG_REGEX, message = "Slug must be lowercase letters and digits separated by single hyphens")
    )]
    pub slug: Option<String>,

    #[serde(default, deserialize_with = "deserialize_patch")]
    #[schema(value_type = Option<String>)]
    #[validate(length(max = 500, message = "Excerpt must not exceed 500 characters"))]
    pub excerpt: Option<Option<String>>,

    #[serde(default, deserialize_with = "deserialize_patch")]
    #[schema(value_type = Option<String>)]
    #[validate(url(message = "Cover image must be a valid URL"))]
    pub cover_image: Option<Option<String>>,

    #[serde(default, deserialize_with = "deserialize_patch")]
    #[schema(value_type = Option<Uuid>)]
    pub category_id: Option<Option<Uuid>>,

    pub tag_ids: Option<Vec<Uuid>>,

    pub published: Option<bool>,
}

/// Response DTO for article
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArticleResponseDto {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author_id: Uuid,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Uuid>,
    pub tag_ids: Vec<Uuid>,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub view_count: u64,
}

impl From<Article> for ArticleResponseDto {
    fn from(a: Article) -> Self {
        Self {
            id: a.id,
            title: a.title,
            content: a.content,
            author_id: a.author_id,
            slug: a.slug,
            excerpt: a.excerpt,
            cover_image: a.cover_image,
            category_id: a.category_id,
            tag_ids: a.tag_ids,
            published: a.published,
            created_at: a.created_at,
            updated_at: a.updated_at,
            view_count: a.view_count,
        }
    }
}
