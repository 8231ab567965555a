use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::articles::dtos::{CreateArticleDto, UpdateArticleDto};
use crate::features::articles::models::Article;
use crate::shared::clock::MonotonicClock;
use crate::shared::store::MemoryStore;

#[derive(Debug)]
pub struct ArticleStore {
    records: MemoryStore<Article>,
    clock: Arc<MonotonicClock>,
}

fn slug_taken(slug: &str, except: Option<Uuid>, all: &[Article]) -> bool {
    all.iter()
        .any(|a| a.slug == slug && Some(a.id) != except)
}

fn slug_conflict(slug: &str) -> AppError {
    AppError::Conflict(format!("An article with slug '{}' already exists", slug))
}

impl ArticleStore {
    pub fn new(clock: Arc<MonotonicClock>) -> Self {
        Self {
            records: MemoryStore::new(),
            clock,
        }
    }

    /// Insert a new article; fails with `Conflict` on a duplicate slug
    pub async fn create(&self, dto: CreateArticleDto) -> Result<Article> {
        let now = self.clock.now();
        let article = Article {
            id: Uuid::new_v4(),
            title: dto.title,
            content: dto.content,
            author_id: dto.author_id,
            slug: dto.slug,
            excerpt: dto.excerpt,
            cover_image: dto.cover_image,
            category_id: dto.category_id,
            tag_ids: dto.tag_ids.unwrap_or_default(),
            published: dto.published.unwrap_or(false),
            created_at: now,
            updated_at: now,
            view_count: 0,
        };

        let slug = article.slug.clone();
        self.records
            .insert_checked(article, |all| {
                if slug_taken(&slug, None, all) {
                    return Err(slug_conflict(&slug));
                }
                Ok(())
            })
            .await
    }

    /// Shallow-merge `patch`; `Ok(None)` when the id does not exist
    pub async fn update(&self, id: Uuid, patch: UpdateArticleDto) -> Result<Option<Article>> {
        let clock = Arc::clone(&self.clock);

        self.records
            .replace_with(id, move |current, all| {
                if let Some(ref slug) = patch.slug {
                    if slug_taken(slug, Some(id), all) {
                        return Err(slug_conflict(slug));
                    }
                }

                let mut updated = current.clone();
                if let Some(title) = patch.title {
                    updated.title = title;
                }
                if let Some(content) = patch.content {
                    updated.content = content;
                }
                if let Some(slug) = patch.slug {
                    updated.slug = slug;
                }
                if let Some(excerpt) = patch.excerpt {
                    updated.excerpt = excerpt;
                }
                if let Some(cover_image) = patch.cover_image {
                    updated.cover_image = cover_image;
                }
                if let Some(category_id) = patch.category_id {
                    updated.category_id = category_id;
                }
                if let Some(tag_ids) = patch.tag_ids {
                    updated.tag_ids = tag_ids;
                }
                if let Some(published) = patch.published {
                    updated.published = published;
                }
                updated.updated_at = clock.now_after(current.updated_at);

                Ok(updated)
            })
            .await
    }

    pub async fn delete(&self, id: Uuid) -> Option<Article> {
        self.records.remove(id).await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Option<Article> {
        self.records.find(id).await
    }

    pub async fn find_by_slug(&self, slug: &str) -> Option<Article> {
        self.records.find_by(|a| a.slug == slug).await
    }

    /// Bump `view_count` by one; `updated_at` is left unchanged
    pub async fn increment_view_count(&self, id: Uuid) -> Option<Article> {
        self.records
            .modify(id, |current| {
                let mut viewed = current.clone();
                viewed.view_count = viewed.view_count.saturating_add(1);
                viewed
            })
            .await
    }

    /// All articles, unsorted
    pub async fn list(&self) -> Vec<Article> {
        self.records.all().await
    }

    #[allow(dead_code)]
    pub async fn reset(&self) {
        self.records.reset().await;
    }
}
