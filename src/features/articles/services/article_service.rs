use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::articles::dtos::{
    ArticleQueryParams, ArticleResponseDto, ArticleStatus, CreateArticleDto, UpdateArticleDto,
};
use crate::features::articles::models::Article;
use crate::features::articles::stores::ArticleStore;
use crate::shared::validation::valid_tag_refs;

/// Parsed and validated list filters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArticleFilter {
    pub category_id: Option<Uuid>,
    pub tag_id: Option<Uuid>,
    pub author_id: Option<Uuid>,
    pub published: Option<bool>,
    pub status: Option<ArticleStatus>,
    /// Any-of tag set; `Some(empty)` matches nothing
    pub tags: Option<Vec<Uuid>>,
    pub search_query: Option<String>,
}

impl ArticleFilter {
    pub fn from_query(query: &ArticleQueryParams) -> Result<Self> {
        let status = match query.status.as_deref() {
            Some(raw) => Some(
                ArticleStatus::parse(raw)
                    .ok_or_else(|| AppError::BadRequest("Invalid status value".to_string()))?,
            ),
            None => None,
        };

        let tags = match query.tags.as_deref() {
            Some(raw) => parse_tag_list(raw)?,
            None => None,
        };

        let search_query = query
            .search_query
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        Ok(Self {
            category_id: query.category_id,
            tag_id: query.tag_id,
            author_id: query.author_id,
            published: query.published,
            status,
            tags,
            search_query,
        })
    }

    pub fn matches(&self, article: &Article) -> bool {
        if self.category_id.is_some() && article.category_id != self.category_id {
            return false;
        }
        if let Some(tag_id) = self.tag_id {
            if !article.tag_ids.contains(&tag_id) {
                return false;
            }
        }
        if let Some(author_id) = self.author_id {
            if article.author_id != author_id {
                return false;
            }
        }
        if let Some(published) = self.published {
            if article.published != published {
                return false;
            }
        }
        if let Some(status) = self.status {
            if article.published != status.is_published() {
                return false;
            }
        }
        if let Some(ref tags) = self.tags {
            if !tags.iter().any(|t| article.tag_ids.contains(t)) {
                return false;
            }
        }
        if let Some(ref needle) = self.search_query {
            let hit = article.title.to_lowercase().contains(needle)
                || article.content.to_lowercase().contains(needle);
            if !hit {
                return false;
            }
        }
        true
    }
}

/// Split a comma-separated tag list. Malformed entries reject the whole
/// list; well-formed entries that are not ids match nothing. A list with no
/// entries is no filter at all.
fn parse_tag_list(raw: &str) -> Result<Option<Vec<Uuid>>> {
    let parts: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    if !valid_tag_refs(&parts) {
        return Err(AppError::BadRequest("Invalid tags format".to_string()));
    }

    if parts.is_empty() {
        return Ok(None);
    }

    Ok(Some(
        parts
            .iter()
            .filter_map(|p| Uuid::parse_str(p).ok())
            .collect(),
    ))
}

/// Service for article operations
#[derive(Debug)]
pub struct ArticleService {
    store: Arc<ArticleStore>,
}

impl ArticleService {
    pub fn new(store: Arc<ArticleStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, dto: CreateArticleDto) -> Result<ArticleResponseDto> {
        let article = self
            .store
            .create(dto)
            .await
            .inspect_err(|e| tracing::warn!("Article rejected: {}", e))?;
        tracing::info!(
            "Article created: id={}, slug={}, author={}",
            article.id,
            article.slug,
            article.author_id
        );
        Ok(article.into())
    }

    pub async fn update(
        &self,
        id: Uuid,
        dto: UpdateArticleDto,
    ) -> Result<Option<ArticleResponseDto>> {
        let updated = self
            .store
            .update(id, dto)
            .await
            .inspect_err(|e| tracing::warn!("Article update rejected: id={}, {}", id, e))?;

        Ok(updated.map(|article| {
            tracing::info!("Article updated: id={}", article.id);
            article.into()
        }))
    }

    pub async fn delete(&self, id: Uuid) -> Option<ArticleResponseDto> {
        let article = self.store.delete(id).await?;
        tracing::info!("Article deleted: id={}", article.id);
        Some(article.into())
    }

    pub async fn get(&self, id: Uuid) -> Option<ArticleResponseDto> {
        self.store.find_by_id(id).await.map(Into::into)
    }

    pub async fn get_by_slug(&self, slug: &str) -> Option<ArticleResponseDto> {
        self.store.find_by_slug(slug).await.map(Into::into)
    }

    /// Record one view; `None` when the id does not exist
    pub async fn increment_view_count(&self, id: Uuid) -> Option<ArticleResponseDto> {
        let article = self.store.increment_view_count(id).await?;
        tracing::debug!("Article viewed: id={}, views={}", article.id, article.view_count);
        Some(article.into())
    }

    /// Filtered page of articles, newest first, with the unpaged total
    pub async fn list(
        &self,
        query: &ArticleQueryParams,
    ) -> Result<(Vec<ArticleResponseDto>, i64)> {
        let filter = ArticleFilter::from_query(query)?;

        let mut articles: Vec<Article> = self
            .store
            .list()
            .await
            .into_iter()
            .filter(|a| filter.matches(a))
            .collect();
        articles.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = articles.len() as i64;
        let page = articles
            .into_iter()
            .skip(query.offset())
            .take(query.page_size() as usize)
            .map(Into::into)
            .collect();

        Ok((page, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::clock::MonotonicClock;

    fn service() -> ArticleService {
        ArticleService::new(Arc::new(ArticleStore::new(Arc::new(MonotonicClock::new()))))
    }

    fn draft(slug: &str, title: &str) -> CreateArticleDto {
        CreateArticleDto {
            title: title.to_string(),
            content: "Body text".to_string(),
            author_id: Uuid::new_v4(),
            slug: slug.to_string(),
            excerpt: None,
            cover_image: None,
            category_id: None,
            tag_ids: None,
            published: None,
        }
    }

    fn query() -> ArticleQueryParams {
        ArticleQueryParams::default()
    }

    #[test]
    fn test_filter_rejects_unknown_status() {
        let q = ArticleQueryParams {
            status: Some("archived".to_string()),
            ..query()
        };
        assert!(matches!(
            ArticleFilter::from_query(&q),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_filter_tag_list_parsing() {
        let id = Uuid::new_v4();
        let q = ArticleQueryParams {
            tags: Some(format!("{}, ,rust", id)),
            ..query()
        };
        let filter = ArticleFilter::from_query(&q).unwrap();
        assert_eq!(filter.tags, Some(vec![id]));

        let q = ArticleQueryParams {
            tags: Some(" , ".to_string()),
            ..query()
        };
        assert_eq!(ArticleFilter::from_query(&q).unwrap().tags, None);

        let q = ArticleQueryParams {
            tags: Some("rust;go".to_string()),
            ..query()
        };
        assert!(ArticleFilter::from_query(&q).is_err());

        let q = ArticleQueryParams {
            tags: Some("a--b".to_string()),
            ..query()
        };
        assert!(ArticleFilter::from_query(&q).is_err());
    }

    #[tokio::test]
    async fn test_list_newest_first_with_total() {
        let service = service();
        for i in 0..5 {
            service
                .create(draft(&format!("post-{}", i), &format!("Post {}", i)))
                .await
                .unwrap();
        }

        let q = ArticleQueryParams {
            page: 2,
            limit: 2,
            ..query()
        };
        let (page, total) = service.list(&q).await.unwrap();
        assert_eq!(total, 5);
        let slugs: Vec<&str> = page.iter().map(|a| a.slug.as_str()).collect();
        assert_eq!(slugs, vec!["post-2", "post-1"]);
    }

    #[tokio::test]
    async fn test_list_filters() {
        let service = service();
        let tag = Uuid::new_v4();
        let category = Uuid::new_v4();

        let tagged = service
            .create(CreateArticleDto {
                tag_ids: Some(vec![tag]),
                category_id: Some(category),
                published: Some(true),
                ..draft("tagged", "Learning Rust")
            })
            .await
            .unwrap();
        service.create(draft("plain", "Cooking")).await.unwrap();

        let by_tag = ArticleQueryParams {
            tag_id: Some(tag),
            ..query()
        };
        let (found, _) = service.list(&by_tag).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, tagged.id);

        let by_any_tag = ArticleQueryParams {
            tags: Some(format!("{},{}", Uuid::new_v4(), tag)),
            ..query()
        };
        assert_eq!(service.list(&by_any_tag).await.unwrap().1, 1);

        let by_unknown_tag = ArticleQueryParams {
            tags: Some("rust".to_string()),
            ..query()
        };
        assert_eq!(service.list(&by_unknown_tag).await.unwrap().1, 0);

        let drafts = ArticleQueryParams {
            status: Some("draft".to_string()),
            ..query()
        };
        let (found, _) = service.list(&drafts).await.unwrap();
        assert_eq!(found[0].slug, "plain");

        let search = ArticleQueryParams {
            search_query: Some("RUST".to_string()),
            ..query()
        };
        assert_eq!(service.list(&search).await.unwrap().1, 1);

        let by_category = ArticleQueryParams {
            category_id: Some(category),
            published: Some(false),
            ..query()
        };
        assert_eq!(service.list(&by_category).await.unwrap().1, 0);

        let by_author = ArticleQueryParams {
            author_id: Some(tagged.author_id),
            ..query()
        };
        assert_eq!(service.list(&by_author).await.unwrap().1, 1);
    }

    #[tokio::test]
    async fn test_view_count_and_slug_lookup() {
        let service = service();
        let created = service.create(draft("read-me", "Read me")).await.unwrap();

        let viewed = service.increment_view_count(created.id).await.unwrap();
        assert_eq!(viewed.view_count, 1);
        assert_eq!(
            service.get_by_slug("read-me").await.map(|a| a.view_count),
            Some(1)
        );
        assert!(service.increment_view_count(Uuid::new_v4()).await.is_none());
    }

    #[tokio::test]
    async fn test_update_clears_optional_fields() {
        let service = service();
        let created = service
            .create(CreateArticleDto {
                excerpt: Some("Short".to_string()),
                ..draft("with-excerpt", "Title")
            })
            .await
            .unwrap();

        let updated = service
            .update(
                created.id,
                UpdateArticleDto {
                    excerpt: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.excerpt, None);
        assert_eq!(updated.title, "Title");
        assert_eq!(updated.author_id, created.author_id);
    }
}
