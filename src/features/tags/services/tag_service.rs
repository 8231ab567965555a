use std::sync::Arc;

use uuid::Uuid;

use crate::features::tags::dtos::{CreateTagDto, TagResponseDto, UpdateTagDto};
use crate::features::tags::stores::TagStore;

/// Service for tag operations
#[derive(Debug)]
pub struct TagService {
    store: Arc<TagStore>,
}

impl TagService {
    pub fn new(store: Arc<TagStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, dto: CreateTagDto) -> TagResponseDto {
        let tag = self.store.create(dto).await;
        tracing::info!("Tag created: id={}, name={}", tag.id, tag.name);
        tag.into()
    }

    /// `None` when the id does not exist
    pub async fn update(&self, id: Uuid, dto: UpdateTagDto) -> Option<TagResponseDto> {
        let tag = self.store.update(id, dto).await?;
        tracing::info!("Tag updated: id={}", tag.id);
        Some(tag.into())
    }

    pub async fn delete(&self, id: Uuid) -> Option<TagResponseDto> {
        let tag = self.store.delete(id).await?;
        tracing::info!("Tag deleted: id={}", tag.id);
        Some(tag.into())
    }

    pub async fn get(&self, id: Uuid) -> Option<TagResponseDto> {
        self.store.find_by_id(id).await.map(Into::into)
    }

    /// All tags, or those matching `search` when given, newest first
    pub async fn list(&self, search: Option<&str>) -> Vec<TagResponseDto> {
        let tags = match search.map(str::trim).filter(|s| !s.is_empty()) {
            Some(query) => self.store.search_by_name(query).await,
            None => self.store.list().await,
        };
        tags.into_iter().map(Into::into).collect()
    }
}
