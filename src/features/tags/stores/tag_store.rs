use std::sync::Arc;

use uuid::Uuid;

use crate::features::tags::dtos::{CreateTagDto, UpdateTagDto};
use crate::features::tags::models::Tag;
use crate::shared::clock::MonotonicClock;
use crate::shared::store::MemoryStore;

#[derive(Debug)]
pub struct TagStore {
    records: MemoryStore<Tag>,
    clock: Arc<MonotonicClock>,
}

fn newest_first(tags: &mut [Tag]) {
    tags.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

impl TagStore {
    pub fn new(clock: Arc<MonotonicClock>) -> Self {
        Self {
            records: MemoryStore::new(),
            clock,
        }
    }

    pub async fn create(&self, dto: CreateTagDto) -> Tag {
        let now = self.clock.now();
        let tag = Tag {
            id: Uuid::new_v4(),
            name: dto.name,
            description: dto.description,
            color: dto.color,
            is_enabled: dto.is_enabled.unwrap_or(true),
            created_at: now,
            updated_at: now,
        };

        self.records.insert(tag).await
    }

    pub async fn update(&self, id: Uuid, patch: UpdateTagDto) -> Option<Tag> {
        self.records
            .modify(id, |current| {
                let mut updated = current.clone();
                if let Some(name) = patch.name {
                    updated.name = name;
                }
                if let Some(description) = patch.description {
                    updated.description = description;
                }
                if let Some(color) = patch.color {
                    updated.color = color;
                }
                if let Some(is_enabled) = patch.is_enabled {
                    updated.is_enabled = is_enabled;
                }
                updated.updated_at = self.clock.now_after(current.updated_at);
                updated
            })
            .await
    }

    pub async fn delete(&self, id: Uuid) -> Option<Tag> {
        self.records.remove(id).await
    }

    /// All tags, newest first
    pub async fn list(&self) -> Vec<Tag> {
        let mut tags = self.records.all().await;
        newest_first(&mut tags);
        tags
    }

    pub async fn find_by_id(&self, id: Uuid) -> Option<Tag> {
        self.records.find(id).await
    }

    /// Tags whose name contains `query`, ignoring case, newest first
    pub async fn search_by_name(&self, query: &str) -> Vec<Tag> {
        let needle = query.to_lowercase();
        let mut tags: Vec<Tag> = self
            .records
            .all()
            .await
            .into_iter()
            .filter(|tag| tag.name.to_lowercase().contains(&needle))
            .collect();
        newest_first(&mut tags);
        tags
    }

    #[allow(dead_code)]
    pub async fn reset(&self) {
        self.records.reset().await;
    }
}
