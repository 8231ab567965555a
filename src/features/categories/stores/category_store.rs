use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::{CreateCategoryDto, UpdateCategoryDto};
use crate::features::categories::models::Category;
use crate::shared::clock::MonotonicClock;
use crate::shared::store::MemoryStore;

/// Authoritative flat collection of categories.
///
/// Missing ids are reported as `None`, never as errors. The only rejected
/// write is a parent change that would make a category its own ancestor.
#[derive(Debug)]
pub struct CategoryStore {
    records: MemoryStore<Category>,
    clock: Arc<MonotonicClock>,
}

impl CategoryStore {
    pub fn new(clock: Arc<MonotonicClock>) -> Self {
        Self {
            records: MemoryStore::new(),
            clock,
        }
    }

    /// Insert a new category. `parent_id` is stored as given, even if dangling.
    pub async fn create(&self, dto: CreateCategoryDto) -> Category {
        let now = self.clock.now();
        let category = Category {
            id: Uuid::new_v4(),
            name: dto.name,
            description: dto.description,
            parent_id: dto.parent_id,
            order: dto.order,
            is_enabled: dto.is_enabled.unwrap_or(true),
            created_at: now,
            updated_at: now,
        };

        self.records.insert(category).await
    }

    /// Shallow-merge `patch` onto the category with `id`
    pub async fn update(&self, id: Uuid, patch: UpdateCategoryDto) -> Result<Option<Category>> {
        let clock = Arc::clone(&self.clock);

        self.records
            .replace_with(id, move |current, all| {
                if let Some(Some(parent_id)) = patch.parent_id {
                    if would_create_cycle(id, parent_id, all) {
                        return Err(AppError::Validation(format!(
                            "Category {} cannot be placed under {}: it would become its own ancestor",
                            id, parent_id
                        )));
                    }
                }

                let mut updated = current.clone();
                if let Some(name) = patch.name {
                    updated.name = name;
                }
                if let Some(description) = patch.description {
                    updated.description = description;
                }
                if let Some(parent_id) = patch.parent_id {
                    updated.parent_id = parent_id;
                }
                if let Some(order) = patch.order {
                    updated.order = order;
                }
                if let Some(is_enabled) = patch.is_enabled {
                    updated.is_enabled = is_enabled;
                }
                updated.updated_at = clock.now_after(current.updated_at);

                Ok(updated)
            })
            .await
    }

    /// Remove one category. Children keep their now-dangling `parent_id`.
    pub async fn delete(&self, id: Uuid) -> Option<Category> {
        self.records.remove(id).await
    }

    /// All categories, unsorted
    pub async fn list(&self) -> Vec<Category> {
        self.records.all().await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Option<Category> {
        self.records.find(id).await
    }

    #[allow(dead_code)]
    pub async fn reset(&self) {
        self.records.reset().await;
    }
}

/// True when making `new_parent` the parent of `id` closes a loop.
///
/// Walks the ancestor chain of `new_parent`, bounded by the number of
/// records. A dangling ancestor ends the walk.
fn would_create_cycle(id: Uuid, new_parent: Uuid, all: &[Category]) -> bool {
    if id == new_parent {
        return true;
    }

    let parents: HashMap<Uuid, Option<Uuid>> = all.iter().map(|c| (c.id, c.parent_id)).collect();
    let mut current = new_parent;

    for _ in 0..=all.len() {
        match parents.get(&current).copied().flatten() {
            Some(ancestor) if ancestor == id => return true,
            Some(ancestor) => current = ancestor,
            None => return false,
        }
    }

    // Chain longer than the store: already looping elsewhere
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> CategoryStore {
        CategoryStore::new(Arc::new(MonotonicClock::new()))
    }

    fn named(name: &str) -> CreateCategoryDto {
        CreateCategoryDto {
            name: name.to_string(),
            ..Default::default()
        }
    }

    fn child_of(name: &str, parent: Uuid) -> CreateCategoryDto {
        CreateCategoryDto {
            name: name.to_string(),
            parent_id: Some(parent),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_defaults() {
        let store = store();
        let category = store.create(named("News")).await;

        assert!(category.is_enabled);
        assert_eq!(category.created_at, category.updated_at);
        assert_eq!(category.parent_id, None);
        assert_eq!(store.find_by_id(category.id).await, Some(category));
    }

    #[tokio::test]
    async fn test_create_accepts_dangling_parent() {
        let store = store();
        let ghost = Uuid::new_v4();
        let category = store.create(child_of("Orphan", ghost)).await;
        assert_eq!(category.parent_id, Some(ghost));
    }

    #[tokio::test]
    async fn test_create_respects_explicit_disabled() {
        let store = store();
        let category = store
            .create(CreateCategoryDto {
                name: "Hidden".to_string(),
                is_enabled: Some(false),
                ..Default::default()
            })
            .await;
        assert!(!category.is_enabled);
    }

    #[tokio::test]
    async fn test_update_merges_and_bumps_timestamp() {
        let store = store();
        let original = store
            .create(CreateCategoryDto {
                name: "News".to_string(),
                description: Some("daily".to_string()),
                order: Some(3),
                ..Default::default()
            })
            .await;

        let first = store
            .update(
                original.id,
                UpdateCategoryDto {
                    name: Some("Headlines".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        let second = store
            .update(
                original.id,
                UpdateCategoryDto {
                    order: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(first.name, "Headlines");
        assert_eq!(first.description.as_deref(), Some("daily"));
        assert_eq!(first.order, Some(3));
        assert_eq!(first.created_at, original.created_at);
        assert!(first.updated_at > original.updated_at);

        assert_eq!(second.order, None);
        assert!(second.updated_at > first.updated_at);
    }

    #[tokio::test]
    async fn test_update_missing_id_is_none_and_store_unchanged() {
        let store = store();
        let existing = store.create(named("News")).await;

        let result = store
            .update(
                Uuid::new_v4(),
                UpdateCategoryDto {
                    name: Some("x".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(result.is_none());
        assert_eq!(store.list().await, vec![existing]);
    }

    #[tokio::test]
    async fn test_update_rejects_self_parent() {
        let store = store();
        let category = store.create(named("Loop")).await;

        let result = store
            .update(
                category.id,
                UpdateCategoryDto {
                    parent_id: Some(Some(category.id)),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(store.find_by_id(category.id).await, Some(category));
    }

    #[tokio::test]
    async fn test_update_rejects_descendant_as_parent() {
        let store = store();
        let root = store.create(named("Root")).await;
        let mid = store.create(child_of("Mid", root.id)).await;
        let leaf = store.create(child_of("Leaf", mid.id)).await;

        let result = store
            .update(
                root.id,
                UpdateCategoryDto {
                    parent_id: Some(Some(leaf.id)),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));

        // Moving a leaf elsewhere is fine
        let moved = store
            .update(
                leaf.id,
                UpdateCategoryDto {
                    parent_id: Some(Some(root.id)),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(moved.parent_id, Some(root.id));
    }

    #[tokio::test]
    async fn test_delete_does_not_cascade() {
        let store = store();
        let parent = store.create(named("Parent")).await;
        let child = store.create(child_of("Child", parent.id)).await;

        assert_eq!(store.delete(parent.id).await, Some(parent.clone()));
        assert_eq!(store.delete(parent.id).await, None);

        let remaining = store.find_by_id(child.id).await.unwrap();
        assert_eq!(remaining.parent_id, Some(parent.id));
    }

    #[tokio::test]
    async fn test_reset() {
        let store = store();
        store.create(named("A")).await;
        store.reset().await;
        assert!(store.list().await.is_empty());
    }

    #[test]
    fn test_would_create_cycle_dangling_chain() {
        let now = chrono::Utc::now();
        let orphan = Category {
            id: Uuid::new_v4(),
            name: "Orphan".to_string(),
            description: None,
            parent_id: Some(Uuid::new_v4()),
            order: None,
            is_enabled: true,
            created_at: now,
            updated_at: now,
        };

        assert!(!would_create_cycle(Uuid::new_v4(), orphan.id, &[orphan]));
    }
}
