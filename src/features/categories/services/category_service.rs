use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::categories::dtos::{
    CategoryResponseDto, CategoryTreeDto, CreateCategoryDto, UpdateCategoryDto,
};
use crate::features::categories::services::tree_builder;
use crate::features::categories::stores::CategoryStore;
use crate::modules::cache::{CacheOptions, CachePrefix, CacheService};
use crate::shared::constants::CATEGORY_TREE_CACHE_KEY;

/// Service for category operations
#[derive(Debug)]
pub struct CategoryService {
    store: Arc<CategoryStore>,
    cache: Arc<CacheService>,
    tree_ttl: Duration,
    /// Held across a rebuild (snapshot and cache write) and across invalidation
    tree_lock: Mutex<()>,
}

impl CategoryService {
    pub fn new(store: Arc<CategoryStore>, cache: Arc<CacheService>, tree_ttl: Duration) -> Self {
        Self {
            store,
            cache,
            tree_ttl,
            tree_lock: Mutex::new(()),
        }
    }

    /// Create a category
    pub async fn create(&self, dto: CreateCategoryDto) -> Result<CategoryResponseDto> {
        let category = self.store.create(dto).await;
        self.invalidate_tree().await;

        tracing::info!(
            "Category created: id={}, parent_id={:?}",
            category.id,
            category.parent_id
        );

        Ok(category.into())
    }

    /// Update a category. `Ok(None)` when the id does not exist.
    pub async fn update(
        &self,
        id: Uuid,
        dto: UpdateCategoryDto,
    ) -> Result<Option<CategoryResponseDto>> {
        let updated = self.store.update(id, dto).await.inspect_err(|e| {
            tracing::warn!("Rejected category update: id={}, error={}", id, e);
        })?;

        if let Some(ref category) = updated {
            self.invalidate_tree().await;
            tracing::info!("Category updated: id={}", category.id);
        }

        Ok(updated.map(Into::into))
    }

    /// Delete a category without touching its children. `None` when missing.
    pub async fn delete(&self, id: Uuid) -> Option<CategoryResponseDto> {
        let deleted = self.store.delete(id).await?;
        self.invalidate_tree().await;

        tracing::info!("Category deleted: id={}", deleted.id);

        Some(deleted.into())
    }

    /// List all categories (flat list, sibling order)
    pub async fn list(&self) -> Vec<CategoryResponseDto> {
        let mut categories = self.store.list().await;
        tree_builder::sort_categories(&mut categories);
        categories.into_iter().map(Into::into).collect()
    }

    /// Get category by id
    pub async fn get(&self, id: Uuid) -> Option<CategoryResponseDto> {
        self.store.find_by_id(id).await.map(Into::into)
    }

    /// List all categories as tree structure
    pub async fn list_tree(&self) -> Result<Vec<CategoryTreeDto>> {
        if let Some(tree) = self
            .cache
            .get::<Vec<CategoryTreeDto>>(CATEGORY_TREE_CACHE_KEY, Some(CachePrefix::Category))
            .await
        {
            return Ok(tree);
        }

        let _guard = self.tree_lock.lock().await;
        let tree = tree_builder::build_tree(self.store.list().await);
        self.cache_tree(&tree).await?;

        Ok(tree)
    }

    async fn cache_tree(&self, tree: &[CategoryTreeDto]) -> Result<()> {
        self.cache
            .set(
                CATEGORY_TREE_CACHE_KEY,
                &tree,
                CacheOptions {
                    ttl: Some(self.tree_ttl),
                    prefix: Some(CachePrefix::Category),
                },
            )
            .await
    }

    async fn invalidate_tree(&self) {
        let _guard = self.tree_lock.lock().await;
        self.cache
            .delete(CATEGORY_TREE_CACHE_KEY, Some(CachePrefix::Category))
            .await;
    }
}
