use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::categories::models::Category;
use crate::shared::validation::deserialize_patch;

/// Request DTO for creating a category
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateCategoryDto {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(max = 500, message = "Description must not exceed 500 characters"))]
    pub description: Option<String>,

    /// Parent category; omitted for a root category
    pub parent_id: Option<Uuid>,

    /// Sort weight among siblings (default 0)
    pub order: Option<i32>,

    /// Defaults to true
    pub is_enabled: Option<bool>,
}

/// Request DTO for a partial category update.
///
/// Absent fields are left untouched. For `description`, `parentId` and
/// `order`, an explicit `null` clears the stored value.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateCategoryDto {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "deserialize_patch")]
    #[schema(value_type = Option<String>)]
    #[validate(length(max = 500, message = "Description must not exceed 500 characters"))]
    pub description: Option<Option<String>>,

    #[serde(default, deserialize_with = "deserialize_patch")]
    #[schema(value_type = Option<Uuid>)]
    pub parent_id: Option<Option<Uuid>>,

    #[serde(default, deserialize_with = "deserialize_patch")]
    #[schema(value_type = Option<i32>)]
    pub order: Option<Option<i32>>,

    pub is_enabled: Option<bool>,
}

/// Response DTO for category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponseDto {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
    pub is_enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            description: c.description,
            parent_id: c.parent_id,
            order: c.order,
            is_enabled: c.is_enabled,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// Response DTO for category tree (hierarchical structure)
///
/// `children` is omitted on nodes that nothing references as parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(no_recursion)]
pub struct CategoryTreeDto {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
    pub is_enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<CategoryTreeDto>>,
}

impl CategoryTreeDto {
    pub fn from_category(c: &Category, children: Option<Vec<CategoryTreeDto>>) -> Self {
        Self {
            id: c.id,
            name: c.name.clone(),
            description: c.description.clone(),
            parent_id: c.parent_id,
            order: c.order,
            is_enabled: c.is_enabled,
            created_at: c.created_at,
            updated_at: c.updated_at,
            children,
        }
    }

    /// Number of nodes in this subtree, including itself
    pub fn node_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .flatten()
            .map(CategoryTreeDto::node_count)
            .sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_dto_rejects_unknown_fields() {
        let result: Result<CreateCategoryDto, _> =
            serde_json::from_value(json!({ "name": "News", "slug": "news" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_create_dto_validation() {
        let dto: CreateCategoryDto = serde_json::from_value(json!({ "name": "" })).unwrap();
        assert!(dto.validate().is_err());

        let dto: CreateCategoryDto =
            serde_json::from_value(json!({ "name": "News", "order": 2 })).unwrap();
        assert!(dto.validate().is_ok());
        assert_eq!(dto.order, Some(2));
    }

    #[test]
    fn test_update_dto_null_clears_parent() {
        let dto: UpdateCategoryDto = serde_json::from_value(json!({ "parentId": null })).unwrap();
        assert_eq!(dto.parent_id, Some(None));
        assert_eq!(dto.order, None);
    }

    #[test]
    fn test_tree_leaf_omits_children() {
        let now = Utc::now();
        let leaf = CategoryTreeDto {
            id: Uuid::new_v4(),
            name: "Leaf".to_string(),
            description: None,
            parent_id: None,
            order: None,
            is_enabled: true,
            created_at: now,
            updated_at: now,
            children: None,
        };

        let value = serde_json::to_value(&leaf).unwrap();
        let object = value.as_object().unwrap();
        assert!(!object.contains_key("children"));
        assert!(!object.contains_key("parentId"));
        assert!(object.contains_key("isEnabled"));
        assert!(object.contains_key("createdAt"));
        assert_eq!(leaf.node_count(), 1);
    }
}
