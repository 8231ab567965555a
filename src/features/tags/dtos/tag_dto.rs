use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::tags::models::Tag;
use crate::shared::validation::{deserialize_patch, HEX_COLOR_REGEX};

/// Request DTO for creating a tag
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateTagDto {
    #[validate(length(min = 1, max = 50, message = "Name must be 1-50 characters"))]
    pub name: String,

    #[validate(length(max = 500, message = "Description must not exceed 500 characters"))]
    pub description: Option<String>,

    /// Hex color such as `#1e90ff`
    #[validate(regex(path = *HEX_COLOR_REGEX, message = "Color must be a hex value like #1e90ff"))]
    pub color: Option<String>,

    /// Defaults to true
    pub is_enabled: Option<bool>,
}

/// Request DTO for a partial tag update; `null` clears `description`/`color`
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateTagDto {
    #[validate(length(min = 1, max = 50, message = "Name must be 1-50 characters"))]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "deserialize_patch")]
    #[schema(value_type = Option<String>)]
    #[validate(length(max = 500, message = "Description must not exceed 500 characters"))]
    pub description: Option<Option<String>>,

    #[serde(default, deserialize_with = "deserialize_patch")]
    #[schema(value_type = Option<String>)]
    #[validate(regex(path = *HEX_COLOR_REGEX, message = "Color must be a hex value like #1e90ff"))]
    pub color: Option<Option<String>>,

    pub is_enabled: Option<bool>,
}

/// Query params for listing tags
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ListTagsQuery {
    /// Case-insensitive substring match on the tag name
    pub search: Option<String>,
}

/// Response DTO for tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TagResponseDto {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub is_enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Tag> for TagResponseDto {
    fn from(t: Tag) -> Self {
        Self {
            id: t.id,
            name: t.name,
            description: t.description,
            color: t.color,
            is_enabled: t.is_enabled,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_color_validation() {
        let ok: CreateTagDto =
            serde_json::from_value(json!({ "name": "rust", "color": "#b7410e" })).unwrap();
        assert!(ok.validate().is_ok());

        let bad: CreateTagDto =
            serde_json::from_value(json!({ "name": "rust", "color": "rust-orange" })).unwrap();
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_update_color_null_clears() {
        let dto: UpdateTagDto = serde_json::from_value(json!({ "color": null })).unwrap();
        assert_eq!(dto.color, Some(None));
        assert!(dto.validate().is_ok());
    }
}
