use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::shared::store::Entity;

#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author_id: Uuid,
    /// Unique across articles
    pub slug: String,
    pub excerpt: Option<String>,
    pub cover_image: Option<String>,
    pub category_id: Option<Uuid>,
    pub tag_ids: Vec<Uuid>,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub view_count: u64,
}

impl Entity for Article {
    fn id(&self) -> Uuid {
        self.id
    }
}
