use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::shared::store::Entity;

/// Stored category record
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// `None` places the category at root level
    pub parent_id: Option<Uuid>,
    /// Sort weight among siblings; absent sorts as 0
    pub order: Option<i32>,
    pub is_enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    pub fn sort_weight(&self) -> i32 {
        self.order.unwrap_or(0)
    }
}

impl Entity for Category {
    fn id(&self) -> Uuid {
        self.id
    }
}
