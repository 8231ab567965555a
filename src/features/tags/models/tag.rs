use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::shared::store::Entity;

#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub color: Option<String>,
    pub is_enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for Tag {
    fn id(&self) -> Uuid {
        self.id
    }
}
