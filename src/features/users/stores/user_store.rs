use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::users::dtos::{CreateUserDto, UpdateUserDto};
use crate::features::users::models::{Profile, User};
use crate::shared::clock::MonotonicClock;
use crate::shared::store::MemoryStore;

#[derive(Debug)]
pub struct UserStore {
    records: MemoryStore<User>,
    clock: Arc<MonotonicClock>,
}

/// Emails compare trimmed and case-insensitively
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl UserStore {
    pub fn new(clock: Arc<MonotonicClock>) -> Self {
        Self {
            records: MemoryStore::new(),
            clock,
        }
    }

    /// Insert a new user; fails with `Conflict` when the email is taken
    pub async fn create(&self, dto: CreateUserDto) -> Result<User> {
        let now = self.clock.now();
        let user = User {
            id: Uuid::new_v4(),
            email: normalize_email(&dto.email),
            name: dto.name,
            image: dto.image,
            role: dto.role.unwrap_or_default(),
            profile: dto.profile.map(Profile::from),
            created_at: now,
            updated_at: now,
        };

        let email = user.email.clone();
        self.records
            .insert_checked(user, |all| {
                if all.iter().any(|u| u.email == email) {
                    return Err(AppError::Conflict(format!(
                        "A user with email '{}' already exists",
                        email
                    )));
                }
                Ok(())
            })
            .await
    }

    /// Apply `patch`; the profile is created or merged. `None` when the id
    /// does not exist.
    pub async fn update(&self, id: Uuid, patch: UpdateUserDto) -> Option<User> {
        let clock = Arc::clone(&self.clock);

        self.records
            .modify(id, move |current| {
                let mut updated = current.clone();
                if let Some(name) = patch.name {
                    updated.name = name;
                }
                if let Some(image) = patch.image {
                    updated.image = image;
                }
                if let Some(role) = patch.role {
                    updated.role = role;
                }
                if let Some(profile) = patch.profile {
                    profile.merge_into(updated.profile.get_or_insert_with(Profile::default));
                }
                updated.updated_at = clock.now_after(current.updated_at);
                updated
            })
            .await
    }

    pub async fn delete(&self, id: Uuid) -> Option<User> {
        self.records.remove(id).await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Option<User> {
        self.records.find(id).await
    }

    pub async fn find_by_email(&self, email: &str) -> Option<User> {
        let email = normalize_email(email);
        self.records.find_by(|u| u.email == email).await
    }

    /// All users in insertion order
    pub async fn list(&self) -> Vec<User> {
        self.records.all().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::users::dtos::ProfileDto;

    fn store() -> UserStore {
        UserStore::new(Arc::new(MonotonicClock::new()))
    }

    fn signup(email: &str) -> CreateUserDto {
        CreateUserDto {
            email: email.to_string(),
            name: Some("Ada".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_defaults() {
        let store = store();
        let user = store.create(signup("  Ada@Example.com ")).await.unwrap();

        assert_eq!(user.email, "ada@example.com");
        assert_eq!(user.role, crate::features::users::models::UserRole::User);
        assert!(user.profile.is_none());
        assert_eq!(user.created_at, user.updated_at);
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts_ignoring_case() {
        let store = store();
        store.create(signup("ada@example.com")).await.unwrap();

        let result = store.create(signup("ADA@example.com")).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
        assert_eq!(store.list().await.len(), 1);
    }

    #[tokio::test]
    async fn test_find_by_email() {
        let store = store();
        let user = store.create(signup("grace@example.com")).await.unwrap();

        assert_eq!(
            store.find_by_email("Grace@Example.com").await.map(|u| u.id),
            Some(user.id)
        );
        assert!(store.find_by_email("nobody@example.com").await.is_none());
    }

    #[tokio::test]
    async fn test_update_creates_then_merges_profile() {
        let store = store();
        let user = store.create(signup("ada@example.com")).await.unwrap();

        let first = store
            .update(
                user.id,
                UpdateUserDto {
                    profile: Some(ProfileDto {
                        bio: Some("Analyst".to_string()),
                        ..Default::default()
                    }),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(
            first.profile.as_ref().and_then(|p| p.bio.as_deref()),
            Some("Analyst")
        );
        assert!(first.updated_at > user.updated_at);

        let second = store
            .update(
                user.id,
                UpdateUserDto {
                    name: Some(None),
                    profile: Some(ProfileDto {
                        location: Some("London".to_string()),
                        ..Default::default()
                    }),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let profile = second.profile.unwrap();
        assert_eq!(profile.bio.as_deref(), Some("Analyst"));
        assert_eq!(profile.location.as_deref(), Some("London"));
        assert!(second.name.is_none());
        assert_eq!(second.email, "ada@example.com");
    }

    #[tokio::test]
    async fn test_missing_ids() {
        let store = store();
        assert!(store
            .update(Uuid::new_v4(), UpdateUserDto::default())
            .await
            .is_none());
        assert!(store.delete(Uuid::new_v4()).await.is_none());
        assert!(store.find_by_id(Uuid::new_v4()).await.is_none());
    }
}
