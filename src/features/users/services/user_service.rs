use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::Result;
use crate::features::users::dtos::{CreateUserDto, UpdateUserDto, UserResponseDto};
use crate::features::users::stores::UserStore;
use crate::shared::types::PaginationQuery;

/// Service for user operations
#[derive(Debug)]
pub struct UserService {
    store: Arc<UserStore>,
}

impl UserService {
    pub fn new(store: Arc<UserStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, dto: CreateUserDto) -> Result<UserResponseDto> {
        let user = self
            .store
            .create(dto)
            .await
            .inspect_err(|e| tracing::warn!("User rejected: {}", e))?;
        tracing::info!("User created: id={}, role={:?}", user.id, user.role);
        Ok(user.into())
    }

    pub async fn get(&self, id: Uuid) -> Option<UserResponseDto> {
        self.store.find_by_id(id).await.map(Into::into)
    }

    pub async fn get_by_email(&self, email: &str) -> Option<UserResponseDto> {
        self.store.find_by_email(email).await.map(Into::into)
    }

    pub async fn update(&self, id: Uuid, dto: UpdateUserDto) -> Option<UserResponseDto> {
        let user = self.store.update(id, dto).await?;
        tracing::info!("User updated: id={}", user.id);
        Some(user.into())
    }

    pub async fn delete(&self, id: Uuid) -> Option<UserResponseDto> {
        let user = self.store.delete(id).await?;
        tracing::info!("User deleted: id={}", user.id);
        Some(user.into())
    }

    /// One page of users in creation order, with the unpaged total
    pub async fn list(&self, query: &PaginationQuery) -> (Vec<UserResponseDto>, i64) {
        let users = self.store.list().await;
        let total = users.len() as i64;

        let page = users
            .into_iter()
            .skip(query.offset())
            .take(query.page_size() as usize)
            .map(Into::into)
            .collect();

        (page, total)
    }
}
