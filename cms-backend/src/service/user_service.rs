// src/service/user_service.rs

use crate::api::dto::common::PaginationMeta;
use crate::api::dto::user_dto::{PaginatedUsersDto, UserDto, UserFilterDto};
use crate::db::DbPool;
use crate::domain::user_role::UserRole;
use crate::error::{AppError, AppResult};
use crate::repository::user_repository::UserRepository;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

pub struct UserService {
    repo: Arc<UserRepository>,
}

impl UserService {
    pub fn new(db_pool: DbPool) -> Self {
        Self {
            repo: Arc::new(UserRepository::new(db_pool)),
        }
    }

    pub async fn get_profile(&self, user_id: Uuid) -> AppResult<UserDto> {
        let user = self
            .repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(user.into())
    }

    /// ユーザー一覧を記事数つきで取得する（管理者用）
    pub async fn list_users(&self, filter: &UserFilterDto) -> AppResult<PaginatedUsersDto> {
        let per_page = std::cmp::min(filter.per_page.unwrap_or(20), 100);
        let page = std::cmp::max(filter.page.unwrap_or(1), 1);

        let (users, total_items) = self.repo.find_all_paginated(page, per_page).await?;

        let counts: HashMap<Uuid, i64> = self
            .repo
            .post_counts()
            .await?
            .into_iter()
            .map(|c| (c.author_id, c.count))
            .collect();

        let items = users
            .into_iter()
            .map(|user| {
                let count = counts.get(&user.id).copied().unwrap_or(0);
                UserDto::with_post_count(user, count)
            })
            .collect();

        Ok(PaginatedUsersDto {
            items,
            pagination: PaginationMeta::new(page, per_page, total_items),
        })
    }

    pub async fn update_role(&self, user_id: Uuid, role: UserRole) -> AppResult<UserDto> {
        let updated = self
            .repo
            .update_role(user_id, role)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        info!(user_id = %user_id, role = %role, "User role updated");

        Ok(updated.into())
    }

    pub async fn delete_user(&self, user_id: Uuid) -> AppResult<()> {
        let result = self.repo.delete(user_id).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        info!(user_id = %user_id, "User deleted");
        Ok(())
    }
}
