// src/api/dto/user_dto.rs
use crate::api::dto::common::PaginationMeta;
use crate::domain::user_model;
use crate::domain::user_role::UserRole;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// --- Request DTOs ---

#[derive(Deserialize, Serialize, Debug)]
pub struct UpdateUserRoleDto {
    pub role: UserRole,
}

#[derive(Deserialize, Serialize, Debug, Default)]
pub struct UserFilterDto {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

// --- Response DTOs ---

#[derive(Serialize, Deserialize, Debug)]
pub struct UserDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    /// このユーザーが執筆した記事数
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_count: Option<i64>,
}

// SeaORM の Model から UserDto への変換（パスワードハッシュは含めない）
impl From<user_model::Model> for UserDto {
    fn from(model: user_model::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            role: model.role,
            image: model.image,
            created_at: model.created_at,
            post_count: None,
        }
    }
}

impl UserDto {
    pub fn with_post_count(model: user_model::Model, post_count: i64) -> Self {
        let mut dto = Self::from(model);
        dto.post_count = Some(post_count);
        dto
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct PaginatedUsersDto {
    pub items: Vec<UserDto>,
    pub pagination: PaginationMeta,
}
