// src/api/dto/category_dto.rs
use crate::api::dto::post_dto::PostDto;
use crate::domain::category_model;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// --- Request DTOs ---

#[derive(Deserialize, Serialize, Debug, Validate)]
pub struct CreateCategoryDto {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 100, message = "Slug must be between 1 and 100 characters"))]
    pub slug: String,

    pub description: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Validate)]
pub struct UpdateCategoryDto {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 100, message = "Slug must be between 1 and 100 characters"))]
    pub slug: Option<String>,

    pub description: Option<String>,
}

// --- Response DTOs ---

#[derive(Serialize, Deserialize, Debug)]
pub struct CategoryDto {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// このカテゴリに属する記事数
    pub post_count: i64,
}

impl CategoryDto {
    pub fn from_model(model: category_model::Model, post_count: i64) -> Self {
        Self {
            id: model.id,
            name: model.name,
            slug: model.slug,
            description: model.description,
            created_at: model.created_at,
            updated_at: model.updated_at,
            post_count,
        }
    }
}

/// カテゴリ詳細（所属記事つき）
#[derive(Serialize, Deserialize, Debug)]
pub struct CategoryWithPostsDto {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub posts: Vec<PostDto>,
}

impl CategoryWithPostsDto {
    pub fn from_model(model: category_model::Model, posts: Vec<PostDto>) -> Self {
        Self {
            id: model.id,
            name: model.name,
            slug: model.slug,
            description: model.description,
            created_at: model.created_at,
            updated_at: model.updated_at,
            posts,
        }
    }
}
