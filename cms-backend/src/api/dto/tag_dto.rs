// src/api/dto/tag_dto.rs
use crate::api::dto::common::PaginationMeta;
use crate::api::dto::post_dto::PostDto;
use crate::domain::tag_model;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// --- Request DTOs ---

#[derive(Deserialize, Serialize, Debug, Validate)]
pub struct CreateTagDto {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 100, message = "Slug must be between 1 and 100 characters"))]
    pub slug: String,

    pub description: Option<String>,

    /// 省略時は管理画面のデフォルトタグ色が使われる
    pub color: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Validate)]
pub struct UpdateTagDto {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 100, message = "Slug must be between 1 and 100 characters"))]
    pub slug: Option<String>,

    pub description: Option<String>,
    pub color: Option<String>,
}

// --- フィルタリング用DTO ---

#[derive(Deserialize, Serialize, Debug, Default)]
pub struct TagFilterDto {
    pub search: Option<String>,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

fn default_popular_limit() -> u64 {
    10
}

#[derive(Deserialize, Serialize, Debug, Validate)]
pub struct PopularTagsQuery {
    #[validate(range(min = 1, max = 20, message = "limit must be between 1 and 20"))]
    #[serde(default = "default_popular_limit")]
    pub limit: u64,
}

// --- Response DTOs ---

#[derive(Serialize, Deserialize, Debug)]
pub struct TagDto {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub color: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// このタグが付いた記事数
    pub post_count: i64,
}

impl TagDto {
    pub fn from_model(model: tag_model::Model, post_count: i64) -> Self {
        Self {
            id: model.id,
            name: model.name,
            slug: model.slug,
            description: model.description,
            color: model.color,
            created_at: model.created_at,
            updated_at: model.updated_at,
            post_count,
        }
    }
}

/// タグ詳細（公開済み記事つき）
#[derive(Serialize, Deserialize, Debug)]
pub struct TagWithPostsDto {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub color: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub posts: Vec<PostDto>,
    pub post_count: i64,
}

impl TagWithPostsDto {
    pub fn from_model(model: tag_model::Model, posts: Vec<PostDto>, post_count: i64) -> Self {
        Self {
            id: model.id,
            name: model.name,
            slug: model.slug,
            description: model.description,
            color: model.color,
            created_at: model.created_at,
            updated_at: model.updated_at,
            posts,
            post_count,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct PaginatedTagsDto {
    pub items: Vec<TagDto>,
    pub pagination: PaginationMeta,
}

/// タグ削除結果。解除された記事関連の数を返す。
#[derive(Serialize, Deserialize, Debug)]
pub struct DeleteTagResponseDto {
    pub success: bool,
    pub released_post_count: i64,
}
