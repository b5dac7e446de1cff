// src/api/dto/comment_dto.rs
use crate::api::dto::common::PaginationMeta;
use crate::domain::comment_model;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// --- Request DTOs ---

#[derive(Deserialize, Serialize, Debug, Validate)]
pub struct CreateCommentDto {
    #[validate(length(
        min = 1,
        max = 2000,
        message = "Comment must be between 1 and 2000 characters"
    ))]
    pub content: String,

    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub author_name: String,

    #[validate(email(message = "Invalid email address"))]
    pub author_email: String,
}

// --- フィルタリング用DTO ---

#[derive(Deserialize, Serialize, Debug, Default)]
pub struct CommentFilterDto {
    pub is_approved: Option<bool>,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

// --- Response DTOs ---

#[derive(Serialize, Deserialize, Debug)]
pub struct CommentDto {
    pub id: Uuid,
    pub content: String,
    pub author_name: String,
    pub author_email: String,
    pub is_approved: bool,
    pub post_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// SeaORM の Model から CommentDto への変換
impl From<comment_model::Model> for CommentDto {
    fn from(model: comment_model::Model) -> Self {
        Self {
            id: model.id,
            content: model.content,
            author_name: model.author_name,
            author_email: model.author_email,
            is_approved: model.is_approved,
            post_id: model.post_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct PaginatedCommentsDto {
    pub items: Vec<CommentDto>,
    pub pagination: PaginationMeta,
}
