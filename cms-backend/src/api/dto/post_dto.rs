// src/api/dto/post_dto.rs
use crate::api::dto::common::PaginationMeta;
use crate::domain::post_model;
use crate::domain::post_status::PostStatus;
use crate::domain::{category_model, tag_model, user_model};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// --- Request DTOs ---

#[derive(Deserialize, Serialize, Debug, Validate)]
pub struct CreatePostDto {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 200, message = "Slug must be between 1 and 200 characters"))]
    pub slug: String,

    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,

    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    pub status: Option<PostStatus>,
    pub category_ids: Option<Vec<Uuid>>,
    pub tag_ids: Option<Vec<Uuid>>,

    // SEO用フィールド
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub focus_keyword: Option<String>,
    pub og_image: Option<String>,
    pub canonical_url: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Validate)]
pub struct UpdatePostDto {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 200, message = "Slug must be between 1 and 200 characters"))]
    pub slug: Option<String>,

    #[validate(length(min = 1, message = "Content is required"))]
    pub content: Option<String>,

    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    pub status: Option<PostStatus>,
    pub category_ids: Option<Vec<Uuid>>,
    pub tag_ids: Option<Vec<Uuid>>,

    // SEO用フィールド
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub focus_keyword: Option<String>,
    pub og_image: Option<String>,
    pub canonical_url: Option<String>,
}

// --- フィルタリング用DTO ---

#[derive(Deserialize, Serialize, Debug, Default)]
pub struct PostFilterDto {
    pub status: Option<PostStatus>,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

/// 管理画面の横断検索クエリ
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct PostSearchQuery {
    pub search: Option<String>,
    pub status: Option<PostStatus>,
    pub category: Option<String>,
    pub author: Option<String>,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
}

// --- Response DTOs ---

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PostAuthorDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

impl From<user_model::Model> for PostAuthorDto {
    fn from(model: user_model::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CategorySummaryDto {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}

impl From<category_model::Model> for CategorySummaryDto {
    fn from(model: category_model::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            slug: model.slug,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TagSummaryDto {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub color: String,
}

impl From<tag_model::Model> for TagSummaryDto {
    fn from(model: tag_model::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            slug: model.slug,
            color: model.color,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct PostDto {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    pub status: String,
    pub view_count: i64,
    pub author_id: Uuid,
    pub published_at: Option<DateTime<Utc>>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub focus_keyword: Option<String>,
    pub og_image: Option<String>,
    pub canonical_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<PostAuthorDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<CategorySummaryDto>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<TagSummaryDto>>,
}

// SeaORM の Model から PostDto への変換
impl From<post_model::Model> for PostDto {
    fn from(model: post_model::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            slug: model.slug,
            content: model.content,
            excerpt: model.excerpt,
            featured_image: model.featured_image,
            status: model.status,
            view_count: model.view_count,
            author_id: model.author_id,
            published_at: model.published_at,
            meta_title: model.meta_title,
            meta_description: model.meta_description,
            focus_keyword: model.focus_keyword,
            og_image: model.og_image,
            canonical_url: model.canonical_url,
            created_at: model.created_at,
            updated_at: model.updated_at,
            author: None,
            categories: None,
            tags: None,
        }
    }
}

impl PostDto {
    /// 関連エンティティを付与したDTOを組み立てる
    pub fn with_relations(
        model: post_model::Model,
        author: Option<user_model::Model>,
        categories: Vec<category_model::Model>,
        tags: Vec<tag_model::Model>,
    ) -> Self {
        let mut dto = Self::from(model);
        dto.author = author.map(Into::into);
        dto.categories = Some(categories.into_iter().map(Into::into).collect());
        dto.tags = Some(tags.into_iter().map(Into::into).collect());
        dto
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct PaginatedPostsDto {
    pub items: Vec<PostDto>,
    pub pagination: PaginationMeta,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct PostSearchResultDto {
    pub posts: Vec<PostDto>,
    pub total: u64,
}
