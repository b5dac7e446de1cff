// src/service/category_service.rs

use crate::api::dto::category_dto::{
    CategoryDto, CategoryWithPostsDto, CreateCategoryDto, UpdateCategoryDto,
};
use crate::api::dto::post_dto::PostDto;
use crate::db::DbPool;
use crate::domain::post_model;
use crate::error::{AppError, AppResult};
use crate::repository::category_repository::CategoryRepository;
use crate::repository::post_repository::PostRepository;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

pub struct CategoryService {
    repo: Arc<CategoryRepository>,
    post_repo: Arc<PostRepository>,
}

impl CategoryService {
    pub fn new(db_pool: DbPool) -> Self {
        Self {
            repo: Arc::new(CategoryRepository::new(db_pool.clone())),
            post_repo: Arc::new(PostRepository::new(db_pool)),
        }
    }

    /// カテゴリ一覧を記事数つきで名前順に取得する
    pub async fn list_categories(&self) -> AppResult<Vec<CategoryDto>> {
        let categories = self.repo.find_all_ordered_by_name().await?;

        let counts: HashMap<Uuid, i64> = self
            .repo
            .post_counts()
            .await?
            .into_iter()
            .map(|c| (c.category_id, c.count))
            .collect();

        Ok(categories
            .into_iter()
            .map(|category| {
                let count = counts.get(&category.id).copied().unwrap_or(0);
                CategoryDto::from_model(category, count)
            })
            .collect())
    }

    /// カテゴリ詳細。所属する記事を全ステータス込みで返す（管理側）。
    pub async fn get_category(&self, id: Uuid) -> AppResult<CategoryWithPostsDto> {
        let category = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;

        let posts = self.post_repo.find_for_category(category.id).await?;
        let posts = self.to_post_dtos(posts).await?;

        Ok(CategoryWithPostsDto::from_model(category, posts))
    }

    /// スラッグでのカテゴリ詳細。公開済み記事のみを返す（公開側）。
    pub async fn get_category_by_slug(&self, slug: &str) -> AppResult<CategoryWithPostsDto> {
        let category = self
            .repo
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;

        let posts = self
            .post_repo
            .find_published_for_category(category.id)
            .await?;
        let posts = self.to_post_dtos(posts).await?;

        Ok(CategoryWithPostsDto::from_model(category, posts))
    }

    pub async fn create_category(&self, payload: &CreateCategoryDto) -> AppResult<CategoryDto> {
        if self
            .repo
            .find_by_slug_excluding(&payload.slug, None)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(
                "Category with this slug already exists".to_string(),
            ));
        }

        let created = self.repo.create(payload).await?;
        info!(category_id = %created.id, slug = %created.slug, "Category created");

        Ok(CategoryDto::from_model(created, 0))
    }

    pub async fn update_category(
        &self,
        id: Uuid,
        payload: &UpdateCategoryDto,
    ) -> AppResult<CategoryDto> {
        if let Some(slug) = &payload.slug {
            if self
                .repo
                .find_by_slug_excluding(slug, Some(id))
                .await?
                .is_some()
            {
                return Err(AppError::Conflict(
                    "Category with this slug already exists".to_string(),
                ));
            }
        }

        let updated = self
            .repo
            .update(id, payload)
            .await?
            .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;

        let counts = self.repo.post_counts().await?;
        let count = counts
            .into_iter()
            .find(|c| c.category_id == id)
            .map(|c| c.count)
            .unwrap_or(0);

        Ok(CategoryDto::from_model(updated, count))
    }

    pub async fn delete_category(&self, id: Uuid) -> AppResult<()> {
        let result = self.repo.delete(id).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Category not found".to_string()));
        }

        info!(category_id = %id, "Category deleted");
        Ok(())
    }

    async fn to_post_dtos(&self, posts: Vec<post_model::Model>) -> AppResult<Vec<PostDto>> {
        let authors = self.post_repo.load_authors(&posts).await?;

        Ok(posts
            .into_iter()
            .zip(authors)
            .map(|(post, author)| {
                let mut dto = PostDto::from(post);
                dto.author = author.map(Into::into);
                dto
            })
            .collect())
    }
}
