// src/service/post_service.rs

use crate::api::dto::common::PaginationMeta;
use crate::api::dto::post_dto::{
    CreatePostDto, PaginatedPostsDto, PostDto, PostFilterDto, PostSearchQuery, PostSearchResultDto,
    UpdatePostDto,
};
use crate::db::DbPool;
use crate::domain::post_model;
use crate::error::{AppError, AppResult};
use crate::repository::post_repository::PostRepository;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

pub struct PostService {
    repo: Arc<PostRepository>,
}

impl PostService {
    pub fn new(db_pool: DbPool) -> Self {
        Self {
            repo: Arc::new(PostRepository::new(db_pool)),
        }
    }

    /// 記事一覧を著者・カテゴリ・タグ付きで取得する
    pub async fn list_posts(&self, filter: &PostFilterDto) -> AppResult<PaginatedPostsDto> {
        let (posts, total_items) = self.repo.find_with_filter(filter).await?;

        let per_page = std::cmp::min(filter.per_page.unwrap_or(10), 100);
        let page = std::cmp::max(filter.page.unwrap_or(1), 1);

        let items = self.attach_relations(posts).await?;

        Ok(PaginatedPostsDto {
            items,
            pagination: PaginationMeta::new(page, per_page, total_items),
        })
    }

    pub async fn get_post(&self, id: Uuid) -> AppResult<PostDto> {
        let post = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Post with id {} not found", id)))?;

        let mut items = self.attach_relations(vec![post]).await?;
        items
            .pop()
            .ok_or_else(|| AppError::InternalServerError("Failed to build post response".to_string()))
    }

    pub async fn get_post_by_slug(&self, slug: &str) -> AppResult<PostDto> {
        let post = self
            .repo
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Post with slug '{}' not found", slug)))?;

        let mut items = self.attach_relations(vec![post]).await?;
        items
            .pop()
            .ok_or_else(|| AppError::InternalServerError("Failed to build post response".to_string()))
    }

    pub async fn create_post(
        &self,
        author_id: Uuid,
        payload: &CreatePostDto,
    ) -> AppResult<PostDto> {
        let created = self.repo.create(author_id, payload).await?;

        if let Some(category_ids) = &payload.category_ids {
            self.repo
                .replace_categories(created.id, category_ids)
                .await?;
        }

        if let Some(tag_ids) = &payload.tag_ids {
            self.repo.replace_tags(created.id, tag_ids).await?;
        }

        info!(post_id = %created.id, author_id = %author_id, "Post created");

        self.get_post(created.id).await
    }

    pub async fn update_post(&self, id: Uuid, payload: &UpdatePostDto) -> AppResult<PostDto> {
        let updated = self
            .repo
            .update(id, payload)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Post with id {} not found", id)))?;

        // カテゴリ・タグはIDセットが指定された場合のみ置き換える
        if let Some(category_ids) = &payload.category_ids {
            self.repo
                .replace_categories(updated.id, category_ids)
                .await?;
        }

        if let Some(tag_ids) = &payload.tag_ids {
            self.repo.replace_tags(updated.id, tag_ids).await?;
        }

        self.get_post(updated.id).await
    }

    pub async fn delete_post(&self, id: Uuid) -> AppResult<()> {
        let result = self.repo.delete(id).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound(format!("Post with id {} not found", id)));
        }

        info!(post_id = %id, "Post deleted");
        Ok(())
    }

    /// 記事を公開状態にし、公開日時を記録する
    pub async fn publish_post(&self, id: Uuid) -> AppResult<PostDto> {
        let published = self
            .repo
            .publish(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Post with id {} not found", id)))?;

        info!(post_id = %id, slug = %published.slug, "Post published");

        self.get_post(published.id).await
    }

    /// 管理画面の横断検索。結果は50件まで。
    pub async fn search_posts(&self, query: &PostSearchQuery) -> AppResult<PostSearchResultDto> {
        let (posts, total) = self.repo.search(query).await?;
        let posts = self.attach_relations(posts).await?;

        Ok(PostSearchResultDto { posts, total })
    }

    // 著者・カテゴリ・タグをまとめてロードしてDTOに組み立てる
    async fn attach_relations(&self, posts: Vec<post_model::Model>) -> AppResult<Vec<PostDto>> {
        let authors = self.repo.load_authors(&posts).await?;
        let categories = self.repo.load_categories(&posts).await?;
        let tags = self.repo.load_tags(&posts).await?;

        Ok(posts
            .into_iter()
            .zip(authors)
            .zip(categories.into_iter().zip(tags))
            .map(|((post, author), (categories, tags))| {
                PostDto::with_relations(post, author, categories, tags)
            })
            .collect())
    }
}
