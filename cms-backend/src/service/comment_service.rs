// src/service/comment_service.rs

use crate::api::dto::comment_dto::{
    CommentDto, CommentFilterDto, CreateCommentDto, PaginatedCommentsDto,
};
use crate::api::dto::common::PaginationMeta;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::repository::comment_repository::CommentRepository;
use crate::repository::post_repository::PostRepository;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

pub struct CommentService {
    repo: Arc<CommentRepository>,
    post_repo: Arc<PostRepository>,
}

impl CommentService {
    pub fn new(db_pool: DbPool) -> Self {
        Self {
            repo: Arc::new(CommentRepository::new(db_pool.clone())),
            post_repo: Arc::new(PostRepository::new(db_pool)),
        }
    }

    /// 公開済み記事の承認済みコメントを取得する。
    /// 記事が存在しない場合と未公開の場合は区別せずに404を返す。
    pub async fn list_comments_for_post(&self, slug: &str) -> AppResult<Vec<CommentDto>> {
        let post = self
            .post_repo
            .find_published_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::NotFoundOrUnpublished("Post not found".to_string()))?;

        let comments = self.repo.find_approved_for_post(post.id).await?;

        Ok(comments.into_iter().map(Into::into).collect())
    }

    /// コメントを承認待ち状態で投稿する（公開側）
    pub async fn create_comment(
        &self,
        slug: &str,
        payload: &CreateCommentDto,
    ) -> AppResult<CommentDto> {
        let post = self
            .post_repo
            .find_published_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::NotFoundOrUnpublished("Post not found".to_string()))?;

        let created = self.repo.create(post.id, payload).await?;
        info!(comment_id = %created.id, post_id = %post.id, "Comment submitted for moderation");

        Ok(created.into())
    }

    /// モデレーション用のコメント一覧
    pub async fn list_comments(&self, filter: &CommentFilterDto) -> AppResult<PaginatedCommentsDto> {
        let (comments, total_items) = self.repo.find_with_filter(filter).await?;

        let per_page = std::cmp::min(filter.per_page.unwrap_or(20), 100);
        let page = std::cmp::max(filter.page.unwrap_or(1), 1);

        Ok(PaginatedCommentsDto {
            items: comments.into_iter().map(Into::into).collect(),
            pagination: PaginationMeta::new(page, per_page, total_items),
        })
    }

    pub async fn approve_comment(&self, id: Uuid) -> AppResult<CommentDto> {
        let approved = self
            .repo
            .approve(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))?;

        info!(comment_id = %id, "Comment approved");

        Ok(approved.into())
    }

    pub async fn delete_comment(&self, id: Uuid) -> AppResult<()> {
        let result = self.repo.delete(id).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Comment not found".to_string()));
        }

        info!(comment_id = %id, "Comment deleted");
        Ok(())
    }
}
