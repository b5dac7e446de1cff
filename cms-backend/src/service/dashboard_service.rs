// src/service/dashboard_service.rs

use crate::api::dto::dashboard_dto::{DashboardOverviewDto, PostsByStatusDto};
use crate::api::dto::post_dto::PostDto;
use crate::db::DbPool;
use crate::domain::post_status::PostStatus;
use crate::error::AppResult;
use crate::repository::category_repository::CategoryRepository;
use crate::repository::post_repository::PostRepository;
use crate::repository::user_repository::UserRepository;
use std::sync::Arc;

pub struct DashboardService {
    post_repo: Arc<PostRepository>,
    category_repo: Arc<CategoryRepository>,
    user_repo: Arc<UserRepository>,
}

impl DashboardService {
    pub fn new(db_pool: DbPool) -> Self {
        Self {
            post_repo: Arc::new(PostRepository::new(db_pool.clone())),
            category_repo: Arc::new(CategoryRepository::new(db_pool.clone())),
            user_repo: Arc::new(UserRepository::new(db_pool)),
        }
    }

    /// 管理ダッシュボードの概要カウント
    pub async fn get_overview(&self) -> AppResult<DashboardOverviewDto> {
        let total_posts = self.post_repo.count_all().await?;
        let published_posts = self.post_repo.count_by_status(PostStatus::Published).await?;
        let draft_posts = self.post_repo.count_by_status(PostStatus::Draft).await?;
        let total_categories = self.category_repo.count_all().await?;
        let total_users = self.user_repo.count_all().await?;

        Ok(DashboardOverviewDto {
            total_posts: total_posts as i64,
            published_posts: published_posts as i64,
            draft_posts: draft_posts as i64,
            total_categories: total_categories as i64,
            total_users: total_users as i64,
        })
    }

    /// 最近作成された記事（著者・カテゴリ付き）
    pub async fn get_recent_posts(&self, limit: u64) -> AppResult<Vec<PostDto>> {
        let posts = self.post_repo.find_recent(limit).await?;
        let authors = self.post_repo.load_authors(&posts).await?;
        let categories = self.post_repo.load_categories(&posts).await?;

        Ok(posts
            .into_iter()
            .zip(authors)
            .zip(categories)
            .map(|((post, author), categories)| {
                let mut dto = PostDto::from(post);
                dto.author = author.map(Into::into);
                dto.categories = Some(categories.into_iter().map(Into::into).collect());
                dto
            })
            .collect())
    }

    /// ステータス別の記事数内訳
    pub async fn get_posts_by_status(&self) -> AppResult<PostsByStatusDto> {
        let draft = self.post_repo.count_by_status(PostStatus::Draft).await?;
        let published = self.post_repo.count_by_status(PostStatus::Published).await?;
        let scheduled = self.post_repo.count_by_status(PostStatus::Scheduled).await?;
        let archived = self.post_repo.count_by_status(PostStatus::Archived).await?;

        Ok(PostsByStatusDto {
            draft: draft as i64,
            published: published as i64,
            scheduled: scheduled as i64,
            archived: archived as i64,
        })
    }
}
