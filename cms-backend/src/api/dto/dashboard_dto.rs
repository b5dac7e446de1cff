// src/api/dto/dashboard_dto.rs
use serde::{Deserialize, Serialize};
use validator::Validate;

// --- Request DTOs ---

fn default_recent_limit() -> u64 {
    5
}

#[derive(Deserialize, Serialize, Debug, Validate)]
pub struct RecentPostsQuery {
    #[validate(range(min = 1, max = 10, message = "limit must be between 1 and 10"))]
    #[serde(default = "default_recent_limit")]
    pub limit: u64,
}

// --- Response DTOs ---

/// 管理ダッシュボードの概要カウント
#[derive(Serialize, Deserialize, Debug)]
pub struct DashboardOverviewDto {
    pub total_posts: i64,
    pub published_posts: i64,
    pub draft_posts: i64,
    pub total_categories: i64,
    pub total_users: i64,
}

/// ステータス別の記事数内訳
#[derive(Serialize, Deserialize, Debug)]
pub struct PostsByStatusDto {
    pub draft: i64,
    pub published: i64,
    pub scheduled: i64,
    pub archived: i64,
}
