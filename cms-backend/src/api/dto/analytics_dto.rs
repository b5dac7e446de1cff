// src/api/dto/analytics_dto.rs
use crate::domain::post_view_model;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// --- Request DTOs ---

/// 閲覧イベント記録リクエスト。公開側から送られるメタデータは全て任意。
#[derive(Deserialize, Serialize, Debug, Validate)]
pub struct RecordViewDto {
    pub post_id: Uuid,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
    pub referer: Option<String>,
}

fn default_days() -> i32 {
    30
}

/// サイト全体分析の集計期間（日数）
#[derive(Deserialize, Serialize, Debug, Validate)]
pub struct SiteAnalyticsQuery {
    #[validate(range(min = 1, max = 365, message = "days must be between 1 and 365"))]
    #[serde(default = "default_days")]
    pub days: i32,
}

// --- Response DTOs ---

#[derive(Serialize, Deserialize, Debug)]
pub struct PostViewDto {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
    pub referer: Option<String>,
    pub created_at: DateTime<Utc>,
}

// SeaORM の Model から PostViewDto への変換
impl From<post_view_model::Model> for PostViewDto {
    fn from(model: post_view_model::Model) -> Self {
        Self {
            id: model.id,
            post_id: model.post_id,
            user_agent: model.user_agent,
            ip_address: model.ip_address,
            referer: model.referer,
            created_at: model.created_at,
        }
    }
}

/// リファラ別閲覧数。refererが無い場合は"Direct"と表示する。
#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct ReferrerStatDto {
    pub referer: String,
    pub count: i64,
}

/// 日別閲覧数。イベントの無い日は含まれない（疎な時系列）。
#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct DailyViewsDto {
    pub date: String,
    pub views: i64,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct PostAnalyticsDto {
    pub total_views: i64,
    pub unique_views: i64,
    pub views_today: i64,
    pub views_this_week: i64,
    pub views_this_month: i64,
    pub top_referrers: Vec<ReferrerStatDto>,
    pub views_by_day: Vec<DailyViewsDto>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct PopularPostDto {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub view_count: i64,
    pub author_name: Option<String>,
}

/// 日別閲覧数とユニーク閲覧数（サイト全体）
#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct DailySiteViewsDto {
    pub date: String,
    pub views: i64,
    pub unique_views: i64,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct SiteAnalyticsDto {
    pub total_views: i64,
    pub views_in_period: i64,
    pub unique_views_in_period: i64,
    pub popular_posts: Vec<PopularPostDto>,
    pub views_by_day: Vec<DailySiteViewsDto>,
    pub top_referrers: Vec<ReferrerStatDto>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct TopPostTodayDto {
    pub title: String,
    pub slug: String,
    pub view_count: i64,
    pub views_today: i64,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct DashboardStatsDto {
    pub views_today: i64,
    pub views_yesterday: i64,
    pub growth_percentage: f64,
    pub published_posts: i64,
    pub total_tags: i64,
    pub top_post_today: Option<TopPostTodayDto>,
}
