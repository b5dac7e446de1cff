// cms-backend/src/api/mod.rs
use crate::db::DbPool;
use crate::service::analytics_service::AnalyticsService;
use crate::service::category_service::CategoryService;
use crate::service::comment_service::CommentService;
use crate::service::dashboard_service::DashboardService;
use crate::service::post_service::PostService;
use crate::service::settings_service::SettingsService;
use crate::service::tag_service::TagService;
use crate::service::user_service::UserService;
use crate::utils::jwt::JwtManager;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

pub mod dto;
pub mod handlers;

/// 統一されたアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub post_service: Arc<PostService>,
    pub category_service: Arc<CategoryService>,
    pub tag_service: Arc<TagService>,
    pub comment_service: Arc<CommentService>,
    pub analytics_service: Arc<AnalyticsService>,
    pub dashboard_service: Arc<DashboardService>,
    pub settings_service: Arc<SettingsService>,
    pub user_service: Arc<UserService>,
    pub jwt_manager: Arc<JwtManager>,
    pub db: Arc<DatabaseConnection>,
}

impl AppState {
    pub fn new(db_pool: DbPool, jwt_manager: JwtManager) -> Self {
        Self {
            post_service: Arc::new(PostService::new(db_pool.clone())),
            category_service: Arc::new(CategoryService::new(db_pool.clone())),
            tag_service: Arc::new(TagService::new(db_pool.clone())),
            comment_service: Arc::new(CommentService::new(db_pool.clone())),
            analytics_service: Arc::new(AnalyticsService::new(db_pool.clone())),
            dashboard_service: Arc::new(DashboardService::new(db_pool.clone())),
            settings_service: Arc::new(SettingsService::new(db_pool.clone())),
            user_service: Arc::new(UserService::new(db_pool.clone())),
            jwt_manager: Arc::new(jwt_manager),
            db: Arc::new(db_pool),
        }
    }
}
