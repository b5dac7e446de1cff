// src/api/handlers/dashboard_handler.rs
use crate::api::dto::dashboard_dto::{DashboardOverviewDto, PostsByStatusDto, RecentPostsQuery};
use crate::api::dto::post_dto::PostDto;
use crate::api::AppState;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;
use crate::types::ApiResponse;
use axum::{
    extract::{Query, State},
    routing::get,
    Router,
};
use tracing::info;
use validator::Validate;

pub async fn get_overview_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> AppResult<ApiResponse<DashboardOverviewDto>> {
    info!(
        user_id = %user.user_id(),
        "Getting dashboard overview"
    );

    let overview = app_state.dashboard_service.get_overview().await?;

    Ok(ApiResponse::success(overview))
}

pub async fn get_recent_posts_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<RecentPostsQuery>,
) -> AppResult<ApiResponse<Vec<PostDto>>> {
    query.validate()?;

    info!(
        user_id = %user.user_id(),
        limit = query.limit,
        "Getting recent posts"
    );

    let posts = app_state
        .dashboard_service
        .get_recent_posts(query.limit)
        .await?;

    Ok(ApiResponse::success(posts))
}

pub async fn get_posts_by_status_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> AppResult<ApiResponse<PostsByStatusDto>> {
    info!(
        user_id = %user.user_id(),
        "Getting posts by status"
    );

    let breakdown = app_state.dashboard_service.get_posts_by_status().await?;

    Ok(ApiResponse::success(breakdown))
}

pub fn dashboard_router() -> Router<AppState> {
    Router::new()
        .route("/stats", get(get_overview_handler))
        .route("/recent-posts", get(get_recent_posts_handler))
        .route("/posts-by-status", get(get_posts_by_status_handler))
}
