// src/api/handlers/analytics_handler.rs
use crate::api::dto::analytics_dto::{
    DashboardStatsDto, PostAnalyticsDto, RecordViewDto, SiteAnalyticsDto, SiteAnalyticsQuery,
};
use crate::api::handlers::UuidPath;
use crate::api::AppState;
use crate::error::AppResult;
use crate::middleware::auth::{AdminUser, AuthenticatedUser};
use crate::types::ApiResponse;
use axum::{
    extract::{Json, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use tracing::info;
use validator::Validate;

/// 閲覧イベントを記録する（認証不要）。
///
/// 公開ページの描画ごとにfire-and-forgetで呼ばれる想定のため、
/// 呼び出し側は失敗を無視してよい。
pub async fn record_view_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<RecordViewDto>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;

    let view = app_state.analytics_service.record_view(payload).await?;

    Ok((StatusCode::CREATED, ApiResponse::success(view)))
}

pub async fn get_post_analytics_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    UuidPath(id): UuidPath,
) -> AppResult<ApiResponse<PostAnalyticsDto>> {
    info!(
        user_id = %user.user_id(),
        post_id = %id,
        "Getting post analytics"
    );

    let analytics = app_state.analytics_service.get_post_analytics(id).await?;

    Ok(ApiResponse::success(analytics))
}

pub async fn get_site_analytics_handler(
    State(app_state): State<AppState>,
    AdminUser(user): AdminUser,
    Query(query): Query<SiteAnalyticsQuery>,
) -> AppResult<ApiResponse<SiteAnalyticsDto>> {
    query.validate()?;

    info!(
        user_id = %user.user_id(),
        days = query.days,
        "Getting site analytics"
    );

    let analytics = app_state
        .analytics_service
        .get_site_analytics(query.days)
        .await?;

    Ok(ApiResponse::success(analytics))
}

pub async fn get_dashboard_stats_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> AppResult<ApiResponse<DashboardStatsDto>> {
    info!(
        user_id = %user.user_id(),
        "Getting dashboard stats"
    );

    let stats = app_state.analytics_service.get_dashboard_stats().await?;

    Ok(ApiResponse::success(stats))
}

pub fn analytics_router() -> Router<AppState> {
    Router::new()
        .route("/views", post(record_view_handler))
        .route("/posts/{id}", get(get_post_analytics_handler))
        .route("/site", get(get_site_analytics_handler))
        .route("/dashboard", get(get_dashboard_stats_handler))
}
