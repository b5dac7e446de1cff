// src/api/handlers/comment_handler.rs
use crate::api::dto::comment_dto::{
    CommentDto, CommentFilterDto, CreateCommentDto, PaginatedCommentsDto,
};
use crate::api::handlers::UuidPath;
use crate::api::AppState;
use crate::error::AppResult;
use crate::middleware::auth::ModeratorUser;
use crate::types::ApiResponse;
use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use tracing::info;
use validator::Validate;

// --- 公開側ハンドラ ---

/// 公開済み記事の承認済みコメント一覧（認証不要）
pub async fn list_post_comments_handler(
    State(app_state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<ApiResponse<Vec<CommentDto>>> {
    let comments = app_state.comment_service.list_comments_for_post(&slug).await?;

    Ok(ApiResponse::success(comments))
}

/// コメント投稿（認証不要）。承認されるまで公開側には表示されない。
pub async fn create_comment_handler(
    State(app_state): State<AppState>,
    Path(slug): Path<String>,
    Json(payload): Json<CreateCommentDto>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;

    let comment = app_state
        .comment_service
        .create_comment(&slug, &payload)
        .await?;

    Ok((StatusCode::CREATED, ApiResponse::success(comment)))
}

// --- モデレーション用ハンドラ ---

pub async fn list_comments_handler(
    State(app_state): State<AppState>,
    ModeratorUser(user): ModeratorUser,
    Query(filter): Query<CommentFilterDto>,
) -> AppResult<ApiResponse<PaginatedCommentsDto>> {
    info!(
        user_id = %user.user_id(),
        "Listing comments for moderation"
    );

    let comments = app_state.comment_service.list_comments(&filter).await?;

    Ok(ApiResponse::success(comments))
}

pub async fn approve_comment_handler(
    State(app_state): State<AppState>,
    ModeratorUser(user): ModeratorUser,
    UuidPath(id): UuidPath,
) -> AppResult<ApiResponse<CommentDto>> {
    info!(
        user_id = %user.user_id(),
        comment_id = %id,
        "Approving comment"
    );

    let comment = app_state.comment_service.approve_comment(id).await?;

    Ok(ApiResponse::success(comment))
}

pub async fn delete_comment_handler(
    State(app_state): State<AppState>,
    ModeratorUser(user): ModeratorUser,
    UuidPath(id): UuidPath,
) -> AppResult<ApiResponse<()>> {
    info!(
        user_id = %user.user_id(),
        comment_id = %id,
        "Deleting comment"
    );

    app_state.comment_service.delete_comment(id).await?;

    Ok(ApiResponse::success(()))
}

/// /api/posts配下にマウントされる公開側ルーター
pub fn comment_public_router() -> Router<AppState> {
    Router::new().route(
        "/slug/{slug}/comments",
        get(list_post_comments_handler).post(create_comment_handler),
    )
}

/// /api/admin配下にマウントされるモデレーション用ルーター
pub fn admin_comment_router() -> Router<AppState> {
    Router::new()
        .route("/comments", get(list_comments_handler))
        .route("/comments/{id}/approve", post(approve_comment_handler))
        .route("/comments/{id}", axum::routing::delete(delete_comment_handler))
}
