// src/api/handlers/user_handler.rs
use crate::api::dto::user_dto::{PaginatedUsersDto, UpdateUserRoleDto, UserDto, UserFilterDto};
use crate::api::handlers::UuidPath;
use crate::api::AppState;
use crate::error::AppResult;
use crate::middleware::auth::{AdminUser, AuthenticatedUser};
use crate::types::ApiResponse;
use axum::{
    extract::{Json, Query, State},
    routing::{get, patch},
    Router,
};
use tracing::info;

/// ログイン中ユーザーのプロフィール
pub async fn get_profile_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> AppResult<ApiResponse<UserDto>> {
    let profile = app_state.user_service.get_profile(user.user_id()).await?;

    Ok(ApiResponse::success(profile))
}

// ユーザー管理は管理者のみ

pub async fn list_users_handler(
    State(app_state): State<AppState>,
    AdminUser(user): AdminUser,
    Query(filter): Query<UserFilterDto>,
) -> AppResult<ApiResponse<PaginatedUsersDto>> {
    info!(
        user_id = %user.user_id(),
        "Listing users"
    );

    let users = app_state.user_service.list_users(&filter).await?;

    Ok(ApiResponse::success(users))
}

pub async fn update_user_role_handler(
    State(app_state): State<AppState>,
    AdminUser(user): AdminUser,
    UuidPath(id): UuidPath,
    Json(payload): Json<UpdateUserRoleDto>,
) -> AppResult<ApiResponse<UserDto>> {
    info!(
        user_id = %user.user_id(),
        target_user_id = %id,
        role = %payload.role,
        "Updating user role"
    );

    let updated = app_state.user_service.update_role(id, payload.role).await?;

    Ok(ApiResponse::success(updated))
}

pub async fn delete_user_handler(
    State(app_state): State<AppState>,
    AdminUser(user): AdminUser,
    UuidPath(id): UuidPath,
) -> AppResult<ApiResponse<()>> {
    info!(
        user_id = %user.user_id(),
        target_user_id = %id,
        "Deleting user"
    );

    app_state.user_service.delete_user(id).await?;

    Ok(ApiResponse::success(()))
}

pub fn user_router() -> Router<AppState> {
    Router::new().route("/me", get(get_profile_handler))
}

pub fn admin_user_router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users_handler))
        .route("/users/{id}/role", patch(update_user_role_handler))
        .route("/users/{id}", axum::routing::delete(delete_user_handler))
}
