// src/api/handlers/tag_handler.rs
use crate::api::dto::tag_dto::{
    CreateTagDto, DeleteTagResponseDto, PaginatedTagsDto, PopularTagsQuery, TagDto, TagFilterDto,
    TagWithPostsDto, UpdateTagDto,
};
use crate::api::handlers::UuidPath;
use crate::api::AppState;
use crate::error::AppResult;
use crate::middleware::auth::AdminUser;
use crate::types::ApiResponse;
use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};
use tracing::info;
use validator::Validate;

pub async fn list_tags_handler(
    State(app_state): State<AppState>,
    Query(filter): Query<TagFilterDto>,
) -> AppResult<ApiResponse<PaginatedTagsDto>> {
    let tags = app_state.tag_service.list_tags(&filter).await?;

    Ok(ApiResponse::success(tags))
}

/// 公開済み記事数の多い人気タグ
pub async fn popular_tags_handler(
    State(app_state): State<AppState>,
    Query(query): Query<PopularTagsQuery>,
) -> AppResult<ApiResponse<Vec<TagDto>>> {
    query.validate()?;

    let tags = app_state.tag_service.popular_tags(query.limit).await?;

    Ok(ApiResponse::success(tags))
}

pub async fn get_tag_handler(
    State(app_state): State<AppState>,
    UuidPath(id): UuidPath,
) -> AppResult<ApiResponse<TagWithPostsDto>> {
    let tag = app_state.tag_service.get_tag(id).await?;

    Ok(ApiResponse::success(tag))
}

pub async fn get_tag_by_slug_handler(
    State(app_state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<ApiResponse<TagWithPostsDto>> {
    let tag = app_state.tag_service.get_tag_by_slug(&slug).await?;

    Ok(ApiResponse::success(tag))
}

// タグの作成・更新・削除は管理者のみ

pub async fn create_tag_handler(
    State(app_state): State<AppState>,
    AdminUser(user): AdminUser,
    Json(payload): Json<CreateTagDto>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;

    info!(
        user_id = %user.user_id(),
        tag_name = %payload.name,
        "Creating new tag"
    );

    let tag = app_state.tag_service.create_tag(&payload).await?;

    Ok((StatusCode::CREATED, ApiResponse::success(tag)))
}

pub async fn update_tag_handler(
    State(app_state): State<AppState>,
    AdminUser(user): AdminUser,
    UuidPath(id): UuidPath,
    Json(payload): Json<UpdateTagDto>,
) -> AppResult<ApiResponse<TagDto>> {
    payload.validate()?;

    info!(
        user_id = %user.user_id(),
        tag_id = %id,
        "Updating tag"
    );

    let tag = app_state.tag_service.update_tag(id, &payload).await?;

    Ok(ApiResponse::success(tag))
}

pub async fn delete_tag_handler(
    State(app_state): State<AppState>,
    AdminUser(user): AdminUser,
    UuidPath(id): UuidPath,
) -> AppResult<ApiResponse<DeleteTagResponseDto>> {
    info!(
        user_id = %user.user_id(),
        tag_id = %id,
        "Deleting tag"
    );

    let result = app_state.tag_service.delete_tag(id).await?;

    Ok(ApiResponse::success(result))
}

pub fn tag_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tags_handler).post(create_tag_handler))
        .route("/popular", get(popular_tags_handler))
        .route(
            "/{id}",
            get(get_tag_handler)
                .patch(update_tag_handler)
                .delete(delete_tag_handler),
        )
        .route("/slug/{slug}", get(get_tag_by_slug_handler))
}
