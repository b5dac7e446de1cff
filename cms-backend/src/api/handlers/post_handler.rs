// src/api/handlers/post_handler.rs
use crate::api::dto::post_dto::{
    CreatePostDto, PaginatedPostsDto, PostDto, PostFilterDto, PostSearchQuery,
    PostSearchResultDto, UpdatePostDto,
};
use crate::api::handlers::UuidPath;
use crate::api::AppState;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;
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

// --- CRUD Handlers ---

pub async fn list_posts_handler(
    State(app_state): State<AppState>,
    Query(filter): Query<PostFilterDto>,
) -> AppResult<ApiResponse<PaginatedPostsDto>> {
    let posts = app_state.post_service.list_posts(&filter).await?;

    Ok(ApiResponse::success(posts))
}

pub async fn get_post_handler(
    State(app_state): State<AppState>,
    UuidPath(id): UuidPath,
) -> AppResult<ApiResponse<PostDto>> {
    let post = app_state.post_service.get_post(id).await?;

    Ok(ApiResponse::success(post))
}

pub async fn get_post_by_slug_handler(
    State(app_state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<ApiResponse<PostDto>> {
    let post = app_state.post_service.get_post_by_slug(&slug).await?;

    Ok(ApiResponse::success(post))
}

pub async fn create_post_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreatePostDto>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;

    info!(
        user_id = %user.user_id(),
        post_title = %payload.title,
        "Creating new post"
    );

    let post = app_state
        .post_service
        .create_post(user.user_id(), &payload)
        .await?;

    info!(
        user_id = %user.user_id(),
        post_id = %post.id,
        "Post created successfully"
    );

    Ok((StatusCode::CREATED, ApiResponse::success(post)))
}

pub async fn update_post_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    UuidPath(id): UuidPath,
    Json(payload): Json<UpdatePostDto>,
) -> AppResult<ApiResponse<PostDto>> {
    payload.validate()?;

    info!(
        user_id = %user.user_id(),
        post_id = %id,
        "Updating post"
    );

    let post = app_state.post_service.update_post(id, &payload).await?;

    Ok(ApiResponse::success(post))
}

pub async fn delete_post_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    UuidPath(id): UuidPath,
) -> AppResult<ApiResponse<()>> {
    info!(
        user_id = %user.user_id(),
        post_id = %id,
        "Deleting post"
    );

    app_state.post_service.delete_post(id).await?;

    Ok(ApiResponse::success(()))
}

pub async fn publish_post_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    UuidPath(id): UuidPath,
) -> AppResult<ApiResponse<PostDto>> {
    info!(
        user_id = %user.user_id(),
        post_id = %id,
        "Publishing post"
    );

    let post = app_state.post_service.publish_post(id).await?;

    Ok(ApiResponse::success(post))
}

/// 管理画面の横断検索
pub async fn search_posts_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<PostSearchQuery>,
) -> AppResult<ApiResponse<PostSearchResultDto>> {
    info!(
        user_id = %user.user_id(),
        "Searching posts"
    );

    let result = app_state.post_service.search_posts(&query).await?;

    Ok(ApiResponse::success(result))
}

pub fn post_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_posts_handler).post(create_post_handler))
        .route(
            "/{id}",
            get(get_post_handler)
                .patch(update_post_handler)
                .delete(delete_post_handler),
        )
        .route("/slug/{slug}", get(get_post_by_slug_handler))
        .route("/{id}/publish", post(publish_post_handler))
}

pub fn admin_post_router() -> Router<AppState> {
    Router::new().route("/posts/search", get(search_posts_handler))
}
