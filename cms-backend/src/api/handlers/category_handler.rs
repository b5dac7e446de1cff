// src/api/handlers/category_handler.rs
use crate::api::dto::category_dto::{
    CategoryDto, CategoryWithPostsDto, CreateCategoryDto, UpdateCategoryDto,
};
use crate::api::handlers::UuidPath;
use crate::api::AppState;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;
use crate::types::ApiResponse;
use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};
use tracing::info;
use validator::Validate;

pub async fn list_categories_handler(
    State(app_state): State<AppState>,
) -> AppResult<ApiResponse<Vec<CategoryDto>>> {
    let categories = app_state.category_service.list_categories().await?;

    Ok(ApiResponse::success(categories))
}

pub async fn get_category_handler(
    State(app_state): State<AppState>,
    UuidPath(id): UuidPath,
) -> AppResult<ApiResponse<CategoryWithPostsDto>> {
    let category = app_state.category_service.get_category(id).await?;

    Ok(ApiResponse::success(category))
}

pub async fn get_category_by_slug_handler(
    State(app_state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<ApiResponse<CategoryWithPostsDto>> {
    let category = app_state
        .category_service
        .get_category_by_slug(&slug)
        .await?;

    Ok(ApiResponse::success(category))
}

pub async fn create_category_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateCategoryDto>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;

    info!(
        user_id = %user.user_id(),
        category_name = %payload.name,
        "Creating new category"
    );

    let category = app_state.category_service.create_category(&payload).await?;

    Ok((StatusCode::CREATED, ApiResponse::success(category)))
}

pub async fn update_category_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    UuidPath(id): UuidPath,
    Json(payload): Json<UpdateCategoryDto>,
) -> AppResult<ApiResponse<CategoryDto>> {
    payload.validate()?;

    info!(
        user_id = %user.user_id(),
        category_id = %id,
        "Updating category"
    );

    let category = app_state
        .category_service
        .update_category(id, &payload)
        .await?;

    Ok(ApiResponse::success(category))
}

pub async fn delete_category_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    UuidPath(id): UuidPath,
) -> AppResult<ApiResponse<()>> {
    info!(
        user_id = %user.user_id(),
        category_id = %id,
        "Deleting category"
    );

    app_state.category_service.delete_category(id).await?;

    Ok(ApiResponse::success(()))
}

pub fn category_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_categories_handler).post(create_category_handler),
        )
        .route(
            "/{id}",
            get(get_category_handler)
                .patch(update_category_handler)
                .delete(delete_category_handler),
        )
        .route("/slug/{slug}", get(get_category_by_slug_handler))
}
