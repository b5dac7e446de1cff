// src/api/handlers/mod.rs

pub mod analytics_handler;
pub mod category_handler;
pub mod comment_handler;
pub mod dashboard_handler;
pub mod post_handler;
pub mod settings_handler;
pub mod tag_handler;
pub mod user_handler;

use crate::api::AppState;
use crate::error::AppError;
use crate::logging::logging_middleware;
use crate::middleware::auth::auth_middleware;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
    middleware,
    routing::get,
    Router,
};
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

// カスタムUUID抽出器
pub struct UuidPath(pub Uuid);

impl<S> FromRequestParts<S> for UuidPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // パスパラメータを文字列として最初に抽出
        let Path(path_str) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::ValidationErrors(vec!["Invalid path parameter".to_string()]))?;

        // UUIDをパースして検証エラー形式で返す
        let uuid = Uuid::parse_str(&path_str).map_err(|_| {
            AppError::ValidationErrors(vec![format!("Invalid UUID format: '{}'", path_str)])
        })?;

        Ok(UuidPath(uuid))
    }
}

async fn health_check_handler() -> &'static str {
    "OK"
}

/// アプリケーション全体のルーターを組み立てる
pub fn create_app_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check_handler))
        .nest("/api/analytics", analytics_handler::analytics_router())
        .nest(
            "/api/posts",
            post_handler::post_router().merge(comment_handler::comment_public_router()),
        )
        .nest("/api/categories", category_handler::category_router())
        .nest("/api/tags", tag_handler::tag_router())
        .nest("/api/settings", settings_handler::settings_router())
        .nest("/api/dashboard", dashboard_handler::dashboard_router())
        .nest("/api/users", user_handler::user_router())
        .nest(
            "/api/admin",
            post_handler::admin_post_router()
                .merge(comment_handler::admin_comment_router())
                .merge(user_handler::admin_user_router()),
        )
        .layer(middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ))
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .with_state(app_state)
}
