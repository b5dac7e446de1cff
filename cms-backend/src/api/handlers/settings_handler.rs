// src/api/handlers/settings_handler.rs
use crate::api::dto::settings_dto::{LayoutConfig, SetSettingDto, SettingDto};
use crate::api::AppState;
use crate::error::AppResult;
use crate::middleware::auth::AdminUser;
use crate::types::ApiResponse;
use axum::{
    extract::{Json, Path, State},
    routing::get,
    Router,
};
use std::collections::HashMap;
use tracing::info;
use validator::Validate;

/// 全設定のキー・バリューマップ（公開）
pub async fn get_all_settings_handler(
    State(app_state): State<AppState>,
) -> AppResult<ApiResponse<HashMap<String, String>>> {
    let settings = app_state.settings_service.get_all().await?;

    Ok(ApiResponse::success(settings))
}

/// レイアウト設定。未保存・破損時はデフォルト構成を返す（公開）。
pub async fn get_layout_handler(
    State(app_state): State<AppState>,
) -> AppResult<ApiResponse<LayoutConfig>> {
    let layout = app_state.settings_service.get_layout().await?;

    Ok(ApiResponse::success(layout))
}

pub async fn get_setting_handler(
    State(app_state): State<AppState>,
    Path(key): Path<String>,
) -> AppResult<ApiResponse<Option<String>>> {
    let value = app_state.settings_service.get(&key).await?;

    Ok(ApiResponse::success(value))
}

// 設定の書き込みは管理者のみ

pub async fn set_setting_handler(
    State(app_state): State<AppState>,
    AdminUser(user): AdminUser,
    Json(payload): Json<SetSettingDto>,
) -> AppResult<ApiResponse<SettingDto>> {
    payload.validate()?;

    info!(
        user_id = %user.user_id(),
        key = %payload.key,
        "Saving site setting"
    );

    let setting = app_state.settings_service.set(&payload).await?;

    Ok(ApiResponse::success(setting))
}

pub async fn set_layout_handler(
    State(app_state): State<AppState>,
    AdminUser(user): AdminUser,
    Json(payload): Json<LayoutConfig>,
) -> AppResult<ApiResponse<SettingDto>> {
    info!(
        user_id = %user.user_id(),
        "Saving layout configuration"
    );

    let setting = app_state.settings_service.set_layout(&payload).await?;

    Ok(ApiResponse::success(setting))
}

pub async fn delete_setting_handler(
    State(app_state): State<AppState>,
    AdminUser(user): AdminUser,
    Path(key): Path<String>,
) -> AppResult<ApiResponse<()>> {
    info!(
        user_id = %user.user_id(),
        key = %key,
        "Deleting site setting"
    );

    app_state.settings_service.delete(&key).await?;

    Ok(ApiResponse::success(()))
}

pub fn settings_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_all_settings_handler).put(set_setting_handler))
        .route("/layout", get(get_layout_handler).put(set_layout_handler))
        .route(
            "/{key}",
            get(get_setting_handler).delete(delete_setting_handler),
        )
}
