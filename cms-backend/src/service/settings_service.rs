// src/service/settings_service.rs

use crate::api::dto::settings_dto::{LayoutConfig, SetSettingDto, SettingDto};
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::repository::site_setting_repository::SiteSettingRepository;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

/// レイアウト設定を保存するキー
const LAYOUT_CONFIG_KEY: &str = "layout_config";
const LAYOUT_CONFIG_DESCRIPTION: &str = "Layout configuration for navbar, footer, and header";

pub struct SettingsService {
    repo: Arc<SiteSettingRepository>,
}

impl SettingsService {
    pub fn new(db_pool: DbPool) -> Self {
        Self {
            repo: Arc::new(SiteSettingRepository::new(db_pool)),
        }
    }

    /// 全設定をキー・バリューのマップとして取得する
    pub async fn get_all(&self) -> AppResult<HashMap<String, String>> {
        let settings = self.repo.find_all().await?;

        Ok(settings
            .into_iter()
            .map(|setting| (setting.key, setting.value))
            .collect())
    }

    pub async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let setting = self.repo.find_by_key(key).await?;
        Ok(setting.map(|s| s.value))
    }

    pub async fn set(&self, payload: &SetSettingDto) -> AppResult<SettingDto> {
        let setting = self
            .repo
            .upsert(&payload.key, &payload.value, payload.description.as_deref())
            .await?;

        info!(key = %setting.key, "Site setting saved");

        Ok(setting.into())
    }

    pub async fn delete(&self, key: &str) -> AppResult<()> {
        let result = self.repo.delete_by_key(key).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound(format!("Setting '{}' not found", key)));
        }

        Ok(())
    }

    /// レイアウト設定をJSONとして保存する
    pub async fn set_layout(&self, config: &LayoutConfig) -> AppResult<SettingDto> {
        let value = serde_json::to_string(config)
            .map_err(|e| AppError::InternalServerError(format!("Failed to serialize layout config: {}", e)))?;

        let setting = self
            .repo
            .upsert(LAYOUT_CONFIG_KEY, &value, Some(LAYOUT_CONFIG_DESCRIPTION))
            .await?;

        info!("Layout configuration saved");

        Ok(setting.into())
    }

    /// レイアウト設定を取得する。行が無い場合や保存値のパースに失敗した
    /// 場合はデフォルト構成を返す。
    pub async fn get_layout(&self) -> AppResult<LayoutConfig> {
        let setting = match self.repo.find_by_key(LAYOUT_CONFIG_KEY).await? {
            Some(setting) => setting,
            None => return Ok(LayoutConfig::default()),
        };

        match serde_json::from_str(&setting.value) {
            Ok(config) => Ok(config),
            Err(e) => {
                warn!(error = %e, "Stored layout config failed to parse; falling back to default");
                Ok(LayoutConfig::default())
            }
        }
    }
}
