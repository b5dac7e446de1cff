// src/api/dto/settings_dto.rs
use crate::domain::site_setting_model;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// --- Request DTOs ---

#[derive(Deserialize, Serialize, Debug, Validate)]
pub struct SetSettingDto {
    #[validate(length(min = 1, max = 100, message = "Key must be between 1 and 100 characters"))]
    pub key: String,

    pub value: String,

    pub description: Option<String>,
}

// --- Response DTOs ---

#[derive(Serialize, Deserialize, Debug)]
pub struct SettingDto {
    pub id: Uuid,
    pub key: String,
    pub value: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// SeaORM の Model から SettingDto への変換
impl From<site_setting_model::Model> for SettingDto {
    fn from(model: site_setting_model::Model) -> Self {
        Self {
            id: model.id,
            key: model.key,
            value: model.value,
            description: model.description,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

// --- レイアウト設定 ---
// ナビバー・フッター・ヘッダーの構成をJSONとしてsite_settingsの
// layout_configキーに保存する。行が無い場合やパースに失敗した場合は
// デフォルト構成にフォールバックする。

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum NavbarPosition {
    Top,
    Bottom,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MenuItemConfig {
    pub label: String,
    pub url: String,
    #[serde(default)]
    pub external: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SocialMediaConfig {
    pub platform: String,
    pub url: String,
    pub icon: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NavbarConfig {
    #[serde(default)]
    pub logo: String,
    pub background_color: String,
    pub text_color: String,
    pub position: NavbarPosition,
    pub show_search: bool,
    #[serde(default)]
    pub menu_items: Vec<MenuItemConfig>,
}

impl Default for NavbarConfig {
    fn default() -> Self {
        Self {
            logo: String::new(),
            background_color: "#ffffff".to_string(),
            text_color: "#000000".to_string(),
            position: NavbarPosition::Top,
            show_search: true,
            menu_items: Vec::new(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FooterConfig {
    pub background_color: String,
    pub text_color: String,
    pub copyright: String,
    #[serde(default)]
    pub links: Vec<MenuItemConfig>,
    #[serde(default)]
    pub social_media: Vec<SocialMediaConfig>,
}

impl Default for FooterConfig {
    fn default() -> Self {
        Self {
            background_color: "#f8f9fa".to_string(),
            text_color: "#6c757d".to_string(),
            copyright: "© 2024 CMS Admin. All rights reserved.".to_string(),
            links: Vec::new(),
            social_media: Vec::new(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HeaderConfig {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub show_breadcrumbs: bool,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            title: "CMS Admin".to_string(),
            description: String::new(),
            show_breadcrumbs: true,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct LayoutConfig {
    pub navbar: NavbarConfig,
    pub footer: FooterConfig,
    pub header: HeaderConfig,
}
