// cms-backend/src/domain/user_role.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// 管理画面ユーザーのロールを表すenum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Admin,
    Editor,
    Author,
}

impl UserRole {
    /// 文字列からUserRoleに変換
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "ADMIN" => Some(Self::Admin),
            "EDITOR" => Some(Self::Editor),
            "AUTHOR" => Some(Self::Author),
            _ => None,
        }
    }

    /// UserRoleを文字列として取得
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Editor => "EDITOR",
            Self::Author => "AUTHOR",
        }
    }

    /// 管理者かチェック
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// コメント承認などのモデレーション操作が可能かチェック
    pub fn can_moderate(&self) -> bool {
        matches!(self, Self::Admin | Self::Editor)
    }
}

impl Default for UserRole {
    fn default() -> Self {
        Self::Author
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str(s).ok_or_else(|| format!("Invalid user role: '{}'", s))
    }
}

impl From<UserRole> for String {
    fn from(role: UserRole) -> Self {
        role.as_str().to_string()
    }
}

impl TryFrom<String> for UserRole {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
