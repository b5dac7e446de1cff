// cms-backend/src/domain/post_status.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// 記事の公開状態を表すenum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PostStatus {
    Draft,
    Published,
    Scheduled,
    Archived,
}

impl PostStatus {
    /// 文字列からPostStatusに変換
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "DRAFT" => Some(Self::Draft),
            "PUBLISHED" => Some(Self::Published),
            "SCHEDULED" => Some(Self::Scheduled),
            "ARCHIVED" => Some(Self::Archived),
            _ => None,
        }
    }

    /// PostStatusを文字列として取得
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Published => "PUBLISHED",
            Self::Scheduled => "SCHEDULED",
            Self::Archived => "ARCHIVED",
        }
    }

    /// すべての有効なステータスを取得
    pub fn all() -> Vec<Self> {
        vec![Self::Draft, Self::Published, Self::Scheduled, Self::Archived]
    }

    /// 公開済みかチェック（閲覧記録・公開一覧の対象）
    pub fn is_published(&self) -> bool {
        matches!(self, Self::Published)
    }
}

impl Default for PostStatus {
    fn default() -> Self {
        Self::Draft
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PostStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str(s).ok_or_else(|| {
            format!(
                "Invalid post status: '{}'. Valid statuses are: {}",
                s,
                Self::all()
                    .iter()
                    .map(|s| s.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        })
    }
}

// データベースとの変換用
impl From<PostStatus> for String {
    fn from(status: PostStatus) -> Self {
        status.as_str().to_string()
    }
}

impl TryFrom<String> for PostStatus {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<&str> for PostStatus {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}
