// cms-backend/src/domain/post_model.rs

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, DbErr, Set};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(column_type = "Text")]
    pub title: String,

    #[sea_orm(unique)]
    pub slug: String,

    #[sea_orm(column_type = "Text")]
    pub content: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub excerpt: Option<String>,

    #[sea_orm(nullable)]
    pub featured_image: Option<String>,

    pub status: String,

    /// 非正規化された累計閲覧数。閲覧記録時にストレージ側でアトミックに加算される。
    pub view_count: i64,

    pub author_id: Uuid,

    #[sea_orm(nullable)]
    pub published_at: Option<DateTime<Utc>>,

    // SEO用フィールド
    #[sea_orm(nullable)]
    pub meta_title: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub meta_description: Option<String>,

    #[sea_orm(nullable)]
    pub focus_keyword: Option<String>,

    #[sea_orm(nullable)]
    pub og_image: Option<String>,

    #[sea_orm(nullable)]
    pub canonical_url: Option<String>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::domain::user_model::Entity",
        from = "Column::AuthorId",
        to = "crate::domain::user_model::Column::Id"
    )]
    Author,

    #[sea_orm(has_many = "crate::domain::comment_model::Entity")]
    Comments,

    #[sea_orm(has_many = "crate::domain::post_view_model::Entity")]
    PostViews,
}

impl Related<crate::domain::user_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl Related<crate::domain::comment_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comments.def()
    }
}

impl Related<crate::domain::post_view_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PostViews.def()
    }
}

// カテゴリとの多対多リレーション（post_categories経由）
impl Related<crate::domain::category_model::Entity> for Entity {
    fn to() -> RelationDef {
        crate::domain::post_category_model::Relation::Category.def()
    }

    fn via() -> Option<RelationDef> {
        Some(
            crate::domain::post_category_model::Relation::Post
                .def()
                .rev(),
        )
    }
}

// タグとの多対多リレーション（post_tags経由）
impl Related<crate::domain::tag_model::Entity> for Entity {
    fn to() -> RelationDef {
        crate::domain::post_tag_model::Relation::Tag.def()
    }

    fn via() -> Option<RelationDef> {
        Some(crate::domain::post_tag_model::Relation::Post.def().rev())
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        Self {
            id: Set(Uuid::new_v4()),
            view_count: Set(0),
            created_at: Set(Utc::now()),
            updated_at: Set(Utc::now()),
            ..ActiveModelTrait::default()
        }
    }

    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if !insert {
            // 更新の場合のみ updated_at を更新
            self.updated_at = Set(Utc::now());
        }
        Ok(self)
    }
}
