// cms-backend/src/domain/post_tag_model.rs

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 記事とタグの中間テーブル
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "post_tags")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub post_id: Uuid,

    #[sea_orm(primary_key, auto_increment = false)]
    pub tag_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::domain::post_model::Entity",
        from = "Column::PostId",
        to = "crate::domain::post_model::Column::Id"
    )]
    Post,

    #[sea_orm(
        belongs_to = "crate::domain::tag_model::Entity",
        from = "Column::TagId",
        to = "crate::domain::tag_model::Column::Id"
    )]
    Tag,
}

impl Related<crate::domain::post_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl Related<crate::domain::tag_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tag.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
