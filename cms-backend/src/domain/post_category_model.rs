// cms-backend/src/domain/post_category_model.rs

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 記事とカテゴリの中間テーブル
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "post_categories")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub post_id: Uuid,

    #[sea_orm(primary_key, auto_increment = false)]
    pub category_id: Uuid,
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
        belongs_to = "crate::domain::category_model::Entity",
        from = "Column::CategoryId",
        to = "crate::domain::category_model::Column::Id"
    )]
    Category,
}

impl Related<crate::domain::post_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl Related<crate::domain::category_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
