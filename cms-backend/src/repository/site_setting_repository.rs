// src/repository/site_setting_repository.rs
use crate::domain::site_setting_model::{
    self, ActiveModel as SiteSettingActiveModel, Entity as SiteSettingEntity,
};
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, DbConn, DbErr, DeleteResult, EntityTrait,
    Order, QueryFilter, QueryOrder, Set,
};

pub struct SiteSettingRepository {
    db: DbConn,
}

impl SiteSettingRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    pub async fn find_all(&self) -> Result<Vec<site_setting_model::Model>, DbErr> {
        SiteSettingEntity::find()
            .order_by(site_setting_model::Column::Key, Order::Asc)
            .all(&self.db)
            .await
    }

    pub async fn find_by_key(
        &self,
        key: &str,
    ) -> Result<Option<site_setting_model::Model>, DbErr> {
        SiteSettingEntity::find()
            .filter(site_setting_model::Column::Key.eq(key))
            .one(&self.db)
            .await
    }

    /// キーが存在すれば値と説明を更新し、なければ新規作成する
    pub async fn upsert(
        &self,
        key: &str,
        value: &str,
        description: Option<&str>,
    ) -> Result<site_setting_model::Model, DbErr> {
        match self.find_by_key(key).await? {
            Some(existing) => {
                let mut active: SiteSettingActiveModel = existing.into();
                active.value = Set(value.to_string());
                if let Some(description) = description {
                    active.description = Set(Some(description.to_string()));
                }
                active.update(&self.db).await
            }
            None => {
                let setting = SiteSettingActiveModel {
                    key: Set(key.to_string()),
                    value: Set(value.to_string()),
                    description: Set(description.map(|d| d.to_string())),
                    ..SiteSettingActiveModel::new()
                };
                setting.insert(&self.db).await
            }
        }
    }

    pub async fn delete_by_key(&self, key: &str) -> Result<DeleteResult, DbErr> {
        SiteSettingEntity::delete_many()
            .filter(site_setting_model::Column::Key.eq(key))
            .exec(&self.db)
            .await
    }
}
