// src/repository/category_repository.rs
use crate::api::dto::category_dto::{CreateCategoryDto, UpdateCategoryDto};
use crate::domain::category_model::{
    self, ActiveModel as CategoryActiveModel, Entity as CategoryEntity,
};
use crate::domain::post_category_model::{self, Entity as PostCategoryEntity};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, DbConn, DbErr, DeleteResult, EntityTrait,
    FromQueryResult, Order, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

/// カテゴリ別の記事数
#[derive(Debug, FromQueryResult)]
pub struct CategoryPostCount {
    pub category_id: Uuid,
    pub count: i64,
}

pub struct CategoryRepository {
    db: DbConn,
}

impl CategoryRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    pub async fn find_all_ordered_by_name(&self) -> Result<Vec<category_model::Model>, DbErr> {
        CategoryEntity::find()
            .order_by(category_model::Column::Name, Order::Asc)
            .all(&self.db)
            .await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<category_model::Model>, DbErr> {
        CategoryEntity::find_by_id(id).one(&self.db).await
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<category_model::Model>, DbErr> {
        CategoryEntity::find()
            .filter(category_model::Column::Slug.eq(slug))
            .one(&self.db)
            .await
    }

    /// スラッグの重複チェック用。除外IDを指定すると自分自身を除いて検索する。
    pub async fn find_by_slug_excluding(
        &self,
        slug: &str,
        excluded_id: Option<Uuid>,
    ) -> Result<Option<category_model::Model>, DbErr> {
        let mut query = CategoryEntity::find().filter(category_model::Column::Slug.eq(slug));

        if let Some(excluded_id) = excluded_id {
            query = query.filter(category_model::Column::Id.ne(excluded_id));
        }

        query.one(&self.db).await
    }

    pub async fn create(
        &self,
        payload: &CreateCategoryDto,
    ) -> Result<category_model::Model, DbErr> {
        let category = CategoryActiveModel {
            name: Set(payload.name.clone()),
            slug: Set(payload.slug.clone()),
            description: Set(payload.description.clone()),
            ..CategoryActiveModel::new()
        };

        category.insert(&self.db).await
    }

    pub async fn update(
        &self,
        id: Uuid,
        payload: &UpdateCategoryDto,
    ) -> Result<Option<category_model::Model>, DbErr> {
        let category = match CategoryEntity::find_by_id(id).one(&self.db).await? {
            Some(category) => category,
            None => return Ok(None),
        };

        let mut active: CategoryActiveModel = category.into();

        if let Some(name) = &payload.name {
            active.name = Set(name.clone());
        }
        if let Some(slug) = &payload.slug {
            active.slug = Set(slug.clone());
        }
        if let Some(description) = &payload.description {
            active.description = Set(Some(description.clone()));
        }

        let updated = active.update(&self.db).await?;
        Ok(Some(updated))
    }

    pub async fn delete(&self, id: Uuid) -> Result<DeleteResult, DbErr> {
        CategoryEntity::delete_by_id(id).exec(&self.db).await
    }

    pub async fn count_all(&self) -> Result<u64, DbErr> {
        CategoryEntity::find().count(&self.db).await
    }

    /// カテゴリごとの記事数をまとめて取得する（一覧表示用）
    pub async fn post_counts(&self) -> Result<Vec<CategoryPostCount>, DbErr> {
        PostCategoryEntity::find()
            .select_only()
            .column(post_category_model::Column::CategoryId)
            .column_as(
                Expr::col(post_category_model::Column::PostId).count(),
                "count",
            )
            .group_by(post_category_model::Column::CategoryId)
            .into_model::<CategoryPostCount>()
            .all(&self.db)
            .await
    }
}
