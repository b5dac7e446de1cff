// src/repository/user_repository.rs
use crate::domain::post_model::{self, Entity as PostEntity};
use crate::domain::user_model::{self, ActiveModel as UserActiveModel, Entity as UserEntity};
use crate::domain::user_role::UserRole;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, DbConn, DbErr, DeleteResult, EntityTrait, FromQueryResult, Order,
    PaginatorTrait, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

/// 著者別の記事数
#[derive(Debug, FromQueryResult)]
pub struct AuthorPostCount {
    pub author_id: Uuid,
    pub count: i64,
}

pub struct UserRepository {
    db: DbConn,
}

impl UserRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<user_model::Model>, DbErr> {
        UserEntity::find_by_id(id).one(&self.db).await
    }

    pub async fn find_all_paginated(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<user_model::Model>, u64), DbErr> {
        let per_page = std::cmp::min(per_page, 100);
        let page = std::cmp::max(page, 1);
        let offset = (page - 1) * per_page;

        let users = UserEntity::find()
            .order_by(user_model::Column::CreatedAt, Order::Desc)
            .limit(per_page)
            .offset(offset)
            .all(&self.db)
            .await?;

        let total_count = UserEntity::find().count(&self.db).await?;

        Ok((users, total_count))
    }

    pub async fn update_role(
        &self,
        id: Uuid,
        role: UserRole,
    ) -> Result<Option<user_model::Model>, DbErr> {
        let user = match UserEntity::find_by_id(id).one(&self.db).await? {
            Some(user) => user,
            None => return Ok(None),
        };

        let mut active: UserActiveModel = user.into();
        active.role = Set(role.as_str().to_string());

        let updated = active.update(&self.db).await?;
        Ok(Some(updated))
    }

    pub async fn delete(&self, id: Uuid) -> Result<DeleteResult, DbErr> {
        UserEntity::delete_by_id(id).exec(&self.db).await
    }

    pub async fn count_all(&self) -> Result<u64, DbErr> {
        UserEntity::find().count(&self.db).await
    }

    /// 著者ごとの記事数をまとめて取得する（ユーザー一覧表示用）
    pub async fn post_counts(&self) -> Result<Vec<AuthorPostCount>, DbErr> {
        PostEntity::find()
            .select_only()
            .column(post_model::Column::AuthorId)
            .column_as(Expr::col(post_model::Column::Id).count(), "count")
            .group_by(post_model::Column::AuthorId)
            .into_model::<AuthorPostCount>()
            .all(&self.db)
            .await
    }
}
