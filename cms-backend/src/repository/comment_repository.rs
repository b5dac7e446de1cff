// src/repository/comment_repository.rs
use crate::api::dto::comment_dto::{CommentFilterDto, CreateCommentDto};
use crate::domain::comment_model::{
    self, ActiveModel as CommentActiveModel, Entity as CommentEntity,
};
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, DbConn, DbErr, DeleteResult, EntityTrait,
    Order, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

pub struct CommentRepository {
    db: DbConn,
}

impl CommentRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    /// 記事の承認済みコメントを新しい順に取得する（公開側）
    pub async fn find_approved_for_post(
        &self,
        post_id: Uuid,
    ) -> Result<Vec<comment_model::Model>, DbErr> {
        CommentEntity::find()
            .filter(comment_model::Column::PostId.eq(post_id))
            .filter(comment_model::Column::IsApproved.eq(true))
            .order_by(comment_model::Column::CreatedAt, Order::Desc)
            .all(&self.db)
            .await
    }

    /// モデレーション用の一覧。承認状態での絞り込みとページネーションに対応。
    pub async fn find_with_filter(
        &self,
        filter: &CommentFilterDto,
    ) -> Result<(Vec<comment_model::Model>, u64), DbErr> {
        let mut query = CommentEntity::find();

        if let Some(is_approved) = filter.is_approved {
            query = query.filter(comment_model::Column::IsApproved.eq(is_approved));
        }

        query = query.order_by(comment_model::Column::CreatedAt, Order::Desc);

        let total_items = query.clone().count(&self.db).await?;

        let per_page = std::cmp::min(filter.per_page.unwrap_or(20), 100);
        let page = std::cmp::max(filter.page.unwrap_or(1), 1);
        let offset = (page - 1) * per_page;

        let comments = query.limit(per_page).offset(offset).all(&self.db).await?;

        Ok((comments, total_items))
    }

    /// コメントを承認待ち状態で作成する
    pub async fn create(
        &self,
        post_id: Uuid,
        payload: &CreateCommentDto,
    ) -> Result<comment_model::Model, DbErr> {
        let comment = CommentActiveModel {
            content: Set(payload.content.clone()),
            author_name: Set(payload.author_name.clone()),
            author_email: Set(payload.author_email.clone()),
            post_id: Set(post_id),
            ..CommentActiveModel::new()
        };

        comment.insert(&self.db).await
    }

    pub async fn approve(&self, id: Uuid) -> Result<Option<comment_model::Model>, DbErr> {
        let comment = match CommentEntity::find_by_id(id).one(&self.db).await? {
            Some(comment) => comment,
            None => return Ok(None),
        };

        let mut active: CommentActiveModel = comment.into();
        active.is_approved = Set(true);

        let updated = active.update(&self.db).await?;
        Ok(Some(updated))
    }

    pub async fn delete(&self, id: Uuid) -> Result<DeleteResult, DbErr> {
        CommentEntity::delete_by_id(id).exec(&self.db).await
    }
}
