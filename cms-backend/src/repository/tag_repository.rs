// src/repository/tag_repository.rs
use crate::api::dto::tag_dto::{CreateTagDto, TagFilterDto, UpdateTagDto};
use crate::domain::post_model;
use crate::domain::post_status::PostStatus;
use crate::domain::post_tag_model::{self, Entity as PostTagEntity};
use crate::domain::tag_model::{self, ActiveModel as TagActiveModel, Entity as TagEntity};
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, Condition, DbConn, DbErr, DeleteResult,
    EntityTrait, FromQueryResult, JoinType, Order, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, Set,
};
use uuid::Uuid;

/// タグ別の記事数
#[derive(Debug, FromQueryResult)]
pub struct TagPostCount {
    pub tag_id: Uuid,
    pub count: i64,
}

pub struct TagRepository {
    db: DbConn,
}

impl TagRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    pub async fn find_with_filter(
        &self,
        filter: &TagFilterDto,
    ) -> Result<(Vec<tag_model::Model>, u64), DbErr> {
        let mut query = TagEntity::find();

        // 名前・説明の部分一致検索
        if let Some(search) = &filter.search {
            let pattern = format!("%{}%", search);
            query = query.filter(
                Condition::any()
                    .add(Expr::col(tag_model::Column::Name).ilike(pattern.clone()))
                    .add(Expr::col(tag_model::Column::Description).ilike(pattern)),
            );
        }

        query = query.order_by(tag_model::Column::CreatedAt, Order::Desc);

        let total_items = query.clone().count(&self.db).await?;

        let per_page = std::cmp::min(filter.per_page.unwrap_or(50), 100);
        let page = std::cmp::max(filter.page.unwrap_or(1), 1);
        let offset = (page - 1) * per_page;

        let tags = query.limit(per_page).offset(offset).all(&self.db).await?;

        Ok((tags, total_items))
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<tag_model::Model>, DbErr> {
        TagEntity::find_by_id(id).one(&self.db).await
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<tag_model::Model>, DbErr> {
        TagEntity::find()
            .filter(tag_model::Column::Slug.eq(slug))
            .one(&self.db)
            .await
    }

    /// スラッグの重複チェック用。除外IDを指定すると自分自身を除いて検索する。
    pub async fn find_by_slug_excluding(
        &self,
        slug: &str,
        excluded_id: Option<Uuid>,
    ) -> Result<Option<tag_model::Model>, DbErr> {
        let mut query = TagEntity::find().filter(tag_model::Column::Slug.eq(slug));

        if let Some(excluded_id) = excluded_id {
            query = query.filter(tag_model::Column::Id.ne(excluded_id));
        }

        query.one(&self.db).await
    }

    pub async fn create(&self, payload: &CreateTagDto) -> Result<tag_model::Model, DbErr> {
        let tag = TagActiveModel {
            name: Set(payload.name.clone()),
            slug: Set(payload.slug.clone()),
            description: Set(payload.description.clone()),
            color: Set(payload
                .color
                .clone()
                .unwrap_or_else(|| "#3B82F6".to_string())),
            ..TagActiveModel::new()
        };

        tag.insert(&self.db).await
    }

    pub async fn update(
        &self,
        id: Uuid,
        payload: &UpdateTagDto,
    ) -> Result<Option<tag_model::Model>, DbErr> {
        let tag = match TagEntity::find_by_id(id).one(&self.db).await? {
            Some(tag) => tag,
            None => return Ok(None),
        };

        let mut active: TagActiveModel = tag.into();

        if let Some(name) = &payload.name {
            active.name = Set(name.clone());
        }
        if let Some(slug) = &payload.slug {
            active.slug = Set(slug.clone());
        }
        if let Some(description) = &payload.description {
            active.description = Set(Some(description.clone()));
        }
        if let Some(color) = &payload.color {
            active.color = Set(color.clone());
        }

        let updated = active.update(&self.db).await?;
        Ok(Some(updated))
    }

    pub async fn delete(&self, id: Uuid) -> Result<DeleteResult, DbErr> {
        TagEntity::delete_by_id(id).exec(&self.db).await
    }

    pub async fn count_all(&self) -> Result<u64, DbErr> {
        TagEntity::find().count(&self.db).await
    }

    /// タグごとの記事数をまとめて取得する（一覧表示用）
    pub async fn post_counts(&self) -> Result<Vec<TagPostCount>, DbErr> {
        PostTagEntity::find()
            .select_only()
            .column(post_tag_model::Column::TagId)
            .column_as(Expr::col(post_tag_model::Column::PostId).count(), "count")
            .group_by(post_tag_model::Column::TagId)
            .into_model::<TagPostCount>()
            .all(&self.db)
            .await
    }

    /// 公開済み記事数の多い順にタグIDと件数を取得する。
    /// 公開記事がひとつもないタグは結果に含まれない。
    pub async fn popular_tag_counts(&self, limit: u64) -> Result<Vec<TagPostCount>, DbErr> {
        PostTagEntity::find()
            .select_only()
            .column(post_tag_model::Column::TagId)
            .column_as(Expr::col(post_tag_model::Column::PostId).count(), "count")
            .join(JoinType::InnerJoin, post_tag_model::Relation::Post.def())
            .filter(post_model::Column::Status.eq(PostStatus::Published.as_str()))
            .group_by(post_tag_model::Column::TagId)
            .order_by(Expr::col(post_tag_model::Column::PostId).count(), Order::Desc)
            .limit(limit)
            .into_model::<TagPostCount>()
            .all(&self.db)
            .await
    }

    pub async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<tag_model::Model>, DbErr> {
        TagEntity::find()
            .filter(tag_model::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
    }
}
