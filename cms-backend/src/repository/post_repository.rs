// src/repository/post_repository.rs
use crate::api::dto::post_dto::{CreatePostDto, PostFilterDto, PostSearchQuery, UpdatePostDto};
use crate::domain::post_category_model::{
    self, ActiveModel as PostCategoryActiveModel, Entity as PostCategoryEntity,
};
use crate::domain::post_model::{self, ActiveModel as PostActiveModel, Entity as PostEntity};
use crate::domain::post_status::PostStatus;
use crate::domain::post_tag_model::{
    self, ActiveModel as PostTagActiveModel, Entity as PostTagEntity,
};
use crate::domain::{category_model, tag_model, user_model};
use chrono::Utc;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, Condition, DbConn, DbErr, DeleteResult,
    EntityTrait, JoinType, LoaderTrait, Order, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, Set,
};
use uuid::Uuid;

pub struct PostRepository {
    db: DbConn,
}

impl PostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<post_model::Model>, DbErr> {
        PostEntity::find_by_id(id).one(&self.db).await
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<post_model::Model>, DbErr> {
        PostEntity::find()
            .filter(post_model::Column::Slug.eq(slug))
            .one(&self.db)
            .await
    }

    /// 公開済みの記事のみを取得する。閲覧記録など公開側の経路で使う。
    pub async fn find_published_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<post_model::Model>, DbErr> {
        PostEntity::find_by_id(id)
            .filter(post_model::Column::Status.eq(PostStatus::Published.as_str()))
            .one(&self.db)
            .await
    }

    pub async fn find_published_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<post_model::Model>, DbErr> {
        PostEntity::find()
            .filter(post_model::Column::Slug.eq(slug))
            .filter(post_model::Column::Status.eq(PostStatus::Published.as_str()))
            .one(&self.db)
            .await
    }

    pub async fn find_with_filter(
        &self,
        filter: &PostFilterDto,
    ) -> Result<(Vec<post_model::Model>, u64), DbErr> {
        let mut query = PostEntity::find();

        // ステータスフィルタ
        if let Some(status) = filter.status {
            query = query.filter(post_model::Column::Status.eq(status.as_str()));
        }

        query = query.order_by(post_model::Column::CreatedAt, Order::Desc);

        // 総件数を取得
        let total_items = query.clone().count(&self.db).await?;

        // ページネーション
        let per_page = std::cmp::min(filter.per_page.unwrap_or(10), 100);
        let page = std::cmp::max(filter.page.unwrap_or(1), 1);
        let offset = (page - 1) * per_page;

        let posts = query.limit(per_page).offset(offset).all(&self.db).await?;

        Ok((posts, total_items))
    }

    /// 管理画面の横断検索。本文・タイトル・抜粋の部分一致に加えて
    /// ステータス・カテゴリ・著者名・公開日範囲で絞り込む。
    pub async fn search(
        &self,
        query_params: &PostSearchQuery,
    ) -> Result<(Vec<post_model::Model>, u64), DbErr> {
        let mut query = PostEntity::find();
        let mut conditions = Condition::all();

        // ステータスフィルタ
        if let Some(status) = query_params.status {
            conditions = conditions.add(post_model::Column::Status.eq(status.as_str()));
        }

        // カテゴリフィルタ（スラッグ指定、中間テーブル経由）
        if let Some(category_slug) = &query_params.category {
            query = query
                .join(
                    JoinType::InnerJoin,
                    post_category_model::Relation::Post.def().rev(),
                )
                .join(
                    JoinType::InnerJoin,
                    post_category_model::Relation::Category.def(),
                );
            conditions = conditions.add(category_model::Column::Slug.eq(category_slug.as_str()));
        }

        // 著者名フィルタ（部分一致、大文字小文字を区別しない）
        if let Some(author_name) = &query_params.author {
            query = query.join(JoinType::InnerJoin, post_model::Relation::Author.def());
            conditions = conditions.add(
                Expr::col((user_model::Entity, user_model::Column::Name))
                    .ilike(format!("%{}%", author_name)),
            );
        }

        // 公開日範囲フィルタ
        if let Some(date_from) = query_params.date_from {
            conditions = conditions.add(post_model::Column::PublishedAt.gte(date_from));
        }

        if let Some(date_to) = query_params.date_to {
            conditions = conditions.add(post_model::Column::PublishedAt.lte(date_to));
        }

        // キーワード検索（タイトル・本文・抜粋）
        if let Some(search) = &query_params.search {
            let pattern = format!("%{}%", search);
            conditions = conditions.add(
                Condition::any()
                    .add(Expr::col(post_model::Column::Title).ilike(pattern.clone()))
                    .add(Expr::col(post_model::Column::Content).ilike(pattern.clone()))
                    .add(Expr::col(post_model::Column::Excerpt).ilike(pattern)),
            );
        }

        query = query.filter(conditions);

        // 総件数を取得
        let total_items = query.clone().count(&self.db).await?;

        // パフォーマンスのため結果は50件まで
        let posts = query
            .order_by(post_model::Column::CreatedAt, Order::Desc)
            .limit(50)
            .all(&self.db)
            .await?;

        Ok((posts, total_items))
    }

    pub async fn create(
        &self,
        author_id: Uuid,
        payload: &CreatePostDto,
    ) -> Result<post_model::Model, DbErr> {
        let status = payload.status.unwrap_or_default();

        let post = PostActiveModel {
            title: Set(payload.title.clone()),
            slug: Set(payload.slug.clone()),
            content: Set(payload.content.clone()),
            excerpt: Set(payload.excerpt.clone()),
            featured_image: Set(payload.featured_image.clone()),
            status: Set(status.as_str().to_string()),
            author_id: Set(author_id),
            meta_title: Set(payload.meta_title.clone()),
            meta_description: Set(payload.meta_description.clone()),
            focus_keyword: Set(payload.focus_keyword.clone()),
            og_image: Set(payload.og_image.clone()),
            canonical_url: Set(payload.canonical_url.clone()),
            ..PostActiveModel::new()
        };

        post.insert(&self.db).await
    }

    pub async fn update(
        &self,
        id: Uuid,
        payload: &UpdatePostDto,
    ) -> Result<Option<post_model::Model>, DbErr> {
        let post = match PostEntity::find_by_id(id).one(&self.db).await? {
            Some(post) => post,
            None => return Ok(None),
        };

        let mut active: PostActiveModel = post.into();

        if let Some(title) = &payload.title {
            active.title = Set(title.clone());
        }
        if let Some(slug) = &payload.slug {
            active.slug = Set(slug.clone());
        }
        if let Some(content) = &payload.content {
            active.content = Set(content.clone());
        }
        if let Some(excerpt) = &payload.excerpt {
            active.excerpt = Set(Some(excerpt.clone()));
        }
        if let Some(featured_image) = &payload.featured_image {
            active.featured_image = Set(Some(featured_image.clone()));
        }
        if let Some(status) = payload.status {
            active.status = Set(status.as_str().to_string());
        }
        if let Some(meta_title) = &payload.meta_title {
            active.meta_title = Set(Some(meta_title.clone()));
        }
        if let Some(meta_description) = &payload.meta_description {
            active.meta_description = Set(Some(meta_description.clone()));
        }
        if let Some(focus_keyword) = &payload.focus_keyword {
            active.focus_keyword = Set(Some(focus_keyword.clone()));
        }
        if let Some(og_image) = &payload.og_image {
            active.og_image = Set(Some(og_image.clone()));
        }
        if let Some(canonical_url) = &payload.canonical_url {
            active.canonical_url = Set(Some(canonical_url.clone()));
        }

        let updated = active.update(&self.db).await?;
        Ok(Some(updated))
    }

    pub async fn delete(&self, id: Uuid) -> Result<DeleteResult, DbErr> {
        PostEntity::delete_by_id(id).exec(&self.db).await
    }

    /// ステータスをPUBLISHEDにし、公開日時を現在時刻に設定する
    pub async fn publish(&self, id: Uuid) -> Result<Option<post_model::Model>, DbErr> {
        let post = match PostEntity::find_by_id(id).one(&self.db).await? {
            Some(post) => post,
            None => return Ok(None),
        };

        let mut active: PostActiveModel = post.into();
        active.status = Set(PostStatus::Published.as_str().to_string());
        active.published_at = Set(Some(Utc::now()));

        let updated = active.update(&self.db).await?;
        Ok(Some(updated))
    }

    /// 閲覧カウンタをストレージ側でアトミックに1加算する。
    /// アプリケーション側でのread-modify-writeは並行記録で加算を取りこぼすため行わない。
    pub async fn increment_view_count(&self, id: Uuid) -> Result<u64, DbErr> {
        let result = PostEntity::update_many()
            .col_expr(
                post_model::Column::ViewCount,
                Expr::col(post_model::Column::ViewCount).add(1),
            )
            .filter(post_model::Column::Id.eq(id))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// 累計閲覧数による人気記事ランキング。期間パラメータには依存しない。
    pub async fn find_popular(&self, limit: u64) -> Result<Vec<post_model::Model>, DbErr> {
        PostEntity::find()
            .filter(post_model::Column::Status.eq(PostStatus::Published.as_str()))
            .filter(post_model::Column::ViewCount.gt(0))
            .order_by(post_model::Column::ViewCount, Order::Desc)
            .limit(limit)
            .all(&self.db)
            .await
    }

    pub async fn find_recent(&self, limit: u64) -> Result<Vec<post_model::Model>, DbErr> {
        PostEntity::find()
            .order_by(post_model::Column::CreatedAt, Order::Desc)
            .limit(limit)
            .all(&self.db)
            .await
    }

    pub async fn find_for_category(
        &self,
        category_id: Uuid,
    ) -> Result<Vec<post_model::Model>, DbErr> {
        PostEntity::find()
            .join(
                JoinType::InnerJoin,
                post_category_model::Relation::Post.def().rev(),
            )
            .filter(post_category_model::Column::CategoryId.eq(category_id))
            .order_by(post_model::Column::CreatedAt, Order::Desc)
            .all(&self.db)
            .await
    }

    pub async fn find_published_for_category(
        &self,
        category_id: Uuid,
    ) -> Result<Vec<post_model::Model>, DbErr> {
        PostEntity::find()
            .join(
                JoinType::InnerJoin,
                post_category_model::Relation::Post.def().rev(),
            )
            .filter(post_category_model::Column::CategoryId.eq(category_id))
            .filter(post_model::Column::Status.eq(PostStatus::Published.as_str()))
            .order_by(post_model::Column::PublishedAt, Order::Desc)
            .all(&self.db)
            .await
    }

    pub async fn find_published_for_tag(
        &self,
        tag_id: Uuid,
    ) -> Result<Vec<post_model::Model>, DbErr> {
        PostEntity::find()
            .join(
                JoinType::InnerJoin,
                post_tag_model::Relation::Post.def().rev(),
            )
            .filter(post_tag_model::Column::TagId.eq(tag_id))
            .filter(post_model::Column::Status.eq(PostStatus::Published.as_str()))
            .order_by(post_model::Column::PublishedAt, Order::Desc)
            .all(&self.db)
            .await
    }

    pub async fn count_all(&self) -> Result<u64, DbErr> {
        PostEntity::find().count(&self.db).await
    }

    pub async fn count_by_status(&self, status: PostStatus) -> Result<u64, DbErr> {
        PostEntity::find()
            .filter(post_model::Column::Status.eq(status.as_str()))
            .count(&self.db)
            .await
    }

    /// 記事とカテゴリの関連を指定のIDセットで置き換える
    pub async fn replace_categories(
        &self,
        post_id: Uuid,
        category_ids: &[Uuid],
    ) -> Result<(), DbErr> {
        PostCategoryEntity::delete_many()
            .filter(post_category_model::Column::PostId.eq(post_id))
            .exec(&self.db)
            .await?;

        if !category_ids.is_empty() {
            let links = category_ids.iter().map(|category_id| PostCategoryActiveModel {
                post_id: Set(post_id),
                category_id: Set(*category_id),
            });
            PostCategoryEntity::insert_many(links).exec(&self.db).await?;
        }

        Ok(())
    }

    /// 記事とタグの関連を指定のIDセットで置き換える
    pub async fn replace_tags(&self, post_id: Uuid, tag_ids: &[Uuid]) -> Result<(), DbErr> {
        PostTagEntity::delete_many()
            .filter(post_tag_model::Column::PostId.eq(post_id))
            .exec(&self.db)
            .await?;

        if !tag_ids.is_empty() {
            let links = tag_ids.iter().map(|tag_id| PostTagActiveModel {
                post_id: Set(post_id),
                tag_id: Set(*tag_id),
            });
            PostTagEntity::insert_many(links).exec(&self.db).await?;
        }

        Ok(())
    }

    pub async fn load_authors(
        &self,
        posts: &[post_model::Model],
    ) -> Result<Vec<Option<user_model::Model>>, DbErr> {
        posts.load_one(user_model::Entity, &self.db).await
    }

    pub async fn load_categories(
        &self,
        posts: &[post_model::Model],
    ) -> Result<Vec<Vec<category_model::Model>>, DbErr> {
        posts
            .load_many_to_many(category_model::Entity, PostCategoryEntity, &self.db)
            .await
    }

    pub async fn load_tags(
        &self,
        posts: &[post_model::Model],
    ) -> Result<Vec<Vec<tag_model::Model>>, DbErr> {
        posts
            .load_many_to_many(tag_model::Entity, PostTagEntity, &self.db)
            .await
    }
}
