// src/repository/post_view_repository.rs
use crate::domain::post_view_model::{
    self, ActiveModel as PostViewActiveModel, Entity as PostViewEntity,
};
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, ConnectionTrait, DbConn, DbErr,
    EntityTrait, FromQueryResult, Order, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    Set, Statement,
};
use uuid::Uuid;

/// 閲覧イベント作成時のメタデータ
#[derive(Debug, Clone, Default)]
pub struct NewPostView {
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
    pub referer: Option<String>,
}

/// リファラ別の閲覧数
#[derive(Debug, FromQueryResult)]
pub struct ReferrerCount {
    pub referer: Option<String>,
    pub count: i64,
}

/// 日別の閲覧数（記事単位の時系列）
#[derive(Debug, FromQueryResult)]
pub struct DailyViewCount {
    pub date: NaiveDate,
    pub views: i64,
}

/// 日別の閲覧数とユニーク閲覧数（サイト全体の時系列）
#[derive(Debug, FromQueryResult)]
pub struct DailySiteViewCount {
    pub date: NaiveDate,
    pub views: i64,
    pub unique_views: i64,
}

/// 記事別の閲覧イベント数
#[derive(Debug, FromQueryResult)]
pub struct PostViewTally {
    pub post_id: Uuid,
    pub views: i64,
}

pub struct PostViewRepository {
    db: DbConn,
}

impl PostViewRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    /// 閲覧イベントを1件追記する。イベントは作成後に変更されない。
    pub async fn create(
        &self,
        post_id: Uuid,
        metadata: NewPostView,
    ) -> Result<post_view_model::Model, DbErr> {
        let view = PostViewActiveModel {
            post_id: Set(post_id),
            user_agent: Set(metadata.user_agent),
            ip_address: Set(metadata.ip_address),
            referer: Set(metadata.referer),
            ..PostViewActiveModel::new()
        };

        view.insert(&self.db).await
    }

    pub async fn count_for_post(&self, post_id: Uuid) -> Result<u64, DbErr> {
        PostViewEntity::find()
            .filter(post_view_model::Column::PostId.eq(post_id))
            .count(&self.db)
            .await
    }

    pub async fn count_for_post_since(
        &self,
        post_id: Uuid,
        since: DateTime<Utc>,
    ) -> Result<u64, DbErr> {
        PostViewEntity::find()
            .filter(post_view_model::Column::PostId.eq(post_id))
            .filter(post_view_model::Column::CreatedAt.gte(since))
            .count(&self.db)
            .await
    }

    pub async fn count_all(&self) -> Result<u64, DbErr> {
        PostViewEntity::find().count(&self.db).await
    }

    pub async fn count_since(&self, since: DateTime<Utc>) -> Result<u64, DbErr> {
        PostViewEntity::find()
            .filter(post_view_model::Column::CreatedAt.gte(since))
            .count(&self.db)
            .await
    }

    pub async fn count_between(
        &self,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<u64, DbErr> {
        PostViewEntity::find()
            .filter(post_view_model::Column::CreatedAt.gte(from))
            .filter(post_view_model::Column::CreatedAt.lt(until))
            .count(&self.db)
            .await
    }

    /// 記事のユニーク閲覧数（IPアドレス単位）。
    /// DISTINCTはNULLも1行として残すため、IP不明の閲覧もひとつのバケツとして数える。
    pub async fn count_unique_ips_for_post(&self, post_id: Uuid) -> Result<i64, DbErr> {
        let stmt = Statement::from_sql_and_values(
            self.db.get_database_backend(),
            r#"
            SELECT COUNT(*) AS count
            FROM (SELECT DISTINCT ip_address FROM post_views WHERE post_id = $1) AS unique_ips
            "#,
            vec![post_id.into()],
        );

        match self.db.query_one(stmt).await? {
            Some(row) => row.try_get("", "count"),
            None => Ok(0),
        }
    }

    /// 期間内のユニーク閲覧数（IPアドレス単位、NULLバケツ込み）
    pub async fn count_unique_ips_since(&self, since: DateTime<Utc>) -> Result<i64, DbErr> {
        let stmt = Statement::from_sql_and_values(
            self.db.get_database_backend(),
            r#"
            SELECT COUNT(*) AS count
            FROM (SELECT DISTINCT ip_address FROM post_views WHERE created_at >= $1) AS unique_ips
            "#,
            vec![since.into()],
        );

        match self.db.query_one(stmt).await? {
            Some(row) => row.try_get("", "count"),
            None => Ok(0),
        }
    }

    /// 記事のリファラ上位。refererがNULLのイベントは集計対象外。
    pub async fn top_referrers_for_post(
        &self,
        post_id: Uuid,
        limit: u64,
    ) -> Result<Vec<ReferrerCount>, DbErr> {
        PostViewEntity::find()
            .select_only()
            .column(post_view_model::Column::Referer)
            .column_as(Expr::col(post_view_model::Column::Id).count(), "count")
            .filter(post_view_model::Column::PostId.eq(post_id))
            .filter(post_view_model::Column::Referer.is_not_null())
            .group_by(post_view_model::Column::Referer)
            .order_by(Expr::col(post_view_model::Column::Id).count(), Order::Desc)
            .limit(limit)
            .into_model::<ReferrerCount>()
            .all(&self.db)
            .await
    }

    /// 期間内のサイト全体のリファラ上位。refererがNULLのイベントは集計対象外。
    pub async fn top_referrers_since(
        &self,
        since: DateTime<Utc>,
        limit: u64,
    ) -> Result<Vec<ReferrerCount>, DbErr> {
        PostViewEntity::find()
            .select_only()
            .column(post_view_model::Column::Referer)
            .column_as(Expr::col(post_view_model::Column::Id).count(), "count")
            .filter(post_view_model::Column::CreatedAt.gte(since))
            .filter(post_view_model::Column::Referer.is_not_null())
            .group_by(post_view_model::Column::Referer)
            .order_by(Expr::col(post_view_model::Column::Id).count(), Order::Desc)
            .limit(limit)
            .into_model::<ReferrerCount>()
            .all(&self.db)
            .await
    }

    /// 記事の日別閲覧数。イベントが1件もない日は行として現れない（疎な時系列）。
    pub async fn views_by_day_for_post(
        &self,
        post_id: Uuid,
        since: DateTime<Utc>,
    ) -> Result<Vec<DailyViewCount>, DbErr> {
        let stmt = Statement::from_sql_and_values(
            self.db.get_database_backend(),
            r#"
            SELECT
                CAST(created_at AS DATE) AS date,
                COUNT(*) AS views
            FROM post_views
            WHERE post_id = $1
              AND created_at >= $2
            GROUP BY CAST(created_at AS DATE)
            ORDER BY date ASC
            "#,
            vec![post_id.into(), since.into()],
        );

        DailyViewCount::find_by_statement(stmt).all(&self.db).await
    }

    /// サイト全体の日別閲覧数とユニーク閲覧数。
    /// 日別のユニーク数はCOUNT(DISTINCT ip_address)で、NULLのIPは数えない。
    pub async fn views_by_day_sitewide(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<DailySiteViewCount>, DbErr> {
        let stmt = Statement::from_sql_and_values(
            self.db.get_database_backend(),
            r#"
            SELECT
                CAST(created_at AS DATE) AS date,
                COUNT(*) AS views,
                COUNT(DISTINCT ip_address) AS unique_views
            FROM post_views
            WHERE created_at >= $1
            GROUP BY CAST(created_at AS DATE)
            ORDER BY date ASC
            "#,
            vec![since.into()],
        );

        DailySiteViewCount::find_by_statement(stmt)
            .all(&self.db)
            .await
    }

    /// 期間内で最も閲覧された記事。同数の場合はどちらが返るかは不定。
    pub async fn top_post_since(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Option<PostViewTally>, DbErr> {
        let mut results = PostViewEntity::find()
            .select_only()
            .column(post_view_model::Column::PostId)
            .column_as(Expr::col(post_view_model::Column::Id).count(), "views")
            .filter(post_view_model::Column::CreatedAt.gte(since))
            .group_by(post_view_model::Column::PostId)
            .order_by(Expr::col(post_view_model::Column::Id).count(), Order::Desc)
            .limit(1)
            .into_model::<PostViewTally>()
            .all(&self.db)
            .await?;

        Ok(results.pop())
    }
}
