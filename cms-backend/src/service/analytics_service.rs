// src/service/analytics_service.rs

use crate::api::dto::analytics_dto::{
    DailySiteViewsDto, DailyViewsDto, DashboardStatsDto, PopularPostDto, PostAnalyticsDto,
    PostViewDto, RecordViewDto, ReferrerStatDto, SiteAnalyticsDto, TopPostTodayDto,
};
use crate::db::DbPool;
use crate::domain::post_status::PostStatus;
use crate::error::{AppError, AppResult};
use crate::repository::post_repository::PostRepository;
use crate::repository::post_view_repository::{NewPostView, PostViewRepository};
use crate::repository::tag_repository::TagRepository;
use chrono::{DateTime, Duration, Local, LocalResult, NaiveTime, TimeZone, Utc};
use std::sync::Arc;
use tracing::{error, info};

/// リファラ上位・人気記事の最大件数
const TOP_ENTRIES_LIMIT: u64 = 10;

pub struct AnalyticsService {
    post_repo: Arc<PostRepository>,
    post_view_repo: Arc<PostViewRepository>,
    tag_repo: Arc<TagRepository>,
}

impl AnalyticsService {
    pub fn new(db_pool: DbPool) -> Self {
        Self {
            post_repo: Arc::new(PostRepository::new(db_pool.clone())),
            post_view_repo: Arc::new(PostViewRepository::new(db_pool.clone())),
            tag_repo: Arc::new(TagRepository::new(db_pool)),
        }
    }

    /// 閲覧イベントを記録し、記事の閲覧カウンタを1加算する。
    ///
    /// 公開済みでない記事への記録は拒否する。重複排除・レート制限・
    /// ボット除外は行わず、呼び出しごとに必ず1イベントを追記する。
    pub async fn record_view(&self, payload: RecordViewDto) -> AppResult<PostViewDto> {
        let post = self
            .post_repo
            .find_published_by_id(payload.post_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFoundOrUnpublished("Post not found or not published".to_string())
            })?;

        let view = self
            .post_view_repo
            .create(
                post.id,
                NewPostView {
                    user_agent: payload.user_agent,
                    ip_address: payload.ip_address,
                    referer: payload.referer,
                },
            )
            .await?;

        // イベント追記後のカウンタ加算に失敗すると、view_countはログより
        // 少ない値のままになる。補償削除は行わないため、運用で追えるよう
        // この失敗だけは区別してログに残す。
        if let Err(e) = self.post_repo.increment_view_count(post.id).await {
            error!(
                post_id = %post.id,
                view_id = %view.id,
                error = %e,
                "view_count increment failed after view event insert; counter now under-counts the log"
            );
            return Err(e.into());
        }

        Ok(view.into())
    }

    /// 記事単位の分析データを集計する。
    ///
    /// total_viewsのみ非正規化カウンタを信頼し、それ以外は呼び出し時点の
    /// 閲覧ログから毎回算出する。キャッシュ層は持たない。
    pub async fn get_post_analytics(&self, post_id: uuid::Uuid) -> AppResult<PostAnalyticsDto> {
        let post = self
            .post_repo
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

        let today = start_of_local_day(Utc::now());
        let this_week = today - Duration::days(7);
        let this_month = today - Duration::days(30);

        let views_today = self
            .post_view_repo
            .count_for_post_since(post_id, today)
            .await?;
        let views_this_week = self
            .post_view_repo
            .count_for_post_since(post_id, this_week)
            .await?;
        let views_this_month = self
            .post_view_repo
            .count_for_post_since(post_id, this_month)
            .await?;

        let unique_views = self
            .post_view_repo
            .count_unique_ips_for_post(post_id)
            .await?;

        let top_referrers = self
            .post_view_repo
            .top_referrers_for_post(post_id, TOP_ENTRIES_LIMIT)
            .await?
            .into_iter()
            .map(|r| ReferrerStatDto {
                referer: r.referer.unwrap_or_else(|| "Direct".to_string()),
                count: r.count,
            })
            .collect();

        let views_by_day = self
            .post_view_repo
            .views_by_day_for_post(post_id, this_month)
            .await?
            .into_iter()
            .map(|d| DailyViewsDto {
                date: d.date.format("%Y-%m-%d").to_string(),
                views: d.views,
            })
            .collect();

        Ok(PostAnalyticsDto {
            total_views: post.view_count,
            unique_views,
            views_today: views_today as i64,
            views_this_week: views_this_week as i64,
            views_this_month: views_this_month as i64,
            top_referrers,
            views_by_day,
        })
    }

    /// サイト全体の分析データを集計する。
    ///
    /// 期間は現在時刻からのスライディングウィンドウ（時刻を保持したまま
    /// days日さかのぼる）。人気記事ランキングは累計カウンタに基づくため、
    /// daysには依存しない。
    pub async fn get_site_analytics(&self, days: i32) -> AppResult<SiteAnalyticsDto> {
        let start_date = Utc::now() - Duration::days(days as i64);

        let total_views = self.post_view_repo.count_all().await?;
        let views_in_period = self.post_view_repo.count_since(start_date).await?;
        let unique_views_in_period = self
            .post_view_repo
            .count_unique_ips_since(start_date)
            .await?;

        let popular = self.post_repo.find_popular(TOP_ENTRIES_LIMIT).await?;
        let authors = self.post_repo.load_authors(&popular).await?;
        let popular_posts = popular
            .into_iter()
            .zip(authors)
            .map(|(post, author)| PopularPostDto {
                id: post.id,
                title: post.title,
                slug: post.slug,
                view_count: post.view_count,
                author_name: author.map(|a| a.name),
            })
            .collect();

        let views_by_day = self
            .post_view_repo
            .views_by_day_sitewide(start_date)
            .await?
            .into_iter()
            .map(|d| DailySiteViewsDto {
                date: d.date.format("%Y-%m-%d").to_string(),
                views: d.views,
                unique_views: d.unique_views,
            })
            .collect();

        let top_referrers = self
            .post_view_repo
            .top_referrers_since(start_date, TOP_ENTRIES_LIMIT)
            .await?
            .into_iter()
            .map(|r| ReferrerStatDto {
                referer: r.referer.unwrap_or_else(|| "Direct".to_string()),
                count: r.count,
            })
            .collect();

        info!(days = days, views_in_period = views_in_period, "Site analytics computed");

        Ok(SiteAnalyticsDto {
            total_views: total_views as i64,
            views_in_period: views_in_period as i64,
            unique_views_in_period,
            popular_posts,
            views_by_day,
            top_referrers,
        })
    }

    /// ダッシュボード用の今日・昨日の統計と成長率を集計する
    pub async fn get_dashboard_stats(&self) -> AppResult<DashboardStatsDto> {
        let today = start_of_local_day(Utc::now());
        let yesterday = today - Duration::days(1);

        let views_today = self.post_view_repo.count_since(today).await? as i64;
        let views_yesterday = self.post_view_repo.count_between(yesterday, today).await? as i64;

        let growth_percentage = calculate_growth_percentage(views_today, views_yesterday);

        let published_posts = self.post_repo.count_by_status(PostStatus::Published).await? as i64;
        let total_tags = self.tag_repo.count_all().await? as i64;

        let top_post_today = match self.post_view_repo.top_post_since(today).await? {
            Some(tally) => self
                .post_repo
                .find_by_id(tally.post_id)
                .await?
                .map(|post| TopPostTodayDto {
                    title: post.title,
                    slug: post.slug,
                    view_count: post.view_count,
                    views_today: tally.views,
                }),
            None => None,
        };

        Ok(DashboardStatsDto {
            views_today,
            views_yesterday,
            growth_percentage,
            published_posts,
            total_tags,
            top_post_today,
        })
    }
}

/// サーバーのローカル時刻での当日0時をUTCで返す
fn start_of_local_day(now: DateTime<Utc>) -> DateTime<Utc> {
    let local_now = now.with_timezone(&Local);
    let midnight = local_now.date_naive().and_time(NaiveTime::MIN);

    match Local.from_local_datetime(&midnight) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt.with_timezone(&Utc),
        // 夏時間の切り替えで0時が存在しない日は現在時刻を起点にする
        LocalResult::None => now,
    }
}

/// 前日比の成長率（%）を小数第2位に丸めて返す。
///
/// 前日が0件の場合は、当日に閲覧があれば100、なければ0とする。
/// ゼロ除算やNaNを返さないための固定ポリシーで、変更してはならない。
fn calculate_growth_percentage(views_today: i64, views_yesterday: i64) -> f64 {
    let growth = if views_yesterday == 0 {
        if views_today > 0 {
            100.0
        } else {
            0.0
        }
    } else {
        ((views_today - views_yesterday) as f64 / views_yesterday as f64) * 100.0
    };

    (growth * 100.0).round() / 100.0
}
