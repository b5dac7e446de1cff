// tests/common/test_data.rs

use chrono::{DateTime, Duration, Local, LocalResult, NaiveTime, TimeZone, Utc};
use cms_backend::domain::post_model;
use cms_backend::domain::post_status::PostStatus;
use cms_backend::domain::post_view_model;
use cms_backend::domain::user_model;
use cms_backend::domain::user_role::UserRole;
use sea_orm::{ActiveModelBehavior, ActiveModelTrait, DatabaseConnection, Set};
use uuid::Uuid;

pub async fn create_user(db: &DatabaseConnection, role: UserRole) -> user_model::Model {
    let suffix = Uuid::new_v4().simple().to_string();

    let user = user_model::ActiveModel {
        email: Set(format!("user-{}@example.com", suffix)),
        name: Set(format!("Test User {}", &suffix[..8])),
        password_hash: Set("not-a-real-hash".to_string()),
        role: Set(role.as_str().to_string()),
        image: Set(None),
        ..user_model::ActiveModel::new()
    };

    user.insert(db).await.expect("insert test user")
}

pub async fn create_post(
    db: &DatabaseConnection,
    author_id: Uuid,
    status: PostStatus,
) -> post_model::Model {
    let suffix = Uuid::new_v4().simple().to_string();

    let post = post_model::ActiveModel {
        title: Set(format!("Test Post {}", &suffix[..8])),
        slug: Set(format!("test-post-{}", suffix)),
        content: Set("Lorem ipsum dolor sit amet.".to_string()),
        excerpt: Set(None),
        featured_image: Set(None),
        status: Set(status.as_str().to_string()),
        author_id: Set(author_id),
        published_at: Set(if status.is_published() {
            Some(Utc::now())
        } else {
            None
        }),
        meta_title: Set(None),
        meta_description: Set(None),
        focus_keyword: Set(None),
        og_image: Set(None),
        canonical_url: Set(None),
        ..post_model::ActiveModel::new()
    };

    post.insert(db).await.expect("insert test post")
}

/// 閲覧イベントを指定時刻で直接シードする。
/// 閲覧カウンタは更新しない（ログとカウンタを独立に検証するため）。
pub async fn create_post_view(
    db: &DatabaseConnection,
    post_id: Uuid,
    ip_address: Option<&str>,
    referer: Option<&str>,
    created_at: DateTime<Utc>,
) -> post_view_model::Model {
    let view = post_view_model::ActiveModel {
        post_id: Set(post_id),
        user_agent: Set(None),
        ip_address: Set(ip_address.map(|s| s.to_string())),
        referer: Set(referer.map(|s| s.to_string())),
        created_at: Set(created_at),
        ..post_view_model::ActiveModel::new()
    };

    view.insert(db).await.expect("insert test post view")
}

/// 閲覧カウンタを直接設定する（人気記事ランキングのシード用）
pub async fn set_view_count(db: &DatabaseConnection, post: post_model::Model, count: i64) {
    let mut active: post_model::ActiveModel = post.into();
    active.view_count = Set(count);
    active.update(db).await.expect("set view count");
}

/// サーバーのローカル時刻での当日0時（アプリケーションと同じ境界）
pub fn start_of_today() -> DateTime<Utc> {
    let local_now = Local::now();
    let midnight = local_now.date_naive().and_time(NaiveTime::MIN);

    match Local.from_local_datetime(&midnight) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt.with_timezone(&Utc),
        LocalResult::None => local_now.with_timezone(&Utc),
    }
}

/// 昨日の範囲に収まる時刻
pub fn yesterday() -> DateTime<Utc> {
    start_of_today() - Duration::hours(1)
}
