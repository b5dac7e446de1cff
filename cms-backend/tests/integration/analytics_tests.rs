// tests/integration/analytics_tests.rs

use crate::common::{self, app_helper, auth_helper, test_data};
use axum::http::{Method, StatusCode};
use chrono::{Duration, Utc};
use cms_backend::api::dto::analytics_dto::RecordViewDto;
use cms_backend::domain::post_status::PostStatus;
use cms_backend::domain::user_role::UserRole;
use cms_backend::repository::post_repository::PostRepository;
use cms_backend::repository::post_view_repository::PostViewRepository;
use cms_backend::service::analytics_service::AnalyticsService;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

#[tokio::test]
async fn test_record_view_creates_event_and_increments_counter() {
    let app = app_helper::setup_app().await;
    let author = test_data::create_user(&app.db.connection, UserRole::Author).await;
    let post = test_data::create_post(&app.db.connection, author.id, PostStatus::Published).await;

    for i in 0..3 {
        let req = common::json_request(
            Method::POST,
            "/api/analytics/views",
            Some(json!({
                "post_id": post.id,
                "user_agent": "integration-test",
                "ip_address": format!("10.0.0.{}", i),
                "referer": "https://example.com/"
            })),
            None,
        );

        let res = app.router.clone().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);

        let body = common::body_json(res).await;
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["data"]["post_id"], json!(post.id));
    }

    // カウンタとログの両方がちょうど3増えている
    let post_repo = PostRepository::new(app.db.connection.clone());
    let view_repo = PostViewRepository::new(app.db.connection.clone());

    let reloaded = post_repo.find_by_id(post.id).await.unwrap().unwrap();
    assert_eq!(reloaded.view_count, 3);

    let event_count = view_repo.count_for_post(post.id).await.unwrap();
    assert_eq!(event_count, 3);
}

#[tokio::test]
async fn test_record_view_rejected_for_draft_post() {
    let app = app_helper::setup_app().await;
    let author = test_data::create_user(&app.db.connection, UserRole::Author).await;
    let draft = test_data::create_post(&app.db.connection, author.id, PostStatus::Draft).await;

    let req = common::json_request(
        Method::POST,
        "/api/analytics/views",
        Some(json!({ "post_id": draft.id })),
        None,
    );

    let res = app.router.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // イベントもカウンタ更新も発生していない
    let post_repo = PostRepository::new(app.db.connection.clone());
    let view_repo = PostViewRepository::new(app.db.connection.clone());

    let reloaded = post_repo.find_by_id(draft.id).await.unwrap().unwrap();
    assert_eq!(reloaded.view_count, 0);
    assert_eq!(view_repo.count_for_post(draft.id).await.unwrap(), 0);
}

#[tokio::test]
async fn test_record_view_rejected_for_missing_post() {
    let app = app_helper::setup_app().await;

    let req = common::json_request(
        Method::POST,
        "/api/analytics/views",
        Some(json!({ "post_id": Uuid::new_v4() })),
        None,
    );

    let res = app.router.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_concurrent_record_views_do_not_lose_increments() {
    let app = app_helper::setup_app().await;
    let author = test_data::create_user(&app.db.connection, UserRole::Author).await;
    let post = test_data::create_post(&app.db.connection, author.id, PostStatus::Published).await;

    let service = Arc::new(AnalyticsService::new(app.db.connection.clone()));

    // 100件の同時記録がすべてカウンタに反映されること（加算の取りこぼしなし）
    let mut handles = Vec::new();
    for i in 0..100 {
        let service = Arc::clone(&service);
        let post_id = post.id;
        handles.push(tokio::spawn(async move {
            service
                .record_view(RecordViewDto {
                    post_id,
                    user_agent: None,
                    ip_address: Some(format!("192.168.0.{}", i % 16)),
                    referer: None,
                })
                .await
        }));
    }

    for handle in handles {
        handle.await.unwrap().expect("record_view should succeed");
    }

    let post_repo = PostRepository::new(app.db.connection.clone());
    let view_repo = PostViewRepository::new(app.db.connection.clone());

    let reloaded = post_repo.find_by_id(post.id).await.unwrap().unwrap();
    assert_eq!(reloaded.view_count, 100);
    assert_eq!(view_repo.count_for_post(post.id).await.unwrap(), 100);
}

#[tokio::test]
async fn test_post_analytics_requires_authentication() {
    let app = app_helper::setup_app().await;
    let author = test_data::create_user(&app.db.connection, UserRole::Author).await;
    let post = test_data::create_post(&app.db.connection, author.id, PostStatus::Published).await;

    let req = common::json_request(
        Method::GET,
        &format!("/api/analytics/posts/{}", post.id),
        None,
        None,
    );

    let res = app.router.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_post_analytics_not_found() {
    let app = app_helper::setup_app().await;
    let user = test_data::create_user(&app.db.connection, UserRole::Author).await;
    let token = auth_helper::token_for(&user);

    let req = common::json_request(
        Method::GET,
        &format!("/api/analytics/posts/{}", Uuid::new_v4()),
        None,
        Some(&token),
    );

    let res = app.router.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_post_analytics_referrer_scenario() {
    let app = app_helper::setup_app().await;
    let author = test_data::create_user(&app.db.connection, UserRole::Author).await;
    let post = test_data::create_post(&app.db.connection, author.id, PostStatus::Published).await;
    let db = &app.db.connection;

    // 今日の閲覧: google.com x2, リファラ無し x1, twitter.com x1
    let now = Utc::now();
    test_data::create_post_view(db, post.id, Some("1.1.1.1"), Some("google.com"), now).await;
    test_data::create_post_view(db, post.id, Some("1.1.1.1"), Some("google.com"), now).await;
    test_data::create_post_view(db, post.id, None, None, now).await;
    test_data::create_post_view(db, post.id, Some("2.2.2.2"), Some("twitter.com"), now).await;

    // 昨日の閲覧
    test_data::create_post_view(db, post.id, Some("1.1.1.1"), None, test_data::yesterday()).await;

    let token = auth_helper::token_for(&author);
    let req = common::json_request(
        Method::GET,
        &format!("/api/analytics/posts/{}", post.id),
        None,
        Some(&token),
    );

    let res = app.router.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = common::body_json(res).await;
    let data = &body["data"];

    assert_eq!(data["views_today"], json!(4));
    assert_eq!(data["views_this_week"], json!(5));

    // リファラ無しのイベントはランキングから除外される
    let referrers = data["top_referrers"].as_array().unwrap();
    assert_eq!(referrers.len(), 2);
    assert_eq!(referrers[0]["referer"], json!("google.com"));
    assert_eq!(referrers[0]["count"], json!(2));
    assert_eq!(referrers[1]["referer"], json!("twitter.com"));
    assert_eq!(referrers[1]["count"], json!(1));

    // ユニーク閲覧数はIP単位で、IP不明分もひとつのバケツとして数える
    // {1.1.1.1, 2.2.2.2, NULL} で3
    assert_eq!(data["unique_views"], json!(3));
}

#[tokio::test]
async fn test_site_analytics_requires_admin() {
    let app = app_helper::setup_app().await;
    let editor = test_data::create_user(&app.db.connection, UserRole::Editor).await;
    let token = auth_helper::token_for(&editor);

    let req = common::json_request(Method::GET, "/api/analytics/site", None, Some(&token));
    let res = app.router.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_site_analytics_days_out_of_range() {
    let app = app_helper::setup_app().await;
    let admin = test_data::create_user(&app.db.connection, UserRole::Admin).await;
    let token = auth_helper::token_for(&admin);

    for days in ["0", "366"] {
        let req = common::json_request(
            Method::GET,
            &format!("/api/analytics/site?days={}", days),
            None,
            Some(&token),
        );
        let res = app.router.clone().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_site_analytics_popular_posts_invariant_under_days() {
    let app = app_helper::setup_app().await;
    let db = &app.db.connection;
    let admin = test_data::create_user(db, UserRole::Admin).await;

    let first = test_data::create_post(db, admin.id, PostStatus::Published).await;
    let second = test_data::create_post(db, admin.id, PostStatus::Published).await;
    let third = test_data::create_post(db, admin.id, PostStatus::Published).await;

    // ランキングは累計カウンタで決まる
    test_data::set_view_count(db, first.clone(), 50).await;
    test_data::set_view_count(db, second.clone(), 30).await;
    test_data::set_view_count(db, third.clone(), 10).await;

    let token = auth_helper::token_for(&admin);
    let mut orders = Vec::new();

    for days in [7, 90] {
        let req = common::json_request(
            Method::GET,
            &format!("/api/analytics/site?days={}", days),
            None,
            Some(&token),
        );
        let res = app.router.clone().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let body = common::body_json(res).await;
        let popular = body["data"]["popular_posts"].as_array().unwrap().clone();
        assert_eq!(popular.len(), 3);
        assert_eq!(popular[0]["view_count"], json!(50));
        assert!(popular[0]["author_name"].is_string());

        let order: Vec<String> = popular
            .iter()
            .map(|p| p["id"].as_str().unwrap().to_string())
            .collect();
        orders.push(order);
    }

    // 期間を変えてもランキングは変わらない
    assert_eq!(orders[0], orders[1]);
}

#[tokio::test]
async fn test_site_analytics_views_by_day_is_sparse() {
    let app = app_helper::setup_app().await;
    let db = &app.db.connection;
    let admin = test_data::create_user(db, UserRole::Admin).await;
    let post = test_data::create_post(db, admin.id, PostStatus::Published).await;

    // 今日2件（同一IP）と3日前1件（IP不明）のみ。間の日にはイベントが無い。
    let now = Utc::now();
    test_data::create_post_view(db, post.id, Some("9.9.9.9"), None, now).await;
    test_data::create_post_view(db, post.id, Some("9.9.9.9"), None, now).await;
    test_data::create_post_view(db, post.id, None, None, now - Duration::days(3)).await;

    let token = auth_helper::token_for(&admin);
    let req = common::json_request(
        Method::GET,
        "/api/analytics/site?days=30",
        None,
        Some(&token),
    );
    let res = app.router.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = common::body_json(res).await;
    let data = &body["data"];

    assert_eq!(data["total_views"], json!(3));
    assert_eq!(data["views_in_period"], json!(3));
    // 期間ユニーク数はNULLバケツ込みで2（9.9.9.9とNULL）
    assert_eq!(data["unique_views_in_period"], json!(2));

    // イベントの無い日は行として現れない
    let by_day = data["views_by_day"].as_array().unwrap();
    assert_eq!(by_day.len(), 2);

    // 昇順で、各日のviewsはその日の正確な件数
    assert_eq!(by_day[0]["views"], json!(1));
    assert_eq!(by_day[1]["views"], json!(2));
    assert!(by_day[0]["date"].as_str().unwrap() < by_day[1]["date"].as_str().unwrap());

    // 日別ユニーク数はCOUNT(DISTINCT ip_address)で、NULLは数えない
    assert_eq!(by_day[0]["unique_views"], json!(0));
    assert_eq!(by_day[1]["unique_views"], json!(1));
}

#[tokio::test]
async fn test_dashboard_stats_growth_and_top_post() {
    let app = app_helper::setup_app().await;
    let db = &app.db.connection;
    let user = test_data::create_user(db, UserRole::Editor).await;
    let post = test_data::create_post(db, user.id, PostStatus::Published).await;
    let other = test_data::create_post(db, user.id, PostStatus::Published).await;

    // 昨日10件、今日15件 => 成長率 50.00%
    for _ in 0..10 {
        test_data::create_post_view(db, post.id, None, None, test_data::yesterday()).await;
    }
    let now = Utc::now();
    for _ in 0..12 {
        test_data::create_post_view(db, post.id, None, None, now).await;
    }
    for _ in 0..3 {
        test_data::create_post_view(db, other.id, None, None, now).await;
    }

    let token = auth_helper::token_for(&user);
    let req = common::json_request(Method::GET, "/api/analytics/dashboard", None, Some(&token));
    let res = app.router.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = common::body_json(res).await;
    let data = &body["data"];

    assert_eq!(data["views_today"], json!(15));
    assert_eq!(data["views_yesterday"], json!(10));
    assert_eq!(data["growth_percentage"], json!(50.0));
    assert_eq!(data["published_posts"], json!(2));
    assert_eq!(data["total_tags"], json!(0));

    // 今日最も閲覧された記事は12件の方
    let top = &data["top_post_today"];
    assert_eq!(top["slug"], json!(post.slug));
    assert_eq!(top["views_today"], json!(12));
}

#[tokio::test]
async fn test_dashboard_stats_zero_state() {
    let app = app_helper::setup_app().await;
    let user = test_data::create_user(&app.db.connection, UserRole::Author).await;
    let token = auth_helper::token_for(&user);

    let req = common::json_request(Method::GET, "/api/analytics/dashboard", None, Some(&token));
    let res = app.router.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = common::body_json(res).await;
    let data = &body["data"];

    assert_eq!(data["views_today"], json!(0));
    assert_eq!(data["views_yesterday"], json!(0));
    // 両日とも0件なら成長率は0
    assert_eq!(data["growth_percentage"], json!(0.0));
    assert!(data["top_post_today"].is_null());
}
