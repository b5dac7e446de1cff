// tests/integration/dashboard_tests.rs

use crate::common::{self, app_helper, auth_helper, test_data};
use axum::http::{Method, StatusCode};
use cms_backend::domain::post_status::PostStatus;
use cms_backend::domain::user_role::UserRole;
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_dashboard_requires_authentication() {
    let app = app_helper::setup_app().await;

    let req = common::json_request(Method::GET, "/api/dashboard/stats", None, None);
    let res = app.router.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_dashboard_overview_counts() {
    let app = app_helper::setup_app().await;
    let db = &app.db.connection;
    let editor = test_data::create_user(db, UserRole::Editor).await;

    test_data::create_post(db, editor.id, PostStatus::Published).await;
    test_data::create_post(db, editor.id, PostStatus::Published).await;
    test_data::create_post(db, editor.id, PostStatus::Draft).await;
    test_data::create_post(db, editor.id, PostStatus::Scheduled).await;

    let token = auth_helper::token_for(&editor);
    let req = common::json_request(Method::GET, "/api/dashboard/stats", None, Some(&token));
    let res = app.router.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = common::body_json(res).await;
    let data = &body["data"];

    assert_eq!(data["total_posts"], json!(4));
    assert_eq!(data["published_posts"], json!(2));
    assert_eq!(data["draft_posts"], json!(1));
    assert_eq!(data["total_categories"], json!(0));
    // マイグレーションで作成される初期管理者 + テストユーザー
    assert_eq!(data["total_users"], json!(2));
}

#[tokio::test]
async fn test_posts_by_status_breakdown() {
    let app = app_helper::setup_app().await;
    let db = &app.db.connection;
    let editor = test_data::create_user(db, UserRole::Editor).await;

    test_data::create_post(db, editor.id, PostStatus::Published).await;
    test_data::create_post(db, editor.id, PostStatus::Draft).await;
    test_data::create_post(db, editor.id, PostStatus::Draft).await;
    test_data::create_post(db, editor.id, PostStatus::Archived).await;

    let token = auth_helper::token_for(&editor);
    let req = common::json_request(
        Method::GET,
        "/api/dashboard/posts-by-status",
        None,
        Some(&token),
    );
    let res = app.router.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = common::body_json(res).await;
    let data = &body["data"];

    assert_eq!(data["draft"], json!(2));
    assert_eq!(data["published"], json!(1));
    assert_eq!(data["scheduled"], json!(0));
    assert_eq!(data["archived"], json!(1));
}

#[tokio::test]
async fn test_recent_posts_limit() {
    let app = app_helper::setup_app().await;
    let db = &app.db.connection;
    let editor = test_data::create_user(db, UserRole::Editor).await;

    for _ in 0..7 {
        test_data::create_post(db, editor.id, PostStatus::Published).await;
    }

    let token = auth_helper::token_for(&editor);

    // デフォルトは5件
    let req = common::json_request(Method::GET, "/api/dashboard/recent-posts", None, Some(&token));
    let res = app.router.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = common::body_json(res).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 5);

    // 範囲外のlimitは400
    let req = common::json_request(
        Method::GET,
        "/api/dashboard/recent-posts?limit=11",
        None,
        Some(&token),
    );
    let res = app.router.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}
