// tests/integration/users_tests.rs

use crate::common::{self, app_helper, auth_helper, test_data};
use axum::http::{Method, StatusCode};
use cms_backend::domain::user_role::UserRole;
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_get_profile() {
    let app = app_helper::setup_app().await;
    let user = test_data::create_user(&app.db.connection, UserRole::Author).await;
    let token = auth_helper::token_for(&user);

    let req = common::json_request(Method::GET, "/api/users/me", None, Some(&token));
    let res = app.router.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = common::body_json(res).await;
    assert_eq!(body["data"]["id"], json!(user.id));
    assert_eq!(body["data"]["email"], json!(user.email));
    assert_eq!(body["data"]["role"], json!("AUTHOR"));
    // パスワードハッシュは決して返さない
    assert!(body["data"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_user_management_requires_admin() {
    let app = app_helper::setup_app().await;
    let author = test_data::create_user(&app.db.connection, UserRole::Author).await;
    let token = auth_helper::token_for(&author);

    let req = common::json_request(Method::GET, "/api/admin/users", None, Some(&token));
    let res = app.router.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_updates_role_and_deletes_user() {
    let app = app_helper::setup_app().await;
    let db = &app.db.connection;
    let admin = test_data::create_user(db, UserRole::Admin).await;
    let target = test_data::create_user(db, UserRole::Author).await;
    let token = auth_helper::token_for(&admin);

    // ロール変更
    let req = common::json_request(
        Method::PATCH,
        &format!("/api/admin/users/{}/role", target.id),
        Some(json!({ "role": "EDITOR" })),
        Some(&token),
    );
    let res = app.router.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = common::body_json(res).await;
    assert_eq!(body["data"]["role"], json!("EDITOR"));

    // 一覧に記事数が含まれる
    let req = common::json_request(Method::GET, "/api/admin/users", None, Some(&token));
    let res = app.router.clone().oneshot(req).await.unwrap();
    let body = common::body_json(res).await;
    let items = body["data"]["items"].as_array().unwrap();
    assert!(items.iter().all(|u| u["post_count"].is_number()));

    // 削除して404になること
    let req = common::json_request(
        Method::DELETE,
        &format!("/api/admin/users/{}", target.id),
        None,
        Some(&token),
    );
    let res = app.router.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let req = common::json_request(
        Method::PATCH,
        &format!("/api/admin/users/{}/role", target.id),
        Some(json!({ "role": "AUTHOR" })),
        Some(&token),
    );
    let res = app.router.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
