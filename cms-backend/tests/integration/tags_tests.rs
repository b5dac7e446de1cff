// tests/integration/tags_tests.rs

use crate::common::{self, app_helper, auth_helper, test_data};
use axum::http::{Method, StatusCode};
use cms_backend::domain::user_role::UserRole;
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_create_tag_uses_default_color() {
    let app = app_helper::setup_app().await;
    let admin = test_data::create_user(&app.db.connection, UserRole::Admin).await;
    let token = auth_helper::token_for(&admin);

    let req = common::json_request(
        Method::POST,
        "/api/tags",
        Some(json!({ "name": "Rust", "slug": "rust" })),
        Some(&token),
    );
    let res = app.router.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let body = common::body_json(res).await;
    assert_eq!(body["data"]["color"], json!("#3B82F6"));
    assert_eq!(body["data"]["post_count"], json!(0));
}

#[tokio::test]
async fn test_tag_creation_requires_admin() {
    let app = app_helper::setup_app().await;
    let editor = test_data::create_user(&app.db.connection, UserRole::Editor).await;
    let token = auth_helper::token_for(&editor);

    let req = common::json_request(
        Method::POST,
        "/api/tags",
        Some(json!({ "name": "Nope", "slug": "nope" })),
        Some(&token),
    );
    let res = app.router.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_duplicate_tag_slug_conflicts() {
    let app = app_helper::setup_app().await;
    let admin = test_data::create_user(&app.db.connection, UserRole::Admin).await;
    let token = auth_helper::token_for(&admin);

    let payload = json!({ "name": "Rust", "slug": "rust" });

    let req = common::json_request(Method::POST, "/api/tags", Some(payload.clone()), Some(&token));
    let res = app.router.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    // 同じスラッグの2つ目は409
    let req = common::json_request(Method::POST, "/api/tags", Some(payload), Some(&token));
    let res = app.router.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_popular_tags_ordering() {
    let app = app_helper::setup_app().await;
    let db = &app.db.connection;
    let admin = test_data::create_user(db, UserRole::Admin).await;
    let token = auth_helper::token_for(&admin);

    // タグを3つ作成
    let mut tag_ids = Vec::new();
    for slug in ["alpha", "beta", "gamma"] {
        let req = common::json_request(
            Method::POST,
            "/api/tags",
            Some(json!({ "name": slug, "slug": slug })),
            Some(&token),
        );
        let res = app.router.clone().oneshot(req).await.unwrap();
        let body = common::body_json(res).await;
        tag_ids.push(body["data"]["id"].as_str().unwrap().to_string());
    }

    // alpha: 公開記事2件, beta: 公開記事1件, gamma: 下書きのみ
    for (i, status) in [("PUBLISHED", 0), ("PUBLISHED", 0), ("PUBLISHED", 1), ("DRAFT", 2)]
        .iter()
        .enumerate()
    {
        let req = common::json_request(
            Method::POST,
            "/api/posts",
            Some(json!({
                "title": format!("Post {}", i),
                "slug": format!("popular-tags-post-{}", i),
                "content": "body",
                "status": status.0,
                "tag_ids": [tag_ids[status.1]]
            })),
            Some(&token),
        );
        let res = app.router.clone().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    let req = common::json_request(Method::GET, "/api/tags/popular", None, None);
    let res = app.router.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = common::body_json(res).await;
    let tags = body["data"].as_array().unwrap();

    // 公開記事の無いgammaは含まれない
    assert_eq!(tags.len(), 2);
    assert_eq!(tags[0]["slug"], json!("alpha"));
    assert_eq!(tags[1]["slug"], json!("beta"));
}

#[tokio::test]
async fn test_delete_tag_reports_released_posts() {
    let app = app_helper::setup_app().await;
    let admin = test_data::create_user(&app.db.connection, UserRole::Admin).await;
    let token = auth_helper::token_for(&admin);

    let req = common::json_request(
        Method::POST,
        "/api/tags",
        Some(json!({ "name": "Temp", "slug": "temp" })),
        Some(&token),
    );
    let res = app.router.clone().oneshot(req).await.unwrap();
    let tag_id = common::body_json(res).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let req = common::json_request(
        Method::POST,
        "/api/posts",
        Some(json!({
            "title": "Tagged",
            "slug": "tagged-for-delete",
            "content": "body",
            "tag_ids": [tag_id]
        })),
        Some(&token),
    );
    let res = app.router.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let req = common::json_request(
        Method::DELETE,
        &format!("/api/tags/{}", tag_id),
        None,
        Some(&token),
    );
    let res = app.router.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = common::body_json(res).await;
    assert_eq!(body["data"]["success"], json!(true));
    assert_eq!(body["data"]["released_post_count"], json!(1));
}
