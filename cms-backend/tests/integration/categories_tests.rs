// tests/integration/categories_tests.rs

use crate::common::{self, app_helper, auth_helper, test_data};
use axum::http::{Method, StatusCode};
use cms_backend::domain::user_role::UserRole;
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_category_crud_and_post_counts() {
    let app = app_helper::setup_app().await;
    let author = test_data::create_user(&app.db.connection, UserRole::Author).await;
    let token = auth_helper::token_for(&author);

    // 作成
    let req = common::json_request(
        Method::POST,
        "/api/categories",
        Some(json!({ "name": "Tech", "slug": "tech", "description": "Technology" })),
        Some(&token),
    );
    let res = app.router.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let category_id = common::body_json(res).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    // 同じスラッグは409
    let req = common::json_request(
        Method::POST,
        "/api/categories",
        Some(json!({ "name": "Tech 2", "slug": "tech" })),
        Some(&token),
    );
    let res = app.router.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);

    // 記事を関連付けて一覧の記事数に反映されること
    let req = common::json_request(
        Method::POST,
        "/api/posts",
        Some(json!({
            "title": "Categorized",
            "slug": "categorized",
            "content": "body",
            "status": "PUBLISHED",
            "category_ids": [category_id]
        })),
        Some(&token),
    );
    let res = app.router.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let req = common::json_request(Method::GET, "/api/categories", None, None);
    let res = app.router.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = common::body_json(res).await;
    let categories = body["data"].as_array().unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0]["post_count"], json!(1));

    // 更新
    let req = common::json_request(
        Method::PATCH,
        &format!("/api/categories/{}", category_id),
        Some(json!({ "name": "Technology" })),
        Some(&token),
    );
    let res = app.router.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = common::body_json(res).await;
    assert_eq!(body["data"]["name"], json!("Technology"));
}

#[tokio::test]
async fn test_category_by_slug_returns_published_posts_only() {
    let app = app_helper::setup_app().await;
    let author = test_data::create_user(&app.db.connection, UserRole::Author).await;
    let token = auth_helper::token_for(&author);

    let req = common::json_request(
        Method::POST,
        "/api/categories",
        Some(json!({ "name": "Mixed", "slug": "mixed" })),
        Some(&token),
    );
    let res = app.router.clone().oneshot(req).await.unwrap();
    let category_id = common::body_json(res).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    for (slug, status) in [("cat-pub", "PUBLISHED"), ("cat-draft", "DRAFT")] {
        let req = common::json_request(
            Method::POST,
            "/api/posts",
            Some(json!({
                "title": slug,
                "slug": slug,
                "content": "body",
                "status": status,
                "category_ids": [category_id]
            })),
            Some(&token),
        );
        let res = app.router.clone().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    // スラッグ取得（公開側）は公開済みのみ
    let req = common::json_request(Method::GET, "/api/categories/slug/mixed", None, None);
    let res = app.router.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = common::body_json(res).await;
    let posts = body["data"]["posts"].as_array().unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0]["slug"], json!("cat-pub"));

    // ID取得（管理側）は全ステータス
    let req = common::json_request(
        Method::GET,
        &format!("/api/categories/{}", category_id),
        None,
        None,
    );
    let res = app.router.clone().oneshot(req).await.unwrap();
    let body = common::body_json(res).await;
    assert_eq!(body["data"]["posts"].as_array().unwrap().len(), 2);
}
