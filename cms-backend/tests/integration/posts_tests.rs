// tests/integration/posts_tests.rs

use crate::common::{self, app_helper, auth_helper, test_data};
use axum::http::{Method, StatusCode};
use cms_backend::domain::post_status::PostStatus;
use cms_backend::domain::user_role::UserRole;
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_create_post_requires_authentication() {
    let app = app_helper::setup_app().await;

    let req = common::json_request(
        Method::POST,
        "/api/posts",
        Some(json!({
            "title": "Unauthenticated",
            "slug": "unauthenticated",
            "content": "body"
        })),
        None,
    );

    let res = app.router.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_post_validation() {
    let app = app_helper::setup_app().await;
    let author = test_data::create_user(&app.db.connection, UserRole::Author).await;
    let token = auth_helper::token_for(&author);

    // タイトル空は拒否
    let req = common::json_request(
        Method::POST,
        "/api/posts",
        Some(json!({
            "title": "",
            "slug": "empty-title",
            "content": "body"
        })),
        Some(&token),
    );

    let res = app.router.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_post_crud_flow() {
    let app = app_helper::setup_app().await;
    let author = test_data::create_user(&app.db.connection, UserRole::Author).await;
    let token = auth_helper::token_for(&author);

    // 作成
    let req = common::json_request(
        Method::POST,
        "/api/posts",
        Some(json!({
            "title": "Hello World",
            "slug": "hello-world",
            "content": "First post.",
            "excerpt": "Intro",
            "meta_title": "Hello SEO"
        })),
        Some(&token),
    );

    let res = app.router.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let body = common::body_json(res).await;
    let post_id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["status"], json!("DRAFT"));
    assert_eq!(body["data"]["view_count"], json!(0));
    assert_eq!(body["data"]["author"]["name"], json!(author.name));

    // スラッグで取得（公開エンドポイントだが下書きも返す管理仕様）
    let req = common::json_request(Method::GET, "/api/posts/slug/hello-world", None, None);
    let res = app.router.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    // 更新
    let req = common::json_request(
        Method::PATCH,
        &format!("/api/posts/{}", post_id),
        Some(json!({ "title": "Hello Again" })),
        Some(&token),
    );
    let res = app.router.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = common::body_json(res).await;
    assert_eq!(body["data"]["title"], json!("Hello Again"));

    // 公開
    let req = common::json_request(
        Method::POST,
        &format!("/api/posts/{}/publish", post_id),
        None,
        Some(&token),
    );
    let res = app.router.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = common::body_json(res).await;
    assert_eq!(body["data"]["status"], json!("PUBLISHED"));
    assert!(body["data"]["published_at"].is_string());

    // 削除して404になること
    let req = common::json_request(
        Method::DELETE,
        &format!("/api/posts/{}", post_id),
        None,
        Some(&token),
    );
    let res = app.router.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let req = common::json_request(
        Method::GET,
        &format!("/api/posts/{}", post_id),
        None,
        None,
    );
    let res = app.router.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_posts_with_status_filter() {
    let app = app_helper::setup_app().await;
    let db = &app.db.connection;
    let author = test_data::create_user(db, UserRole::Author).await;

    test_data::create_post(db, author.id, PostStatus::Published).await;
    test_data::create_post(db, author.id, PostStatus::Published).await;
    test_data::create_post(db, author.id, PostStatus::Draft).await;

    let req = common::json_request(Method::GET, "/api/posts?status=PUBLISHED", None, None);
    let res = app.router.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = common::body_json(res).await;
    let items = body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|p| p["status"] == json!("PUBLISHED")));
    assert_eq!(body["data"]["pagination"]["total_items"], json!(2));
}

#[tokio::test]
async fn test_admin_search_posts() {
    let app = app_helper::setup_app().await;
    let db = &app.db.connection;
    let author = test_data::create_user(db, UserRole::Author).await;
    let token = auth_helper::token_for(&author);

    let mut needle = test_data::create_post(db, author.id, PostStatus::Published).await;
    test_data::create_post(db, author.id, PostStatus::Draft).await;

    // タイトルを検索語入りに更新
    needle.title = "Rust analytics deep dive".to_string();
    let update_req = common::json_request(
        Method::PATCH,
        &format!("/api/posts/{}", needle.id),
        Some(json!({ "title": needle.title })),
        Some(&token),
    );
    let res = app.router.clone().oneshot(update_req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    // キーワード検索（大文字小文字を区別しない）
    let req = common::json_request(
        Method::GET,
        "/api/admin/posts/search?search=ANALYTICS",
        None,
        Some(&token),
    );
    let res = app.router.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = common::body_json(res).await;
    assert_eq!(body["data"]["total"], json!(1));
    let posts = body["data"]["posts"].as_array().unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0]["id"], json!(needle.id));

    // ステータスフィルタ
    let req = common::json_request(
        Method::GET,
        "/api/admin/posts/search?status=DRAFT",
        None,
        Some(&token),
    );
    let res = app.router.clone().oneshot(req).await.unwrap();
    let body = common::body_json(res).await;
    assert_eq!(body["data"]["total"], json!(1));
}

#[tokio::test]
async fn test_post_with_categories_and_tags() {
    let app = app_helper::setup_app().await;
    let db = &app.db.connection;
    let admin = test_data::create_user(db, UserRole::Admin).await;
    let token = auth_helper::token_for(&admin);

    // カテゴリとタグを用意
    let req = common::json_request(
        Method::POST,
        "/api/categories",
        Some(json!({ "name": "News", "slug": "news" })),
        Some(&token),
    );
    let res = app.router.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let category_id = common::body_json(res).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let req = common::json_request(
        Method::POST,
        "/api/tags",
        Some(json!({ "name": "Rust", "slug": "rust" })),
        Some(&token),
    );
    let res = app.router.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let tag_id = common::body_json(res).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    // 記事作成時に両方を関連付ける
    let req = common::json_request(
        Method::POST,
        "/api/posts",
        Some(json!({
            "title": "Tagged post",
            "slug": "tagged-post",
            "content": "body",
            "category_ids": [category_id],
            "tag_ids": [tag_id]
        })),
        Some(&token),
    );
    let res = app.router.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let body = common::body_json(res).await;
    let categories = body["data"]["categories"].as_array().unwrap();
    let tags = body["data"]["tags"].as_array().unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0]["slug"], json!("news"));
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0]["slug"], json!("rust"));
}
