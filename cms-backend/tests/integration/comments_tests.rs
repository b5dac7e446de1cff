// tests/integration/comments_tests.rs

use crate::common::{self, app_helper, auth_helper, test_data};
use axum::http::{Method, StatusCode};
use cms_backend::domain::post_status::PostStatus;
use cms_backend::domain::user_role::UserRole;
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_comment_on_draft_post_is_rejected() {
    let app = app_helper::setup_app().await;
    let author = test_data::create_user(&app.db.connection, UserRole::Author).await;
    let draft = test_data::create_post(&app.db.connection, author.id, PostStatus::Draft).await;

    // 未公開記事へのコメントは404（下書きの存在は漏らさない）
    let req = common::json_request(
        Method::POST,
        &format!("/api/posts/slug/{}/comments", draft.slug),
        Some(json!({
            "content": "Nice draft!",
            "author_name": "Visitor",
            "author_email": "visitor@example.com"
        })),
        None,
    );

    let res = app.router.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // 一覧取得も同様
    let req = common::json_request(
        Method::GET,
        &format!("/api/posts/slug/{}/comments", draft.slug),
        None,
        None,
    );
    let res = app.router.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_comment_validation() {
    let app = app_helper::setup_app().await;
    let author = test_data::create_user(&app.db.connection, UserRole::Author).await;
    let post = test_data::create_post(&app.db.connection, author.id, PostStatus::Published).await;

    // メールアドレス不正は400
    let req = common::json_request(
        Method::POST,
        &format!("/api/posts/slug/{}/comments", post.slug),
        Some(json!({
            "content": "Hello",
            "author_name": "Visitor",
            "author_email": "not-an-email"
        })),
        None,
    );

    let res = app.router.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_comment_moderation_flow() {
    let app = app_helper::setup_app().await;
    let db = &app.db.connection;
    let author = test_data::create_user(db, UserRole::Author).await;
    let editor = test_data::create_user(db, UserRole::Editor).await;
    let post = test_data::create_post(db, author.id, PostStatus::Published).await;

    // 投稿されたコメントは承認待ち
    let req = common::json_request(
        Method::POST,
        &format!("/api/posts/slug/{}/comments", post.slug),
        Some(json!({
            "content": "Great read!",
            "author_name": "Visitor",
            "author_email": "visitor@example.com"
        })),
        None,
    );
    let res = app.router.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let body = common::body_json(res).await;
    assert_eq!(body["data"]["is_approved"], json!(false));
    let comment_id = body["data"]["id"].as_str().unwrap().to_string();

    // 承認前は公開側に表示されない
    let req = common::json_request(
        Method::GET,
        &format!("/api/posts/slug/{}/comments", post.slug),
        None,
        None,
    );
    let res = app.router.clone().oneshot(req).await.unwrap();
    let body = common::body_json(res).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);

    // 一般投稿者はモデレーション不可
    let author_token = auth_helper::token_for(&author);
    let req = common::json_request(
        Method::POST,
        &format!("/api/admin/comments/{}/approve", comment_id),
        None,
        Some(&author_token),
    );
    let res = app.router.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // 編集者が承認すると公開側に現れる
    let editor_token = auth_helper::token_for(&editor);
    let req = common::json_request(
        Method::POST,
        &format!("/api/admin/comments/{}/approve", comment_id),
        None,
        Some(&editor_token),
    );
    let res = app.router.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let req = common::json_request(
        Method::GET,
        &format!("/api/posts/slug/{}/comments", post.slug),
        None,
        None,
    );
    let res = app.router.clone().oneshot(req).await.unwrap();
    let body = common::body_json(res).await;
    let comments = body["data"].as_array().unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0]["content"], json!("Great read!"));

    // モデレーション一覧は承認状態で絞り込める
    let req = common::json_request(
        Method::GET,
        "/api/admin/comments?is_approved=false",
        None,
        Some(&editor_token),
    );
    let res = app.router.clone().oneshot(req).await.unwrap();
    let body = common::body_json(res).await;
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 0);

    // 削除
    let req = common::json_request(
        Method::DELETE,
        &format!("/api/admin/comments/{}", comment_id),
        None,
        Some(&editor_token),
    );
    let res = app.router.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}
