// tests/common/mod.rs

pub mod app_helper;
pub mod auth_helper;
pub mod db;
pub mod test_data;

use axum::body::{self, Body};
use axum::http::{header, Method, Request, Response};
use serde_json::Value;

/// JSONリクエストを組み立てる。tokenを渡すとBearerとして付与する。
pub fn json_request(
    method: Method,
    uri: &str,
    json_body: Option<Value>,
    token: Option<&str>,
) -> Request<Body> {
    let mut builder = Request::builder()
        .uri(uri)
        .method(method)
        .header(header::CONTENT_TYPE, "application/json");

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let body = match json_body {
        Some(json) => Body::from(serde_json::to_string(&json).expect("serialize request body")),
        None => Body::empty(),
    };

    builder.body(body).expect("build request")
}

/// レスポンスボディをJSONとして読み出す
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read response body");

    serde_json::from_slice(&bytes).expect("parse response body as json")
}
