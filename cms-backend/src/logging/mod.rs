// src/logging/mod.rs

use axum::{body::Body, extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{error, info, warn};
use uuid::Uuid;

// ロギングミドルウェア
pub async fn logging_middleware(req: Request<Body>, next: Next) -> Response {
    let start = Instant::now();

    let request_id = Uuid::new_v4().to_string();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    info!(
        request_id = %request_id,
        method = %method,
        path = %path,
        "Request started"
    );

    let response = next.run(req).await;

    let status = response.status().as_u16();
    let duration_ms = start.elapsed().as_millis() as u64;

    if status >= 500 {
        error!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status = status,
            duration_ms = duration_ms,
            "Request completed"
        );
    } else if status >= 400 {
        warn!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status = status,
            duration_ms = duration_ms,
            "Request completed"
        );
    } else {
        info!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status = status,
            duration_ms = duration_ms,
            "Request completed"
        );
    }

    response
}
