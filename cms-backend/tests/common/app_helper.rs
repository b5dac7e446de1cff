// tests/common/app_helper.rs

use crate::common::auth_helper;
use crate::common::db::TestDatabase;
use axum::Router;
use cms_backend::api::handlers::create_app_router;
use cms_backend::api::AppState;

/// ルーターとテストDBをまとめて保持する。
/// TestDatabaseを先にドロップするとコンテナが落ちるため、テスト終了まで持ち続ける。
pub struct TestApp {
    pub router: Router,
    pub db: TestDatabase,
}

pub async fn setup_app() -> TestApp {
    let db = TestDatabase::new().await;

    let state = AppState::new(db.connection.clone(), auth_helper::test_jwt_manager());
    let router = create_app_router(state);

    TestApp { router, db }
}
