// src/main.rs
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cms_backend::api::handlers::create_app_router;
use cms_backend::api::AppState;
use cms_backend::config::Config;
use cms_backend::db::create_db_pool_with_options;
use cms_backend::utils::jwt::JwtManager;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // トレーシングの設定
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cms_backend=info,tower_http=info".into()),
        )
        .with(fmt::layer())
        .init();

    tracing::info!("Starting CMS Backend server...");

    // 設定を読み込む
    let app_config = Config::from_env().expect("Failed to load configuration");

    // データベース接続を作成
    let db_pool = create_db_pool_with_options(&app_config)
        .await
        .expect("Failed to create database pool");

    tracing::info!("Database pool created successfully.");

    // JWTマネージャーの作成
    let jwt_manager = JwtManager::from_env().expect("Failed to initialize JWT manager");

    // アプリケーション状態とルーターの設定
    let app_state = AppState::new(db_pool, jwt_manager);
    let app_router = create_app_router(app_state);

    // サーバーの起動
    tracing::info!(
        "Router configured. Server listening on {}",
        app_config.server_addr
    );

    let listener = TcpListener::bind(&app_config.server_addr).await?;
    axum::serve(listener, app_router.into_make_service()).await?;

    Ok(())
}
