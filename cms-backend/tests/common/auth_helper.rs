// tests/common/auth_helper.rs

use cms_backend::domain::user_model::{self, UserClaims};
use cms_backend::utils::jwt::{JwtConfig, JwtManager};
use once_cell::sync::Lazy;

/// トークン発行用の共有マネージャー。アプリケーション側と同じ設定を使う。
static TEST_JWT_MANAGER: Lazy<JwtManager> = Lazy::new(test_jwt_manager);

/// アプリケーションとテストで共有する固定のJWT設定
pub fn test_jwt_manager() -> JwtManager {
    JwtManager::new(JwtConfig {
        secret_key: "integration-test-secret-key".to_string(),
        access_token_expiry_minutes: 15,
        issuer: "cms-backend".to_string(),
        audience: "cms-admin".to_string(),
    })
}

/// 指定ユーザーのアクセストークンを発行する
pub fn token_for(user: &user_model::Model) -> String {
    TEST_JWT_MANAGER
        .create_access_token(UserClaims::from(user.clone()))
        .expect("create access token")
}
