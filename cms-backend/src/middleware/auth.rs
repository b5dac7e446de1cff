// cms-backend/src/middleware/auth.rs

use crate::api::AppState;
use crate::domain::user_model::UserClaims;
use crate::error::AppError;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use tracing::warn;

/// アクセストークンを保持するCookie名
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// 認証済みユーザー情報を格納するエクステンション
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub claims: UserClaims,
}

impl AuthenticatedUser {
    pub fn new(claims: UserClaims) -> Self {
        Self { claims }
    }

    pub fn user_id(&self) -> uuid::Uuid {
        self.claims.user_id
    }

    /// 管理者かチェック
    pub fn is_admin(&self) -> bool {
        self.claims.is_admin()
    }

    /// モデレーション操作が可能かチェック
    pub fn can_moderate(&self) -> bool {
        self.claims.can_moderate()
    }
}

/// リクエストからアクセストークンを取り出す。
/// AuthorizationヘッダーのBearerトークンを優先し、なければCookieを見る。
fn extract_token(req: &Request) -> Option<String> {
    let bearer = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.to_string());

    if bearer.is_some() {
        return bearer;
    }

    let jar = CookieJar::from_headers(req.headers());
    jar.get(ACCESS_TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
}

/// 認証ミドルウェア。
///
/// トークンが無いリクエストはそのまま通し、保護されたハンドラ側の
/// エクストラクタで401にする。トークンが付いているのに検証できない
/// 場合はこの時点で401を返す。
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    if let Some(token) = extract_token(&req) {
        match app_state.jwt_manager.verify_access_token(&token) {
            Ok(claims) => {
                req.extensions_mut()
                    .insert(AuthenticatedUser::new(claims.user));
            }
            Err(e) => {
                warn!(error = %e, "Access token verification failed");
                return AppError::Unauthorized("Invalid or expired access token".to_string())
                    .into_response();
            }
        }
    }

    next.run(req).await
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))
    }
}

/// 管理者権限が必要なハンドラ用のエクストラクタ
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthenticatedUser::from_request_parts(parts, state).await?;

        if !user.is_admin() {
            return Err(AppError::Forbidden(
                "Administrator privileges required".to_string(),
            ));
        }

        Ok(AdminUser(user))
    }
}

/// モデレーション権限（管理者または編集者）が必要なハンドラ用のエクストラクタ
#[derive(Debug, Clone)]
pub struct ModeratorUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for ModeratorUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthenticatedUser::from_request_parts(parts, state).await?;

        if !user.can_moderate() {
            return Err(AppError::Forbidden(
                "Moderator privileges required".to_string(),
            ));
        }

        Ok(ModeratorUser(user))
    }
}
