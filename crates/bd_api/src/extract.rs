//! 身份提取器

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use bd_core::{Identity, Session};

use crate::error::{ApiError, INVALID_TOKEN_MESSAGE};
use crate::routes::AppState;

/// 读取 `Authorization` 头；存在但不是合法 UTF-8 时拒绝
fn authorization(parts: &Parts) -> Result<Option<&str>, ApiError> {
    parts
        .headers
        .get(AUTHORIZATION)
        .map(|value| {
            value
                .to_str()
                .map_err(|_| ApiError::Unauthorized(INVALID_TOKEN_MESSAGE.to_string()))
        })
        .transpose()
}

/// 必须携带有效令牌
#[derive(Debug, Clone)]
pub struct AuthUser(pub Identity);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let identity = state.auth.authenticate(authorization(parts)?)?;
        Ok(AuthUser(identity))
    }
}

/// 可选身份：无头时为匿名，有头但无效时拒绝
#[derive(Debug, Clone)]
pub struct OptionalAuth(pub Session);

#[async_trait]
impl FromRequestParts<AppState> for OptionalAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match authorization(parts)? {
            None => Ok(OptionalAuth(Session::Anonymous)),
            Some(header) => {
                let identity = state.auth.authenticate(Some(header))?;
                Ok(OptionalAuth(Session::Authenticated(identity)))
            }
        }
    }
}
