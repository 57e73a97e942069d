use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;

use crate::auth::jwt;
use crate::error::AppError;
use crate::state::SharedState;

pub const ACCESS_COOKIE: &str = "access_token";

/// The authenticated admin. Handlers that mutate state take this as their
/// first extractor so the body is never read for an unauthenticated request.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: i64,
}

impl FromRequestParts<SharedState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?.or_else(|| {
            CookieJar::from_headers(&parts.headers)
                .get(ACCESS_COOKIE)
                .map(|c| c.value().to_string())
        });

        let Some(token) = token else {
            return Err(AppError::Unauthorized(
                "Missing authentication token".to_string(),
            ));
        };

        let claims = jwt::decode_token(&token, &state.config.jwt_secret).map_err(|e| {
            tracing::debug!("Rejected token: {e}");
            AppError::Unauthorized("Invalid or expired token".to_string())
        })?;

        Ok(AuthUser { user_id: claims.uid })
    }
}

fn bearer_token(parts: &Parts) -> Result<Option<String>, AppError> {
    let Some(header) = parts.headers.get("authorization") else {
        return Ok(None);
    };
    let value = header
        .to_str()
        .map_err(|_| AppError::Unauthorized("Invalid authorization header".to_string()))?;
    match value.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(Some(token.trim().to_string())),
        _ => Err(AppError::Unauthorized(
            "Invalid authorization header".to_string(),
        )),
    }
}
