use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::auth::extractor::{ACCESS_COOKIE, AuthUser};
use crate::auth::jwt::{Claims, encode_token};
use crate::auth::password::{self, MIN_PASSWORD_LEN};
use crate::config::RegistrationMode;
use crate::db;
use crate::error::AppError;
use crate::extract::Json;
use crate::models::User;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[serde(default)]
    pub old_password: String,
    #[serde(default)]
    pub new_password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub message: String,
    pub user_id: i64,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResponse {
    pub user_id: i64,
    pub user: User,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

fn auth_cookie(token: &str, ttl_hours: i64) -> CookieJar {
    let access = Cookie::build((ACCESS_COOKIE, token.to_string()))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::hours(ttl_hours))
        .build();

    CookieJar::new().add(access)
}

fn validate_new_password(password: &str) -> Result<(), AppError> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::BadRequest(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

pub async fn register(
    State(state): State<SharedState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    let username = req.username.trim();
    let email = req.email.trim();
    if username.is_empty() || email.is_empty() || req.password.is_empty() {
        return Err(AppError::BadRequest(
            "Username, email and password are required".to_string(),
        ));
    }
    validate_new_password(&req.password)?;

    let pw_hash = password::hash(&req.password).map_err(AppError::Internal)?;

    let mut tx = state.pool.begin().await?;

    if state.config.registration == RegistrationMode::Closed
        && db::users::count_all(&mut *tx).await? > 0
    {
        return Err(AppError::Forbidden("Registration is disabled".to_string()));
    }

    let user = db::users::create(&mut *tx, username, email, &pw_hash)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::Conflict("Username or email already exists".to_string())
            }
            _ => AppError::Database(e),
        })?;

    tx.commit().await?;

    tracing::info!(user_id = user.id, username = %user.username, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
            user_id: user.id,
        }),
    ))
}

pub async fn login(
    State(state): State<SharedState>,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>), AppError> {
    if req.username.is_empty() || req.password.is_empty() {
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    if state.login_limiter.check(&req.username).is_err() {
        return Err(AppError::RateLimited(
            "Too many login attempts. Please try again later.".to_string(),
        ));
    }

    let Some(user) = db::users::find_by_username(&state.pool, &req.username).await? else {
        password::verify_dummy(&req.password);
        state.login_limiter.record_failure(&req.username);
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    };

    let valid = password::verify(&req.password, &user.password_hash).map_err(AppError::Internal)?;
    if !valid {
        state.login_limiter.record_failure(&req.username);
        tracing::warn!(username = %req.username, "Failed login");
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }
    state.login_limiter.record_success(&req.username);

    let ttl_hours = state.config.token_ttl_hours;
    let claims = Claims::new(user.id, &user.username, Duration::hours(ttl_hours));
    let token = encode_token(&claims, &state.config.jwt_secret).map_err(AppError::Internal)?;

    tracing::info!(user_id = user.id, "User logged in");

    Ok((auth_cookie(&token, ttl_hours), Json(LoginResponse { token, user })))
}

pub async fn verify(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<VerifyResponse>, AppError> {
    let user = db::users::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;

    Ok(Json(VerifyResponse {
        user_id: user.id,
        user,
    }))
}

pub async fn change_password(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let user = db::users::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;

    let valid = password::verify(&req.old_password, &user.password_hash)
        .map_err(AppError::Internal)?;
    if !valid {
        return Err(AppError::Unauthorized(
            "Current password is incorrect".to_string(),
        ));
    }

    validate_new_password(&req.new_password)?;

    let pw_hash = password::hash(&req.new_password).map_err(AppError::Internal)?;
    db::users::update_password(&state.pool, user.id, &pw_hash).await?;

    tracing::info!(user_id = user.id, "Password changed");

    Ok(Json(MessageResponse {
        message: "Password changed successfully".to_string(),
    }))
}
