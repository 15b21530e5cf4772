//! Handlers for the `/auth` resource (signup, login, logout, profile).
//!
//! Credential issuance lives here: a successful signup or login mints a fresh
//! session id, persists it as the user's only valid session, and hands the
//! client a 7-day JWT bound to that id -- as an HTTP-only cookie and in the
//! JSON body for header-based clients. On login, any live connection still
//! bound to the superseded session is pushed a revocation event *before* the
//! registry is overwritten.

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use axum::response::{AppendHeaders, IntoResponse};
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use chatline_core::error::CoreError;
use chatline_core::session::{new_session_id, RevocationReason};
use chatline_core::types::DbId;
use chatline_db::models::user::{CreateUser, UpdateProfile, UserResponse};
use chatline_db::repositories::UserRepo;

use crate::auth::gate::{build_auth_cookie, clear_auth_cookie};
use crate::auth::jwt::generate_session_token;
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/signup`.
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,
    pub password: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `PUT /auth/password`.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Successful authentication response returned by signup and login.
///
/// The token is also delivered as an HTTP-only cookie; the body copy exists
/// for clients that resend it via the `Authorization` header instead.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/signup
///
/// Create an account. The fresh account starts with an active session, so the
/// returned credential is immediately valid.
pub async fn signup(
    State(state): State<AppState>,
    Json(input): Json<SignupRequest>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| CoreError::Validation(e.to_string()))?;
    validate_password_strength(&input.password).map_err(CoreError::Validation)?;

    if UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Email already exists. Please use a different email or login instead.".into(),
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    // The signup session: minted here so the first credential validates
    // without a separate registry write.
    let session_id = new_session_id();

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            email: input.email,
            full_name: input.full_name,
            password_hash,
            current_session_id: session_id.clone(),
        },
    )
    .await?;

    let (token, cookie) = mint_credential(&state, user.id, &session_id)?;
    tracing::info!(user_id = user.id, "User signed up");

    Ok((
        StatusCode::CREATED,
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(AuthResponse {
            token,
            user: user.to_response(),
        }),
    ))
}

/// POST /api/v1/auth/login
///
/// Authenticate with email + password. Supersedes any existing session:
/// the old device's live connection (if any) is pushed a revocation event
/// before the registry overwrite, and its credential fails the liveness gate
/// from the overwrite onward.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let user = UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Invalid credentials".into())))?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid credentials".into(),
        )));
    }

    // Best-effort proactive push to the superseded device, fired before the
    // overwrite so the old client hears about it over the realtime channel
    // rather than only on its next rejected API call.
    state
        .notifier
        .notify(user.id, RevocationReason::AnotherSession)
        .await;

    // Last-write-wins overwrite: most recent login is authoritative.
    let session_id = new_session_id();
    UserRepo::set_current_session(&state.pool, user.id, Some(&session_id)).await?;

    let (token, cookie) = mint_credential(&state, user.id, &session_id)?;
    tracing::info!(user_id = user.id, "User logged in");

    Ok((
        StatusCode::OK,
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(AuthResponse {
            token,
            user: user.to_response(),
        }),
    ))
}

/// POST /api/v1/auth/logout
///
/// Clear the session registry (no credential can match a `NULL` registry)
/// and expire the cookie.
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<impl IntoResponse> {
    UserRepo::set_current_session(&state.pool, auth.user.id, None).await?;
    tracing::info!(user_id = auth.user.id, "User logged out");

    Ok((
        StatusCode::OK,
        AppendHeaders([(SET_COOKIE, clear_auth_cookie(state.config.cookie_secure))]),
        Json(serde_json::json!({ "success": true, "message": "Logged out successfully" })),
    ))
}

/// GET /api/v1/auth/check
///
/// Return the authenticated user. Doubles as the client's liveness probe:
/// a superseded session gets the 401 + `should_logout` envelope here.
pub async fn check(auth: AuthUser) -> Json<UserResponse> {
    Json(auth.user.to_response())
}

/// PUT /api/v1/auth/profile
///
/// Update the caller's display name and/or avatar URL.
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<UpdateProfile>,
) -> AppResult<Json<UserResponse>> {
    if input.full_name.is_none() && input.profile_pic.is_none() {
        return Err(AppError::Core(CoreError::Validation(
            "No data to update".into(),
        )));
    }
    if let Some(name) = &input.full_name {
        if name.trim().is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "Full name must not be empty".into(),
            )));
        }
    }

    let user = UserRepo::update_profile(&state.pool, auth.user.id, &input)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "user",
            id: auth.user.id,
        })?;

    Ok(Json(user.to_response()))
}

/// PUT /api/v1/auth/password
///
/// Change the caller's password after re-verifying the current one.
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<ChangePasswordRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let current_valid = verify_password(&input.current_password, &auth.user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !current_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Current password is incorrect".into(),
        )));
    }

    validate_password_strength(&input.new_password).map_err(CoreError::Validation)?;

    let password_hash = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    UserRepo::update_password(&state.pool, auth.user.id, &password_hash).await?;

    Ok(Json(serde_json::json!({ "success": true })))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Mint the bearer credential for a just-persisted session id, plus its
/// `Set-Cookie` delivery.
fn mint_credential(
    state: &AppState,
    user_id: DbId,
    session_id: &str,
) -> AppResult<(String, String)> {
    let token = generate_session_token(user_id, session_id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    let cookie = build_auth_cookie(
        &token,
        state.config.jwt.token_expiry_days,
        state.config.cookie_secure,
    );
    Ok((token, cookie))
}
