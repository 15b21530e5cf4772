//! The Liveness Gate: the one credential check for every entry point.
//!
//! Both the HTTP extractor ([`crate::middleware::auth::AuthUser`]) and the
//! WebSocket handshake call [`verify_credential`]; the session-comparison
//! logic exists exactly once so the two transports cannot drift.
//!
//! Check order, per the failure contract:
//!
//! 1. no token                      -> `NO_CREDENTIAL`
//! 2. bad signature / expired      -> `INVALID_CREDENTIAL`
//! 3. user row gone                -> `USER_NOT_FOUND`
//! 4. session id != registry value -> `SESSION_SUPERSEDED`
//!
//! Expiry is decided in step 2, before the registry is even read, so an
//! 8-day-old token fails with `INVALID_CREDENTIAL` even when its session id
//! would still match. Validation is read-only: checking the same credential
//! twice yields the same result.

use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::HeaderMap;

use chatline_core::session::{check_session, AuthRejection};
use chatline_db::models::user::User;
use chatline_db::repositories::UserRepo;
use chatline_db::DbPool;

use crate::auth::jwt::{validate_token, JwtConfig};
use crate::error::AppError;

/// Name of the HTTP-only auth cookie.
pub const AUTH_COOKIE: &str = "jwt";

/// Validate a credential against the session registry.
///
/// Returns the resolved user on success. Gate rejections surface as
/// [`AppError::Auth`] (401 + reason code + `should_logout`); registry read
/// failures surface as [`AppError::Database`] (500, retryable).
pub async fn verify_credential(
    pool: &DbPool,
    config: &JwtConfig,
    token: Option<&str>,
) -> Result<User, AppError> {
    let token = token.ok_or(AuthRejection::NoCredential)?;

    let claims = validate_token(token, config).map_err(|_| AuthRejection::InvalidCredential)?;

    let user = UserRepo::find_by_id(pool, claims.sub)
        .await?
        .ok_or(AuthRejection::UserNotFound)?;

    check_session(user.current_session_id.as_deref(), &claims.sid)?;

    Ok(user)
}

/// Extract the bearer token from request headers.
///
/// Checks the `Authorization: Bearer <token>` header first, then falls back
/// to the `jwt` cookie (the browser transport).
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    if let Some(value) = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        if let Some(token) = value.strip_prefix("Bearer ") {
            return Some(token.to_string());
        }
    }

    headers
        .get(COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(cookie_value)
}

/// Pull the auth cookie's value out of a `Cookie` header.
fn cookie_value(header: &str) -> Option<String> {
    header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == AUTH_COOKIE).then(|| value.to_string())
    })
}

/// Build the `Set-Cookie` value delivering a fresh credential.
///
/// HTTP-only always; `SameSite=None; Secure` when the API is served
/// cross-site over HTTPS, `SameSite=Lax` otherwise.
pub fn build_auth_cookie(token: &str, expiry_days: i64, secure: bool) -> String {
    let max_age = expiry_days * 24 * 60 * 60;
    if secure {
        format!("{AUTH_COOKIE}={token}; Path=/; Max-Age={max_age}; HttpOnly; SameSite=None; Secure")
    } else {
        format!("{AUTH_COOKIE}={token}; Path=/; Max-Age={max_age}; HttpOnly; SameSite=Lax")
    }
}

/// Build the `Set-Cookie` value clearing the credential on logout.
pub fn clear_auth_cookie(secure: bool) -> String {
    if secure {
        format!("{AUTH_COOKIE}=; Path=/; Max-Age=0; HttpOnly; SameSite=None; Secure")
    } else {
        format!("{AUTH_COOKIE}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn bearer_header_takes_precedence() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc123"));
        headers.insert(COOKIE, HeaderValue::from_static("jwt=cookie-token"));

        assert_eq!(token_from_headers(&headers).as_deref(), Some("abc123"));
    }

    #[test]
    fn cookie_fallback_when_no_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; jwt=cookie-token; lang=en"),
        );

        assert_eq!(
            token_from_headers(&headers).as_deref(),
            Some("cookie-token")
        );
    }

    #[test]
    fn missing_credential_yields_none() {
        let headers = HeaderMap::new();
        assert_eq!(token_from_headers(&headers), None);

        // A cookie header without our cookie also yields none.
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("theme=dark"));
        assert_eq!(token_from_headers(&headers), None);
    }

    #[test]
    fn malformed_authorization_is_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic xyz"));
        assert_eq!(token_from_headers(&headers), None);
    }

    #[test]
    fn auth_cookie_attributes() {
        let lax = build_auth_cookie("tok", 7, false);
        assert!(lax.starts_with("jwt=tok;"));
        assert!(lax.contains("Max-Age=604800"));
        assert!(lax.contains("HttpOnly"));
        assert!(lax.contains("SameSite=Lax"));
        assert!(!lax.contains("Secure"));

        let secure = build_auth_cookie("tok", 7, true);
        assert!(secure.contains("SameSite=None"));
        assert!(secure.contains("Secure"));
    }

    #[test]
    fn clear_cookie_expires_immediately() {
        let cookie = clear_auth_cookie(false);
        assert!(cookie.starts_with("jwt=;"));
        assert!(cookie.contains("Max-Age=0"));
    }
}
