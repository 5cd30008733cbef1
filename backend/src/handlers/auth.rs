use std::collections::HashMap;
use std::time::Duration;

use axum::{
    body::Bytes,
    extract::{Extension, State},
    http::{header, HeaderMap, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use sqlx::PgPool;

use crate::{
    config::Config,
    error::AppError,
    models::user::{AuthenticatedUser, LoginResponse, SessionInfo, UserPublic},
    repositories::user as user_repo,
    services::session::{self, PgSessionStore},
    utils::{
        cookies::{
            build_clear_session_cookie, build_session_cookie, extract_cookie_value,
            CookieOptions, SESSION_COOKIE_NAME,
        },
        password::verify_password,
    },
};

/// Login with email/password and set the HttpOnly session cookie.
///
/// Accepts either JSON `{"email"|"username", "password"}` or classic
/// form-encoded `username`/`password` fields.
pub async fn login(
    State((pool, config)): State<(PgPool, Config)>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let (email, password) = parse_credentials(&headers, &body);

    let (Some(email), Some(password)) = (email, password) else {
        return Err(AppError::BadRequest(
            "Missing credentials: provide email and password".to_string(),
        ));
    };

    let Some(user) = user_repo::find_user_by_email(&pool, &email)
        .await
        .map_err(|e| AppError::InternalServerError(e.into()))?
        .filter(|user| user.is_active())
    else {
        return Ok(login_rejection());
    };

    if !verify_password(&password, user.password.as_deref()) {
        return Ok(login_rejection());
    }

    let store = PgSessionStore::new(pool.clone());
    let session_id =
        session::create_session_for_user(&store, user.id, config.session_ttl_seconds)
            .await
            .map_err(|e| AppError::InternalServerError(e.into()))?;

    let roles = user_repo::role_names_for_user(&pool, user.id)
        .await
        .map_err(|e| AppError::InternalServerError(e.into()))?;

    let cookie = build_session_cookie(
        &session_id,
        Duration::from_secs(config.session_ttl_seconds.max(0) as u64),
        cookie_options(&config),
    );

    let response = LoginResponse {
        user: UserPublic::from_user(&user, &roles),
        session_id,
        roles,
    };

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(response),
    )
        .into_response())
}

/// Returns the caller's session info; the auth middleware has already
/// resolved the cookie to an active user.
pub async fn session_info(Extension(auth): Extension<AuthenticatedUser>) -> Json<SessionInfo> {
    let user = UserPublic::from_user(&auth.user, &auth.roles);
    Json(SessionInfo {
        authenticated: true,
        user,
        roles: auth.roles,
    })
}

/// Deletes the session (idempotent) and clears the cookie. Public: a caller
/// with a dead cookie can still log out.
pub async fn logout(
    State((pool, config)): State<(PgPool, Config)>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let token = headers
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|raw| extract_cookie_value(raw, SESSION_COOKIE_NAME));

    let store = PgSessionStore::new(pool.clone());
    session::delete_session(&store, token.as_deref())
        .await
        .map_err(|e| AppError::InternalServerError(e.into()))?;

    let clear = build_clear_session_cookie(cookie_options(&config));
    Ok(([(header::SET_COOKIE, clear)], Json(json!({"ok": true}))).into_response())
}

pub(crate) fn cookie_options(config: &Config) -> CookieOptions {
    CookieOptions {
        secure: config.cookie_secure,
        same_site: config.cookie_same_site,
    }
}

/// One response for every credential failure, so callers cannot tell an
/// unknown user from a wrong password.
fn login_rejection() -> Response {
    let mut response =
        AppError::Unauthorized("Incorrect username or password".to_string()).into_response();
    response
        .headers_mut()
        .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
    response
}

/// Extracts `(email, password)` from a JSON or form-encoded login body.
/// `username` is accepted as an alias for `email` in both encodings.
pub fn parse_credentials(headers: &HeaderMap, body: &[u8]) -> (Option<String>, Option<String>) {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
        .to_lowercase();

    if content_type.contains("application/json") {
        let Ok(payload) = serde_json::from_slice::<Value>(body) else {
            return (None, None);
        };
        let email = string_field(&payload, "email").or_else(|| string_field(&payload, "username"));
        let password = payload
            .get("password")
            .and_then(Value::as_str)
            .map(str::to_string);
        (email, password)
    } else {
        let Ok(form) = serde_urlencoded::from_bytes::<HashMap<String, String>>(body) else {
            return (None, None);
        };
        let email = form
            .get("email")
            .filter(|v| !v.is_empty())
            .or_else(|| form.get("username").filter(|v| !v.is_empty()))
            .cloned();
        let password = form.get("password").cloned();
        (email, password)
    }
}

fn string_field(payload: &Value, key: &str) -> Option<String> {
    payload
        .get(key)
        .and_then(Value::as_str)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers
    }

    fn form_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded"),
        );
        headers
    }

    #[test]
    fn json_login_accepts_email_or_username_alias() {
        let (email, password) = parse_credentials(
            &json_headers(),
            br#"{"email": "a@example.com", "password": "pw"}"#,
        );
        assert_eq!(email.as_deref(), Some("a@example.com"));
        assert_eq!(password.as_deref(), Some("pw"));

        let (email, _) = parse_credentials(
            &json_headers(),
            br#"{"username": "b@example.com", "password": "pw"}"#,
        );
        assert_eq!(email.as_deref(), Some("b@example.com"));

        // email wins over the alias when both are present
        let (email, _) = parse_credentials(
            &json_headers(),
            br#"{"email": "a@example.com", "username": "b@example.com", "password": "pw"}"#,
        );
        assert_eq!(email.as_deref(), Some("a@example.com"));
    }

    #[test]
    fn form_login_parses_urlencoded_fields() {
        let (email, password) = parse_credentials(
            &form_headers(),
            b"username=c%40example.com&password=secret",
        );
        assert_eq!(email.as_deref(), Some("c@example.com"));
        assert_eq!(password.as_deref(), Some("secret"));
    }

    #[test]
    fn malformed_bodies_produce_no_credentials() {
        let (email, password) = parse_credentials(&json_headers(), b"{not json");
        assert!(email.is_none());
        assert!(password.is_none());

        let (email, _) = parse_credentials(&json_headers(), br#"{"email": "", "password": "x"}"#);
        assert!(email.is_none());
    }

    #[test]
    fn login_rejection_carries_www_authenticate() {
        let response = login_rejection();
        assert_eq!(response.status(), axum::http::StatusCode::UNAUTHORIZED);
        assert_eq!(
            response
                .headers()
                .get(header::WWW_AUTHENTICATE)
                .and_then(|v| v.to_str().ok()),
            Some("Bearer")
        );
    }
}
