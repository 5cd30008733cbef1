//! Session-cookie authentication layers.
//!
//! Authentication fails closed: a missing cookie, an unknown or expired
//! token and a soft-deleted user all collapse into the same generic
//! "Not authenticated" response.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use sqlx::PgPool;

use crate::{
    config::Config,
    error::AppError,
    models::user::AuthenticatedUser,
    repositories::user as user_repo,
    services::session::{self, PgSessionStore},
    utils::cookies::{extract_cookie_value, SESSION_COOKIE_NAME},
};

/// Requires a valid session; attaches [`AuthenticatedUser`] to the request.
pub async fn auth(
    State((pool, _config)): State<(PgPool, Config)>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = authenticate_request(&pool, request.headers()).await?;
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Requires a valid session AND the ADMIN role.
pub async fn auth_admin(
    State((pool, _config)): State<(PgPool, Config)>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = authenticate_request(&pool, request.headers()).await?;
    if !user.is_admin() {
        return Err(AppError::Forbidden("Forbidden: admin only".to_string()));
    }
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

async fn authenticate_request(
    pool: &PgPool,
    headers: &axum::http::HeaderMap,
) -> Result<AuthenticatedUser, AppError> {
    let token = headers
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|raw| extract_cookie_value(raw, SESSION_COOKIE_NAME))
        .ok_or_else(not_authenticated)?;

    let store = PgSessionStore::new(pool.clone());
    let user_id = session::resolve_session(&store, &token)
        .await
        .map_err(|e| AppError::InternalServerError(e.into()))?
        .ok_or_else(not_authenticated)?;

    let user = user_repo::find_user_by_id(pool, user_id)
        .await
        .map_err(|e| AppError::InternalServerError(e.into()))?
        .filter(|user| user.is_active())
        .ok_or_else(not_authenticated)?;

    let roles = user_repo::role_names_for_user(pool, user.id)
        .await
        .map_err(|e| AppError::InternalServerError(e.into()))?;

    Ok(AuthenticatedUser { user, roles })
}

fn not_authenticated() -> AppError {
    AppError::Unauthorized("Not authenticated".to_string())
}
