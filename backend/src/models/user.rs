//! Models that represent user accounts, roles and authentication payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Role name granting access to the admin backoffice.
pub const ADMIN_ROLE: &str = "ADMIN";
/// Role name for regular customer accounts.
pub const USER_ROLE: &str = "USER";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
/// Database representation of a user account.
pub struct User {
    pub id: i64,
    /// Unique email address used for login.
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    /// Stored credential: `pbkdf2_sha256$...` or a legacy plaintext value.
    /// Never serialized out.
    #[serde(default, skip_serializing)]
    pub password: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker; a deleted user cannot authenticate.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    /// A user is active iff not soft-deleted.
    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
/// Static reference data; users relate to roles many-to-many.
pub struct Role {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

/// Authenticated caller attached to the request by the auth middleware.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: User,
    pub roles: Vec<String>,
}

impl AuthenticatedUser {
    /// True iff the caller's role set intersects `allowed`.
    pub fn has_any_role(&self, allowed: &[&str]) -> bool {
        allowed
            .iter()
            .any(|role| self.roles.iter().any(|have| have == role))
    }

    pub fn is_admin(&self) -> bool {
        self.has_any_role(&[ADMIN_ROLE])
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
/// Public-facing representation of a user returned by the API.
pub struct UserPublic {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    pub roles: Vec<String>,
}

impl UserPublic {
    pub fn from_user(user: &User, roles: &[String]) -> Self {
        UserPublic {
            id: user.id,
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            phone_number: user.phone_number.clone(),
            roles: roles.to_vec(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
/// Credentials submitted on login. Either JSON (`email` with `username` as an
/// alias) or classic form fields are accepted; see the login handler.
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
/// Body returned on successful login, alongside the session cookie.
pub struct LoginResponse {
    pub user: UserPublic,
    pub session_id: String,
    pub roles: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
/// Body of `GET /api/auth/session` for an authenticated caller.
pub struct SessionInfo {
    pub authenticated: bool,
    pub user: UserPublic,
    pub roles: Vec<String>,
}
