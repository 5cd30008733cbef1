//! Session lifecycle on top of an injectable token-keyed store.
//!
//! The store is a capability (`put`/`get`/`delete` keyed by token) so the
//! Postgres-backed production binding and the in-memory test binding satisfy
//! the same seam. Expired sessions are evicted lazily on first access; there
//! is no background sweep.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{Duration, Utc};
use sqlx::PgPool;

use crate::models::session::Session;
use crate::repositories::session as session_repo;
use crate::utils::token::generate_session_token;

#[async_trait::async_trait]
pub trait SessionStore: Send + Sync {
    async fn put(&self, session: Session) -> sqlx::Result<()>;
    async fn get(&self, token: &str) -> sqlx::Result<Option<Session>>;
    async fn delete(&self, token: &str) -> sqlx::Result<()>;
}

/// Durable store; the default binding.
pub struct PgSessionStore {
    pool: PgPool,
}

impl PgSessionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl SessionStore for PgSessionStore {
    async fn put(&self, session: Session) -> sqlx::Result<()> {
        session_repo::insert_session(&self.pool, &session).await
    }

    async fn get(&self, token: &str) -> sqlx::Result<Option<Session>> {
        session_repo::find_session_by_id(&self.pool, token).await
    }

    async fn delete(&self, token: &str) -> sqlx::Result<()> {
        session_repo::delete_session_by_id(&self.pool, token).await
    }
}

/// Process-local store satisfying the same capability; used by tests.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<String, Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().expect("session store lock").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait::async_trait]
impl SessionStore for InMemorySessionStore {
    async fn put(&self, session: Session) -> sqlx::Result<()> {
        self.sessions
            .lock()
            .expect("session store lock")
            .insert(session.id.clone(), session);
        Ok(())
    }

    async fn get(&self, token: &str) -> sqlx::Result<Option<Session>> {
        Ok(self
            .sessions
            .lock()
            .expect("session store lock")
            .get(token)
            .cloned())
    }

    async fn delete(&self, token: &str) -> sqlx::Result<()> {
        self.sessions
            .lock()
            .expect("session store lock")
            .remove(token);
        Ok(())
    }
}

/// Issues a session for the user and returns the opaque token.
/// `ttl_seconds <= 0` creates a non-expiring session.
pub async fn create_session_for_user(
    store: &dyn SessionStore,
    user_id: i64,
    ttl_seconds: i64,
) -> sqlx::Result<String> {
    let token = generate_session_token();
    let now = Utc::now();
    let expires_at = (ttl_seconds > 0).then(|| now + Duration::seconds(ttl_seconds));

    store
        .put(Session {
            id: token.clone(),
            user_id,
            created_at: now,
            expires_at,
        })
        .await?;

    Ok(token)
}

/// Resolves a token to the bound user id. An expired record is deleted on
/// sight and reported as absent, so callers never see a stale session.
pub async fn resolve_session(
    store: &dyn SessionStore,
    token: &str,
) -> sqlx::Result<Option<i64>> {
    let Some(session) = store.get(token).await? else {
        return Ok(None);
    };

    if session.is_expired(Utc::now()) {
        store.delete(token).await?;
        return Ok(None);
    }

    Ok(Some(session.user_id))
}

/// Idempotent removal; unknown or absent tokens are a no-op.
pub async fn delete_session(store: &dyn SessionStore, token: Option<&str>) -> sqlx::Result<()> {
    if let Some(token) = token.filter(|t| !t.is_empty()) {
        store.delete(token).await?;
    }
    Ok(())
}
