//! Session lifecycle properties, exercised against the in-memory binding of
//! the session store capability.

use chrono::{Duration, Utc};
use printshop_backend::{
    models::session::Session,
    services::session::{
        create_session_for_user, delete_session, resolve_session, InMemorySessionStore,
        SessionStore,
    },
};

#[tokio::test]
async fn create_then_resolve_returns_the_issuing_user() {
    let store = InMemorySessionStore::new();
    let token = create_session_for_user(&store, 42, 3600).await.unwrap();
    assert_eq!(resolve_session(&store, &token).await.unwrap(), Some(42));
}

#[tokio::test]
async fn tokens_never_issued_resolve_to_not_found() {
    let store = InMemorySessionStore::new();
    assert_eq!(
        resolve_session(&store, "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA")
            .await
            .unwrap(),
        None
    );
}

#[tokio::test]
async fn session_is_valid_just_before_expiry_and_gone_just_after() {
    let store = InMemorySessionStore::new();

    // A session created with ttl = 3600, observed at t+3599: still valid.
    store
        .put(Session {
            id: "almost-expired".into(),
            user_id: 1,
            created_at: Utc::now() - Duration::seconds(3599),
            expires_at: Some(Utc::now() + Duration::seconds(1)),
        })
        .await
        .unwrap();
    assert_eq!(
        resolve_session(&store, "almost-expired").await.unwrap(),
        Some(1)
    );

    // The same session observed at t+3601: not found AND the record removed.
    store
        .put(Session {
            id: "just-expired".into(),
            user_id: 1,
            created_at: Utc::now() - Duration::seconds(3601),
            expires_at: Some(Utc::now() - Duration::seconds(1)),
        })
        .await
        .unwrap();
    assert_eq!(resolve_session(&store, "just-expired").await.unwrap(), None);
    assert!(store.get("just-expired").await.unwrap().is_none());

    // Idempotent: a second resolve is still a clean not-found.
    assert_eq!(resolve_session(&store, "just-expired").await.unwrap(), None);
}

#[tokio::test]
async fn delete_session_tolerates_none_and_unknown_tokens() {
    let store = InMemorySessionStore::new();
    delete_session(&store, None).await.unwrap();
    delete_session(&store, Some("nonexistent")).await.unwrap();

    let token = create_session_for_user(&store, 5, 60).await.unwrap();
    delete_session(&store, Some(&token)).await.unwrap();
    assert_eq!(resolve_session(&store, &token).await.unwrap(), None);
}

#[tokio::test]
async fn a_user_may_hold_multiple_concurrent_sessions() {
    let store = InMemorySessionStore::new();
    let first = create_session_for_user(&store, 9, 3600).await.unwrap();
    let second = create_session_for_user(&store, 9, 3600).await.unwrap();
    assert_ne!(first, second);
    assert_eq!(resolve_session(&store, &first).await.unwrap(), Some(9));
    assert_eq!(resolve_session(&store, &second).await.unwrap(), Some(9));
}
