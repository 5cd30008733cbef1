//! Login-boundary behavior that needs no database: credential parsing and
//! verification, cookie contract.

use std::time::Duration;

use axum::http::{header, HeaderMap, HeaderValue};
use printshop_backend::{
    handlers::auth::parse_credentials,
    utils::{
        cookies::{build_clear_session_cookie, build_session_cookie, CookieOptions, SameSite},
        password::{hash_password, verify_password},
    },
};

fn headers_with_content_type(value: &'static str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(value));
    headers
}

#[test]
fn login_accepts_json_and_form_with_username_alias() {
    let json_headers = headers_with_content_type("application/json");
    let (email, password) = parse_credentials(
        &json_headers,
        br#"{"username": "admin@example.com", "password": "pw"}"#,
    );
    assert_eq!(email.as_deref(), Some("admin@example.com"));
    assert_eq!(password.as_deref(), Some("pw"));

    let form_headers = headers_with_content_type("application/x-www-form-urlencoded");
    let (email, password) =
        parse_credentials(&form_headers, b"email=admin%40example.com&password=pw");
    assert_eq!(email.as_deref(), Some("admin@example.com"));
    assert_eq!(password.as_deref(), Some("pw"));
}

#[test]
fn missing_fields_yield_no_credentials() {
    let json_headers = headers_with_content_type("application/json");
    let (email, password) = parse_credentials(&json_headers, br#"{"password": "pw"}"#);
    assert!(email.is_none());
    assert_eq!(password.as_deref(), Some("pw"));

    let (email, password) = parse_credentials(&json_headers, b"");
    assert!(email.is_none());
    assert!(password.is_none());
}

#[test]
fn stored_hash_verifies_the_way_login_checks_it() {
    let stored = hash_password("s3cret!");
    assert!(verify_password("s3cret!", Some(&stored)));
    assert!(!verify_password("s3cret", Some(&stored)));
    assert!(!verify_password("s3cret!", None));
}

#[test]
fn session_cookie_follows_the_contract() {
    let options = CookieOptions {
        secure: false,
        same_site: SameSite::Lax,
    };
    let cookie = build_session_cookie("opaque-token", Duration::from_secs(604_800), options);
    assert!(cookie.starts_with("session_id=opaque-token"));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("Max-Age=604800"));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));

    let clear = build_clear_session_cookie(options);
    assert!(clear.contains("session_id="));
    assert!(clear.contains("Max-Age=0"));
}
