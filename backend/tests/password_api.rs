//! Credential verification across both stored formats.

use printshop_backend::utils::password::{hash_password, verify_password, PasswordVerifier};

#[test]
fn hashed_credentials_verify_iff_the_derivation_matches() {
    let stored = hash_password("correct-horse-battery-staple");
    assert!(verify_password("correct-horse-battery-staple", Some(&stored)));
    assert!(!verify_password("incorrect-horse", Some(&stored)));
}

#[test]
fn two_hashes_of_the_same_password_differ_but_both_verify() {
    let a = hash_password("pw");
    let b = hash_password("pw");
    assert_ne!(a, b); // random salt per hash
    assert!(verify_password("pw", Some(&a)));
    assert!(verify_password("pw", Some(&b)));
}

#[test]
fn legacy_plaintext_rows_verify_by_direct_comparison() {
    assert!(verify_password("swordfish", Some("swordfish")));
    assert!(!verify_password("swordfish", Some("Swordfish")));
}

#[test]
fn unparseable_structured_values_fail_closed() {
    for stored in [
        "pbkdf2_sha256$",
        "pbkdf2_sha256$abc$def$ghi",
        "pbkdf2_sha256$1000$%%%$AAAA",
        "pbkdf2_sha256$0$AAAA$AAAA",
    ] {
        assert!(
            !verify_password("anything", Some(stored)),
            "{stored} should fail verification, not error"
        );
    }
}

#[test]
fn the_legacy_strategy_is_isolated_behind_the_verifier_enum() {
    assert!(matches!(
        PasswordVerifier::parse("plain"),
        Some(PasswordVerifier::PlaintextLegacy(_))
    ));
    let hashed = hash_password("pw");
    assert!(matches!(
        PasswordVerifier::parse(&hashed),
        Some(PasswordVerifier::Pbkdf2 { .. })
    ));
}
