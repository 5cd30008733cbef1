//! Password verification against the stored credential formats.
//!
//! Two representations exist in the user table:
//! - `pbkdf2_sha256$<iterations>$<salt_b64>$<hash_b64>` produced by the current
//!   admin flows;
//! - legacy plaintext values from records that predate hashing. The legacy
//!   variant is kept only so those rows keep working; no migration rewrites
//!   them yet, so removing [`PasswordVerifier::PlaintextLegacy`] requires a
//!   data migration first.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use pbkdf2::pbkdf2_hmac;
use rand::{rngs::OsRng, RngCore};
use sha2::Sha256;
use subtle::ConstantTimeEq;

const PBKDF2_PREFIX: &str = "pbkdf2_sha256$";
const PBKDF2_ITERATIONS: u32 = 260_000;
const SALT_LEN: usize = 16;
const HASH_LEN: usize = 32;

/// Verification strategy parsed from the stored representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasswordVerifier {
    Pbkdf2 {
        iterations: u32,
        salt: Vec<u8>,
        hash: Vec<u8>,
    },
    PlaintextLegacy(String),
}

impl PasswordVerifier {
    /// Parses the stored value. Returns `None` for a structured value that
    /// fails to parse; the caller treats that as a verification failure.
    pub fn parse(stored: &str) -> Option<Self> {
        let Some(rest) = stored.strip_prefix(PBKDF2_PREFIX) else {
            return Some(PasswordVerifier::PlaintextLegacy(stored.to_string()));
        };

        let mut parts = rest.splitn(3, '$');
        let iterations: u32 = parts.next()?.parse().ok()?;
        let salt = STANDARD.decode(parts.next()?).ok()?;
        let hash = STANDARD.decode(parts.next()?).ok()?;
        if iterations == 0 || salt.is_empty() || hash.is_empty() {
            return None;
        }
        Some(PasswordVerifier::Pbkdf2 {
            iterations,
            salt,
            hash,
        })
    }

    pub fn verify(&self, candidate: &str) -> bool {
        match self {
            PasswordVerifier::Pbkdf2 {
                iterations,
                salt,
                hash,
            } => {
                let mut derived = vec![0u8; hash.len()];
                pbkdf2_hmac::<Sha256>(candidate.as_bytes(), salt, *iterations, &mut derived);
                bool::from(derived.ct_eq(hash))
            }
            PasswordVerifier::PlaintextLegacy(stored) => {
                bool::from(candidate.as_bytes().ct_eq(stored.as_bytes()))
            }
        }
    }
}

/// Verifies a candidate password against the stored representation.
///
/// `None` (no password set) and unparseable structured values both verify as
/// false rather than erroring, so a corrupt row reads as bad credentials.
pub fn verify_password(candidate: &str, stored: Option<&str>) -> bool {
    let Some(stored) = stored else {
        return false;
    };
    match PasswordVerifier::parse(stored) {
        Some(verifier) => verifier.verify(candidate),
        None => false,
    }
}

/// Hashes a password into the structured `pbkdf2_sha256$...` format.
pub fn hash_password(password: &str) -> String {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);

    let mut hash = [0u8; HASH_LEN];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), &salt, PBKDF2_ITERATIONS, &mut hash);

    format!(
        "{}{}${}${}",
        PBKDF2_PREFIX,
        PBKDF2_ITERATIONS,
        STANDARD.encode(salt),
        STANDARD.encode(hash)
    )
}
