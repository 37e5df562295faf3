//! Opaque session tokens: generation and keyed hashing.
//!
//! Session tokens are random strings; only their HMAC-SHA256 digest
//! under `SECRET_KEY` is stored server-side, so neither a database leak
//! nor a log leak of digests compromises active sessions.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

/// Generate a cryptographically random session token (the plaintext
/// sent to the client).
pub fn generate_session_token() -> String {
    Uuid::new_v4().to_string()
}

/// Compute the keyed hex digest of a session token.
///
/// Use this to compare an incoming token against the stored digest.
pub fn hash_session_token(token: &str, secret: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(token.as_bytes());
    format!("{:x}", mac.finalize().into_bytes())
}
