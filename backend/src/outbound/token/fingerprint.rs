//! Token key fingerprinting for operational visibility.
//!
//! Operators compare the logged fingerprint across replicas to confirm they
//! share a signing key without the key itself reaching the logs.

use sha2::{Digest, Sha256};

use super::config::TokenKey;

/// Length of the fingerprint in bytes before hex encoding.
const FINGERPRINT_BYTES: usize = 8;

/// Truncated SHA-256 of the key material as 16 lowercase hex characters.
///
/// # Examples
///
/// ```rust
/// use jobboard::outbound::token::{TokenKey, key_fingerprint};
///
/// let key = TokenKey::from_bytes(vec![b'k'; 32]);
/// let fp = key_fingerprint(&key);
/// assert_eq!(fp.len(), 16);
/// ```
#[must_use]
pub fn key_fingerprint(key: &TokenKey) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    let result = hasher.finalize();
    hex::encode(&result[..FINGERPRINT_BYTES])
}
