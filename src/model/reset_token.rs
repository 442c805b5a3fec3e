use std::fmt;
use subtle::ConstantTimeEq;
use sha2::{Digest, Sha256};
use chrono::{DateTime, Duration, Utc};
use rand_core::{OsRng, RngCore};
use crate::utils::errors::CredentialError;

///
/// A freshly issued reset token.
///
/// `raw_token` goes to the user (email, SMS) and nowhere else. Only the fingerprint and expiry
/// are persisted on the credential record.
///
#[derive(Clone)]
pub struct IssuedResetToken {
    pub raw_token: String,
    pub fingerprint: String,
    pub expires_at: DateTime<Utc>,
}

impl IssuedResetToken {
    ///
    /// Generate `token_bytes` from the OS entropy source. There is no fallback source, if the OS
    /// cannot provide randomness the issue fails.
    ///
    pub fn generate(token_bytes: usize, now: DateTime<Utc>, ttl: Duration) -> Result<Self, CredentialError> {
        let mut bytes = vec![0u8; token_bytes];
        OsRng.try_fill_bytes(&mut bytes)?;

        let raw_token = hex::encode(&bytes);
        let fingerprint = fingerprint(&raw_token);

        Ok(Self { raw_token, fingerprint, expires_at: now + ttl })
    }
}

impl fmt::Debug for IssuedResetToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IssuedResetToken")
            .field("raw_token", &"<redacted>")
            .field("fingerprint", &self.fingerprint)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

///
/// The stored form of a reset token: lower-case hex SHA-256.
///
/// A fast digest is enough here, the token already carries 256 bits of entropy.
///
pub fn fingerprint(raw_token: &str) -> String {
    hex::encode(Sha256::digest(raw_token.as_bytes()))
}

///
/// True only if the presented token digests to the stored fingerprint and the expiry hasn't
/// passed. Missing state on either side is simply false.
///
pub fn validate(presented_raw_token: &str, stored_fingerprint: Option<&str>, stored_expires_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    let (stored_fingerprint, stored_expires_at) = match (stored_fingerprint, stored_expires_at) {
        (Some(fingerprint), Some(expires_at)) => (fingerprint, expires_at),
        _ => return false,
    };

    let presented = fingerprint(presented_raw_token);

    // Both checks are evaluated so the outcome doesn't reveal which one failed.
    let matches: bool = presented.as_bytes().ct_eq(stored_fingerprint.as_bytes()).into();
    let in_date = now <= stored_expires_at;

    matches & in_date
}
