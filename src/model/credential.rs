use std::fmt;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use super::reset_token::IssuedResetToken;

///
/// Where a record is in the password-reset flow.
///
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ResetState {
    NoPendingReset,
    PendingReset { expires_at: DateTime<Utc> },
}

///
/// The credential fields of a user account. The account service owns and persists the record,
/// this crate only reads and writes these fields.
///
#[derive(Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct CredentialRecord {
    pub password_hash: String,
    pub password_changed_at: Option<DateTime<Utc>>,
    pub reset_token_fingerprint: Option<String>,
    pub reset_token_expires_at: Option<DateTime<Utc>>,
}

impl CredentialRecord {
    ///
    /// Store a new hash and, unless the account is new, the change timestamp.
    ///
    /// The timestamp never moves backwards, a skewed clock keeps the previous value.
    ///
    pub fn apply_password(&mut self, password_hash: String, changed_at: Option<DateTime<Utc>>) {
        self.password_hash = password_hash;

        if let Some(changed_at) = changed_at {
            self.password_changed_at = match self.password_changed_at {
                Some(previous) if previous > changed_at => Some(previous),
                _ => Some(changed_at),
            };
        }
    }

    ///
    /// Store the fingerprint and expiry of a new reset token, superseding any previous one.
    ///
    pub fn store_reset_token(&mut self, issued: &IssuedResetToken) {
        self.reset_token_fingerprint = Some(issued.fingerprint.clone());
        self.reset_token_expires_at = Some(issued.expires_at);
    }

    pub fn clear_reset_token(&mut self) {
        self.reset_token_fingerprint = None;
        self.reset_token_expires_at = None;
    }

    pub fn reset_state(&self, now: DateTime<Utc>) -> ResetState {
        match (&self.reset_token_fingerprint, self.reset_token_expires_at) {
            (Some(_), Some(expires_at)) if now <= expires_at => ResetState::PendingReset { expires_at },
            _ => ResetState::NoPendingReset,
        }
    }
}

impl fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("password_hash", &"<redacted>")
            .field("password_changed_at", &self.password_changed_at)
            .field("reset_token_fingerprint", &self.reset_token_fingerprint.as_ref().map(|_| "<redacted>"))
            .field("reset_token_expires_at", &self.reset_token_expires_at)
            .finish()
    }
}
