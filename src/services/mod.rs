mod complete_reset;
mod hash_password;
mod password_changed;
mod start_reset;
mod validate_password;

use parking_lot::RwLock;
use chrono::{DateTime, Utc};
use tracing::instrument;
use crate::model::algorithm::BCryptPolicy;
use crate::model::credential::CredentialRecord;
use crate::model::password::PasswordChange;
use crate::model::reset_token::IssuedResetToken;
use crate::utils::{config::Configuration, errors::CredentialError, time_provider::TimeProvider};

///
/// The credential manager gives the account service the hasher, the change tracker and the reset
/// token issuer over a shared configuration and clock.
///
/// It holds no per-user state. Every operation works on the values or the record passed in, and
/// serialising concurrent writes to one record is left to the store.
///
pub struct CredentialManager {
    config: Configuration,
    policy: BCryptPolicy,
    time_provider: RwLock<TimeProvider>,
}

impl CredentialManager {
    pub fn new(config: Configuration) -> Result<Self, CredentialError> {
        config.validate()?;

        Ok(CredentialManager {
            policy: BCryptPolicy::with_cost(config.bcrypt_cost),
            config,
            time_provider: RwLock::new(TimeProvider::default()),
        })
    }

    ///
    /// Build a manager from CREDENTIALS_* environment variables.
    ///
    pub fn from_env() -> Result<Self, CredentialError> {
        let config = Configuration::from_env()?;
        tracing::info!("Credential settings\n{}", config.fmt_console()?);
        Self::new(config)
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.time_provider.read().now()
    }

    ///
    /// Set or clear the fixed time.
    ///
    pub fn set_now(&self, now: Option<DateTime<Utc>>) {
        self.time_provider.write().fix(now);
    }

    // Hasher.

    ///
    /// Hash a new password. Only the first 72 bytes take part (a bcrypt limit), longer passwords
    /// are accepted but the extra bytes are not checked at login.
    ///
    #[instrument(skip(self, plain_text_password))]
    pub fn hash_password(&self, plain_text_password: &str) -> Result<String, CredentialError> {
        hash_password::hash_password(&self.policy, self.config.min_password_length, plain_text_password)
    }

    ///
    /// As hash_password but run on tokio's blocking pool. Must be awaited inside a tokio runtime.
    ///
    #[instrument(skip(self, plain_text_password))]
    pub async fn hash_password_async(&self, plain_text_password: &str) -> Result<String, CredentialError> {
        hash_password::hash_password_async(&self.policy, self.config.min_password_length, plain_text_password).await
    }

    #[instrument(skip(self, plain_text_password, phc))]
    pub fn verify_password(&self, plain_text_password: &str, phc: &str) -> Result<bool, CredentialError> {
        validate_password::verify_password(plain_text_password, phc)
    }

    #[instrument(skip(self, plain_text_password, phc))]
    pub async fn verify_password_async(&self, plain_text_password: &str, phc: &str) -> Result<bool, CredentialError> {
        validate_password::verify_password_async(plain_text_password, phc).await
    }

    // Change tracker.

    pub fn record_password_change(&self, is_new_record: bool) -> Option<DateTime<Utc>> {
        password_changed::record_change(self, is_new_record)
    }

    pub fn password_changed_after(&self, changed_at: Option<DateTime<Utc>>, issued_at: i64) -> bool {
        password_changed::changed_after(changed_at, issued_at)
    }

    // Reset token issuer.

    #[instrument(skip(self))]
    pub fn issue_reset_token(&self) -> Result<IssuedResetToken, CredentialError> {
        start_reset::issue_reset_token(self)
    }

    ///
    /// Validate against the manager's clock.
    ///
    pub fn validate_reset_token(&self, presented_raw_token: &str, stored_fingerprint: Option<&str>, stored_expires_at: Option<DateTime<Utc>>) -> bool {
        complete_reset::validate_reset_token(self, presented_raw_token, stored_fingerprint, stored_expires_at)
    }

    // Record level flows.

    ///
    /// Registration (is_new_record = true) or a password change.
    ///
    #[instrument(skip(self, record, change))]
    pub fn set_password(&self, record: &mut CredentialRecord, change: &PasswordChange, is_new_record: bool) -> Result<(), CredentialError> {
        hash_password::set_password(self, record, change, is_new_record)
    }

    #[instrument(skip(self, record, change))]
    pub async fn set_password_async(&self, record: &mut CredentialRecord, change: &PasswordChange, is_new_record: bool) -> Result<(), CredentialError> {
        hash_password::set_password_async(self, record, change, is_new_record).await
    }

    ///
    /// Login - check a candidate against the record's stored hash.
    ///
    #[instrument(skip(self, record, candidate))]
    pub fn check_password(&self, record: &CredentialRecord, candidate: &str) -> Result<bool, CredentialError> {
        validate_password::verify_password(candidate, &record.password_hash)
    }

    pub fn is_session_stale(&self, record: &CredentialRecord, issued_at: i64) -> bool {
        password_changed::changed_after(record.password_changed_at, issued_at)
    }

    ///
    /// Forgot password - store the new fingerprint on the record and return the raw token for the
    /// caller to send out-of-band.
    ///
    #[instrument(skip(self, record))]
    pub fn start_reset(&self, record: &mut CredentialRecord) -> Result<String, CredentialError> {
        start_reset::start_reset(self, record)
    }

    ///
    /// Redeem a reset token. On success the new password is applied and the token is cleared in
    /// the same update.
    ///
    #[instrument(skip(self, record, presented_raw_token, change))]
    pub fn complete_reset(&self, record: &mut CredentialRecord, presented_raw_token: &str, change: &PasswordChange) -> Result<bool, CredentialError> {
        complete_reset::complete_reset(self, record, presented_raw_token, change)
    }
}
