use chrono::{DateTime, Utc};
use super::CredentialManager;
use crate::{model::{credential::{CredentialRecord, ResetState}, password::PasswordChange, reset_token}, utils::errors::CredentialError};

pub fn validate_reset_token(ctx: &CredentialManager, presented_raw_token: &str, stored_fingerprint: Option<&str>, stored_expires_at: Option<DateTime<Utc>>)
    -> bool {

    reset_token::validate(presented_raw_token, stored_fingerprint, stored_expires_at, ctx.now())
}

///
/// Redeem a reset token and apply the new password.
///
/// Ok(false) if the token doesn't match or has expired. An expired (or half-stored) reset is
/// cleared from the record while we're here. If the new password is rejected the reset stays
/// pending so the user can try again with the same token.
///
pub fn complete_reset(ctx: &CredentialManager, record: &mut CredentialRecord, presented_raw_token: &str, change: &PasswordChange)
    -> Result<bool, CredentialError> {

    let now = ctx.now();

    let valid = reset_token::validate(
        presented_raw_token,
        record.reset_token_fingerprint.as_deref(),
        record.reset_token_expires_at,
        now);

    if !valid {
        if record.reset_token_fingerprint.is_some() && record.reset_state(now) == ResetState::NoPendingReset {
            record.clear_reset_token();
        }

        tracing::debug!("Reset token not accepted");
        return Ok(false)
    }

    ctx.set_password(record, change, false)?;

    // Single use - the token can't be replayed once the password has changed.
    record.clear_reset_token();

    tracing::info!("Password reset completed");
    Ok(true)
}
