use super::CredentialManager;
use crate::{model::{algorithm::BCryptPolicy, credential::CredentialRecord, password::{self, PasswordChange}}, utils::errors::CredentialError};

///
/// Check the password is acceptable, then hash it with a fresh salt.
///
pub fn hash_password(policy: &BCryptPolicy, min_length: usize, plain_text_password: &str)
    -> Result<String, CredentialError> {

    password::validate_plaintext(plain_text_password, min_length)?;
    policy.hash_into_phc(plain_text_password)
}

pub async fn hash_password_async(policy: &BCryptPolicy, min_length: usize, plain_text_password: &str)
    -> Result<String, CredentialError> {

    // Fail fast on bad input without a trip to the thread pool.
    password::validate_plaintext(plain_text_password, min_length)?;

    // Hashing is a highly CPU-bound activity so perform it in the blocking thread pool, not on
    // the event loop.
    let plain_text_password = plain_text_password.to_string();
    let policy = policy.clone();
    tokio::task::spawn_blocking(move || policy.hash_into_phc(&plain_text_password))
        .await
        .map_err(CredentialError::from)?
}

///
/// Hash the new password onto the record and stamp the change. New accounts get no change stamp,
/// they have no earlier sessions to invalidate.
///
pub fn set_password(ctx: &CredentialManager, record: &mut CredentialRecord, change: &PasswordChange, is_new_record: bool)
    -> Result<(), CredentialError> {

    change.check_confirmation()?;

    let phc = ctx.hash_password(&change.password)?;
    let changed_at = ctx.record_password_change(is_new_record);
    record.apply_password(phc, changed_at);

    tracing::debug!("Password set (new account: {})", is_new_record);
    Ok(())
}

pub async fn set_password_async(ctx: &CredentialManager, record: &mut CredentialRecord, change: &PasswordChange, is_new_record: bool)
    -> Result<(), CredentialError> {

    change.check_confirmation()?;

    let phc = ctx.hash_password_async(&change.password).await?;
    let changed_at = ctx.record_password_change(is_new_record);
    record.apply_password(phc, changed_at);

    tracing::debug!("Password set (new account: {})", is_new_record);
    Ok(())
}
