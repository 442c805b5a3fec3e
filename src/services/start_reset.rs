use chrono::Duration;
use super::CredentialManager;
use crate::{model::{credential::CredentialRecord, reset_token::IssuedResetToken}, utils::errors::CredentialError};

pub fn issue_reset_token(ctx: &CredentialManager) -> Result<IssuedResetToken, CredentialError> {
    let config = ctx.config();
    let ttl = Duration::seconds(config.reset_token_ttl_seconds);

    match IssuedResetToken::generate(config.reset_token_bytes, ctx.now(), ttl) {
        Ok(issued) => {
            tracing::debug!("Reset token issued, expires at {}", issued.expires_at);
            Ok(issued)
        },
        Err(error) => {
            tracing::error!("Unable to issue a reset token: {}", error);
            Err(error)
        }
    }
}

///
/// Issue a token and store its fingerprint on the record. Any earlier token stops working.
///
pub fn start_reset(ctx: &CredentialManager, record: &mut CredentialRecord) -> Result<String, CredentialError> {
    let issued = issue_reset_token(ctx)?;
    record.store_reset_token(&issued);
    Ok(issued.raw_token)
}
