use crate::{model::algorithm, utils::errors::{CredentialError, ErrorKind}};

///
/// Validate the password matches the stored hash.
///
/// A wrong password is an ordinary false. A corrupt hash is an integrity fault: it is logged
/// (code only, never the hash) and returned so the caller rejects the login.
///
pub fn verify_password(plain_text_password: &str, phc: &str) -> Result<bool, CredentialError> {
    let result = algorithm::validate(plain_text_password, phc);
    log_malformed(&result);
    result
}

pub async fn verify_password_async(plain_text_password: &str, phc: &str) -> Result<bool, CredentialError> {
    // This is a highly CPU-bound activity and should be performed on the blocking worker thread pool.
    let phc = phc.to_string();
    let plain_text_password = plain_text_password.to_string();

    let result = tokio::task::spawn_blocking(move || algorithm::validate(&plain_text_password, &phc))
        .await
        .map_err(CredentialError::from)
        .and_then(|valid| valid);

    log_malformed(&result);
    result
}

fn log_malformed(result: &Result<bool, CredentialError>) {
    if let Err(error) = result {
        if error.kind() == ErrorKind::MalformedHash {
            tracing::warn!("Stored password hash is malformed ({})", error.error_code() as u32);
        }
    }
}
