use std::fmt;
use crate::utils::errors::{ErrorCode, CredentialError};

///
/// A new password as the account service receives it: typed twice.
///
/// Neither field is ever serialised or logged, the Debug output is redacted.
///
#[derive(Clone)]
pub struct PasswordChange {
    pub password: String,
    pub password_confirm: String,
}

impl PasswordChange {
    pub fn new(password: &str, password_confirm: &str) -> Self {
        Self {
            password: password.to_string(),
            password_confirm: password_confirm.to_string(),
        }
    }

    ///
    /// Check both entries agree. The plaintext rules are applied when the password is hashed.
    ///
    pub fn check_confirmation(&self) -> Result<(), CredentialError> {
        if self.password != self.password_confirm {
            return Err(ErrorCode::PasswordConfirmMismatch
                .with_msg("Password confirm is not same as password"))
        }

        Ok(())
    }
}

impl fmt::Debug for PasswordChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordChange")
            .field("password", &"<redacted>")
            .field("password_confirm", &"<redacted>")
            .finish()
    }
}

///
/// Check the plain text password is acceptable for hashing.
///
/// Length is counted in characters, not bytes, so multi-byte passwords are not penalised.
///
pub fn validate_plaintext(plain_text_password: &str, min_length: usize) -> Result<(), CredentialError> {
    if plain_text_password.is_empty() {
        return Err(ErrorCode::PasswordNotSpecified.with_msg("A password must be specified"))
    }

    if plain_text_password.contains('\0') {
        return Err(ErrorCode::PasswordContainsNul.with_msg("passwords may not contain a NUL character"))
    }

    if plain_text_password.chars().count() < min_length {
        return Err(ErrorCode::PasswordTooShort
            .with_msg(&format!("passwords must be at least {} characters", min_length)))
    }

    Ok(())
}
