pub mod bcrypt;

use std::str::FromStr;
use self::bcrypt::BCryptVersion;
use crate::utils::errors::{ErrorCode, CredentialError};

pub use self::bcrypt::BCryptPolicy;


///
/// Validate if the plain_text_password matches the hashed password provided.
///
/// The cost and salt are read back out of the stored hash so hashes made under an older cost
/// still verify. A mismatch is Ok(false), only a corrupt hash is an error.
///
pub fn validate(plain_text_password: &str, phc: &str) -> Result<bool, CredentialError> {
    select(phc)?;

    // No accepted password contains NUL, so such a candidate can't match. The stored hash is still
    // run through bcrypt so a corrupt one is reported and the cost of the call stays the same.
    if plain_text_password.contains('\0') {
        bcrypt::validate(phc, &plain_text_password.replace('\0', ""))?;
        return Ok(false)
    }

    bcrypt::validate(phc, plain_text_password)
}

///
/// Parse the first part of the modular-crypt string and return the bcrypt version.
///
fn select(phc: &str) -> Result<BCryptVersion, CredentialError> {
    let mut split = phc.split('$');

    // The string must start with a '$' so the first part is blank.
    match split.next() {
        Some("") => {},
        _ => return Err(ErrorCode::InvalidPHCFormat.with_msg("The hash is invalid, it must start with '$'")),
    }

    match split.next() {
        Some(version) => BCryptVersion::from_str(version),
        None => Err(ErrorCode::InvalidPHCFormat.with_msg("The hash is invalid, there's no algorithm")),
    }
}
