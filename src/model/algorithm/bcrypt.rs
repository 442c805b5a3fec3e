use rand_core::{OsRng, RngCore};
use std::str::FromStr;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use crate::utils::errors::{ErrorCode, CredentialError};

const SALT_LEN: usize = 16;

#[derive(Clone, Copy, Debug, Deserialize, Display, Serialize, PartialEq)]
pub enum BCryptVersion {
    TwoA,
    TwoB,
    TwoX,
    TwoY
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct BCryptPolicy {
    pub version: BCryptVersion,
    pub cost: u32
}

///
/// bcrypt::verify compares the digests in constant time and reproduces the cost from the hash.
///
pub fn validate(phc: &str, plain_text_password: &str) -> Result<bool, CredentialError> {
    bcrypt::verify(plain_text_password, phc).map_err(CredentialError::from)
}

impl Default for BCryptPolicy {
    fn default() -> Self {
        Self {
            version: BCryptVersion::TwoB,
            cost: 12
        }
    }
}

impl BCryptPolicy {
    pub fn with_cost(cost: u32) -> Self {
        Self { cost, ..Default::default() }
    }

    ///
    /// Hash into a modular-crypt string ($2b$12$<salt><digest>) with a fresh salt from the OS.
    ///
    /// bcrypt only reads the first 72 bytes of the password. Anything after that doesn't affect the
    /// hash, so two passwords sharing a 72 byte prefix verify against each other.
    ///
    pub fn hash_into_phc(&self, plain_text_password: &str) -> Result<String, CredentialError> {
        let mut salt = [0u8; SALT_LEN];
        OsRng.try_fill_bytes(&mut salt)?;

        let hashed = bcrypt::hash_with_salt(plain_text_password, self.cost, &salt)?;
        Ok(hashed.format_for_version(self.version.into()))
    }
}

impl From<BCryptVersion> for bcrypt::Version {
    fn from(version: BCryptVersion) -> Self {
        match version {
            BCryptVersion::TwoA => bcrypt::Version::TwoA,
            BCryptVersion::TwoB => bcrypt::Version::TwoB,
            BCryptVersion::TwoX => bcrypt::Version::TwoX,
            BCryptVersion::TwoY => bcrypt::Version::TwoY,
        }
    }
}

impl FromStr for BCryptVersion {
    type Err = CredentialError;

    fn from_str(input: &str) -> Result<BCryptVersion, Self::Err> {
        match input {
            "2a" => Ok(BCryptVersion::TwoA),
            "2b" => Ok(BCryptVersion::TwoB),
            "2x" => Ok(BCryptVersion::TwoX),
            "2y" => Ok(BCryptVersion::TwoY),
            _    => Err(ErrorCode::InvalidPHCFormat.with_msg(&format!("algorithm {} is un-handled", input))),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_hash_and_verify() -> Result<(), CredentialError> {
        let bcrypt = BCryptPolicy::with_cost(4);
        let phc = bcrypt.hash_into_phc("wibble12")?;

        assert_eq!(validate(&phc, "wibble12")?, true);
        assert_eq!(validate(&phc, "wobble12")?, false);
        Ok(())
    }

    #[test]
    fn test_cost_and_version_are_embedded() -> Result<(), CredentialError> {
        let phc = BCryptPolicy::with_cost(5).hash_into_phc("wibble12")?;
        assert!(phc.starts_with("$2b$05$"));
        assert_eq!(phc.len(), 60);
        Ok(())
    }

    #[test]
    fn test_only_the_first_72_bytes_count() -> Result<(), CredentialError> {
        let prefix = "x".repeat(72);
        let phc = BCryptPolicy::with_cost(4).hash_into_phc(&format!("{}A", prefix))?;

        assert_eq!(validate(&phc, &format!("{}B", prefix))?, true);
        assert_eq!(validate(&phc, &"x".repeat(71))?, false);
        Ok(())
    }

    #[test]
    fn test_cost_out_of_range_is_a_config_error() {
        let error = BCryptPolicy::with_cost(2).hash_into_phc("wibble12").unwrap_err();
        assert_eq!(error.error_code(), ErrorCode::InvalidConfig);
    }
}
