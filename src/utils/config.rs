use std::env::VarError;
use config::ConfigError;
use serde::{Deserialize, Serialize};
use super::errors::{CredentialError, ErrorCode};

/// Every environment variable read by the configuration starts with this.
pub const ENV_PREFIX: &str = "CREDENTIALS";

const MIN_BCRYPT_COST: u32 = 4;
const MAX_BCRYPT_COST: u32 = 31;
const MIN_RESET_TOKEN_BYTES: usize = 32;
const MAX_RESET_TOKEN_BYTES: usize = 1024;
const MAX_RESET_TOKEN_TTL_SECONDS: i64 = 24 * 60 * 60;
const MAX_PASSWORD_CHANGED_SKEW_SECONDS: i64 = 60 * 60;

///
/// The credential settings - initialised once by the embedding service.
///
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Configuration {
    pub bcrypt_cost: u32,                   // The bcrypt work factor for new hashes. Existing hashes carry their own.
    pub min_password_length: usize,         // The fewest characters a plaintext password may have.
    pub reset_token_bytes: usize,           // How many random bytes go into a reset token.
    pub reset_token_ttl_seconds: i64,       // How long a reset token may be redeemed for.
    pub password_changed_skew_seconds: i64, // How far back a password change is stamped.
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            bcrypt_cost: 12,
            min_password_length: 8,
            reset_token_bytes: 32,
            reset_token_ttl_seconds: 10 * 60,
            password_changed_skew_seconds: 1,
        }
    }
}

impl Configuration {
    ///
    /// Load the configuration from CREDENTIALS_* environment variables (and a .env file if present).
    ///
    pub fn from_env() -> Result<Configuration, CredentialError> {
        // Load any local dev settings as environment variables from a .env file.
        dotenv::dotenv().ok();

        let config = Self::load()?;
        config.validate()?;
        Ok(config)
    }

    fn load() -> Result<Configuration, ConfigError> {
        let defaults = Configuration::default();
        let mut cfg = config::Config::default();

        // Merge any environment variables with the same name as the struct fields.
        cfg.merge(config::Environment::with_prefix(ENV_PREFIX))?;

        // Set defaults for settings that were not specified.
        cfg.set_default("bcrypt_cost", defaults.bcrypt_cost as i64)?;
        cfg.set_default("min_password_length", defaults.min_password_length as i64)?;
        cfg.set_default("reset_token_bytes", defaults.reset_token_bytes as i64)?;
        cfg.set_default("reset_token_ttl_seconds", defaults.reset_token_ttl_seconds)?;
        cfg.set_default("password_changed_skew_seconds", defaults.password_changed_skew_seconds)?;

        cfg.try_into()
    }

    ///
    /// Reject settings which would weaken the guarantees callers rely on.
    ///
    pub fn validate(&self) -> Result<(), CredentialError> {
        if self.bcrypt_cost < MIN_BCRYPT_COST || self.bcrypt_cost > MAX_BCRYPT_COST {
            return Err(ErrorCode::InvalidConfig
                .with_msg(&format!("bcrypt_cost must be between {} and {}", MIN_BCRYPT_COST, MAX_BCRYPT_COST)))
        }

        if self.min_password_length == 0 {
            return Err(ErrorCode::InvalidConfig.with_msg("min_password_length must be at least 1"))
        }

        if self.reset_token_bytes < MIN_RESET_TOKEN_BYTES || self.reset_token_bytes > MAX_RESET_TOKEN_BYTES {
            return Err(ErrorCode::InvalidConfig
                .with_msg(&format!("reset_token_bytes must be between {} and {}", MIN_RESET_TOKEN_BYTES, MAX_RESET_TOKEN_BYTES)))
        }

        if self.reset_token_ttl_seconds < 1 || self.reset_token_ttl_seconds > MAX_RESET_TOKEN_TTL_SECONDS {
            return Err(ErrorCode::InvalidConfig
                .with_msg(&format!("reset_token_ttl_seconds must be between 1 and {}", MAX_RESET_TOKEN_TTL_SECONDS)))
        }

        // A zero skew would let a session issued in the same second as the change be rejected.
        if self.password_changed_skew_seconds < 1 || self.password_changed_skew_seconds > MAX_PASSWORD_CHANGED_SKEW_SECONDS {
            return Err(ErrorCode::InvalidConfig
                .with_msg(&format!("password_changed_skew_seconds must be between 1 and {}", MAX_PASSWORD_CHANGED_SKEW_SECONDS)))
        }

        Ok(())
    }

    ///
    /// Pretty-print the config, one setting per line.
    ///
    pub fn fmt_console(&self) -> Result<String, CredentialError> {
        // Serialise to JSON so we have fields to iterate.
        let values = serde_json::to_value(&self)?;

        let values = match values.as_object() {
            Some(values) => values,
            None => return Err(ErrorCode::InvalidConfig.with_msg("No config props")),
        };

        // Sort by keys.
        let mut sorted: Vec<_> = values.iter().collect();
        sorted.sort_by_key(|a| a.0);

        let mut output = String::new();
        for (k, v) in sorted {
            output.push_str(&format!("{:>30}: {}\n", k, v));
        }

        Ok(output)
    }
}

///
/// If the specified environment variable is not set for this process, set it to the default value specified.
///
pub fn default_env(key: &str, value: &str) {
    if let Err(VarError::NotPresent) = std::env::var(key) {
        std::env::set_var(key, value);
    }
}
