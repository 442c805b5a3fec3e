use std::fmt;
use bcrypt::BcryptError;
use config::ConfigError;
use derive_more::Display;
use tokio::task::JoinError;

#[derive(Clone, Copy, Debug, Display, PartialEq)]
pub enum ErrorCode {
    HashThreadingIssue              = 0401,
    InvalidConfig                   = 0508,
    HashingError                    = 0509,
    InvalidPHCFormat                = 0510,
    RandomSourceUnavailable         = 0512,
    PasswordTooShort                = 2002,
    PasswordConfirmMismatch         = 2013,
    PasswordContainsNul             = 2014,
    PasswordNotSpecified            = 2301,
}

///
/// The broad class of an error - this is what callers branch on.
///
#[derive(Clone, Copy, Debug, Display, PartialEq)]
pub enum ErrorKind {
    /// The supplied plaintext was rejected. Surface it to the user as a validation message.
    InvalidInput,

    /// A stored hash is corrupt. Treat as an integrity fault and reject the login.
    MalformedHash,

    /// The secure random source failed. Fatal to the request but worth a retry.
    RandomSource,

    Internal,
}

impl ErrorCode {
    pub fn with_msg(&self, message: &str) -> CredentialError {
        CredentialError::new(*self, message)
    }

    pub fn kind(&self) -> ErrorKind {
        use ErrorCode::*;

        match self {
            PasswordConfirmMismatch |
            PasswordContainsNul     |
            PasswordNotSpecified    |
            PasswordTooShort        => ErrorKind::InvalidInput,

            InvalidPHCFormat => ErrorKind::MalformedHash,

            RandomSourceUnavailable => ErrorKind::RandomSource,

            HashThreadingIssue |
            HashingError       |
            InvalidConfig      => ErrorKind::Internal,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CredentialError {
    error_code: ErrorCode,
    message: String,
}

impl CredentialError {
    pub fn new(error_code: ErrorCode, message: &str) -> Self {
        CredentialError { error_code, message: message.to_string() }
    }

    pub fn error_code(&self) -> ErrorCode {
        self.error_code
    }

    pub fn kind(&self) -> ErrorKind {
        self.error_code.kind()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    ///
    /// Only an exhausted entropy source is worth the caller trying again.
    ///
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::RandomSource
    }
}

impl fmt::Display for CredentialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.error_code, self.error_code as u32, self.message)
    }
}

impl std::error::Error for CredentialError {}

impl From<BcryptError> for CredentialError {
    fn from(error: BcryptError) -> Self {
        match error {
            BcryptError::CostNotAllowed(_) => ErrorCode::InvalidConfig
                .with_msg(&format!("Invalid configuration for bcrypt: {}", error)),

            // bcrypt refuses plaintext containing a NUL byte. That's the input, not the hash.
            BcryptError::InvalidPassword => ErrorCode::PasswordContainsNul
                .with_msg("passwords may not contain a NUL character"),

            BcryptError::Io(_) => ErrorCode::HashingError
                .with_msg(&format!("Unable to hash password: {}", error)),

            // Everything else is a failure to parse the stored hash. The bcrypt message can echo the
            // hash back so it is not included.
            _ => ErrorCode::InvalidPHCFormat
                .with_msg("The stored hash is not a valid bcrypt hash"),
        }
    }
}

impl From<JoinError> for CredentialError {
    fn from(error: JoinError) -> Self {
        ErrorCode::HashThreadingIssue.with_msg(&format!("Unable to hash: {}", error))
    }
}

impl From<rand_core::Error> for CredentialError {
    fn from(error: rand_core::Error) -> Self {
        ErrorCode::RandomSourceUnavailable.with_msg(&format!("The secure random source failed: {}", error))
    }
}

impl From<ConfigError> for CredentialError {
    fn from(error: ConfigError) -> Self {
        ErrorCode::InvalidConfig.with_msg(&format!("Unable to load configuration: {}", error))
    }
}

impl From<serde_json::Error> for CredentialError {
    fn from(error: serde_json::Error) -> Self {
        ErrorCode::InvalidConfig.with_msg(&format!("Unable to convert to json: {}", error))
    }
}
