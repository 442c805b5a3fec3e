//!
//! Credential lifecycle for an account service: bcrypt password hashing and verification,
//! invalidating sessions issued before a password change, and single-use password reset tokens.
//!
//! Storage, transport and session token formats belong to the embedding service. It hands a
//! [`CredentialRecord`] to the [`CredentialManager`] and persists whatever comes back.
//!
pub mod model;
pub mod services;
pub mod utils;

use tracing_subscriber::{prelude::__tracing_subscriber_SubscriberExt, Registry, util::SubscriberInitExt};

pub use model::credential::{CredentialRecord, ResetState};
pub use model::password::PasswordChange;
pub use model::reset_token::IssuedResetToken;
pub use services::CredentialManager;
pub use utils::config::Configuration;
pub use utils::errors::{CredentialError, ErrorCode, ErrorKind};

///
/// Initialise a tracing subscriber filtered by RUST_LOG (INFO if it's not specified).
///
/// Embedding services that install their own subscriber don't need this.
///
pub fn init_tracing() {
    utils::config::default_env("RUST_LOG", "INFO");

    if let Err(err) = Registry::default()
        .with(tracing_subscriber::EnvFilter::from_default_env()) // Set the tracing level to match RUST_LOG env variable.
        .with(tracing_subscriber::fmt::layer().with_test_writer().with_ansi(true))
        .try_init() {
            tracing::debug!("Tracing already initialised: {}", err.to_string()); // Allowed error here - tests call this fn repeatedly.
    }
}
