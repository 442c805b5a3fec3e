#![allow(dead_code)]

use std::collections::HashMap;
use lazy_static::lazy_static;
use chrono::{DateTime, Duration, Utc};
use parking_lot::{Mutex, RawMutex, lock_api::MutexGuard};
use credentials::{Configuration, CredentialManager, CredentialRecord, PasswordChange};

/// Lowest cost bcrypt allows - keeps the suite quick.
pub const TEST_COST: u32 = 4;

pub const GOOD_PWD: &str = "Sunshine1";

lazy_static! {
    // Tests which change environment variables must hold this so they don't read each other's settings.
    static ref ENV_MUTEX: Mutex<TestConfig> = Mutex::new(TestConfig::default());
}

#[derive(PartialEq)]
pub struct TestConfig {
    map: HashMap<&'static str, &'static str>
}

impl Default for TestConfig {
    fn default() -> Self {
        let mut map = HashMap::new();
        map.insert("CREDENTIALS_BCRYPT_COST", "");
        map.insert("CREDENTIALS_MIN_PASSWORD_LENGTH", "");
        map.insert("CREDENTIALS_RESET_TOKEN_BYTES", "");
        map.insert("CREDENTIALS_RESET_TOKEN_TTL_SECONDS", "");
        map.insert("CREDENTIALS_PASSWORD_CHANGED_SKEW_SECONDS", "");

        Self {
            map
        }
    }
}

impl TestConfig {
    pub fn with(mut self, key: &'static str, value: &'static str) -> Self {
        self.map.insert(key, value);
        self
    }

    ///
    /// Apply the configuration values to the local environment variables. Blank values are removed.
    ///
    fn apply(&self) {
        for entry in &self.map {
            if *entry.1 == String::default() {
                std::env::remove_var(entry.0);
            } else {
                std::env::set_var(entry.0, entry.1);
            }
        }
    }
}

///
/// Acquires a lock so only one test may touch the environment at a time, then applies the config.
///
pub fn lock_env(config: TestConfig) -> MutexGuard<'static, RawMutex, TestConfig> {
    let mut lock = ENV_MUTEX.lock();
    *lock = config;
    lock.apply();
    lock
}

///
/// A manager with a cheap bcrypt cost and the clock fixed at the time given.
///
pub fn manager_at(rfc3339: &str) -> CredentialManager {
    credentials::init_tracing();

    let ctx = CredentialManager::new(Configuration { bcrypt_cost: TEST_COST, ..Default::default() })
        .expect("test configuration is invalid");
    set_time(&ctx, rfc3339);
    ctx
}

pub fn set_time(ctx: &CredentialManager, rfc3339: &str) {
    ctx.set_now(Some(time(rfc3339)));
}

pub fn advance(ctx: &CredentialManager, seconds: i64) {
    ctx.set_now(Some(ctx.now() + Duration::seconds(seconds)));
}

pub fn time(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339)
        .expect("bad test timestamp")
        .with_timezone(&Utc)
}

///
/// A record for an account registered with GOOD_PWD.
///
pub fn registered(ctx: &CredentialManager) -> CredentialRecord {
    let mut record = CredentialRecord::default();
    ctx.set_password(&mut record, &PasswordChange::new(GOOD_PWD, GOOD_PWD), true)
        .expect("registration failed");
    record
}
