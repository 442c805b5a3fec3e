mod common;
use chrono::{Duration, Utc};
use more_asserts::assert_le;
use credentials::{Configuration, CredentialManager, PasswordChange};
use crate::common::{manager_at, registered, time};


#[test]
fn test_new_accounts_have_no_change_stamp() {
    let ctx = manager_at("2021-08-23T09:30:00Z");
    assert_eq!(ctx.record_password_change(true), None);
}

#[test]
fn test_changes_are_backdated_by_at_least_a_second() {
    let ctx = CredentialManager::new(Configuration { bcrypt_cost: 4, ..Default::default() }).unwrap();

    let before = Utc::now();
    let changed_at = ctx.record_password_change(false).unwrap();
    let after = Utc::now();

    assert_le!(before - Duration::seconds(1), changed_at);
    assert_le!(changed_at, after - Duration::seconds(1));
    assert!(changed_at < after);
}

#[test]
fn test_a_larger_skew_is_honoured() {
    let ctx = CredentialManager::new(Configuration { bcrypt_cost: 4, password_changed_skew_seconds: 5, ..Default::default() }).unwrap();
    ctx.set_now(Some(time("2021-08-23T09:30:00Z")));

    assert_eq!(ctx.record_password_change(false), Some(time("2021-08-23T09:29:55Z")));
}

#[test]
fn test_sessions_issued_before_a_change_are_stale() {
    let epoch = time("2021-08-23T09:30:00Z").timestamp();
    let ctx = manager_at("2021-08-23T09:30:00Z");
    let mut record = registered(&ctx);

    // Nothing is stale until the password changes.
    assert!(!ctx.is_session_stale(&record, epoch - 1_000_000));

    // Password changed at t=100 - recorded as t=99.
    ctx.set_now(Some(time("2021-08-23T09:31:40Z")));
    ctx.set_password(&mut record, &PasswordChange::new("Moonshine2", "Moonshine2"), false).unwrap();
    assert_eq!(record.password_changed_at.unwrap().timestamp(), epoch + 99);

    assert!(ctx.is_session_stale(&record, epoch + 50));
    assert!(ctx.is_session_stale(&record, epoch + 98));
    assert!(!ctx.is_session_stale(&record, epoch + 99));
    assert!(!ctx.is_session_stale(&record, epoch + 100));
    assert!(!ctx.is_session_stale(&record, epoch + 150));
}

#[test]
fn test_changed_after_works_on_bare_values() {
    let ctx = manager_at("2021-08-23T09:30:00Z");
    let changed_at = time("2021-08-23T09:30:00Z");

    assert!(!ctx.password_changed_after(None, 0));
    assert!(ctx.password_changed_after(Some(changed_at), changed_at.timestamp() - 1));
    assert!(!ctx.password_changed_after(Some(changed_at), changed_at.timestamp()));
}
