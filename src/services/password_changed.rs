use chrono::{DateTime, Duration, Utc};
use super::CredentialManager;

///
/// The instant to store as password_changed_at, or None for a brand new account.
///
/// The stamp is backdated by the configured skew (at least a second) so a session token issued
/// in the same second as the change still counts as issued before it.
///
pub fn record_change(ctx: &CredentialManager, is_new_record: bool) -> Option<DateTime<Utc>> {
    if is_new_record {
        return None
    }

    Some(ctx.now() - Duration::seconds(ctx.config().password_changed_skew_seconds))
}

///
/// True if a token issued at `issued_at` (epoch seconds) predates the last password change.
///
pub fn changed_after(changed_at: Option<DateTime<Utc>>, issued_at: i64) -> bool {
    match changed_at {
        Some(changed_at) => issued_at < changed_at.timestamp(),
        None => false,
    }
}
