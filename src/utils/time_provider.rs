use chrono::{DateTime, Utc};

///
/// The clock every credential operation reads. It can be pinned to an instant so tests can step
/// through token expiry and session staleness without sleeping.
///
#[derive(Debug, Default)]
pub struct TimeProvider {
    fixed: Option<DateTime<Utc>>
}

impl TimeProvider {
    pub fn fixed_at(instant: DateTime<Utc>) -> Self {
        TimeProvider { fixed: Some(instant) }
    }

    pub fn now(&self) -> DateTime<Utc> {
        match self.fixed {
            Some(fixed) => fixed,
            None => Utc::now()
        }
    }

    /// Pin (Some) or release (None) the clock.
    pub fn fix(&mut self, fixed: Option<DateTime<Utc>>) {
        self.fixed = fixed;
    }

    pub fn is_fixed(&self) -> bool {
        self.fixed.is_some()
    }
}
