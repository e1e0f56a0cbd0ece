//! Source of "now" in the forecast provider's local time

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Wall-clock time as seen by the forecast provider
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Current UTC time shifted by a fixed offset
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: Duration,
}

impl SystemClock {
    pub fn with_offset_hours(hours: i32) -> Self {
        Self {
            offset: Duration::hours(i64::from(hours)),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Utc::now().naive_utc() + self.offset
    }
}

/// A clock that never moves
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl FixedClock {
    /// Noon on `date`; used for the configured "today" override
    pub fn at_noon(date: NaiveDate) -> Self {
        let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN);
        Self(date.and_time(noon))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
