//! Forecast horizon selection
//!
//! Decides which forecast product covers a game date and which published
//! batch ("issue time") of that product to ask for. All functions take the
//! current local time as an argument.

use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};

/// Last lead time (in days) served by the short-term product
pub const SHORT_TERM_MAX_DAYS: i64 = 2;

/// Last lead time (in days) served by the mid-term product
pub const MID_TERM_MAX_DAYS: i64 = 10;

/// Hours at which the short-term product is published
pub const SHORT_TERM_ISSUE_HOURS: [u32; 8] = [2, 5, 8, 11, 14, 17, 20, 23];

/// Minutes after the nominal hour before a short-term batch is available
pub const SHORT_TERM_PUBLICATION_LAG_MINUTES: u32 = 10;

const MID_TERM_MORNING_ISSUE: u32 = 6;
const MID_TERM_EVENING_ISSUE: u32 = 18;

/// Smallest temperature day index offered by the mid-term product
pub const MID_TERM_FIRST_TEMPERATURE_DAY: u8 = 3;

/// Largest day index offered by the mid-term products
pub const MID_TERM_LAST_DAY: u8 = 10;

/// Publication timestamp of a forecast batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IssueTime {
    pub date: NaiveDate,
    pub hour: u32,
}

impl IssueTime {
    pub fn new(date: NaiveDate, hour: u32) -> Self {
        Self { date, hour }
    }

    /// `YYYYMMDD`, the short-term `base_date` parameter
    pub fn base_date(&self) -> String {
        self.date.format("%Y%m%d").to_string()
    }

    /// `HH00`, the short-term `base_time` parameter
    pub fn base_time(&self) -> String {
        format!("{:02}00", self.hour)
    }

    /// `YYYYMMDDHH00`, the mid-term `tmFc` parameter
    pub fn tm_fc(&self) -> String {
        format!("{}{}", self.base_date(), self.base_time())
    }

    /// Whole days from the issue date to `target`
    pub fn days_until(&self, target: NaiveDate) -> i64 {
        (target - self.date).num_days()
    }
}

impl std::fmt::Display for IssueTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {:02}:00", self.date, self.hour)
    }
}

/// Which forecast product applies to a game date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Horizon {
    Short(IssueTime),
    Mid(IssueTime),
    Unsupported,
}

impl Horizon {
    pub fn issue_time(&self) -> Option<IssueTime> {
        match self {
            Horizon::Short(issue) | Horizon::Mid(issue) => Some(*issue),
            Horizon::Unsupported => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Horizon::Short(_) => "short-term",
            Horizon::Mid(_) => "mid-term",
            Horizon::Unsupported => "unsupported",
        }
    }
}

/// Whole calendar days from `today` to `game_date` (negative for past dates)
pub fn days_between(today: NaiveDate, game_date: NaiveDate) -> i64 {
    (game_date - today).num_days()
}

/// Pick the forecast product and issue time for a game date
pub fn select_horizon(now: NaiveDateTime, game_date: NaiveDate) -> Horizon {
    let diff_days = days_between(now.date(), game_date);

    if !(0..=MID_TERM_MAX_DAYS).contains(&diff_days) {
        Horizon::Unsupported
    } else if diff_days <= SHORT_TERM_MAX_DAYS {
        Horizon::Short(short_term_issue_time(now))
    } else {
        Horizon::Mid(mid_term_issue_time(now))
    }
}

/// Latest short-term batch already published at `now`
pub fn short_term_issue_time(now: NaiveDateTime) -> IssueTime {
    let minutes = now.hour() * 60 + now.minute();

    SHORT_TERM_ISSUE_HOURS
        .iter()
        .rev()
        .find(|&&hour| minutes >= hour * 60 + SHORT_TERM_PUBLICATION_LAG_MINUTES)
        .map(|&hour| IssueTime::new(now.date(), hour))
        .unwrap_or_else(|| IssueTime::new(now.date() - Duration::days(1), 23))
}

/// Mid-term batch to use at `now`: yesterday 18:00 before 06:00, otherwise today 06:00
pub fn mid_term_issue_time(now: NaiveDateTime) -> IssueTime {
    if now.hour() < MID_TERM_MORNING_ISSUE {
        IssueTime::new(now.date() - Duration::days(1), MID_TERM_EVENING_ISSUE)
    } else {
        IssueTime::new(now.date(), MID_TERM_MORNING_ISSUE)
    }
}

/// Day index to read from the land/sky product.
///
/// The 06:00 batch covers days 4-10 and the 18:00 batch days 5-10, so the
/// requested index is clamped into that window.
pub fn land_day_index(issue: IssueTime, days_from_issue: i64) -> u8 {
    let min_days = if issue.hour == MID_TERM_MORNING_ISSUE { 4 } else { 5 };
    clamp_day(days_from_issue, min_days)
}

/// Day index to read from the temperature product (days 3-10)
pub fn temperature_day_index(days_from_issue: i64) -> u8 {
    clamp_day(days_from_issue, MID_TERM_FIRST_TEMPERATURE_DAY)
}

fn clamp_day(days: i64, min_days: u8) -> u8 {
    days.clamp(i64::from(min_days), i64::from(MID_TERM_LAST_DAY)) as u8
}
