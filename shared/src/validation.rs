//! Validation of request inputs (game dates, game times, stadium names)

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

/// Rejected request input
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid game time '{0}', expected HH:MM")]
    InvalidTime(String),

    #[error("Stadium name must not be empty")]
    EmptyStadiumName,
}

impl InputError {
    /// Name of the offending request field
    pub fn field(&self) -> &'static str {
        match self {
            InputError::InvalidDate(_) => "date",
            InputError::InvalidTime(_) => "game_time",
            InputError::EmptyStadiumName => "stadium_name",
        }
    }

    pub fn message_ko(&self) -> String {
        match self {
            InputError::InvalidDate(value) => {
                format!("날짜 형식이 올바르지 않습니다 (YYYY-MM-DD): {}", value)
            }
            InputError::InvalidTime(value) => {
                format!("경기 시간 형식이 올바르지 않습니다 (HH:MM): {}", value)
            }
            InputError::EmptyStadiumName => "경기장 이름이 비어 있습니다.".to_string(),
        }
    }
}

// ============================================================================
// Dates and times
// ============================================================================

/// Parse a game date in strict `YYYY-MM-DD` form.
///
/// chrono alone accepts `2026-5-1`; the layout is checked first so only the
/// zero-padded form gets through.
pub fn parse_game_date(value: &str) -> Result<NaiveDate, InputError> {
    let invalid = || InputError::InvalidDate(value.to_string());

    let bytes = value.as_bytes();
    let layout_ok = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !layout_ok {
        return Err(invalid());
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| invalid())
}

/// Parse a scheduled game time, `HH:MM` or `HH:MM:SS`
pub fn parse_game_time(value: &str) -> Result<NaiveTime, InputError> {
    let trimmed = value.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map_err(|_| InputError::InvalidTime(value.to_string()))
}

// ============================================================================
// Stadiums
// ============================================================================

/// Trim a stadium name from a path segment, rejecting blanks
pub fn validate_stadium_name(name: &str) -> Result<&str, InputError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(InputError::EmptyStadiumName);
    }
    Ok(name)
}
