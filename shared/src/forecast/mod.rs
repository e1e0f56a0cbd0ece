//! Forecast horizon selection, provider payload types and normalization

pub mod condition;
pub mod horizon;
pub mod normalize;
pub mod raw;

pub use horizon::{select_horizon, Horizon, IssueTime};
pub use normalize::{normalize, normalize_mid_term, normalize_short_term};
pub use raw::{
    DayTemperature, MidLandDay, MidLandForecast, MidTemperatureForecast, MidTermPayload,
    RawForecast, ShortTermCategory, ShortTermItem,
};
