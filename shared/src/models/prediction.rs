//! Rain cancellation prediction models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::weather::SkyCondition;

/// Banded cancellation probability
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum CancelProbability {
    None,
    Low,
    Medium,
    High,
}

impl std::fmt::Display for CancelProbability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CancelProbability::None => write!(f, "NONE"),
            CancelProbability::Low => write!(f, "LOW"),
            CancelProbability::Medium => write!(f, "MEDIUM"),
            CancelProbability::High => write!(f, "HIGH"),
        }
    }
}

/// Signal evaluated by the scorer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FactorType {
    Precipitation,
    WeatherCondition,
    Wind,
    Temperature,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FactorStatus {
    Safe,
    Warning,
    Danger,
}

/// Observed value of a factor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FactorValue {
    Percent(i32),
    Speed(#[serde(with = "rust_decimal::serde::float")] Decimal),
    Condition(SkyCondition),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictionFactor {
    #[serde(rename = "type")]
    pub factor_type: FactorType,
    pub value: FactorValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<i32>,
    pub status: FactorStatus,
}

/// Rain cancellation prediction for one game
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CancelPrediction {
    pub probability: CancelProbability,
    pub reason: String,
    pub details: String,
    pub reason_ko: String,
    pub details_ko: String,
    /// Scheduled first pitch, `HH:MM`
    pub game_time: String,
    /// Start of the go/no-go window, `HH:MM`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decision_time_start: Option<String>,
    pub factors: Vec<PredictionFactor>,
}
