//! Weather data models

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Sky condition for one half of a forecast day
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SkyCondition {
    #[default]
    Clear,
    PartlyCloudy,
    MostlyCloudy,
    Overcast,
    Rain,
    RainSnowMixed,
    Snow,
    Shower,
}

impl SkyCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkyCondition::Clear => "clear",
            SkyCondition::PartlyCloudy => "partly-cloudy",
            SkyCondition::MostlyCloudy => "mostly-cloudy",
            SkyCondition::Overcast => "overcast",
            SkyCondition::Rain => "rain",
            SkyCondition::RainSnowMixed => "rain-snow-mixed",
            SkyCondition::Snow => "snow",
            SkyCondition::Shower => "shower",
        }
    }

    /// Label used by the forecast provider and the Korean UI
    pub fn label_ko(&self) -> &'static str {
        match self {
            SkyCondition::Clear => "맑음",
            SkyCondition::PartlyCloudy => "구름조금",
            SkyCondition::MostlyCloudy => "구름많음",
            SkyCondition::Overcast => "흐림",
            SkyCondition::Rain => "비",
            SkyCondition::RainSnowMixed => "비/눈",
            SkyCondition::Snow => "눈",
            SkyCondition::Shower => "소나기",
        }
    }

    /// Conditions with liquid precipitation
    pub fn is_rainy(&self) -> bool {
        matches!(
            self,
            SkyCondition::Rain | SkyCondition::RainSnowMixed | SkyCondition::Shower
        )
    }

    pub fn is_overcast(&self) -> bool {
        matches!(self, SkyCondition::Overcast)
    }
}

impl std::fmt::Display for SkyCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical daily weather record produced by the forecast normalizer.
///
/// Every field is populated: missing upstream data is replaced with the
/// documented defaults (clear sky, 0°C, 0%).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyWeather {
    pub date: NaiveDate,
    pub day_of_week: Weekday,
    pub weather_am: SkyCondition,
    pub weather_pm: SkyCondition,
    pub min_temp: i32,
    pub max_temp: i32,
    pub precipitation_prob: i32,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub wind_speed: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humidity: Option<i32>,
    pub forecast_text: String,
}

impl DailyWeather {
    /// Create a record for `date` with every field at its default
    pub fn new(date: NaiveDate) -> Self {
        let weather_am = SkyCondition::default();
        let weather_pm = SkyCondition::default();
        Self {
            date,
            day_of_week: date.weekday(),
            weather_am,
            weather_pm,
            min_temp: 0,
            max_temp: 0,
            precipitation_prob: 0,
            wind_speed: None,
            humidity: None,
            forecast_text: default_forecast_text(weather_am, weather_pm),
        }
    }

    /// Re-derive the fields that must never be taken on trust from outside:
    /// the weekday, the precipitation range and a non-empty summary.
    pub fn sanitized(mut self) -> Self {
        self.day_of_week = self.date.weekday();
        self.precipitation_prob = clamp_percent(self.precipitation_prob);
        if self.forecast_text.trim().is_empty() {
            self.forecast_text = default_forecast_text(self.weather_am, self.weather_pm);
        }
        self
    }
}

/// Summary used when the provider supplies no narrative text
pub fn default_forecast_text(am: SkyCondition, pm: SkyCondition) -> String {
    format!("{} / {}", am, pm)
}

pub fn clamp_percent(value: i32) -> i32 {
    value.clamp(0, 100)
}
