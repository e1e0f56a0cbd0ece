//! Normalization of provider payloads into [`DailyWeather`]
//!
//! Total over its input: missing or malformed fields fall back to the
//! defaults of [`DailyWeather::new`] and never produce an error.

use chrono::{NaiveDate, Timelike};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

use super::condition;
use super::horizon::{land_day_index, temperature_day_index, IssueTime};
use super::raw::{MidTermPayload, RawForecast, ShortTermCategory, ShortTermItem};
use crate::models::{clamp_percent, default_forecast_text, DailyWeather, SkyCondition};

/// Values at or beyond this magnitude are provider "missing" markers (e.g. -999)
const MISSING_VALUE_MAGNITUDE: f64 = 900.0;

/// Last day index published with separate AM/PM fields
const LAST_HALF_DAY_INDEX: u8 = 7;

/// Normalize whichever product was fetched for `target`
pub fn normalize(target: NaiveDate, raw: &RawForecast) -> DailyWeather {
    match raw {
        RawForecast::ShortTerm(items) => normalize_short_term(target, items),
        RawForecast::MidTerm { issue, payload } => normalize_mid_term(target, *issue, payload),
    }
}

#[derive(Default)]
struct HalfDay {
    sky: Option<i32>,
    pty: Option<i32>,
}

impl HalfDay {
    fn condition(&self) -> SkyCondition {
        condition::from_short_term_codes(self.pty, self.sky)
    }
}

/// Short-term items for `target` become one day record.
///
/// Items before noon form the AM bucket. Within a bucket the latest
/// SKY/PTY reading wins. Temperatures span the whole day, precipitation
/// probability is the day's maximum POP.
pub fn normalize_short_term(target: NaiveDate, items: &[ShortTermItem]) -> DailyWeather {
    let mut day_items: Vec<&ShortTermItem> = items.iter().filter(|item| item.date == target).collect();
    day_items.sort_by_key(|item| item.time);

    let mut am = HalfDay::default();
    let mut pm = HalfDay::default();
    let mut min_temp: Option<i32> = None;
    let mut max_temp: Option<i32> = None;
    let mut pop: Option<i32> = None;
    let mut humidity: Option<i32> = None;
    let mut wind: Option<f64> = None;

    for item in day_items {
        let bucket = if item.time.hour() < 12 { &mut am } else { &mut pm };

        match item.category {
            ShortTermCategory::Sky => {
                if let Some(code) = item.int_value() {
                    bucket.sky = Some(code);
                }
            }
            ShortTermCategory::Pty => {
                if let Some(code) = item.int_value() {
                    bucket.pty = Some(code);
                }
            }
            ShortTermCategory::Tmp | ShortTermCategory::Tmn | ShortTermCategory::Tmx => {
                if let Some(t) = item.float_value().filter(|t| t.abs() < MISSING_VALUE_MAGNITUDE) {
                    let t = t.trunc() as i32;
                    min_temp = Some(min_temp.map_or(t, |m| m.min(t)));
                    max_temp = Some(max_temp.map_or(t, |m| m.max(t)));
                }
            }
            ShortTermCategory::Pop => {
                if let Some(p) = item.int_value() {
                    pop = Some(pop.map_or(p, |m| m.max(p)));
                }
            }
            ShortTermCategory::Reh => {
                if let Some(h) = item.int_value().filter(|h| (0..=100).contains(h)) {
                    humidity = Some(humidity.map_or(h, |m| m.max(h)));
                }
            }
            ShortTermCategory::Wsd => {
                if let Some(w) = item.float_value().filter(|w| (0.0..MISSING_VALUE_MAGNITUDE).contains(w)) {
                    wind = Some(wind.map_or(w, |m| m.max(w)));
                }
            }
            _ => {}
        }
    }

    let mut weather = DailyWeather::new(target);
    weather.weather_am = am.condition();
    weather.weather_pm = pm.condition();
    weather.min_temp = min_temp.unwrap_or(0);
    weather.max_temp = max_temp.unwrap_or(0);
    weather.precipitation_prob = clamp_percent(pop.unwrap_or(0));
    weather.humidity = humidity;
    weather.wind_speed = wind.and_then(Decimal::from_f64).map(|w| w.round_dp(1));
    weather.forecast_text = default_forecast_text(weather.weather_am, weather.weather_pm);
    weather
}

/// Mid-term sub-call results become one day record.
///
/// Day indices are counted from the issue date. Explicit AM/PM fields win;
/// otherwise the narrative summary is scanned for keywords; otherwise clear.
pub fn normalize_mid_term(target: NaiveDate, issue: IssueTime, payload: &MidTermPayload) -> DailyWeather {
    let days_from_issue = issue.days_until(target);
    let land_index = land_day_index(issue, days_from_issue);
    let temp_index = temperature_day_index(days_from_issue);

    let mut weather_am: Option<SkyCondition> = None;
    let mut weather_pm: Option<SkyCondition> = None;
    let mut precipitation: Option<i32> = None;
    let mut summary: Option<&str> = None;

    if let Some(land) = &payload.land {
        summary = land.summary.as_deref().filter(|s| !s.trim().is_empty());

        if let Some(day) = land.day(land_index) {
            if land_index <= LAST_HALF_DAY_INDEX {
                weather_am = day.am.as_deref().and_then(condition::from_mid_term_field);
                weather_pm = day.pm.as_deref().and_then(condition::from_mid_term_field);
                precipitation = Some(day.rain_am.unwrap_or(0).max(day.rain_pm.unwrap_or(0)));
            } else {
                let daily = day.daily.as_deref().and_then(condition::from_mid_term_field);
                weather_am = daily;
                weather_pm = daily;
                precipitation = day.rain_daily;
            }
        }
    }

    let from_summary = summary.and_then(condition::from_text);
    let weather_am = weather_am.or(from_summary).unwrap_or_default();
    let weather_pm = weather_pm.or(from_summary).unwrap_or_default();

    let (min_temp, max_temp) = payload
        .temperature
        .as_ref()
        .map(|t| t.range_for(temp_index))
        .unwrap_or((None, None));

    let mut weather = DailyWeather::new(target);
    weather.weather_am = weather_am;
    weather.weather_pm = weather_pm;
    weather.min_temp = min_temp.unwrap_or(0);
    weather.max_temp = max_temp.unwrap_or(0);
    weather.precipitation_prob = clamp_percent(precipitation.unwrap_or(0));
    weather.forecast_text = summary
        .map(str::to_string)
        .unwrap_or_else(|| default_forecast_text(weather_am, weather_pm));
    weather
}
