//! WebAssembly module for Stadium Rain-Check
//!
//! Provides client-side computation for:
//! - Rain-out prediction from an already fetched forecast
//! - Decision window of a game
//! - Which forecast product covers a game date

use chrono::{NaiveDate, NaiveTime};
use shared::forecast::select_horizon;
use shared::{DailyWeather, InputError, SurfaceType};
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

fn to_js_error(message: String) -> JsValue {
    web_sys::console::warn_1(&JsValue::from_str(&message));
    JsValue::from_str(&message)
}

/// Score a game from the weather JSON returned by the API.
///
/// `game_time` is `HH:MM`; an empty value means the default 18:30 start.
/// Returns the prediction as JSON.
#[wasm_bindgen]
pub fn predict_cancellation(
    weather_json: &str,
    surface: &str,
    is_dome: bool,
    game_time: &str,
) -> Result<String, JsValue> {
    prediction_json(weather_json, surface, is_dome, game_time).map_err(to_js_error)
}

/// Start of the decision window (`HH:MM`) for a game starting at `game_time`
#[wasm_bindgen]
pub fn decision_time_start(game_time: &str) -> Result<String, JsValue> {
    decision_window(game_time).map_err(|e| to_js_error(e.to_string()))
}

/// Forecast product for a game date seen from `today` (both `YYYY-MM-DD`):
/// `"short-term"`, `"mid-term"` or `"unsupported"`
#[wasm_bindgen]
pub fn horizon_for(today: &str, game_date: &str) -> Result<String, JsValue> {
    horizon_name(today, game_date).map_err(|e| to_js_error(e.to_string()))
}

/// [`horizon_for`] using the browser's local date as today
#[wasm_bindgen]
pub fn horizon_for_today(game_date: &str) -> Result<String, JsValue> {
    let now = js_sys::Date::new_0();
    let today = format!(
        "{:04}-{:02}-{:02}",
        now.get_full_year(),
        now.get_month() + 1,
        now.get_date()
    );
    horizon_for(&today, game_date)
}

fn prediction_json(
    weather_json: &str,
    surface: &str,
    is_dome: bool,
    game_time: &str,
) -> Result<String, String> {
    let weather: DailyWeather = serde_json::from_str(weather_json)
        .map_err(|e| format!("Invalid weather JSON: {}", e))?;
    let surface =
        SurfaceType::parse(surface).ok_or_else(|| format!("Unknown surface type '{}'", surface))?;
    let game_time = parse_optional_time(game_time).map_err(|e| e.to_string())?;

    let prediction =
        shared::calculate_cancel_probability(&weather.sanitized(), surface, is_dome, game_time);
    serde_json::to_string(&prediction).map_err(|e| e.to_string())
}

fn parse_optional_time(value: &str) -> Result<NaiveTime, InputError> {
    if value.trim().is_empty() {
        Ok(shared::default_game_time())
    } else {
        shared::parse_game_time(value)
    }
}

fn decision_window(game_time: &str) -> Result<String, InputError> {
    let start = shared::decision_time_start(parse_optional_time(game_time)?);
    Ok(shared::format_game_time(start))
}

fn horizon_name(today: &str, game_date: &str) -> Result<String, InputError> {
    let today: NaiveDate = shared::parse_game_date(today)?;
    let game_date = shared::parse_game_date(game_date)?;
    let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN);
    Ok(select_horizon(today.and_time(noon), game_date).name().to_string())
}
