//! HTTP handler for game-day weather and the rain-out prediction

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use shared::{CancelPrediction, DailyWeather, Stadium};
use validator::Validate;

use super::stadium::resolve_stadium;
use crate::error::{AppError, AppResult};
use crate::services::{GameSchedule, ScheduleService};
use crate::AppState;

/// Path parameters of `/weather/:stadium_name/:date`
#[derive(Debug, Deserialize, Validate)]
pub struct WeatherPath {
    #[validate(length(min = 1, max = 50))]
    pub stadium_name: String,
    #[validate(length(equal = 10))]
    pub date: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StadiumWeatherResponse {
    #[serde(flatten)]
    pub stadium: &'static Stadium,
    pub date: NaiveDate,
    pub day_of_week: Weekday,
    pub forecast_text: String,
    pub weather: DailyWeather,
    pub game_schedule: Option<GameSchedule>,
    pub cancel_prediction: CancelPrediction,
}

/// Weather, schedule and cancellation risk for one game day
pub async fn get_stadium_weather(
    State(state): State<AppState>,
    Path(path): Path<WeatherPath>,
) -> AppResult<Json<StadiumWeatherResponse>> {
    path.validate()?;
    let date = shared::parse_game_date(&path.date)?;
    let stadium = resolve_stadium(&path.stadium_name)?;

    let weather = state
        .weather_service()?
        .weather_for(stadium, date)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Weather forecast for {}", date)))?;

    // Schedule data only refines the game time
    let game_schedule = match ScheduleService::new(state.db.clone())
        .game_for(stadium, date)
        .await
    {
        Ok(game) => game,
        Err(e) => {
            tracing::warn!(
                "Schedule lookup failed for {} on {}: {}",
                stadium.stadium_name,
                date,
                e
            );
            None
        }
    };

    let game_time = game_schedule
        .as_ref()
        .map(|game| game.game_time)
        .unwrap_or_else(shared::default_game_time);

    let cancel_prediction =
        shared::calculate_cancel_probability(&weather, stadium.surface, stadium.is_dome, game_time);

    Ok(Json(StadiumWeatherResponse {
        stadium,
        date: weather.date,
        day_of_week: weather.day_of_week,
        forecast_text: weather.forecast_text.clone(),
        weather,
        game_schedule,
        cancel_prediction,
    }))
}
