//! HTTP handlers for the stadium registry and per-stadium schedules

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use shared::Stadium;

use crate::error::{AppError, AppResult};
use crate::services::{GameDate, GameSchedule, ScheduleService};
use crate::AppState;

#[derive(Serialize)]
pub struct StadiumList {
    pub stadiums: &'static [Stadium],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StadiumGameDates {
    pub stadium_name: &'static str,
    pub game_dates: Vec<GameDate>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StadiumSchedules {
    pub stadium_name: &'static str,
    pub total_count: usize,
    pub games: Vec<GameSchedule>,
}

/// Resolve a stadium from a path segment, 400 when blank and 404 when unknown
pub(crate) fn resolve_stadium(name: &str) -> AppResult<&'static Stadium> {
    let name = shared::validate_stadium_name(name)?;
    shared::stadiums::find(name).ok_or_else(|| AppError::NotFound(format!("Stadium '{}'", name)))
}

/// List every registered stadium
pub async fn list_stadiums() -> Json<StadiumList> {
    Json(StadiumList {
        stadiums: shared::stadiums::all(),
    })
}

/// Get one stadium
pub async fn get_stadium(Path(stadium_name): Path<String>) -> AppResult<Json<&'static Stadium>> {
    Ok(Json(resolve_stadium(&stadium_name)?))
}

/// Dates with games at a stadium
pub async fn get_stadium_game_dates(
    State(state): State<AppState>,
    Path(stadium_name): Path<String>,
) -> AppResult<Json<StadiumGameDates>> {
    let stadium = resolve_stadium(&stadium_name)?;
    let service = ScheduleService::new(state.db);
    let game_dates = service.game_dates(stadium).await?;

    Ok(Json(StadiumGameDates {
        stadium_name: stadium.stadium_name,
        game_dates,
    }))
}

/// Every game at a stadium
pub async fn get_stadium_schedules(
    State(state): State<AppState>,
    Path(stadium_name): Path<String>,
) -> AppResult<Json<StadiumSchedules>> {
    let stadium = resolve_stadium(&stadium_name)?;
    let service = ScheduleService::new(state.db);
    let games = service.schedules(stadium).await?;

    Ok(Json(StadiumSchedules {
        stadium_name: stadium.stadium_name,
        total_count: games.len(),
        games,
    }))
}
