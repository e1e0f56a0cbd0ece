//! HTTP handlers for league-wide game schedules

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::AppResult;
use crate::services::{GamesOnDate, ScheduleService};
use crate::AppState;

/// Every game on a date across all stadiums
pub async fn get_games_on_date(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> AppResult<Json<GamesOnDate>> {
    let date = shared::parse_game_date(&date)?;
    let service = ScheduleService::new(state.db);
    Ok(Json(service.games_on(date).await?))
}
