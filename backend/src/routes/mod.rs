//! Route definitions for the Stadium Rain-Check API

use axum::{routing::get, Router};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/teams", get(handlers::list_teams))
        .nest("/stadiums", stadium_routes())
        .route(
            "/weather/:stadium_name/:date",
            get(handlers::get_stadium_weather),
        )
        .route("/game-schedules/:date", get(handlers::get_games_on_date))
}

/// Stadium registry and per-stadium schedules
fn stadium_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_stadiums))
        .route("/:stadium_name", get(handlers::get_stadium))
        .route("/:stadium_name/game-dates", get(handlers::get_stadium_game_dates))
        .route("/:stadium_name/games", get(handlers::get_stadium_schedules))
        .route("/:stadium_name/schedules", get(handlers::get_stadium_schedules))
}
