//! HTTP handlers for the team listing

use axum::Json;
use serde::Serialize;
use shared::Team;

#[derive(Serialize)]
pub struct TeamList {
    pub teams: Vec<Team>,
}

/// List every club with its home stadium
pub async fn list_teams() -> Json<TeamList> {
    Json(TeamList {
        teams: shared::teams::all(),
    })
}
