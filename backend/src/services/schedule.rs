//! Game schedule queries against the `game_schedules` table

use chrono::{NaiveDate, NaiveTime};
use serde::{Serialize, Serializer};
use shared::Stadium;
use sqlx::{FromRow, PgPool};

use crate::error::AppResult;

/// Game schedule service
#[derive(Clone)]
pub struct ScheduleService {
    db: PgPool,
}

/// One scheduled game
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct GameSchedule {
    pub id: i32,
    pub date: NaiveDate,
    pub day_of_week: Option<String>,
    pub stadium_name: String,
    pub home_team: String,
    pub home_team_name: Option<String>,
    pub away_team: String,
    pub away_team_name: Option<String>,
    #[serde(serialize_with = "serialize_game_time")]
    pub game_time: NaiveTime,
    pub home_team_rank: Option<i32>,
    pub away_team_rank: Option<i32>,
}

/// A date with games at a stadium
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct GameDate {
    pub date: NaiveDate,
    pub day_of_week: Option<String>,
    pub game_count: i64,
}

/// Every game on one date
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GamesOnDate {
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_of_week: Option<String>,
    pub games: Vec<GameSchedule>,
}

impl GamesOnDate {
    /// The weekday label comes from the first game, absent when there are none
    pub fn new(date: NaiveDate, games: Vec<GameSchedule>) -> Self {
        let day_of_week = games.first().and_then(|g| g.day_of_week.clone());
        Self {
            date,
            day_of_week,
            games,
        }
    }
}

fn serialize_game_time<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&shared::format_game_time(*time))
}

/// Names a stadium may be stored under in schedule rows
fn stored_names(stadium: &Stadium) -> Vec<String> {
    std::iter::once(stadium.stadium_name)
        .chain(stadium.aliases.iter().copied())
        .map(str::to_string)
        .collect()
}

impl ScheduleService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// The game at a stadium on a date, if any
    pub async fn game_for(
        &self,
        stadium: &Stadium,
        date: NaiveDate,
    ) -> AppResult<Option<GameSchedule>> {
        let game = sqlx::query_as::<_, GameSchedule>(
            r#"
            SELECT id, game_date AS date, day_of_week, stadium_name, home_team, home_team_name,
                   away_team, away_team_name, game_time, home_team_rank, away_team_rank
            FROM game_schedules
            WHERE stadium_name = ANY($1) AND game_date = $2
            ORDER BY game_time
            LIMIT 1
            "#,
        )
        .bind(stored_names(stadium))
        .bind(date)
        .fetch_optional(&self.db)
        .await?;

        Ok(game)
    }

    /// Dates with at least one game at a stadium, oldest first
    pub async fn game_dates(&self, stadium: &Stadium) -> AppResult<Vec<GameDate>> {
        let dates = sqlx::query_as::<_, GameDate>(
            r#"
            SELECT game_date AS date, day_of_week, COUNT(*) AS game_count
            FROM game_schedules
            WHERE stadium_name = ANY($1)
            GROUP BY game_date, day_of_week
            ORDER BY game_date ASC
            "#,
        )
        .bind(stored_names(stadium))
        .fetch_all(&self.db)
        .await?;

        tracing::debug!(
            "{} game dates found for {}",
            dates.len(),
            stadium.stadium_name
        );
        Ok(dates)
    }

    /// Every game at a stadium, by date then time
    pub async fn schedules(&self, stadium: &Stadium) -> AppResult<Vec<GameSchedule>> {
        let games = sqlx::query_as::<_, GameSchedule>(
            r#"
            SELECT id, game_date AS date, day_of_week, stadium_name, home_team, home_team_name,
                   away_team, away_team_name, game_time, home_team_rank, away_team_rank
            FROM game_schedules
            WHERE stadium_name = ANY($1)
            ORDER BY game_date ASC, game_time ASC
            "#,
        )
        .bind(stored_names(stadium))
        .fetch_all(&self.db)
        .await?;

        Ok(games)
    }

    /// Every game on a date across all stadiums, by time then stadium
    pub async fn games_on(&self, date: NaiveDate) -> AppResult<GamesOnDate> {
        let games = sqlx::query_as::<_, GameSchedule>(
            r#"
            SELECT id, game_date AS date, day_of_week, stadium_name, home_team, home_team_name,
                   away_team, away_team_name, game_time, home_team_rank, away_team_rank
            FROM game_schedules
            WHERE game_date = $1
            ORDER BY game_time ASC, stadium_name ASC
            "#,
        )
        .bind(date)
        .fetch_all(&self.db)
        .await?;

        Ok(GamesOnDate::new(date, games))
    }
}
