//! Stadium weather lookup
//!
//! Resolves a stadium, picks the forecast horizon for the game date, fetches
//! the matching provider payload and normalizes it into one `DailyWeather`.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use shared::forecast::{self, Horizon, MidTermPayload, RawForecast, ShortTermItem};
use shared::{DailyWeather, GridPoint, MidTermRegions, Stadium};
use tracing::{debug, info};

use super::clock::{Clock, FixedClock, SystemClock};
use crate::config::WeatherConfig;
use crate::error::{AppError, AppResult};
use crate::external::{ForecastSource, MidTermClient, ShortTermClient};

/// Forecast pipeline for the registered stadiums
pub struct WeatherService<S = ShortTermClient, M = MidTermClient> {
    short_term: S,
    mid_term: M,
    clock: Arc<dyn Clock>,
}

impl WeatherService {
    /// Build the provider clients from configuration.
    ///
    /// Fails with `AppError::Configuration` when no provider key is set.
    pub fn from_config(config: &WeatherConfig) -> AppResult<Self> {
        let service_key = config.service_key().ok_or_else(|| {
            AppError::Configuration(
                "weather.service_key_encoded or weather.service_key must be set".to_string(),
            )
        })?;

        let timeout = Duration::from_secs(config.request_timeout_secs);
        let short_term = ShortTermClient::with_base_url(
            service_key.clone(),
            config.short_term_base_url.clone(),
            timeout,
        )
        .map_err(|e| AppError::Configuration(format!("short-term client: {}", e)))?;
        let mid_term =
            MidTermClient::with_base_url(service_key, config.mid_term_base_url.clone(), timeout)
                .map_err(|e| AppError::Configuration(format!("mid-term client: {}", e)))?;

        let clock: Arc<dyn Clock> = match config.today_override()? {
            Some(today) => {
                info!("Forecast date pinned to {}", today);
                Arc::new(FixedClock::at_noon(today))
            }
            None => Arc::new(SystemClock::with_offset_hours(config.utc_offset_hours)),
        };

        Ok(Self::new(short_term, mid_term, clock))
    }
}

impl<S, M> WeatherService<S, M>
where
    S: ForecastSource<Location = GridPoint, Payload = Vec<ShortTermItem>>,
    M: ForecastSource<Location = MidTermRegions, Payload = MidTermPayload>,
{
    pub fn new(short_term: S, mid_term: M, clock: Arc<dyn Clock>) -> Self {
        Self {
            short_term,
            mid_term,
            clock,
        }
    }

    /// Weather for a game day at a stadium.
    ///
    /// `Ok(None)` when the date is outside the forecast window or the
    /// provider has nothing for that day.
    pub async fn get_stadium_weather(
        &self,
        game_date: &str,
        stadium_name: &str,
    ) -> AppResult<Option<DailyWeather>> {
        let game_date = shared::parse_game_date(game_date)?;
        let stadium = shared::stadiums::find(stadium_name)
            .ok_or_else(|| AppError::NotFound(format!("Stadium '{}'", stadium_name)))?;

        self.weather_for(stadium, game_date).await
    }

    /// Weather for an already-resolved stadium
    pub async fn weather_for(
        &self,
        stadium: &Stadium,
        game_date: NaiveDate,
    ) -> AppResult<Option<DailyWeather>> {
        info!(
            "Weather lookup: stadium={}, date={}",
            stadium.stadium_name, game_date
        );

        let now = self.clock.now();
        let horizon = forecast::select_horizon(now, game_date);
        debug!(
            "Horizon {} (now={}, issue={:?})",
            horizon.name(),
            now,
            horizon.issue_time().map(|issue| issue.to_string())
        );

        let raw = match horizon {
            Horizon::Unsupported => {
                info!(
                    "{} is outside the forecast window, no weather available",
                    game_date
                );
                return Ok(None);
            }
            Horizon::Short(issue) => {
                let items = self.short_term.fetch(&stadium.grid(), issue).await?;
                if !items.iter().any(|item| item.date == game_date) {
                    info!("Short-term forecast has no rows for {}", game_date);
                    return Ok(None);
                }
                RawForecast::ShortTerm(items)
            }
            Horizon::Mid(issue) => {
                let payload = self.mid_term.fetch(&stadium.mid_term_regions(), issue).await?;
                RawForecast::MidTerm { issue, payload }
            }
        };

        let weather = forecast::normalize(game_date, &raw);
        info!(
            "Weather for {} on {}: {} / {}, {}~{}°C, rain {}%",
            stadium.stadium_name,
            weather.date,
            weather.weather_am,
            weather.weather_pm,
            weather.min_temp,
            weather.max_temp,
            weather.precipitation_prob
        );

        Ok(Some(weather))
    }
}
