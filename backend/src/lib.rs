//! Stadium Rain-Check - Backend Server
//!
//! Forecasts game-day weather at KBO stadiums from the national weather
//! provider and scores the chance of a rain cancellation.

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod routes;
pub mod services;

pub use crate::config::Config;

use error::{AppError, AppResult};
use services::WeatherService;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub config: Arc<Config>,
    /// `None` when no provider key is configured
    pub weather: Option<Arc<WeatherService>>,
}

impl AppState {
    /// The forecast pipeline, or a configuration error when it could not be built
    pub fn weather_service(&self) -> AppResult<&WeatherService> {
        self.weather.as_deref().ok_or_else(|| {
            AppError::Configuration("weather provider key is not configured".to_string())
        })
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Stadium Rain-Check API v1.0"
}
