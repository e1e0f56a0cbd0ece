//! Stadium weather pipeline tests
//!
//! Drives `WeatherService` with a pinned clock and in-memory forecast
//! sources:
//! - horizon selection and the unsupported range
//! - short-term and mid-term normalization end to end
//! - error propagation

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use rain_check_server::error::AppError;
use rain_check_server::external::{ForecastSource, UpstreamForecastError};
use rain_check_server::services::{FixedClock, WeatherService};
use shared::forecast::{
    IssueTime, MidLandForecast, MidTemperatureForecast, MidTermPayload, ShortTermItem,
};
use shared::{GridPoint, MidTermRegions, SkyCondition};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn at(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
}

/// Records every call and replays a canned answer
struct Recorder<L, P> {
    answer: Box<dyn Fn() -> Result<P, UpstreamForecastError> + Send + Sync>,
    calls: AtomicU32,
    seen: Mutex<Vec<(L, IssueTime)>>,
}

impl<L, P> Recorder<L, P> {
    fn new(answer: impl Fn() -> Result<P, UpstreamForecastError> + Send + Sync + 'static) -> Self {
        Self {
            answer: Box::new(answer),
            calls: AtomicU32::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    fn last_seen(&self) -> (L, IssueTime)
    where
        L: Clone,
    {
        self.seen.lock().unwrap().last().cloned().expect("no calls recorded")
    }
}

/// Shared handle so a test keeps access after the service takes ownership
struct Fake<L, P>(Arc<Recorder<L, P>>);

impl<L, P> Clone for Fake<L, P> {
    fn clone(&self) -> Self {
        Fake(self.0.clone())
    }
}

impl<L, P> std::ops::Deref for Fake<L, P> {
    type Target = Recorder<L, P>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<L, P> Fake<L, P> {
    fn new(answer: impl Fn() -> Result<P, UpstreamForecastError> + Send + Sync + 'static) -> Self {
        Fake(Arc::new(Recorder::new(answer)))
    }
}

#[async_trait]
impl<L, P> ForecastSource for Fake<L, P>
where
    L: Clone + Send + Sync,
    P: Send,
{
    type Location = L;
    type Payload = P;

    async fn fetch(&self, location: &L, issue: IssueTime) -> Result<P, UpstreamForecastError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push((location.clone(), issue));
        (self.answer)()
    }
}

type ShortSource = Fake<GridPoint, Vec<ShortTermItem>>;
type MidSource = Fake<MidTermRegions, MidTermPayload>;

fn short_term_items() -> Vec<ShortTermItem> {
    [
        ("20260510", "0900", "SKY", "3"),
        ("20260510", "0900", "TMP", "15"),
        ("20260510", "0900", "POP", "30"),
        ("20260510", "1800", "SKY", "4"),
        ("20260510", "1800", "PTY", "1"),
        ("20260510", "1800", "TMP", "19"),
        ("20260510", "1800", "POP", "80"),
        ("20260510", "1800", "WSD", "5.2"),
        ("20260510", "1800", "REH", "85"),
        ("20260511", "1500", "TMP", "25"),
    ]
    .into_iter()
    .filter_map(|(d, t, c, v)| ShortTermItem::parse(d, t, c, v))
    .collect()
}

fn mid_term_payload() -> MidTermPayload {
    MidTermPayload {
        land: Some(MidLandForecast::from_fields([
            ("rnSt5Am", "30"),
            ("rnSt5Pm", "70"),
            ("wf5Am", "구름많음"),
            ("wf5Pm", "흐리고 비"),
        ])),
        temperature: Some(MidTemperatureForecast::from_fields([
            ("taMin5", "14"),
            ("taMax5", "23"),
        ])),
    }
}

fn service(
    now: &str,
    short: &ShortSource,
    mid: &MidSource,
) -> WeatherService<ShortSource, MidSource> {
    WeatherService::new(
        short.clone(),
        mid.clone(),
        Arc::new(FixedClock(at(now))),
    )
}

fn sources() -> (ShortSource, MidSource) {
    (
        Fake::new(|| Ok(short_term_items())),
        Fake::new(|| Ok(mid_term_payload())),
    )
}

// ============================================================================
// Horizon selection
// ============================================================================

#[tokio::test]
async fn test_past_date_returns_none_without_fetching() {
    let (short, mid) = sources();
    let service = service("2026-05-10 12:00", &short, &mid);

    let weather = service.get_stadium_weather("2026-05-09", "잠실야구장").await.unwrap();

    assert!(weather.is_none());
    assert_eq!(short.calls(), 0);
    assert_eq!(mid.calls(), 0);
}

#[tokio::test]
async fn test_beyond_ten_days_returns_none() {
    let (short, mid) = sources();
    let service = service("2026-05-10 12:00", &short, &mid);

    assert!(service.get_stadium_weather("2026-05-21", "잠실").await.unwrap().is_none());
    assert_eq!(short.calls() + mid.calls(), 0);
}

#[tokio::test]
async fn test_same_day_uses_short_term() {
    let (short, mid) = sources();
    let service = service("2026-05-10 12:00", &short, &mid);

    let weather = service
        .get_stadium_weather("2026-05-10", "잠실야구장")
        .await
        .unwrap()
        .expect("weather");

    assert_eq!(short.calls(), 1);
    assert_eq!(mid.calls(), 0);

    let (grid, issue) = short.last_seen();
    assert_eq!(grid, GridPoint::new(60, 127));
    assert_eq!(issue, IssueTime::new(date("2026-05-10"), 11));

    assert_eq!(weather.weather_am, SkyCondition::MostlyCloudy);
    assert_eq!(weather.weather_pm, SkyCondition::Rain);
    assert_eq!(weather.min_temp, 15);
    assert_eq!(weather.max_temp, 19);
    assert_eq!(weather.precipitation_prob, 80);
    assert_eq!(weather.humidity, Some(85));
    assert_eq!(weather.forecast_text, "mostly-cloudy / rain");
}

#[tokio::test]
async fn test_short_term_without_rows_for_day_is_none() {
    let (short, mid) = sources();
    let service = service("2026-05-10 12:00", &short, &mid);

    // items only cover the 10th and 11th
    assert!(service.get_stadium_weather("2026-05-12", "잠실").await.unwrap().is_none());
    assert_eq!(short.calls(), 1);
}

#[tokio::test]
async fn test_five_days_out_uses_mid_term() {
    let (short, mid) = sources();
    let service = service("2026-05-10 12:00", &short, &mid);

    let weather = service
        .get_stadium_weather("2026-05-15", "잠실야구장")
        .await
        .unwrap()
        .expect("weather");

    assert_eq!(short.calls(), 0);
    assert_eq!(mid.calls(), 1);

    let (regions, issue) = mid.last_seen();
    assert_eq!(regions, MidTermRegions::new("11B00000", "11B10101"));
    assert_eq!(issue, IssueTime::new(date("2026-05-10"), 6));

    assert_eq!(weather.weather_am, SkyCondition::MostlyCloudy);
    assert_eq!(weather.weather_pm, SkyCondition::Rain);
    assert_eq!(weather.precipitation_prob, 70);
    assert_eq!((weather.min_temp, weather.max_temp), (14, 23));
}

#[tokio::test]
async fn test_early_morning_uses_previous_evening_issue() {
    let (short, mid) = sources();
    let service = service("2026-05-10 05:30", &short, &mid);

    service.get_stadium_weather("2026-05-15", "잠실").await.unwrap();

    assert_eq!(mid.last_seen().1, IssueTime::new(date("2026-05-09"), 18));
}

#[tokio::test]
async fn test_mid_term_without_data_uses_defaults() {
    let short: ShortSource = Fake::new(|| Ok(Vec::new()));
    let mid: MidSource = Fake::new(|| Ok(MidTermPayload::default()));
    let service = service("2026-05-10 12:00", &short, &mid);

    let weather = service
        .get_stadium_weather("2026-05-18", "사직")
        .await
        .unwrap()
        .expect("weather");

    assert_eq!(weather.weather_am, SkyCondition::Clear);
    assert_eq!(weather.weather_pm, SkyCondition::Clear);
    assert_eq!((weather.min_temp, weather.max_temp), (0, 0));
    assert_eq!(weather.precipitation_prob, 0);
    assert_eq!(weather.forecast_text, "clear / clear");
}

// ============================================================================
// Errors
// ============================================================================

#[tokio::test]
async fn test_unknown_stadium_is_not_found() {
    let (short, mid) = sources();
    let service = service("2026-05-10 12:00", &short, &mid);

    let err = service.get_stadium_weather("2026-05-10", "Wrigley Field").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_malformed_date_is_validation_error() {
    let (short, mid) = sources();
    let service = service("2026-05-10 12:00", &short, &mid);

    let err = service.get_stadium_weather("2026/05/10", "잠실").await.unwrap_err();
    assert!(matches!(err, AppError::Validation { ref field, .. } if field == "date"));
}

#[tokio::test]
async fn test_upstream_failure_propagates() {
    let short: ShortSource = Fake::new(|| {
        Err(UpstreamForecastError::Timeout {
            operation: "getVilageFcst",
        })
    });
    let (_, mid) = sources();
    let service = service("2026-05-10 12:00", &short, &mid);

    let err = service.get_stadium_weather("2026-05-11", "잠실").await.unwrap_err();
    assert!(matches!(err, AppError::UpstreamForecast(UpstreamForecastError::Timeout { .. })));
}
