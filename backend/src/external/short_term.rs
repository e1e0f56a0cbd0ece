//! Short-term (village) forecast client
//!
//! Calls `getVilageFcst` for a 5km grid point and returns the raw
//! `(date, time, category, value)` tuples.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use shared::forecast::{IssueTime, ShortTermItem};
use shared::GridPoint;
use tracing::{debug, warn};

use super::envelope::{decode_items, string_or_number};
use super::retry::{call_with_retry, RetryPolicy};
use super::{ForecastSource, UpstreamForecastError};
use crate::config::ServiceKey;

const OPERATION: &str = "getVilageFcst";

/// Rows requested per call; one issue covers up to three days of hourly rows
const ROWS_PER_PAGE: u32 = 1000;

/// Short-term forecast API client
#[derive(Clone)]
pub struct ShortTermClient {
    client: Client,
    service_key: ServiceKey,
    base_url: String,
    retry: RetryPolicy,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VilageFcstItem {
    #[serde(deserialize_with = "string_or_number")]
    fcst_date: String,
    #[serde(deserialize_with = "string_or_number")]
    fcst_time: String,
    category: String,
    #[serde(deserialize_with = "string_or_number")]
    fcst_value: String,
}

impl ShortTermClient {
    /// Create a client with the provider's default base URL
    pub fn new(service_key: ServiceKey, timeout: Duration) -> Result<Self, reqwest::Error> {
        Self::with_base_url(
            service_key,
            "http://apis.data.go.kr/1360000/VilageFcstInfoService_2.0".to_string(),
            timeout,
        )
    }

    /// Create a client against a custom base URL (for testing)
    pub fn with_base_url(
        service_key: ServiceKey,
        base_url: String,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            service_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            retry: RetryPolicy::default(),
        })
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Fetch every forecast row of one issue for a grid point
    pub async fn get_forecast(
        &self,
        grid: GridPoint,
        issue: IssueTime,
    ) -> Result<Vec<ShortTermItem>, UpstreamForecastError> {
        debug!(
            "{}: nx={}, ny={}, base={} {}",
            OPERATION,
            grid.nx,
            grid.ny,
            issue.base_date(),
            issue.base_time()
        );

        let body = call_with_retry(self.retry, OPERATION, move || self.request(grid, issue)).await?;
        let raw: Vec<VilageFcstItem> = decode_items(OPERATION, &body)?;
        let total = raw.len();

        let items: Vec<ShortTermItem> = raw
            .into_iter()
            .filter_map(|item| {
                ShortTermItem::parse(
                    &item.fcst_date,
                    &item.fcst_time,
                    &item.category,
                    item.fcst_value,
                )
            })
            .collect();

        if items.len() < total {
            warn!(
                "{}: dropped {} rows with unreadable timestamps",
                OPERATION,
                total - items.len()
            );
        }

        Ok(items)
    }

    async fn request(&self, grid: GridPoint, issue: IssueTime) -> Result<String, UpstreamForecastError> {
        let request = match &self.service_key {
            ServiceKey::Encoded(key) => self
                .client
                .get(format!("{}/getVilageFcst?serviceKey={}", self.base_url, key)),
            ServiceKey::Raw(key) => self
                .client
                .get(format!("{}/getVilageFcst", self.base_url))
                .query(&[("serviceKey", key.as_str())]),
        };

        let response = request
            .query(&[
                ("pageNo", "1".to_string()),
                ("numOfRows", ROWS_PER_PAGE.to_string()),
                ("dataType", "JSON".to_string()),
                ("base_date", issue.base_date()),
                ("base_time", issue.base_time()),
                ("nx", grid.nx.to_string()),
                ("ny", grid.ny.to_string()),
            ])
            .send()
            .await
            .map_err(|e| UpstreamForecastError::from_reqwest(OPERATION, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| UpstreamForecastError::from_reqwest(OPERATION, e))?;

        if !status.is_success() {
            return Err(UpstreamForecastError::Status {
                operation: OPERATION,
                status,
                body,
            });
        }

        Ok(body)
    }
}

#[async_trait]
impl ForecastSource for ShortTermClient {
    type Location = GridPoint;
    type Payload = Vec<ShortTermItem>;

    async fn fetch(
        &self,
        location: &GridPoint,
        issue: IssueTime,
    ) -> Result<Vec<ShortTermItem>, UpstreamForecastError> {
        self.get_forecast(*location, issue).await
    }
}
