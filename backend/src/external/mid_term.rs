//! Mid-term forecast client
//!
//! A mid-term lookup is two independent calls made concurrently:
//! `getMidLandFcst` (sky and rain probability, by province) and `getMidTa`
//! (min/max temperature, by city). Either may fail on its own; a failed
//! sub-call is logged and reported as missing data.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Map, Value};
use shared::forecast::{IssueTime, MidLandForecast, MidTemperatureForecast, MidTermPayload};
use shared::MidTermRegions;
use tracing::{debug, warn};

use super::envelope::{decode_items, scalar_fields};
use super::{ForecastSource, UpstreamForecastError};
use crate::config::ServiceKey;

const LAND_OPERATION: &str = "getMidLandFcst";
const TEMPERATURE_OPERATION: &str = "getMidTa";

/// Mid-term forecast API client
#[derive(Clone)]
pub struct MidTermClient {
    client: Client,
    service_key: ServiceKey,
    base_url: String,
}

impl MidTermClient {
    /// Create a client with the provider's default base URL
    pub fn new(service_key: ServiceKey, timeout: Duration) -> Result<Self, reqwest::Error> {
        Self::with_base_url(
            service_key,
            "http://apis.data.go.kr/1360000/MidFcstInfoService".to_string(),
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
        })
    }

    /// Run both sub-calls concurrently and collect whatever succeeded
    pub async fn get_forecast(&self, regions: &MidTermRegions, issue: IssueTime) -> MidTermPayload {
        debug!(
            "mid-term lookup: land={}, temperature={}, tmFc={}",
            regions.land_reg_id,
            regions.temperature_reg_id,
            issue.tm_fc()
        );

        let (land, temperature) = tokio::join!(
            self.get_land_forecast(&regions.land_reg_id, issue),
            self.get_temperature_forecast(&regions.temperature_reg_id, issue),
        );

        MidTermPayload {
            land: or_missing(LAND_OPERATION, land),
            temperature: or_missing(TEMPERATURE_OPERATION, temperature),
        }
    }

    /// Land/sky forecast for a province. `Ok(None)` when the provider has no rows.
    pub async fn get_land_forecast(
        &self,
        land_reg_id: &str,
        issue: IssueTime,
    ) -> Result<Option<MidLandForecast>, UpstreamForecastError> {
        let item = self.first_item(LAND_OPERATION, land_reg_id, issue).await?;
        Ok(item.map(|object| MidLandForecast::from_fields(scalar_fields(object))))
    }

    /// Temperature forecast for a city. `Ok(None)` when the provider has no rows.
    pub async fn get_temperature_forecast(
        &self,
        temperature_reg_id: &str,
        issue: IssueTime,
    ) -> Result<Option<MidTemperatureForecast>, UpstreamForecastError> {
        let item = self
            .first_item(TEMPERATURE_OPERATION, temperature_reg_id, issue)
            .await?;
        Ok(item.map(|object| MidTemperatureForecast::from_fields(scalar_fields(object))))
    }

    async fn first_item(
        &self,
        operation: &'static str,
        reg_id: &str,
        issue: IssueTime,
    ) -> Result<Option<Map<String, Value>>, UpstreamForecastError> {
        let request = match &self.service_key {
            ServiceKey::Encoded(key) => self
                .client
                .get(format!("{}/{}?serviceKey={}", self.base_url, operation, key)),
            ServiceKey::Raw(key) => self
                .client
                .get(format!("{}/{}", self.base_url, operation))
                .query(&[("serviceKey", key.as_str())]),
        };

        let response = request
            .query(&[
                ("pageNo", "1".to_string()),
                ("numOfRows", "10".to_string()),
                ("dataType", "JSON".to_string()),
                ("regId", reg_id.to_string()),
                ("tmFc", issue.tm_fc()),
            ])
            .send()
            .await
            .map_err(|e| UpstreamForecastError::from_reqwest(operation, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| UpstreamForecastError::from_reqwest(operation, e))?;

        if !status.is_success() {
            return Err(UpstreamForecastError::Status {
                operation,
                status,
                body,
            });
        }

        let items: Vec<Map<String, Value>> = decode_items(operation, &body)?;
        if items.is_empty() {
            warn!("{} returned no rows for regId={}", operation, reg_id);
        }
        Ok(items.into_iter().next())
    }
}

/// A failed sub-call counts as "no data"
fn or_missing<T>(operation: &str, result: Result<Option<T>, UpstreamForecastError>) -> Option<T> {
    match result {
        Ok(value) => value,
        Err(e) => {
            warn!("{} failed, continuing without it: {}", operation, e);
            None
        }
    }
}

#[async_trait]
impl ForecastSource for MidTermClient {
    type Location = MidTermRegions;
    type Payload = MidTermPayload;

    async fn fetch(
        &self,
        location: &MidTermRegions,
        issue: IssueTime,
    ) -> Result<MidTermPayload, UpstreamForecastError> {
        Ok(self.get_forecast(location, issue).await)
    }
}
