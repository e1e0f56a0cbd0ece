//! External API integrations
//!
//! Clients for the short-term (village) and mid-term forecast services of
//! the national weather provider.

use async_trait::async_trait;
use reqwest::StatusCode;
use shared::forecast::IssueTime;
use thiserror::Error;

pub mod envelope;
pub mod mid_term;
pub mod retry;
pub mod short_term;

pub use mid_term::MidTermClient;
pub use retry::{call_with_retry, RetryPolicy};
pub use short_term::ShortTermClient;

/// Fetch a raw forecast payload for one location and issue time
#[async_trait]
pub trait ForecastSource: Send + Sync {
    type Location: Send + Sync;
    type Payload: Send;

    async fn fetch(
        &self,
        location: &Self::Location,
        issue: IssueTime,
    ) -> Result<Self::Payload, UpstreamForecastError>;
}

/// Failure talking to the forecast provider
#[derive(Debug, Error)]
pub enum UpstreamForecastError {
    #[error("{operation} request failed: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{operation} timed out")]
    Timeout { operation: &'static str },

    #[error("{operation} returned HTTP {status}")]
    Status {
        operation: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("{operation} returned result code {code}: {message}")]
    ResultCode {
        operation: &'static str,
        code: String,
        message: String,
    },

    #[error("{operation} returned a malformed payload: {reason}")]
    Malformed {
        operation: &'static str,
        reason: String,
    },

    #[error("{operation} gave up after {attempts} attempts: {last}")]
    RetriesExhausted {
        operation: &'static str,
        attempts: u32,
        last: Box<UpstreamForecastError>,
    },
}

impl UpstreamForecastError {
    pub(crate) fn from_reqwest(operation: &'static str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            UpstreamForecastError::Timeout { operation }
        } else {
            UpstreamForecastError::Transport {
                operation,
                source: err,
            }
        }
    }

    /// Rate limiting, server errors and timeouts are worth another attempt
    pub fn is_retryable(&self) -> bool {
        match self {
            UpstreamForecastError::Status { status, .. } => {
                *status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
            }
            UpstreamForecastError::Timeout { .. } => true,
            _ => false,
        }
    }
}
