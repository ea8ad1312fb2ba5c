//! HTTP client for the weather provider.
//!
//! Issues request-by-coordinate (and optional timestamp) GETs against a
//! Dark Sky-compatible endpoint. Unneeded granularity blocks are excluded
//! from every request to keep response payloads small.

use chrono::{Duration, Local};
use tracing::debug;

use crate::common::error::{ForecastError, ForecastResult};
use crate::config::ForecastConfig;
use crate::forecast::model::{ForecastResponse, ForecastSnapshot};

/// Client for the configured weather provider and coordinate.
#[derive(Debug, Clone)]
pub struct ForecastClient {
    http: reqwest::Client,
    config: ForecastConfig,
}

impl ForecastClient {
    pub fn new(config: ForecastConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Fetch the live conditions for the configured coordinate.
    pub async fn fetch_current(&self) -> ForecastResult<ForecastSnapshot> {
        let url = format!(
            "{}/{}/{},{}",
            self.config.base_url, self.config.api_key, self.config.latitude, self.config.longitude
        );

        let response = self.request(&url, "minutely,hourly").await?;
        response.into_current_snapshot()
    }

    /// Fetch tomorrow's forecast, anchored at noon local time.
    ///
    /// Noon is a time of day that should be relevant to anyone asking about
    /// tomorrow's weather; the provider's "time machine" interface takes it
    /// as a unix timestamp appended to the coordinate.
    pub async fn fetch_tomorrow_noon(&self) -> ForecastResult<ForecastSnapshot> {
        let url = format!(
            "{}/{}/{},{},{}",
            self.config.base_url,
            self.config.api_key,
            self.config.latitude,
            self.config.longitude,
            tomorrow_at_noon_timestamp()
        );

        let response = self.request(&url, "currently,minutely,hourly").await?;
        response.into_tomorrow_snapshot()
    }

    async fn request(&self, url: &str, exclude: &str) -> ForecastResult<ForecastResponse> {
        debug!("Fetching forecast (exclude={})", exclude);

        let res = self
            .http
            .get(url)
            .query(&[("exclude", exclude)])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(ForecastError::Status {
                status,
                body: truncate_body(&body),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

/// Unix timestamp for tomorrow at 12:00 local time.
fn tomorrow_at_noon_timestamp() -> i64 {
    let fallback = Local::now() + Duration::days(1);

    Local::now()
        .date_naive()
        .succ_opt()
        .and_then(|date| date.and_hms_opt(12, 0, 0))
        .and_then(|noon| noon.and_local_timezone(Local).earliest())
        .map(|noon| noon.timestamp())
        // DST gaps can make local noon unrepresentable; 24h ahead is close enough
        .unwrap_or_else(|| fallback.timestamp())
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let cut = (0..=MAX).rev().find(|i| body.is_char_boundary(*i)).unwrap_or(0);
        format!("{}...", &body[..cut])
    } else {
        body.to_string()
    }
}
