use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::{Coordinates, DailyForecast, model::null_as_default};

use super::{ForecastProvider, truncate_body};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ForecastError {
    #[error("no daily forecast available")]
    NoDailyForecast,
}

/// Daily forecasts from the OpenWeather One Call 3.0 API.
#[derive(Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, base_url: String) -> Self {
        Self { api_key, base_url, http: Client::new() }
    }

    /// One Call URL for the given coordinates. The base URL is used verbatim.
    pub fn onecall_url(&self, coords: &Coordinates) -> String {
        format!(
            "{}/data/3.0/onecall?lat={:.6}&lon={:.6}&appid={}",
            self.base_url, coords.latitude, coords.longitude, self.api_key
        )
    }

    async fn fetch_onecall(&self, coords: &Coordinates) -> Result<OwOneCallResponse> {
        let url = self.onecall_url(coords);
        debug!(url = %url.replace(&self.api_key, "<redacted>"), "Requesting forecast");

        let res = self
            .http
            .get(&url)
            .send()
            .await
            .context("Failed to send request to OpenWeather (one call)")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read OpenWeather one call response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "OpenWeather one call request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        serde_json::from_str(&body).context("Failed to parse OpenWeather one call JSON")
    }
}

impl std::fmt::Debug for OpenWeatherProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherProvider")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
struct OwOneCallResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    daily: Vec<DailyForecast>,
}

#[async_trait]
impl ForecastProvider for OpenWeatherProvider {
    async fn daily_forecast(&self, coords: &Coordinates) -> Result<DailyForecast> {
        let parsed = self.fetch_onecall(coords).await?;

        let today = parsed.daily.first().copied().ok_or(ForecastError::NoDailyForecast)?;

        info!(
            date = ?unix_to_date(today.dt),
            pop = today.pop,
            uvi = today.uvi,
            "Fetched today's forecast"
        );
        Ok(today)
    }
}

fn unix_to_date(ts: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp(ts, 0).map(|dt| dt.date_naive())
}
