use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};

use crate::Coordinates;

use super::{LocationProvider, truncate_body};

/// IP geolocation through <https://ipinfo.io>.
#[derive(Clone)]
pub struct IpInfoProvider {
    token: String,
    base_url: String,
    http: Client,
}

impl IpInfoProvider {
    pub const DEFAULT_BASE_URL: &'static str = "https://ipinfo.io";

    pub fn new(token: String) -> Self {
        Self::with_base_url(token, Self::DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(token: String, base_url: String) -> Self {
        Self { token, base_url, http: Client::new() }
    }

    /// Ask for the `loc` field of the caller's own IP, a plain-text
    /// `"<lat>,<lng>"` reply.
    async fn fetch_loc(&self) -> Result<String> {
        let url = format!("{}/loc", self.base_url.trim_end_matches('/'));
        debug!(%url, "Requesting IP location");

        let res = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, "text/plain")
            .send()
            .await
            .context("Failed to get IP location")?;

        let status = res.status();
        let body = res.text().await.context("Failed to read IPinfo response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "IPinfo location request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        Ok(body)
    }
}

impl std::fmt::Debug for IpInfoProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IpInfoProvider").field("base_url", &self.base_url).finish_non_exhaustive()
    }
}

#[async_trait]
impl LocationProvider for IpInfoProvider {
    async fn current_location(&self) -> Result<Coordinates> {
        let loc = self.fetch_loc().await?;
        let coords: Coordinates = loc.parse()?;
        info!(%coords, "Resolved location");
        Ok(coords)
    }
}
