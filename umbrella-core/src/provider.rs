use crate::{
    Config, Coordinates, DailyForecast,
    provider::{ipinfo::IpInfoProvider, openweather::OpenWeatherProvider},
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod ipinfo;
pub mod openweather;

/// Resolves where the caller currently is.
#[async_trait]
pub trait LocationProvider: Send + Sync + Debug {
    async fn current_location(&self) -> anyhow::Result<Coordinates>;
}

/// Fetches today's forecast for a location.
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    async fn daily_forecast(&self, coords: &Coordinates) -> anyhow::Result<DailyForecast>;
}

/// The pair of providers a run needs.
#[derive(Debug)]
pub struct Providers {
    pub location: Box<dyn LocationProvider>,
    pub forecast: Box<dyn ForecastProvider>,
}

/// Construct the production providers from config.
pub fn providers_from_config(config: &Config) -> Providers {
    Providers {
        location: Box::new(IpInfoProvider::new(config.ip_info_api_key.clone())),
        forecast: Box::new(OpenWeatherProvider::new(
            config.open_weather_api_key.clone(),
            config.open_weather_base_url.clone(),
        )),
    }
}

/// Shorten a response body for inclusion in an error message.
pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
