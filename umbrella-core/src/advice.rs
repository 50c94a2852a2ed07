//! Turning today's forecast into a recommendation.

use anyhow::Result;
use tracing::debug;

use crate::{
    DailyForecast, Mode,
    provider::{ForecastProvider, LocationProvider},
};

/// Rain chance, in percent, above which an umbrella is recommended.
pub const RAIN_CHANCE_THRESHOLD_PCT: f64 = 5.0;
/// UV index above which sunscreen is recommended.
pub const UV_INDEX_THRESHOLD: f64 = 3.0;

pub const INVALID_MODE_MESSAGE: &str = "Acceptable arguments are either rain or shine.";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Assessment {
    pub mode: Mode,
    /// Chance of rain in percent for [`Mode::Rain`], UV index for [`Mode::Shine`].
    pub reading: f64,
    pub needs_protection: bool,
}

impl Mode {
    /// Apply this mode's fixed threshold to a day's forecast.
    pub fn assess(self, today: &DailyForecast) -> Assessment {
        let (reading, threshold) = match self {
            // pop is a 0-1 probability
            Mode::Rain => (today.pop * 100.0, RAIN_CHANCE_THRESHOLD_PCT),
            Mode::Shine => (today.uvi, UV_INDEX_THRESHOLD),
        };

        Assessment { mode: self, reading, needs_protection: reading > threshold }
    }
}

impl Assessment {
    /// The informational line printed ahead of the verdict.
    pub fn detail(&self) -> String {
        match self.mode {
            Mode::Rain => format!("Chance of rain today: {:.1}%", self.reading),
            Mode::Shine => format!("UV Index today: {:.1}", self.reading),
        }
    }

    pub fn verdict(&self) -> &'static str {
        verdict(self.mode, self.needs_protection)
    }
}

pub fn verdict(mode: Mode, needs_protection: bool) -> &'static str {
    match (mode, needs_protection) {
        (Mode::Rain, true) => "Bring an umbrella!",
        (Mode::Rain, false) => "No umbrella needed today.",
        (Mode::Shine, true) => "Bring sunscreen!",
        (Mode::Shine, false) => "No sunscreen needed today.",
    }
}

/// Result of a single check.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The mode argument was not recognized. No lookups were made.
    InvalidMode,
    Assessed(Assessment),
}

impl Outcome {
    /// Lines to print, in order. The last one is always the verdict.
    pub fn lines(&self) -> Vec<String> {
        match self {
            Outcome::InvalidMode => vec![INVALID_MODE_MESSAGE.to_string()],
            Outcome::Assessed(assessment) => {
                vec![assessment.detail(), assessment.verdict().to_string()]
            }
        }
    }
}

/// Validate the mode, locate the caller, fetch today's forecast and assess it.
///
/// An unrecognized mode returns [`Outcome::InvalidMode`] before either
/// provider is called.
pub async fn check_weather(
    raw_mode: &str,
    location: &dyn LocationProvider,
    forecast: &dyn ForecastProvider,
) -> Result<Outcome> {
    let Ok(mode) = raw_mode.parse::<Mode>() else {
        debug!(raw_mode, "Unrecognized mode");
        return Ok(Outcome::InvalidMode);
    };

    let coords = location.current_location().await?;
    let today = forecast.daily_forecast(&coords).await?;

    Ok(Outcome::Assessed(mode.assess(&today)))
}
