use std::{fmt, num::ParseFloatError, str::FromStr};

use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// What the caller wants to protect against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Rain,
    Shine,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Rain => "rain",
            Mode::Shine => "shine",
        }
    }

    pub const fn all() -> &'static [Mode] {
        &[Mode::Rain, Mode::Shine]
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown mode '{0}'")]
pub struct UnknownMode(pub String);

impl FromStr for Mode {
    type Err = UnknownMode;

    /// Matching is exact: `Rain` or ` rain` are not accepted.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "rain" => Ok(Mode::Rain),
            "shine" => Ok(Mode::Shine),
            _ => Err(UnknownMode(value.to_string())),
        }
    }
}

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Error, PartialEq)]
pub enum LocationError {
    #[error("invalid location format: {0}")]
    Format(String),
    #[error("failed to parse latitude: {0}")]
    Latitude(#[source] ParseFloatError),
    #[error("failed to parse longitude: {0}")]
    Longitude(#[source] ParseFloatError),
}

impl FromStr for Coordinates {
    type Err = LocationError;

    /// Parses the `"<lat>,<lng>"` form returned by IP geolocation services.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        let fields: Vec<&str> = value.split(',').collect();

        let [lat, lng] = fields.as_slice() else {
            return Err(LocationError::Format(value.to_string()));
        };

        let latitude = lat.parse().map_err(LocationError::Latitude)?;
        let longitude = lng.parse().map_err(LocationError::Longitude)?;

        Ok(Self { latitude, longitude })
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// One day of forecast data.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct DailyForecast {
    /// Time of the forecasted data, unix timestamp.
    #[serde(default, deserialize_with = "null_as_default")]
    pub dt: i64,
    /// Probability of precipitation, 0 to 1.
    #[serde(default, deserialize_with = "null_as_default")]
    pub pop: f64,
    /// UV index.
    #[serde(default, deserialize_with = "null_as_default")]
    pub uvi: f64,
}

/// Treat an explicit JSON `null` like a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
