use std::{fmt, path::PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

pub const IP_INFO_API_KEY: &str = "IP_INFO_API_KEY";
pub const OPEN_WEATHER_API_KEY: &str = "OPEN_WEATHER_API_KEY";
pub const OPEN_WEATHER_BASE_URL: &str = "OPEN_WEATHER_BASE_URL";
/// When set, the process runs in a container and `.env` is not consulted.
pub const DOCKER_CONTAINER: &str = "DOCKER_CONTAINER";

pub const DEFAULT_OPEN_WEATHER_BASE_URL: &str = "https://api.openweathermap.org";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Required environment variable {0} is not set")]
    MissingVar(&'static str),
}

/// Everything the run needs from the environment, resolved once at startup.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    pub ip_info_api_key: String,
    pub open_weather_api_key: String,
    /// Used verbatim as the prefix of the One Call URL.
    pub open_weather_base_url: String,
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Empty values count as missing. Required keys are checked in a fixed
    /// order so the first missing one is the one reported.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.is_empty());
        let required =
            |name: &'static str| non_empty(name).ok_or(ConfigError::MissingVar(name));

        let ip_info_api_key = required(IP_INFO_API_KEY)?;
        let open_weather_api_key = required(OPEN_WEATHER_API_KEY)?;
        let open_weather_base_url = non_empty(OPEN_WEATHER_BASE_URL)
            .unwrap_or_else(|| DEFAULT_OPEN_WEATHER_BASE_URL.to_string());

        Ok(Self { ip_info_api_key, open_weather_api_key, open_weather_base_url })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("ip_info_api_key", &"<redacted>")
            .field("open_weather_api_key", &"<redacted>")
            .field("open_weather_base_url", &self.open_weather_base_url)
            .finish()
    }
}

/// What happened when looking for a `.env` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DotenvStatus {
    Loaded(PathBuf),
    /// `DOCKER_CONTAINER` was set, so the file system was not consulted.
    SkippedInContainer,
    NotFound(String),
}

impl DotenvStatus {
    /// Emit the outcome as a log event. Separate from loading so it can run
    /// once the subscriber is installed.
    pub fn report(&self) {
        match self {
            DotenvStatus::Loaded(path) => debug!(path = %path.display(), "Loaded .env file"),
            DotenvStatus::SkippedInContainer => {
                debug!("{DOCKER_CONTAINER} is set, skipping .env")
            }
            DotenvStatus::NotFound(err) => {
                warn!(".env file not found, using environment variables ({err})")
            }
        }
    }
}

/// Populate the environment from a local `.env` file, unless running in a
/// container. A missing file is not an error.
pub fn load_dotenv() -> DotenvStatus {
    load_dotenv_with(|name| std::env::var(name).ok(), dotenvy::dotenv)
}

/// [`load_dotenv`] with the variable lookup and the file loader supplied.
pub fn load_dotenv_with<F, L>(lookup: F, load: L) -> DotenvStatus
where
    F: Fn(&str) -> Option<String>,
    L: FnOnce() -> dotenvy::Result<PathBuf>,
{
    let in_container = lookup(DOCKER_CONTAINER).is_some_and(|value| !value.is_empty());
    if in_container {
        return DotenvStatus::SkippedInContainer;
    }

    match load() {
        Ok(path) => DotenvStatus::Loaded(path),
        Err(err) => DotenvStatus::NotFound(err.to_string()),
    }
}
