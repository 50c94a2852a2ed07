//! Core library for the `umbrella` CLI.
//!
//! This crate defines:
//! - Configuration read from the environment (and an optional `.env` file)
//! - Location and forecast provider abstractions, with IPinfo and OpenWeather
//!   implementations
//! - The rain/shine threshold rules and the messages they produce
//!
//! It is used by `umbrella-cli`, but the evaluation logic can be driven with any
//! provider implementation.

pub mod advice;
pub mod config;
pub mod model;
pub mod provider;

pub use advice::{Assessment, Outcome, check_weather};
pub use config::{Config, ConfigError};
pub use model::{Coordinates, DailyForecast, LocationError, Mode};
pub use provider::{ForecastProvider, LocationProvider, Providers, providers_from_config};
