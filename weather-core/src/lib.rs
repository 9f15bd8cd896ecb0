//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - A pure normalizer turning a raw observation into a display-ready record
//! - Unit conversion and condition/icon classification
//! - The OpenWeather provider and request-level lookup
//! - Configuration & credentials handling
//!
//! It is used by `weather-cli`, but can also back an HTTP handler or another binary.

pub mod config;
pub mod error;
pub mod model;
pub mod normalize;
pub mod provider;
pub mod service;
pub mod units;

pub use config::{Config, OpenWeatherConfig};
pub use error::{ErrorBody, WeatherError};
pub use model::{Condition, IconKey, NormalizedWeather, RawObservation, WeatherQuery};
pub use normalize::{classify_condition_text, classify_icon_key, normalize};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider, provider_from_config};
pub use service::lookup;
pub use units::{UnitSystem, celsius_from_fahrenheit, fahrenheit_from_celsius};
