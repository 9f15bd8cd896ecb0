use crate::{
    Config, RawObservation, WeatherQuery, error::WeatherError,
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Fetch current conditions, already expressed in `query.units`.
    async fn current(&self, query: &WeatherQuery) -> Result<RawObservation, WeatherError>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> Result<Box<dyn WeatherProvider>, WeatherError> {
    let api_key = config.resolve_api_key()?;

    let provider = match config.base_url() {
        Some(base_url) => OpenWeatherProvider::with_base_url(api_key, base_url),
        None => OpenWeatherProvider::new(api_key),
    };

    Ok(Box::new(provider))
}
