use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::WeatherError,
    model::{Condition, RawObservation, WeatherQuery},
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";
const CURRENT_WEATHER_PATH: &str = "/data/2.5/weather";
const CITY_NOT_FOUND: &str = "city not found";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Point the provider at another host, e.g. a proxy or a mock server.
    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            api_key,
            base_url,
            http: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self, query: &WeatherQuery) -> Result<RawObservation, WeatherError> {
        let url = format!("{}{}", self.base_url, CURRENT_WEATHER_PATH);
        tracing::debug!(location = %query.location, units = %query.units, "requesting OpenWeather current conditions");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", query.location.as_str()),
                ("appid", self.api_key.as_str()),
                ("units", query.units.as_str()),
            ])
            .send()
            .await
            .map_err(|e| WeatherError::Network(e.without_url()))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| WeatherError::Network(e.without_url()))?;

        if !status.is_success() {
            let err = upstream_error(status.as_u16(), &body);
            tracing::warn!(
                status = status.as_u16(),
                body = %truncate_body(&body),
                "OpenWeather current request failed"
            );
            return Err(err);
        }

        parse_observation(&body)
    }
}

/// Parse an OpenWeather "current weather" body.
pub fn parse_observation(body: &str) -> Result<RawObservation, WeatherError> {
    let parsed: OwCurrentResponse = serde_json::from_str(body)?;
    Ok(parsed.into())
}

#[derive(Debug, Default, Deserialize)]
struct OwMain {
    #[serde(default)]
    temp: f64,
}

#[derive(Debug, Default, Deserialize)]
struct OwSys {
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    id: i64,
    main: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    #[serde(default)]
    sys: OwSys,
    #[serde(default)]
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
    dt: i64,
}

impl From<OwCurrentResponse> for RawObservation {
    fn from(res: OwCurrentResponse) -> Self {
        Self {
            name: res.name,
            country_code: res.sys.country,
            temperature: res.main.temp,
            conditions: res
                .weather
                .into_iter()
                .map(|w| Condition {
                    classification_id: w.id,
                    main_label: w.main,
                    detail_label: w.description,
                })
                .collect(),
            observed_at: res.dt,
        }
    }
}

/// Error envelope OpenWeather returns on failure. `cod` arrives as a number or a string.
#[derive(Debug, Default, Deserialize)]
struct OwErrorBody {
    cod: Option<serde_json::Value>,
    message: Option<String>,
}

fn upstream_error(http_status: u16, body: &str) -> WeatherError {
    let parsed: OwErrorBody = serde_json::from_str(body).unwrap_or_default();

    let status = parsed
        .cod
        .as_ref()
        .and_then(|cod| match cod {
            serde_json::Value::Number(n) => n.as_u64(),
            serde_json::Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
        .filter(|code| *code != 0)
        .and_then(|code| u16::try_from(code).ok())
        .unwrap_or(http_status);

    match parsed.message.as_deref() {
        Some(CITY_NOT_FOUND) => WeatherError::LocationNotFound { status },
        Some(message) if !message.is_empty() => WeatherError::Upstream {
            status,
            message: message.to_string(),
        },
        _ => WeatherError::Upstream {
            status,
            message: "Request failed".to_string(),
        },
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
