use serde::{Deserialize, Serialize};

use crate::units::UnitSystem;

/// A lookup request for current conditions at a place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherQuery {
    pub location: String,
    pub units: UnitSystem,
}

/// One upstream condition entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// Upstream numeric code grouping conditions into families.
    pub classification_id: i64,
    pub main_label: Option<String>,
    pub detail_label: Option<String>,
}

/// Current observation as reported upstream, before normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawObservation {
    pub name: String,
    pub country_code: Option<String>,
    /// In whichever unit system the observation was requested in.
    pub temperature: f64,
    /// Ordered as reported; only the first entry is consulted.
    pub conditions: Vec<Condition>,
    /// Unix seconds.
    pub observed_at: i64,
}

/// Pictogram a display layer should render. Serializes to Lucide icon names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IconKey {
    #[serde(rename = "CloudLightning")]
    Thunderstorm,
    #[serde(rename = "CloudDrizzle")]
    Drizzle,
    #[serde(rename = "CloudRain")]
    Rain,
    #[serde(rename = "CloudSnow")]
    Snow,
    /// Mist, smoke, dust, fog and the like.
    #[serde(rename = "CloudFog")]
    Haze,
    #[serde(rename = "Sun")]
    Clear,
    #[serde(rename = "CloudSun")]
    PartlyCloudy,
    #[serde(rename = "Cloud")]
    Cloudy,
}

impl IconKey {
    /// Maps an OpenWeather condition id, see <https://openweathermap.org/weather-conditions>.
    pub fn from_classification_id(id: i64) -> Self {
        match id {
            200..300 => Self::Thunderstorm,
            300..400 => Self::Drizzle,
            500..600 => Self::Rain,
            600..700 => Self::Snow,
            700..800 => Self::Haze,
            800 => Self::Clear,
            801.. => Self::PartlyCloudy,
            _ => Self::Cloudy,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Thunderstorm => "CloudLightning",
            Self::Drizzle => "CloudDrizzle",
            Self::Rain => "CloudRain",
            Self::Snow => "CloudSnow",
            Self::Haze => "CloudFog",
            Self::Clear => "Sun",
            Self::PartlyCloudy => "CloudSun",
            Self::Cloudy => "Cloud",
        }
    }
}

/// Display-ready weather record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedWeather {
    /// `"Kansas City, US"`, or just the name without a country code.
    pub location: String,
    #[serde(rename = "temperatureF")]
    pub temperature_f: i64,
    #[serde(rename = "temperatureC")]
    pub temperature_c: i64,
    pub condition: String,
    pub icon_key: IconKey,
    /// ISO-8601 UTC with millisecond precision.
    pub last_updated: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_boundaries() {
        assert_eq!(IconKey::from_classification_id(199), IconKey::Cloudy);
        assert_eq!(IconKey::from_classification_id(200), IconKey::Thunderstorm);
        assert_eq!(IconKey::from_classification_id(250), IconKey::Thunderstorm);
        assert_eq!(IconKey::from_classification_id(299), IconKey::Thunderstorm);
        assert_eq!(IconKey::from_classification_id(300), IconKey::Drizzle);
        assert_eq!(IconKey::from_classification_id(399), IconKey::Drizzle);
        assert_eq!(IconKey::from_classification_id(400), IconKey::Cloudy);
        assert_eq!(IconKey::from_classification_id(450), IconKey::Cloudy);
        assert_eq!(IconKey::from_classification_id(499), IconKey::Cloudy);
        assert_eq!(IconKey::from_classification_id(500), IconKey::Rain);
        assert_eq!(IconKey::from_classification_id(600), IconKey::Snow);
        assert_eq!(IconKey::from_classification_id(700), IconKey::Haze);
        assert_eq!(IconKey::from_classification_id(799), IconKey::Haze);
        assert_eq!(IconKey::from_classification_id(800), IconKey::Clear);
        assert_eq!(IconKey::from_classification_id(801), IconKey::PartlyCloudy);
        assert_eq!(IconKey::from_classification_id(150), IconKey::Cloudy);
        assert_eq!(IconKey::from_classification_id(-1), IconKey::Cloudy);
    }

    #[test]
    fn icon_table_over_observed_range() {
        for id in 199..=900 {
            let expected = if (200..300).contains(&id) {
                IconKey::Thunderstorm
            } else if (300..400).contains(&id) {
                IconKey::Drizzle
            } else if (500..600).contains(&id) {
                IconKey::Rain
            } else if (600..700).contains(&id) {
                IconKey::Snow
            } else if (700..800).contains(&id) {
                IconKey::Haze
            } else if id == 800 {
                IconKey::Clear
            } else if id > 800 {
                IconKey::PartlyCloudy
            } else {
                IconKey::Cloudy
            };
            assert_eq!(IconKey::from_classification_id(id), expected, "id {id}");
        }
    }

    #[test]
    fn icon_key_serializes_to_lucide_name() {
        for key in [
            IconKey::Thunderstorm,
            IconKey::Drizzle,
            IconKey::Rain,
            IconKey::Snow,
            IconKey::Haze,
            IconKey::Clear,
            IconKey::PartlyCloudy,
            IconKey::Cloudy,
        ] {
            let json = serde_json::to_value(key).unwrap();
            assert_eq!(json, serde_json::Value::String(key.as_str().to_string()));
        }
    }

    #[test]
    fn normalized_weather_uses_client_field_names() {
        let weather = NormalizedWeather {
            location: "Oslo, NO".into(),
            temperature_f: 41,
            temperature_c: 5,
            condition: "Light snow".into(),
            icon_key: IconKey::Snow,
            last_updated: "2023-11-14T22:13:20.000Z".into(),
        };

        let json = serde_json::to_value(&weather).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "location": "Oslo, NO",
                "temperatureF": 41,
                "temperatureC": 5,
                "condition": "Light snow",
                "iconKey": "CloudSnow",
                "lastUpdated": "2023-11-14T22:13:20.000Z",
            })
        );
    }
}
