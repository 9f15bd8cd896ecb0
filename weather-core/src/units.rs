use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::error::WeatherError;

/// Unit system a temperature was requested in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    /// Fahrenheit.
    #[default]
    Imperial,
    /// Celsius.
    Metric,
}

impl UnitSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitSystem::Imperial => "imperial",
            UnitSystem::Metric => "metric",
        }
    }

    pub const fn all() -> &'static [UnitSystem] {
        &[UnitSystem::Imperial, UnitSystem::Metric]
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnitSystem {
    type Err = WeatherError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "imperial" => Ok(UnitSystem::Imperial),
            "metric" => Ok(UnitSystem::Metric),
            _ => Err(WeatherError::InvalidUnits(value.to_string())),
        }
    }
}

/// Rounds half away from zero, saturating at the `i64` range.
fn round_to_int(value: f64) -> i64 {
    value.round() as i64
}

pub fn celsius_from_fahrenheit(fahrenheit: f64) -> i64 {
    round_to_int((fahrenheit - 32.0) * 5.0 / 9.0)
}

pub fn fahrenheit_from_celsius(celsius: f64) -> i64 {
    round_to_int(celsius * 9.0 / 5.0 + 32.0)
}

/// Splits a raw temperature into `(fahrenheit, celsius)` given the unit it was reported in.
pub fn both_scales(temperature: f64, units: UnitSystem) -> (i64, i64) {
    match units {
        UnitSystem::Imperial => (round_to_int(temperature), celsius_from_fahrenheit(temperature)),
        UnitSystem::Metric => (fahrenheit_from_celsius(temperature), round_to_int(temperature)),
    }
}
