//! Pure conversion of a raw observation into a [`NormalizedWeather`].
//!
//! Nothing here performs I/O or reads the clock, so identical input always
//! yields identical output.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::{
    model::{IconKey, NormalizedWeather, RawObservation},
    units::{UnitSystem, both_scales},
};

const UNKNOWN_CONDITION: &str = "Unknown";
const CLEAR_CLASSIFICATION_ID: i64 = 800;

pub fn normalize(raw: &RawObservation, units: UnitSystem) -> NormalizedWeather {
    let (temperature_f, temperature_c) = both_scales(raw.temperature, units);

    NormalizedWeather {
        location: format_location(&raw.name, raw.country_code.as_deref()),
        temperature_f,
        temperature_c,
        condition: classify_condition_text(raw),
        icon_key: classify_icon_key(raw),
        last_updated: format_observed_at(raw.observed_at),
    }
}

/// Human-readable condition, preferring the detail label.
pub fn classify_condition_text(raw: &RawObservation) -> String {
    let Some(first) = raw.conditions.first() else {
        return UNKNOWN_CONDITION.to_string();
    };

    let detail = first.detail_label.as_deref().map(str::trim).unwrap_or_default();
    if !detail.is_empty() {
        return capitalize_first(detail);
    }

    first
        .main_label
        .clone()
        .unwrap_or_else(|| UNKNOWN_CONDITION.to_string())
}

pub fn classify_icon_key(raw: &RawObservation) -> IconKey {
    let id = raw
        .conditions
        .first()
        .map(|c| c.classification_id)
        .unwrap_or(CLEAR_CLASSIFICATION_ID);

    IconKey::from_classification_id(id)
}

fn format_location(name: &str, country_code: Option<&str>) -> String {
    match country_code {
        Some(country) if !country.is_empty() => format!("{name}, {country}"),
        _ => name.to_string(),
    }
}

/// Out-of-range timestamps collapse to the unix epoch.
fn format_observed_at(epoch_seconds: i64) -> String {
    let instant = match DateTime::<Utc>::from_timestamp(epoch_seconds, 0) {
        Some(instant) => instant,
        None => {
            tracing::warn!(epoch_seconds, "observation timestamp out of range, using unix epoch");
            DateTime::<Utc>::default()
        }
    };

    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
