use chrono::{DateTime, Local};
use weather_core::NormalizedWeather;

/// Multi-line summary for a terminal.
pub fn render(weather: &NormalizedWeather) -> String {
    format!(
        "{}\n{}°F / {}°C  {} [{}]\nUpdated {}",
        weather.location,
        weather.temperature_f,
        weather.temperature_c,
        weather.condition,
        weather.icon_key.as_str(),
        local_time(&weather.last_updated),
    )
}

/// Falls back to the raw string if it isn't RFC 3339.
fn local_time(iso: &str) -> String {
    DateTime::parse_from_rfc3339(iso)
        .map(|dt| dt.with_timezone(&Local).format("%Y-%m-%d %H:%M %Z").to_string())
        .unwrap_or_else(|_| iso.to_string())
}
