//! Request-level lookup: validate parameters, fetch, normalize.

use crate::{
    error::WeatherError,
    model::{NormalizedWeather, WeatherQuery},
    normalize::normalize,
    provider::WeatherProvider,
    units::UnitSystem,
};

impl WeatherQuery {
    /// Build a query from loosely-typed request parameters. Units default to imperial.
    pub fn from_params(q: Option<&str>, units: Option<&str>) -> Result<Self, WeatherError> {
        Self::from_params_or(q, units, UnitSystem::default())
    }

    pub fn from_params_or(
        q: Option<&str>,
        units: Option<&str>,
        default_units: UnitSystem,
    ) -> Result<Self, WeatherError> {
        let location = q
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .ok_or(WeatherError::MissingQuery)?;

        let units = match units {
            Some(units) => units.parse()?,
            None => default_units,
        };

        Ok(Self {
            location: location.to_string(),
            units,
        })
    }
}

/// Fetch current conditions for `query` and normalize them for display.
pub async fn lookup(
    provider: &dyn WeatherProvider,
    query: &WeatherQuery,
) -> Result<NormalizedWeather, WeatherError> {
    let raw = provider.current(query).await?;
    let normalized = normalize(&raw, query.units);

    tracing::debug!(
        location = %normalized.location,
        icon = normalized.icon_key.as_str(),
        "normalized observation"
    );

    Ok(normalized)
}
