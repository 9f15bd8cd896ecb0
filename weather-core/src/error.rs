use serde::Serialize;

/// Failures of a weather lookup, from request validation through to the upstream provider.
///
/// Normalization itself never fails; every variant here comes from the edges around it.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Missing query parameter 'q'")]
    MissingQuery,

    #[error("Unknown units '{0}'. Supported units: imperial, metric.")]
    InvalidUnits(String),

    #[error("Server missing OPENWEATHER_API_KEY")]
    MissingApiKey,

    #[error("Location not found")]
    LocationNotFound { status: u16 },

    #[error("{message}")]
    Upstream { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl WeatherError {
    /// HTTP status a caller-facing handler should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            WeatherError::MissingQuery | WeatherError::InvalidUnits(_) => 400,
            WeatherError::LocationNotFound { status } | WeatherError::Upstream { status, .. } => {
                *status
            }
            WeatherError::MissingApiKey | WeatherError::Network(_) | WeatherError::Parse(_) => 500,
        }
    }

    /// Message safe to hand back to a client. Transport and decode details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            WeatherError::Network(_) | WeatherError::Parse(_) => {
                "Unexpected server error".to_string()
            }
            other => other.to_string(),
        }
    }
}

/// JSON error payload, `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl From<&WeatherError> for ErrorBody {
    fn from(err: &WeatherError) -> Self {
        Self { error: err.public_message() }
    }
}
