use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("no OpenWeatherMap API key configured (set OPENWEATHER_API_KEY or pass --api-key)")]
    MissingApiKey,

    #[error("{0}")]
    NotFound(String),

    #[error("weather API returned {code}: {message}")]
    Api { code: u16, message: String },

    #[error("weather request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("failed to decode weather payload: {0}")]
    Decode(String),
}

impl ApiError {
    /// Message shown to the user in place of weather data.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingApiKey => self.to_string(),
            Self::NotFound(message) => message.clone(),
            Self::Api { message, .. } => message.clone(),
            Self::Network(_) => "Network error. Please try again.".to_string(),
            Self::Decode(_) => "Could not read the weather service response".to_string(),
        }
    }
}
