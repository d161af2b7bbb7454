use thiserror::Error;

/// Errors raised while resolving postcodes and areas.
///
/// None of these are retried inside the pipeline; they propagate unchanged to
/// whoever drives the resolution.
#[derive(Error, Debug)]
pub enum GeoError {
    /// The request never produced a response (DNS, connect, timeout, body read).
    #[error("Transport error: {0}")]
    Transport(String),

    /// Forward lookup answered but gave no usable coordinate.
    #[error("Postcode lookup failed for {postcode}: {reason}")]
    Lookup { postcode: String, reason: String },

    /// Reverse lookup returned a non-success status or no nearby area.
    #[error("Reverse lookup failed: {0}")]
    Resolution(String),

    #[error("Invalid postcode: {0:?}")]
    InvalidPostcode(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl GeoError {
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    pub fn is_lookup(&self) -> bool {
        matches!(self, Self::Lookup { .. })
    }

    pub fn is_resolution(&self) -> bool {
        matches!(self, Self::Resolution(_))
    }
}

impl From<reqwest::Error> for GeoError {
    fn from(e: reqwest::Error) -> Self {
        GeoError::Transport(e.to_string())
    }
}
