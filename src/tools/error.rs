use thiserror::Error;

use crate::geo::GeoError;
use crate::search::SearchError;

/// Errors a tool call can report back to the agent runtime.
///
/// A failed call never carries a state update.
#[derive(Error, Debug)]
pub enum ToolError {
    // ============ Dispatch ============
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("Execution failed: {0}")]
    ExecutionError(String),

    // ============ Input ============
    #[error("Invalid input: {0}")]
    InvalidInputError(String),

    #[error("Missing state: {0} has not been set yet")]
    MissingState(String),

    // ============ Configuration ============
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    // ============ External services ============
    #[error("Geocoding error: {0}")]
    GeoError(#[from] GeoError),

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Network error: {0}")]
    NetworkError(String),
}

impl ToolError {
    /// The underlying geocoding failure, if this error came from the area pipeline.
    pub fn geo(&self) -> Option<&GeoError> {
        match self {
            Self::GeoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SearchError> for ToolError {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::Network(msg) => ToolError::NetworkError(msg),
            SearchError::Configuration(msg) => ToolError::ConfigurationError(msg),
            other => ToolError::ExternalServiceError(other.to_string()),
        }
    }
}
