//! Error codes and context for reporting failures.

use std::fmt;

use super::{GeoError, MeetupError, SearchError, ToolError};

/// Stable numeric code for each failure kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Geocoding (1000-1999)
    GeoTransport = 1001,
    GeoLookup = 1002,
    GeoResolution = 1003,
    GeoInvalidPostcode = 1004,

    /// Web search (2000-2999)
    SearchError = 2000,
    SearchNetwork = 2001,
    SearchService = 2002,

    /// Tool dispatch (3000-3999)
    ToolError = 3000,
    ToolNotFound = 3001,
    ToolInvalidInput = 3002,
    ToolMissingState = 3003,

    /// General (9000-9999)
    ConfigurationError = 9000,
    JsonError = 9002,
}

impl ErrorCode {
    pub fn from_error(error: &MeetupError) -> Self {
        match error {
            MeetupError::GeoError(e) => Self::from_geo(e),
            MeetupError::SearchError(e) => Self::from_search(e),
            MeetupError::ToolError(e) => Self::from_tool(e),
            MeetupError::ConfigurationError(_) => ErrorCode::ConfigurationError,
            MeetupError::JsonError(_) => ErrorCode::JsonError,
        }
    }

    fn from_geo(error: &GeoError) -> Self {
        match error {
            GeoError::Transport(_) => ErrorCode::GeoTransport,
            GeoError::Lookup { .. } => ErrorCode::GeoLookup,
            GeoError::Resolution(_) => ErrorCode::GeoResolution,
            GeoError::InvalidPostcode(_) => ErrorCode::GeoInvalidPostcode,
            GeoError::Configuration(_) => ErrorCode::ConfigurationError,
        }
    }

    fn from_search(error: &SearchError) -> Self {
        match error {
            SearchError::Network(_) => ErrorCode::SearchNetwork,
            SearchError::Service { .. } => ErrorCode::SearchService,
            SearchError::Configuration(_) => ErrorCode::ConfigurationError,
            SearchError::Decode(_) => ErrorCode::SearchError,
        }
    }

    fn from_tool(error: &ToolError) -> Self {
        match error {
            ToolError::GeoError(e) => Self::from_geo(e),
            ToolError::ToolNotFound(_) => ErrorCode::ToolNotFound,
            ToolError::InvalidInputError(_) => ErrorCode::ToolInvalidInput,
            ToolError::MissingState(_) => ErrorCode::ToolMissingState,
            ToolError::ConfigurationError(_) => ErrorCode::ConfigurationError,
            ToolError::NetworkError(_) => ErrorCode::SearchNetwork,
            ToolError::ExternalServiceError(_) => ErrorCode::SearchService,
            ToolError::ExecutionError(_) => ErrorCode::ToolError,
        }
    }

    pub fn as_u32(self) -> u32 {
        self as u32
    }

    pub fn description(self) -> &'static str {
        match self {
            ErrorCode::GeoTransport => "Postcode service unreachable",
            ErrorCode::GeoLookup => "Postcode lookup failed",
            ErrorCode::GeoResolution => "No area found near the midpoint",
            ErrorCode::GeoInvalidPostcode => "Invalid postcode",
            ErrorCode::SearchError => "Web search failed",
            ErrorCode::SearchNetwork => "Search service unreachable",
            ErrorCode::SearchService => "Search service returned an error",
            ErrorCode::ToolError => "Tool execution failed",
            ErrorCode::ToolNotFound => "Tool not found",
            ErrorCode::ToolInvalidInput => "Tool received invalid input",
            ErrorCode::ToolMissingState => "Tool needs state that is not set",
            ErrorCode::ConfigurationError => "Configuration error",
            ErrorCode::JsonError => "JSON parsing/serialization failed",
        }
    }

    /// Module the failure originated in.
    pub fn module(self) -> &'static str {
        match self.as_u32() / 1000 {
            1 => "geo",
            2 => "search",
            3 => "tools",
            _ => "config",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}: {}", self.as_u32(), self.description())
    }
}

impl MeetupError {
    pub fn code(&self) -> ErrorCode {
        ErrorCode::from_error(self)
    }
}

/// Full one-line description of an error: code, message and module.
pub fn error_info(error: &MeetupError) -> String {
    let code = error.code();
    format!("[{}] {} [module: {}]", code, error, code.module())
}
