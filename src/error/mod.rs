//! Crate-wide error type.
//!
//! Each module keeps its own error enum; `MeetupError` lets callers propagate
//! any of them with `?`.

pub use crate::geo::GeoError;
pub use crate::search::SearchError;
pub use crate::tools::ToolError;

mod utils;
pub use utils::*;

#[derive(thiserror::Error, Debug)]
pub enum MeetupError {
    #[error("Geo error: {0}")]
    GeoError(#[from] GeoError),

    #[error("Search error: {0}")]
    SearchError(#[from] SearchError),

    #[error("Tool error: {0}")]
    ToolError(#[from] ToolError),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MeetupError>;
