use thiserror::Error;

/// Errors from the web search client
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Search configuration error: {0}")]
    Configuration(String),

    #[error("Search request failed: {0}")]
    Network(String),

    #[error("Search service returned {status}: {body}")]
    Service { status: u16, body: String },

    #[error("Unreadable search response: {0}")]
    Decode(String),
}
