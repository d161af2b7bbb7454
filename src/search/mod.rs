//! Web search used by the food and activity specialists.

mod error;
pub use error::*;

mod tavily;
pub use tavily::*;
