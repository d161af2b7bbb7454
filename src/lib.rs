//! # meetup-planner
//!
//! Find a fair place for two friends to meet, and expose that search as typed
//! tools an LLM agent runtime can call.
//!
//! ## Overview
//!
//! - **Geo**: postcode normalization, postcodes.io geocoding, midpoint and
//!   nearest-area resolution
//! - **Tools**: `find_area`, `search_food`, `search_activity`, `update_state`
//!   and `web_search`, each with a JSON Schema for its arguments
//! - **Agent**: the meetup state, its append-only update log, and the session
//!   that applies tool proposals
//! - **Search**: Tavily web search client
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use meetup_planner::geo::{MidpointAreaResolver, PostcodesClient};
//!
//! # async fn run() -> meetup_planner::error::Result<()> {
//! let client = Arc::new(PostcodesClient::from_env()?);
//! let resolver = MidpointAreaResolver::from_service(client);
//! let resolution = resolver.resolve_raw("SW1A 1AA", "E1 1HJ").await?;
//! println!("Meet in {}", resolution.area.district);
//! # Ok(()) }
//! ```

/// Meetup state, update log and the owning session.
pub mod agent;
/// Environment-driven client configuration.
pub mod config;
/// Unified error types and error codes.
pub mod error;
/// Postcode geocoding and midpoint area resolution.
pub mod geo;
/// Web search client.
pub mod search;
/// Tools exposed to the agent runtime.
pub mod tools;

use std::sync::Arc;

/// Type alias for a shared specialist delegate
pub type SharedSpecialist = Arc<dyn crate::tools::Specialist>;
