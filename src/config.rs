//! Environment-driven configuration for the planner's external clients.

use std::sync::Arc;

use crate::error::{MeetupError, Result};
use crate::geo::{PostcodesClient, PostcodesConfig};
use crate::search::{SearchError, TavilyClient, TavilyConfig};

/// Settings for every external service the planner talks to.
#[derive(Debug, Clone, Default)]
pub struct PlannerConfig {
    pub postcodes: PostcodesConfig,
    /// `None` when no search API key is configured
    pub search: Option<TavilyConfig>,
}

impl PlannerConfig {
    /// Build from the environment. A missing `TAVILY_API_KEY` only disables search.
    pub fn from_env() -> Result<Self> {
        let search = match TavilyConfig::from_env() {
            Ok(config) => Some(config),
            Err(SearchError::Configuration(reason)) => {
                log::warn!("Web search disabled: {}", reason);
                None
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            postcodes: PostcodesConfig::from_env(),
            search,
        })
    }

    pub fn with_search(mut self, search: TavilyConfig) -> Self {
        self.search = Some(search);
        self
    }

    pub fn postcodes_client(&self) -> Result<Arc<PostcodesClient>> {
        Ok(Arc::new(PostcodesClient::with_config(self.postcodes.clone())?))
    }

    pub fn search_client(&self) -> Result<Arc<TavilyClient>> {
        let config = self.search.clone().ok_or_else(|| {
            MeetupError::ConfigurationError("web search is not configured".to_string())
        })?;
        Ok(Arc::new(TavilyClient::with_config(config)?))
    }
}
