use std::time::Duration;

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use url::Url;

use super::SearchError;

pub const DEFAULT_TAVILY_URL: &str = "https://api.tavily.com";
pub const TAVILY_API_KEY_ENV: &str = "TAVILY_API_KEY";
pub const TAVILY_URL_ENV: &str = "TAVILY_API_URL";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchDepth {
    #[default]
    Basic,
    Advanced,
}

/// Configuration for the Tavily search client
#[derive(Debug, Clone)]
pub struct TavilyConfig {
    /// Tavily API key
    pub api_key: SecretString,
    /// Service root, without the `/search` path
    pub base_url: String,
    /// Maximum number of results
    pub max_results: usize,
    pub search_depth: SearchDepth,
    /// Include answer in response
    pub include_answer: bool,
    /// HTTP client timeout
    pub timeout: Option<Duration>,
}

impl TavilyConfig {
    pub fn new<S: Into<String>>(api_key: S) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            base_url: DEFAULT_TAVILY_URL.to_string(),
            max_results: 5,
            search_depth: SearchDepth::Basic,
            include_answer: false,
            timeout: Some(Duration::from_secs(30)),
        }
    }

    /// Reads `TAVILY_API_KEY` (required) and `TAVILY_API_URL` (optional).
    pub fn from_env() -> Result<Self, SearchError> {
        let api_key = std::env::var(TAVILY_API_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                SearchError::Configuration(format!("{} is not set", TAVILY_API_KEY_ENV))
            })?;

        let mut config = Self::new(api_key);
        if let Ok(url) = std::env::var(TAVILY_URL_ENV) {
            if !url.trim().is_empty() {
                config.base_url = url;
            }
        }
        Ok(config)
    }

    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn with_search_depth(mut self, depth: SearchDepth) -> Self {
        self.search_depth = depth;
        self
    }

    pub fn with_include_answer(mut self, include: bool) -> Self {
        self.include_answer = include;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Web search client for the Tavily API
#[derive(Debug, Clone)]
pub struct TavilyClient {
    config: TavilyConfig,
    search_url: String,
    client: Client,
}

impl TavilyClient {
    pub fn from_env() -> Result<Self, SearchError> {
        Self::with_config(TavilyConfig::from_env()?)
    }

    pub fn with_config(config: TavilyConfig) -> Result<Self, SearchError> {
        let base = Url::parse(&config.base_url).map_err(|e| {
            SearchError::Configuration(format!("invalid search base url {:?}: {}", config.base_url, e))
        })?;
        let search_url = format!("{}/search", base.as_str().trim_end_matches('/'));

        let mut client_builder = Client::builder();
        if let Some(timeout) = config.timeout {
            client_builder = client_builder.timeout(timeout);
        }
        let client = client_builder.build().unwrap_or_else(|_| Client::new());

        Ok(Self {
            config,
            search_url,
            client,
        })
    }

    pub fn config(&self) -> &TavilyConfig {
        &self.config
    }

    /// Run one search and return the raw response document.
    pub async fn search(&self, query: &str) -> Result<Value, SearchError> {
        let request_body = json!({
            "api_key": self.config.api_key.expose_secret(),
            "query": query,
            "max_results": self.config.max_results,
            "search_depth": self.config.search_depth,
            "include_answer": self.config.include_answer,
        });

        log::debug!("Searching the web: {}", query);
        let response = self
            .client
            .post(&self.search_url)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| SearchError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            log::warn!("Search failed with status {}", status);
            return Err(SearchError::Service { status, body });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| SearchError::Decode(e.to_string()))
    }
}
