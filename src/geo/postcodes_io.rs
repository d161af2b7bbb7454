use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use super::{AreaDescriptor, AreaResolver, Coordinate, GeoError, Geocoder, Postcode};

pub const DEFAULT_POSTCODES_URL: &str = "https://api.postcodes.io";
pub const POSTCODES_URL_ENV: &str = "POSTCODES_API_URL";

/// Search radius (metres) for reverse lookups.
pub const SEARCH_RADIUS: u32 = 2000;
/// Reverse lookups only ever want the nearest match.
pub const RESULT_LIMIT: u32 = 1;

/// Configuration for the postcodes.io client
#[derive(Debug, Clone)]
pub struct PostcodesConfig {
    /// Service root, e.g. `https://api.postcodes.io`
    pub base_url: String,
    /// HTTP client timeout. Unset by default: callers own timeout policy.
    pub timeout: Option<Duration>,
}

impl Default for PostcodesConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_POSTCODES_URL.to_string(),
            timeout: None,
        }
    }
}

impl PostcodesConfig {
    /// Default config, with the base URL overridden by `POSTCODES_API_URL` when set.
    pub fn from_env() -> Self {
        let base_url = std::env::var(POSTCODES_URL_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_POSTCODES_URL.to_string());
        Self {
            base_url,
            ..Self::default()
        }
    }

    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[derive(Deserialize)]
struct LookupResponse {
    status: Option<u16>,
    result: Option<LookupResult>,
    error: Option<String>,
}

#[derive(Deserialize)]
struct LookupResult {
    latitude: Option<f64>,
    longitude: Option<f64>,
}

#[derive(Deserialize)]
struct ReverseResponse {
    status: Option<u16>,
    result: Option<Vec<ReverseResult>>,
    error: Option<String>,
}

#[derive(Deserialize)]
struct ReverseResult {
    postcode: Option<String>,
    admin_district: Option<String>,
    region: Option<String>,
}

/// Client for a postcodes.io compatible service.
///
/// Implements both [`Geocoder`] and [`AreaResolver`]. Build it once and share
/// it behind an `Arc`; every call issues exactly one request and nothing is
/// cached.
#[derive(Debug, Clone)]
pub struct PostcodesClient {
    config: PostcodesConfig,
    base_url: Url,
    client: Client,
}

impl PostcodesClient {
    pub fn new() -> Result<Self, GeoError> {
        Self::with_config(PostcodesConfig::default())
    }

    pub fn from_env() -> Result<Self, GeoError> {
        Self::with_config(PostcodesConfig::from_env())
    }

    pub fn with_config(config: PostcodesConfig) -> Result<Self, GeoError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            GeoError::Configuration(format!("invalid postcodes base url {:?}: {}", config.base_url, e))
        })?;

        let mut client_builder = Client::builder();
        if let Some(timeout) = config.timeout {
            client_builder = client_builder.timeout(timeout);
        }
        let client = client_builder.build().unwrap_or_else(|_| Client::new());

        Ok(Self {
            config,
            base_url,
            client,
        })
    }

    pub fn config(&self) -> &PostcodesConfig {
        &self.config
    }

    /// Base URL with `segments` appended, each escaped as a single path segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, GeoError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                GeoError::Configuration(format!(
                    "postcodes base url {} cannot take a path",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[async_trait]
impl Geocoder for PostcodesClient {
    async fn geocode(&self, postcode: &Postcode) -> Result<Coordinate, GeoError> {
        let lookup_error = |reason: String| GeoError::Lookup {
            postcode: postcode.to_string(),
            reason,
        };

        // Postcodes are letters and digits only; anything else could rewrite the path.
        if !postcode.as_str().chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(lookup_error("not a postcode".to_string()));
        }

        let url = self.endpoint(&["postcodes", postcode.as_str()])?;
        log::debug!("Geocoding {} via {}", postcode, url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(lookup_error(format!("{}: {}", status, body)));
        }

        let parsed: LookupResponse = serde_json::from_str(&body)
            .map_err(|e| lookup_error(format!("unexpected response body: {}", e)))?;

        if let Some(code) = parsed.status.filter(|code| *code != 200) {
            return Err(lookup_error(format!(
                "status {}: {}",
                code,
                parsed.error.unwrap_or_default()
            )));
        }

        let result = parsed
            .result
            .ok_or_else(|| lookup_error("response has no result".to_string()))?;

        match (result.latitude, result.longitude) {
            (Some(latitude), Some(longitude)) => {
                let coordinate = Coordinate::new(latitude, longitude);
                if !coordinate.is_finite() {
                    return Err(lookup_error(format!("non-finite coordinate {}", coordinate)));
                }
                log::debug!("Geocoded {} to {}", postcode, coordinate);
                Ok(coordinate)
            }
            _ => Err(lookup_error("result has no coordinates".to_string())),
        }
    }
}

#[async_trait]
impl AreaResolver for PostcodesClient {
    async fn nearest_area(&self, coordinate: Coordinate) -> Result<AreaDescriptor, GeoError> {
        if !coordinate.is_finite() {
            return Err(GeoError::Resolution(format!(
                "refusing to reverse-resolve non-finite coordinate {}",
                coordinate
            )));
        }

        let url = self.endpoint(&["postcodes"])?;
        let params = [
            ("lon", coordinate.longitude.to_string()),
            ("lat", coordinate.latitude.to_string()),
            ("radius", SEARCH_RADIUS.to_string()),
            ("limit", RESULT_LIMIT.to_string()),
        ];
        log::debug!("Reverse resolving {} via {}", coordinate, url);

        let response = self.client.get(url).query(&params).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(GeoError::Resolution(format!("{}: {}", status, body)));
        }

        let parsed: ReverseResponse = serde_json::from_str(&body)
            .map_err(|e| GeoError::Resolution(format!("unexpected response body: {}", e)))?;

        // A failing status and an empty result are reported the same way.
        if parsed.status != Some(200) {
            return Err(GeoError::Resolution(format!(
                "status {:?}: {}",
                parsed.status,
                parsed.error.unwrap_or_default()
            )));
        }

        let nearest = parsed
            .result
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| {
                GeoError::Resolution(format!(
                    "no area within {} of {}",
                    SEARCH_RADIUS, coordinate
                ))
            })?;

        let area = AreaDescriptor {
            postcode: required_field(nearest.postcode, "postcode")?,
            district: required_field(nearest.admin_district, "admin_district")?,
            region: required_field(nearest.region, "region")?,
        };
        log::debug!("Resolved {} to {} ({})", coordinate, area.district, area.postcode);
        Ok(area)
    }
}

fn required_field(value: Option<String>, name: &str) -> Result<String, GeoError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| GeoError::Resolution(format!("nearest result has no {}", name)))
}
