//! In-process geocoding fakes shared by unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::geo::{AreaDescriptor, AreaResolver, Coordinate, GeoError, Geocoder, Postcode};

/// Geocoder answering from a fixed table; unknown postcodes are lookup errors.
pub struct FixedGeocoder {
    table: HashMap<String, Coordinate>,
    pub calls: Mutex<Vec<String>>,
}

impl FixedGeocoder {
    pub fn new(entries: &[(&str, (f64, f64))]) -> Self {
        Self {
            table: entries
                .iter()
                .map(|(code, pair)| (code.to_string(), Coordinate::from(*pair)))
                .collect(),
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Geocoder for FixedGeocoder {
    async fn geocode(&self, postcode: &Postcode) -> Result<Coordinate, GeoError> {
        self.calls.lock().unwrap().push(postcode.to_string());
        self.table
            .get(postcode.as_str())
            .copied()
            .ok_or_else(|| GeoError::Lookup {
                postcode: postcode.to_string(),
                reason: "unknown".to_string(),
            })
    }
}

/// Area resolver that records its inputs and replies with a canned outcome.
pub struct RecordingAreas {
    outcome: Result<AreaDescriptor, String>,
    pub seen: Mutex<Vec<Coordinate>>,
}

impl RecordingAreas {
    pub fn found(district: &str) -> Self {
        Self {
            outcome: Ok(AreaDescriptor {
                postcode: "EC4Y 0HQ".to_string(),
                district: district.to_string(),
                region: "London".to_string(),
            }),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            outcome: Err(reason.to_string()),
            seen: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl AreaResolver for RecordingAreas {
    async fn nearest_area(&self, coordinate: Coordinate) -> Result<AreaDescriptor, GeoError> {
        self.seen.lock().unwrap().push(coordinate);
        self.outcome.clone().map_err(GeoError::Resolution)
    }
}
