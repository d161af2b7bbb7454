use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{Coordinate, GeoError, Postcode};

/// The administrative area nearest to a coordinate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaDescriptor {
    pub postcode: String,
    pub district: String,
    pub region: String,
}

/// Resolves a postcode to a coordinate.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, postcode: &Postcode) -> Result<Coordinate, GeoError>;
}

/// Resolves a coordinate to the nearest administrative area.
#[async_trait]
pub trait AreaResolver: Send + Sync {
    async fn nearest_area(&self, coordinate: Coordinate) -> Result<AreaDescriptor, GeoError>;
}
