use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{midpoint, AreaDescriptor, AreaResolver, Coordinate, GeoError, Geocoder, Postcode};

/// Everything learned while resolving a meeting area for two people.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MidpointResolution {
    pub person_1_postcode: Postcode,
    pub person_2_postcode: Postcode,
    pub person_1_location: Coordinate,
    pub person_2_location: Coordinate,
    pub midpoint: Coordinate,
    pub area: AreaDescriptor,
}

/// Geocodes two postcodes, averages them and reverse-resolves the midpoint.
///
/// Any failure aborts the whole resolution; nothing partial is returned.
#[derive(Clone)]
pub struct MidpointAreaResolver {
    geocoder: Arc<dyn Geocoder>,
    areas: Arc<dyn AreaResolver>,
}

impl MidpointAreaResolver {
    pub fn new(geocoder: Arc<dyn Geocoder>, areas: Arc<dyn AreaResolver>) -> Self {
        Self { geocoder, areas }
    }

    /// Use one service for both directions, e.g. a shared `PostcodesClient`.
    pub fn from_service<S>(service: Arc<S>) -> Self
    where
        S: Geocoder + AreaResolver + 'static,
    {
        Self {
            geocoder: service.clone(),
            areas: service,
        }
    }

    /// Normalize both raw postcodes, then [`resolve`](Self::resolve).
    pub async fn resolve_raw(
        &self,
        person_1: &str,
        person_2: &str,
    ) -> Result<MidpointResolution, GeoError> {
        let person_1 = Postcode::parse(person_1)?;
        let person_2 = Postcode::parse(person_2)?;
        self.resolve(&person_1, &person_2).await
    }

    pub async fn resolve(
        &self,
        person_1: &Postcode,
        person_2: &Postcode,
    ) -> Result<MidpointResolution, GeoError> {
        // The two lookups are independent; the reverse lookup needs both.
        let (person_1_location, person_2_location) = futures::try_join!(
            self.geocoder.geocode(person_1),
            self.geocoder.geocode(person_2)
        )?;

        for (postcode, location) in [(person_1, person_1_location), (person_2, person_2_location)] {
            if !location.is_finite() {
                return Err(GeoError::Lookup {
                    postcode: postcode.to_string(),
                    reason: format!("non-finite coordinate {}", location),
                });
            }
        }

        let mid = midpoint(person_1_location, person_2_location);
        log::info!(
            "Midpoint of {} {} and {} {} is {}",
            person_1,
            person_1_location,
            person_2,
            person_2_location,
            mid
        );

        let area = self.areas.nearest_area(mid).await?;

        Ok(MidpointResolution {
            person_1_postcode: person_1.clone(),
            person_2_postcode: person_2.clone(),
            person_1_location,
            person_2_location,
            midpoint: mid,
            area,
        })
    }
}
