//! Resolved coordinate display models

use serde::Serialize;
use tabled::Tabled;

use super::common::truncate_string;
use crate::models::{ResolutionSource, ResolvedShelter};

/// Resolved shelter row for table output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct ResolvedShelterDisplay {
    #[tabled(rename = "ID")]
    pub id: String,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "ADDRESS")]
    pub address: String,

    #[tabled(rename = "LATITUDE")]
    pub latitude: String,

    #[tabled(rename = "LONGITUDE")]
    pub longitude: String,

    /// Which strategy produced the coordinate
    #[tabled(rename = "SOURCE")]
    pub source: String,
}

impl From<&ResolvedShelter> for ResolvedShelterDisplay {
    fn from(resolved: &ResolvedShelter) -> Self {
        Self {
            id: resolved.shelter.id.clone(),
            name: truncate_string(&resolved.shelter.name, 40),
            address: truncate_string(&resolved.shelter.address, 50),
            latitude: format!("{:.6}", resolved.coordinates.latitude),
            longitude: format!("{:.6}", resolved.coordinates.longitude),
            source: resolved.source.to_string(),
        }
    }
}

/// Single-address resolution row
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct AddressResolutionDisplay {
    #[tabled(rename = "ADDRESS")]
    pub address: String,

    #[tabled(rename = "LATITUDE")]
    pub latitude: f64,

    #[tabled(rename = "LONGITUDE")]
    pub longitude: f64,

    #[tabled(rename = "SOURCE")]
    pub source: ResolutionSource,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::fixtures::ShelterBuilder;
    use crate::models::GeoCoordinates;

    #[test]
    fn test_resolved_display_fixed_precision() {
        let resolved = ResolvedShelter {
            shelter: ShelterBuilder::new("s1").address("4000 Rue Wellington").build(),
            coordinates: GeoCoordinates::fixed(45.454, -73.57),
            source: ResolutionSource::Heuristic,
        };

        let display = ResolvedShelterDisplay::from(&resolved);

        assert_eq!(display.latitude, "45.454000");
        assert_eq!(display.longitude, "-73.570000");
        assert_eq!(display.source, "heuristic");
    }
}
