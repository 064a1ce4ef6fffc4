//! GeoJSON output for map markers

use serde::Serialize;

use crate::models::ResolvedShelter;

/// A GeoJSON `FeatureCollection` of shelter markers
#[derive(Debug, Serialize)]
pub struct FeatureCollection<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    pub features: Vec<Feature<'a>>,
}

/// One shelter marker
#[derive(Debug, Serialize)]
pub struct Feature<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    pub id: &'a str,
    pub geometry: Point,
    pub properties: &'a ResolvedShelter,
}

/// GeoJSON point; coordinates are `[longitude, latitude]`
#[derive(Debug, Serialize)]
pub struct Point {
    #[serde(rename = "type")]
    kind: &'static str,
    pub coordinates: [f64; 2],
}

impl<'a> FeatureCollection<'a> {
    pub fn from_shelters(shelters: &'a [ResolvedShelter]) -> Self {
        Self {
            kind: "FeatureCollection",
            features: shelters
                .iter()
                .map(|shelter| Feature {
                    kind: "Feature",
                    id: &shelter.shelter.id,
                    geometry: Point {
                        kind: "Point",
                        coordinates: [
                            shelter.coordinates.longitude,
                            shelter.coordinates.latitude,
                        ],
                    },
                    properties: shelter,
                })
                .collect(),
        }
    }
}

/// Format resolved shelters as a pretty-printed GeoJSON document
pub fn format_geojson(shelters: &[ResolvedShelter]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&FeatureCollection::from_shelters(shelters))
}
