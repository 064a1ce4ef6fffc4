//! Offline neighborhood lookup used when the geocoding service is unavailable

use serde::{Deserialize, Serialize};

use crate::models::GeoCoordinates;

/// Downtown Montreal, used when no neighborhood matches
pub const CITY_CENTRE: GeoCoordinates = GeoCoordinates::fixed(45.5017, -73.5673);

/// Built-in table, scanned in order. Accented and unaccented spellings are
/// listed separately because matching is a plain substring test.
const MONTREAL_NEIGHBORHOODS: &[(&str, GeoCoordinates)] = &[
    ("old montreal", GeoCoordinates::fixed(45.5075, -73.5540)),
    ("vieux-montréal", GeoCoordinates::fixed(45.5075, -73.5540)),
    ("vieux-montreal", GeoCoordinates::fixed(45.5075, -73.5540)),
    ("pointe-saint-charles", GeoCoordinates::fixed(45.4830, -73.5590)),
    ("griffintown", GeoCoordinates::fixed(45.4930, -73.5620)),
    ("saint-henri", GeoCoordinates::fixed(45.4770, -73.5860)),
    ("verdun", GeoCoordinates::fixed(45.4540, -73.5700)),
    ("plateau", GeoCoordinates::fixed(45.5225, -73.5800)),
    ("mile end", GeoCoordinates::fixed(45.5250, -73.5990)),
    ("hochelaga", GeoCoordinates::fixed(45.5430, -73.5450)),
    ("rosemont", GeoCoordinates::fixed(45.5430, -73.5850)),
    ("villeray", GeoCoordinates::fixed(45.5450, -73.6220)),
    ("côte-des-neiges", GeoCoordinates::fixed(45.4960, -73.6290)),
    ("cote-des-neiges", GeoCoordinates::fixed(45.4960, -73.6290)),
    ("notre-dame-de-grâce", GeoCoordinates::fixed(45.4730, -73.6150)),
    ("notre-dame-de-grace", GeoCoordinates::fixed(45.4730, -73.6150)),
    ("westmount", GeoCoordinates::fixed(45.4840, -73.5980)),
    ("outremont", GeoCoordinates::fixed(45.5200, -73.6080)),
    ("ahuntsic", GeoCoordinates::fixed(45.5570, -73.6660)),
    ("montréal-nord", GeoCoordinates::fixed(45.5960, -73.6300)),
    ("montreal-nord", GeoCoordinates::fixed(45.5960, -73.6300)),
    ("anjou", GeoCoordinates::fixed(45.6050, -73.5600)),
    ("lasalle", GeoCoordinates::fixed(45.4310, -73.6280)),
    ("lachine", GeoCoordinates::fixed(45.4410, -73.6830)),
    ("downtown", CITY_CENTRE),
    ("centre-ville", CITY_CENTRE),
];

/// One lookup table row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Neighborhood {
    /// Substring searched for in the lower-cased address
    pub name: String,

    #[serde(flatten)]
    pub coordinates: GeoCoordinates,
}

/// Ordered substring table plus the no-match default.
#[derive(Debug, Clone)]
pub struct HeuristicTable {
    neighborhoods: Vec<Neighborhood>,
    default: GeoCoordinates,
}

impl Default for HeuristicTable {
    fn default() -> Self {
        Self::montreal()
    }
}

impl HeuristicTable {
    /// Built-in Montreal neighborhoods with a downtown default
    pub fn montreal() -> Self {
        Self {
            neighborhoods: MONTREAL_NEIGHBORHOODS
                .iter()
                .map(|(name, coordinates)| Neighborhood {
                    name: (*name).to_string(),
                    coordinates: *coordinates,
                })
                .collect(),
            default: CITY_CENTRE,
        }
    }

    /// Custom table. Names are lower-cased; blank names are dropped.
    pub fn new(neighborhoods: Vec<Neighborhood>, default: GeoCoordinates) -> Self {
        let neighborhoods = neighborhoods
            .into_iter()
            .filter(|n| !n.name.trim().is_empty())
            .map(|n| Neighborhood {
                name: n.name.trim().to_lowercase(),
                coordinates: n.coordinates,
            })
            .collect();

        Self {
            neighborhoods,
            default,
        }
    }

    /// First neighborhood whose name occurs in the address (case-insensitive)
    pub fn lookup(&self, address: &str) -> Option<&Neighborhood> {
        let haystack = address.to_lowercase();
        self.neighborhoods
            .iter()
            .find(|n| haystack.contains(n.name.as_str()))
    }

    /// Coordinate used when nothing matches
    pub fn default_coordinates(&self) -> GeoCoordinates {
        self.default
    }

    pub fn neighborhoods(&self) -> &[Neighborhood] {
        &self.neighborhoods
    }
}
