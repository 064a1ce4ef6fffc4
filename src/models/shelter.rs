//! Shelter directory records and resolution results

use std::fmt;

use serde::{Deserialize, Serialize};

use super::geo::GeoCoordinates;

/// Operational status of a shelter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShelterStatus {
    Active,
    #[default]
    Pending,
    Inactive,
}

impl ShelterStatus {
    /// Parse a stored status value (case-insensitive).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "active" => Some(ShelterStatus::Active),
            "pending" => Some(ShelterStatus::Pending),
            "inactive" => Some(ShelterStatus::Inactive),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShelterStatus::Active => "active",
            ShelterStatus::Pending => "pending",
            ShelterStatus::Inactive => "inactive",
        }
    }
}

impl fmt::Display for ShelterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Contact details for a shelter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl ContactInfo {
    /// True when no contact field is set
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.phone.is_none() && self.email.is_none()
    }
}

/// One physical shelter location as read from the directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShelterRecord {
    /// Directory-assigned identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Street address, also the coordinate cache key
    pub address: String,

    /// Free-text location label
    pub location: String,

    /// Operational status
    pub status: ShelterStatus,

    /// Bed capacity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,

    /// Current occupancy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occupancy: Option<u32>,

    /// Contact details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<ContactInfo>,
}

/// Where a resolved coordinate came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionSource {
    /// Fresh coordinate cache entry
    Cache,
    /// Live geocoding service result
    Service,
    /// Neighborhood substring match
    Heuristic,
    /// City-centre default
    Default,
}

impl ResolutionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionSource::Cache => "cache",
            ResolutionSource::Service => "service",
            ResolutionSource::Heuristic => "heuristic",
            ResolutionSource::Default => "default",
        }
    }

    /// Whether the coordinate came from one of the offline fallbacks
    pub fn is_fallback(&self) -> bool {
        matches!(self, ResolutionSource::Heuristic | ResolutionSource::Default)
    }
}

impl fmt::Display for ResolutionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directory record paired with its resolved coordinate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedShelter {
    #[serde(flatten)]
    pub shelter: ShelterRecord,

    pub coordinates: GeoCoordinates,

    pub source: ResolutionSource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_case_insensitive() {
        assert_eq!(ShelterStatus::parse("Active"), Some(ShelterStatus::Active));
        assert_eq!(ShelterStatus::parse(" INACTIVE "), Some(ShelterStatus::Inactive));
        assert_eq!(ShelterStatus::parse("pending"), Some(ShelterStatus::Pending));
        assert_eq!(ShelterStatus::parse("closed"), None);
    }

    #[test]
    fn test_status_default_is_pending() {
        assert_eq!(ShelterStatus::default(), ShelterStatus::Pending);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&ShelterStatus::Active).unwrap();
        assert_eq!(json, "\"active\"");
    }

    #[test]
    fn test_source_fallback_classification() {
        assert!(ResolutionSource::Heuristic.is_fallback());
        assert!(ResolutionSource::Default.is_fallback());
        assert!(!ResolutionSource::Service.is_fallback());
        assert!(!ResolutionSource::Cache.is_fallback());
    }

    #[test]
    fn test_resolved_shelter_flattens_record() {
        let resolved = ResolvedShelter {
            shelter: ShelterRecord {
                id: "s1".to_string(),
                name: "Old Brewery Mission".to_string(),
                address: "915 Rue Clark".to_string(),
                location: "Montreal, QC".to_string(),
                status: ShelterStatus::Active,
                capacity: None,
                occupancy: None,
                contact: None,
            },
            coordinates: GeoCoordinates::fixed(45.5, -73.5),
            source: ResolutionSource::Default,
        };

        let json = serde_json::to_value(&resolved).unwrap();
        assert_eq!(json["id"], "s1");
        assert_eq!(json["status"], "active");
        assert_eq!(json["source"], "default");
        assert_eq!(json["coordinates"]["latitude"], 45.5);
        assert!(json.get("capacity").is_none());
    }
}
