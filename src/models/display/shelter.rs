//! Shelter directory display model

use serde::Serialize;
use tabled::Tabled;

use super::common::{format_beds, or_dash, truncate_string};
use crate::models::ShelterRecord;

/// Shelter display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct ShelterDisplay {
    #[tabled(rename = "ID")]
    pub id: String,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "ADDRESS")]
    pub address: String,

    #[tabled(rename = "STATUS")]
    pub status: String,

    /// Occupied over total beds
    #[tabled(rename = "BEDS")]
    pub beds: String,

    #[tabled(rename = "PHONE")]
    pub phone: String,
}

impl From<&ShelterRecord> for ShelterDisplay {
    fn from(shelter: &ShelterRecord) -> Self {
        Self {
            id: shelter.id.clone(),
            name: truncate_string(&shelter.name, 40),
            address: truncate_string(&shelter.address, 50),
            status: shelter.status.to_string(),
            beds: format_beds(shelter.capacity, shelter.occupancy),
            phone: or_dash(shelter.contact.as_ref().and_then(|c| c.phone.as_deref())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::fixtures::ShelterBuilder;

    #[test]
    fn test_shelter_display_from_record() {
        let record = ShelterBuilder::new("obm")
            .name("Old Brewery Mission")
            .address("915 Rue Clark, Montreal, QC H2Z 1M1")
            .beds(300, 280)
            .phone("514-866-6591")
            .build();

        let display = ShelterDisplay::from(&record);

        assert_eq!(display.id, "obm");
        assert_eq!(display.status, "active");
        assert_eq!(display.beds, "280/300");
        assert_eq!(display.phone, "514-866-6591");
    }

    #[test]
    fn test_shelter_display_without_contact() {
        let record = ShelterBuilder::new("s1").build();
        let display = ShelterDisplay::from(&record);

        assert_eq!(display.beds, "-");
        assert_eq!(display.phone, "-");
    }
}
