//! Test fixtures for directory records
//!
//! Import via `use crate::directory::fixtures::*` in test modules.

#![allow(dead_code)]

use async_trait::async_trait;

use super::ShelterDirectory;
use super::document::{ShelterDocument, parse_documents};
use crate::error::DirectoryError;
use crate::models::{ContactInfo, ShelterRecord, ShelterStatus};

/// Builder for test [`ShelterRecord`]s.
///
/// # Example
/// ```ignore
/// let shelter = ShelterBuilder::new("obm")
///     .name("Old Brewery Mission")
///     .address("915 Rue Clark")
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct ShelterBuilder {
    record: ShelterRecord,
}

impl ShelterBuilder {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            record: ShelterRecord {
                name: format!("Shelter {}", &id),
                address: format!("{} Rue Sainte-Catherine", &id),
                id,
                location: "Montreal, QC".to_string(),
                status: ShelterStatus::Active,
                capacity: None,
                occupancy: None,
                contact: None,
            },
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.record.name = name.into();
        self
    }

    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.record.address = address.into();
        self
    }

    pub fn status(mut self, status: ShelterStatus) -> Self {
        self.record.status = status;
        self
    }

    pub fn beds(mut self, capacity: u32, occupancy: u32) -> Self {
        self.record.capacity = Some(capacity);
        self.record.occupancy = Some(occupancy);
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.record.contact = Some(ContactInfo {
            phone: Some(phone.into()),
            ..Default::default()
        });
        self
    }

    pub fn build(self) -> ShelterRecord {
        self.record
    }
}

/// In-memory directory returning a fixed body or a read failure
pub struct StaticDirectory {
    body: Result<String, String>,
}

impl StaticDirectory {
    pub fn from_json(body: &str) -> Self {
        Self {
            body: Ok(body.to_string()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            body: Err(message.to_string()),
        }
    }
}

#[async_trait]
impl ShelterDirectory for StaticDirectory {
    async fn fetch_documents(&self) -> Result<Vec<ShelterDocument>, DirectoryError> {
        match &self.body {
            Ok(body) => parse_documents(body),
            Err(message) => Err(DirectoryError::Read(message.clone())),
        }
    }

    fn describe(&self) -> String {
        "static".to_string()
    }
}
