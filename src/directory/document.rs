//! Stored shelter document shape

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::DirectoryError;
use crate::models::{ContactInfo, ShelterRecord, ShelterStatus};

/// Location label used when a document carries none
pub const DEFAULT_LOCATION: &str = "Montreal, QC";

/// A shelter document as stored in the directory.
///
/// Every field is optional at this layer; [`ShelterDocument::into_record`]
/// decides which documents are usable. A field holding the wrong JSON type
/// reads as absent instead of rejecting the whole document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShelterDocument {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub address: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub location: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub status: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub capacity: Option<u32>,

    #[serde(default, alias = "occupancy", deserialize_with = "lenient")]
    pub current_occupancy: Option<u32>,

    #[serde(default, deserialize_with = "lenient")]
    pub contact_name: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub contact_phone: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub contact_email: Option<String>,

    /// Nested form, merged under the flat `contact*` fields
    #[serde(default, deserialize_with = "lenient")]
    pub contact: Option<ContactInfo>,
}

impl ShelterDocument {
    /// Convert to a record, or `None` if the name or address is missing.
    ///
    /// `index` is the document's position and only used to derive an id for
    /// documents that have none.
    pub fn into_record(self, index: usize) -> Option<ShelterRecord> {
        let name = self.name.filter(|n| !n.trim().is_empty())?;
        let address = self.address?;

        let id = self
            .id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| format!("shelter-{}", index));

        let location = self
            .location
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOCATION.to_string());

        let status = self
            .status
            .as_deref()
            .and_then(ShelterStatus::parse)
            .unwrap_or_default();

        let nested = self.contact.unwrap_or_default();
        let contact = ContactInfo {
            name: non_blank(self.contact_name).or(non_blank(nested.name)),
            phone: non_blank(self.contact_phone).or(non_blank(nested.phone)),
            email: non_blank(self.contact_email).or(non_blank(nested.email)),
        };

        Some(ShelterRecord {
            id,
            name,
            address,
            location,
            status,
            capacity: self.capacity,
            occupancy: self.current_occupancy,
            contact: (!contact.is_empty()).then_some(contact),
        })
    }
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Parse a directory body: either a JSON array of documents or an object
/// with a `shelters` array.
///
/// Elements that are not JSON objects become empty documents so they are
/// excluded and counted rather than failing the whole directory.
pub fn parse_documents(body: &str) -> Result<Vec<ShelterDocument>, DirectoryError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| DirectoryError::Parse(e.to_string()))?;

    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("shelters") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(DirectoryError::Parse(
                    "expected an array or an object with a \"shelters\" array".to_string(),
                ));
            }
        },
        _ => {
            return Err(DirectoryError::Parse(
                "expected an array or an object with a \"shelters\" array".to_string(),
            ));
        }
    };

    Ok(items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item).unwrap_or_else(|e| {
                log::debug!("Unreadable shelter document at {}: {}", index, e);
                ShelterDocument::default()
            })
        })
        .collect())
}
