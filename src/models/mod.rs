//! Domain and display models
//!
//! Domain types describe shelters and coordinates as the resolver sees them;
//! display types convert them into CLI-friendly rows.

pub mod display;
pub mod geo;
pub mod shelter;

pub use geo::GeoCoordinates;
pub use shelter::{ContactInfo, ResolutionSource, ResolvedShelter, ShelterRecord, ShelterStatus};
