//! Display model implementations for table and JSON output
//!
//! Display models transform shelters and cache entries into CLI-friendly rows
//! with appropriate column names and serialization.

mod cache;
mod common;
mod resolved;
mod shelter;

pub use cache::CacheEntryDisplay;
pub use resolved::{AddressResolutionDisplay, ResolvedShelterDisplay};
pub use shelter::ShelterDisplay;
