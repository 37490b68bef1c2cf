//! Identifier types and wire payloads shared by the activity inventory crates.
//!
//! Nothing here talks to the platform; the service traits live in
//! `activity-horizon`.

pub mod constants;
pub mod error;
pub mod ids;
pub mod request;
pub mod types;
pub mod version;

// Re-export primary types for convenience.
pub use error::ProtocolError;
pub use ids::{ApplicationId, UserIdentity};
pub use request::PlayHistoryRequest;
pub use types::{InstalledRecord, InventoryItem, PlayedTitles};
pub use version::PlatformVersion;
