//! Domain models and types for roster-notify.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Buildings** ([`BuildingCode`]) and export file naming
//! - **Records** ([`Record`], [`BuildingGroup`]) read from the daily export
//! - **Recipients** ([`Recipient`]) normalized from config values
//! - **Notifications** ([`NotificationRequest`], [`NotificationOutcome`], [`EscalationReport`])
//! - **Reset results** ([`ResetResult`]) decoded from the reset tool
//! - **Error types** ([`RosterError`]) and the [`Result`] alias
//!
//! # Type Safety
//!
//! ```rust
//! use roster_notify::domain::{BuildingCode, Username};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let building: BuildingCode = "OHHS".parse()?;
//! assert_eq!(building.display_name(), "Oak Hills High School");
//!
//! let username = Username::new("jdoe26")?;
//! # Ok(())
//! # }
//! ```

pub mod building;
pub mod errors;
pub mod ids;
pub mod notification;
pub mod recipient;
pub mod record;
pub mod reset;
pub mod result;

pub use building::{export_file_name, sanitize_building_name, BuildingCode};
pub use errors::{BuildingCodeError, ResetToolError, RosterError, TransportError};
pub use ids::Username;
pub use notification::{
    AttachmentRef, EscalationReport, FailureReason, FailureSource, NotificationKind,
    NotificationOutcome, NotificationRequest,
};
pub use recipient::Recipient;
pub use record::{group_by_building, BuildingGroup, Record};
pub use reset::{MalformedResetPayload, ResetResult};
pub use result::Result;
