//! Core business logic for roster-notify.
//!
//! # Modules
//!
//! - [`context`] - Per-run configuration and collaborators
//! - [`directory`] - Building secretary lookup
//! - [`notify`] - The notifier and escalation policy
//! - [`export`] - Daily batch export by building
//! - [`reset`] - On-demand credential resets
//!
//! # Example
//!
//! ```rust,no_run
//! use roster_notify::config::load_config;
//! use roster_notify::core::context::AppContext;
//! use roster_notify::core::export::{BatchExporter, ExportOutcome};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("config/roster-notify.toml")?;
//! let ctx = AppContext::from_config(config, false)?;
//!
//! if let ExportOutcome::Completed(summary) = BatchExporter::new(&ctx).run_scheduled().await? {
//!     println!("{summary}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod context;
pub mod directory;
pub mod export;
pub mod notify;
pub mod reset;
