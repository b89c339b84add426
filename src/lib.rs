// roster-notify - New student exports and password resets for building secretaries
// Licensed under the MIT License

//! # roster-notify
//!
//! roster-notify is a scheduled batch job for a school district. It runs in one of
//! two modes:
//!
//! - **Batch export** (default): reads the daily file of newly created student
//!   accounts, writes one CSV per building, and emails each building secretary a
//!   summary with that building's file attached.
//! - **Password reset** (`--reset-password`): runs the external reset tool for one
//!   account and emails the new credentials to the building secretary.
//!
//! Every failure ends up in the log, in an escalation email to the operator, or in a
//! non-zero exit code. Nothing is dropped silently.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (export, reset, notification, escalation)
//! - [`adapters`] - External integrations (Gmail API, templates, reset tool)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use roster_notify::config::load_config;
//! use roster_notify::core::context::AppContext;
//! use roster_notify::core::export::BatchExporter;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("config/roster-notify.toml")?;
//!     let ctx = AppContext::from_config(config, false)?;
//!
//!     let outcome = BatchExporter::new(&ctx).run_scheduled().await?;
//!     println!("{outcome:?}");
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Fallible library calls return [`domain::Result`], whose error is
//! [`domain::RosterError`]. Notifications never fail with an error; they return a
//! [`domain::NotificationOutcome`].
//!
//! ## Logging
//!
//! roster-notify uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use roster_notify::log_critical;
//!
//! tracing::info!(building = "Delhi Middle School", count = 4, "Exported students");
//! log_critical!("No recipient provided, skipping notification");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
