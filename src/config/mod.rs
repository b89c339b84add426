//! Configuration management for roster-notify.
//!
//! # Overview
//!
//! roster-notify uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `ROSTER_<SECTION>_<KEY>` environment overrides
//! - Default values for optional settings
//! - Validation on load
//!
//! # Example Configuration
//!
//! ```toml
//! [general]
//! data_folder = "D:/exports/students"
//! csv_file_headers = "First Name,Last Name,Student ID,Username,School Name,Grade"
//!
//! [admin]
//! service_account_email = "notify@district.org"
//! sysadmin = "ops@district.org"
//! admin_email = "techcoord@district.org"
//!
//! [building_secretaries]
//! "Oak Hills High School" = "hs.office@district.org, hs.counselor@district.org"
//!
//! [gmail]
//! client_id = "1234.apps.googleusercontent.com"
//! client_secret = "${GMAIL_CLIENT_SECRET}"
//! refresh_token = "${GMAIL_REFRESH_TOKEN}"
//! ```
//!
//! Secrets are held in [`secrecy::SecretString`], zeroized on drop and redacted in
//! Debug output.

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    AdminConfig, AppConfig, ApplicationConfig, GeneralConfig, GmailConfig, LogType,
    LoggingConfig, NotificationsConfig, ResetConfig, TestingConfig, TransportConfig,
    TransportProvider,
};
