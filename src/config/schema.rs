//! Configuration schema types
//!
//! This module defines the configuration structure for roster-notify.

use crate::domain::BuildingCode;
use chrono::format::{Item, StrftimeItems};
use indexmap::IndexMap;
use secrecy::SecretString;
use serde::Deserialize;

/// Main roster-notify configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Data locations and record file layout
    #[serde(default)]
    pub general: GeneralConfig,

    /// Sender, operator and administrator addresses
    pub admin: AdminConfig,

    /// Building display name -> one or more comma-separated secretary addresses
    #[serde(default)]
    pub building_secretaries: IndexMap<String, String>,

    /// Message transport selection
    #[serde(default)]
    pub transport: TransportConfig,

    /// Gmail API settings (required when transport.provider = "gmail")
    #[serde(default)]
    pub gmail: Option<GmailConfig>,

    /// External credential reset tool
    #[serde(default)]
    pub reset: ResetConfig,

    /// Sandbox locations and canned identities for --testing
    #[serde(default)]
    pub testing: TestingConfig,

    /// Escalation policy switches
    #[serde(default)]
    pub notifications: NotificationsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Validates the configuration
    ///
    /// Batch-only settings (`general.data_folder`, `general.csv_file_headers`) are
    /// optional here and checked when the batch export starts, so a reset run does
    /// not depend on them.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.general.validate()?;
        self.admin.validate()?;

        if self.transport.provider == TransportProvider::Gmail && !self.application.dry_run {
            match &self.gmail {
                Some(gmail) => gmail.validate()?,
                None => {
                    return Err(
                        "gmail configuration is required when transport.provider = 'gmail'"
                            .to_string(),
                    )
                }
            }
        }

        self.reset.validate()?;
        self.testing.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Whether messages should only be logged, not sent
    pub fn is_dry_run(&self) -> bool {
        self.application.dry_run || self.transport.provider == TransportProvider::DryRun
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error, critical)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Dry run mode (log messages instead of sending them)
    #[serde(default)]
    pub dry_run: bool,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dry_run: false,
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = [
            "trace", "debug", "info", "warn", "warning", "error", "critical",
        ];
        if !valid_levels.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// Data locations and record file layout
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Root folder holding one sub-folder per export date
    #[serde(default)]
    pub data_folder: Option<String>,

    /// Comma-separated output column list
    #[serde(default)]
    pub csv_file_headers: Option<String>,

    /// Name of the daily record file inside the date folder
    #[serde(default = "default_source_file_name")]
    pub source_file_name: String,

    /// Column holding the building display name
    #[serde(default = "default_building_column")]
    pub building_column: String,

    /// Directory with email templates overriding the built-in ones
    #[serde(default = "default_templates_dir")]
    pub templates_dir: String,

    /// chrono format for the date folder name
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// How many days back the export date lies (1 = yesterday)
    #[serde(default = "default_days_back")]
    pub days_back: u64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_folder: None,
            csv_file_headers: None,
            source_file_name: default_source_file_name(),
            building_column: default_building_column(),
            templates_dir: default_templates_dir(),
            date_format: default_date_format(),
            days_back: default_days_back(),
        }
    }
}

impl GeneralConfig {
    fn validate(&self) -> Result<(), String> {
        if self.source_file_name.trim().is_empty() {
            return Err("general.source_file_name cannot be empty".to_string());
        }
        if self.building_column.trim().is_empty() {
            return Err("general.building_column cannot be empty".to_string());
        }
        if self.date_format.trim().is_empty() {
            return Err("general.date_format cannot be empty".to_string());
        }
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(format!(
                "general.date_format '{}' is not a valid strftime format",
                self.date_format
            ));
        }
        Ok(())
    }

    /// Configured data folder, ignoring blank values
    pub fn data_folder(&self) -> Option<&str> {
        self.data_folder
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Parsed output columns; `None` when unset or blank
    pub fn headers(&self) -> Option<Vec<String>> {
        let headers: Vec<String> = self
            .csv_file_headers
            .as_deref()?
            .split(',')
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty())
            .collect();

        if headers.is_empty() {
            None
        } else {
            Some(headers)
        }
    }
}

/// Sender, operator and administrator addresses
#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    /// Address messages are sent from
    pub service_account_email: String,

    /// System operator receiving escalations (also cc in test mode)
    pub sysadmin: String,

    /// District administrator; falls back to `sysadmin`
    #[serde(default)]
    pub admin_email: Option<String>,
}

impl AdminConfig {
    fn validate(&self) -> Result<(), String> {
        if !self.service_account_email.contains('@') {
            return Err(format!(
                "admin.service_account_email '{}' is not an email address",
                self.service_account_email
            ));
        }
        if self.sysadmin.trim().is_empty() {
            return Err("admin.sysadmin cannot be empty".to_string());
        }
        Ok(())
    }

    /// Administrator address, or the operator when none is configured
    pub fn admin_email(&self) -> &str {
        self.admin_email
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(&self.sysadmin)
    }
}

/// Available message transports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TransportProvider {
    /// Gmail REST API
    #[default]
    Gmail,
    /// Log messages without sending
    DryRun,
}

/// Message transport selection
#[derive(Debug, Clone, Deserialize, Default)]
pub struct TransportConfig {
    /// Provider used to send messages
    #[serde(default)]
    pub provider: TransportProvider,
}

/// Gmail API settings
#[derive(Debug, Clone, Deserialize)]
pub struct GmailConfig {
    /// API root
    #[serde(default = "default_gmail_api_base_url")]
    pub api_base_url: String,

    /// OAuth token endpoint
    #[serde(default = "default_gmail_token_url")]
    pub token_url: String,

    /// Mailbox the message is sent as
    #[serde(default = "default_gmail_user_id")]
    pub user_id: String,

    /// OAuth client id
    #[serde(default)]
    pub client_id: Option<String>,

    /// OAuth client secret
    #[serde(default)]
    pub client_secret: Option<SecretString>,

    /// Long-lived refresh token
    #[serde(default)]
    pub refresh_token: Option<SecretString>,

    /// Pre-issued access token, used as-is when set
    #[serde(default)]
    pub access_token: Option<SecretString>,

    /// HTTP timeout
    #[serde(default = "default_gmail_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for GmailConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_gmail_api_base_url(),
            token_url: default_gmail_token_url(),
            user_id: default_gmail_user_id(),
            client_id: None,
            client_secret: None,
            refresh_token: None,
            access_token: None,
            timeout_seconds: default_gmail_timeout_seconds(),
        }
    }
}

impl GmailConfig {
    fn validate(&self) -> Result<(), String> {
        if self.access_token.is_none()
            && (self.client_id.is_none()
                || self.client_secret.is_none()
                || self.refresh_token.is_none())
        {
            return Err(
                "gmail requires either access_token or client_id, client_secret and refresh_token"
                    .to_string(),
            );
        }
        if self.timeout_seconds == 0 {
            return Err("gmail.timeout_seconds must be > 0".to_string());
        }
        Ok(())
    }
}

/// External credential reset tool
#[derive(Debug, Clone, Deserialize)]
pub struct ResetConfig {
    /// Executable to run
    #[serde(default = "default_reset_command")]
    pub command: String,

    /// Arguments placed before `-username <username>`
    #[serde(default = "default_reset_args")]
    pub args: Vec<String>,

    /// Upper bound on the tool's run time
    #[serde(default = "default_reset_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for ResetConfig {
    fn default() -> Self {
        Self {
            command: default_reset_command(),
            args: default_reset_args(),
            timeout_seconds: default_reset_timeout_seconds(),
        }
    }
}

impl ResetConfig {
    fn validate(&self) -> Result<(), String> {
        if self.command.trim().is_empty() {
            return Err("reset.command cannot be empty".to_string());
        }
        if self.timeout_seconds == 0 {
            return Err("reset.timeout_seconds must be > 0".to_string());
        }
        Ok(())
    }
}

/// Sandbox locations and canned identities for --testing
#[derive(Debug, Clone, Deserialize)]
pub struct TestingConfig {
    /// Folder holding the sample record file; date folders are created inside it
    #[serde(default = "default_sample_folder")]
    pub sample_folder: String,

    /// Username substituted for every reset in test mode
    #[serde(default = "default_test_username")]
    pub username: String,

    /// Building code substituted for every reset in test mode
    #[serde(default = "default_test_building")]
    pub building: String,
}

impl Default for TestingConfig {
    fn default() -> Self {
        Self {
            sample_folder: default_sample_folder(),
            username: default_test_username(),
            building: default_test_building(),
        }
    }
}

impl TestingConfig {
    fn validate(&self) -> Result<(), String> {
        self.building_code()?;
        crate::domain::Username::new(self.username.as_str())
            .map_err(|e| format!("testing.username: {e}"))?;
        Ok(())
    }

    /// Canned building code
    pub fn building_code(&self) -> Result<BuildingCode, String> {
        self.building
            .parse()
            .map_err(|e| format!("testing.building: {e}"))
    }
}

/// Escalation policy switches
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationsConfig {
    /// Escalate failed secretary-facing sends to the operator
    #[serde(default = "default_true")]
    pub escalate_transport_failures: bool,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            escalate_transport_failures: true,
        }
    }
}

/// Where log output goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogType {
    /// Standard output
    Console,
    /// Rolling log file
    #[default]
    File,
}

impl std::str::FromStr for LogType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "console" => Ok(LogType::Console),
            "file" => Ok(LogType::File),
            other => Err(format!(
                "Invalid log type '{other}'. Must be one of: console, file"
            )),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Console or file output
    #[serde(default)]
    pub log_type: LogType,

    /// Directory for log files
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log file name (prefix when rotating)
    #[serde(default = "default_log_file_name")]
    pub file_name: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,

    /// Write JSON lines instead of text
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_type: LogType::default(),
            local_path: default_local_path(),
            file_name: default_log_file_name(),
            local_rotation: default_local_rotation(),
            json: false,
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        if self.log_type == LogType::File && self.file_name.trim().is_empty() {
            return Err("logging.file_name cannot be empty when log_type = 'file'".to_string());
        }
        Ok(())
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_source_file_name() -> String {
    "StudentCreated.csv".to_string()
}

fn default_building_column() -> String {
    "School Name".to_string()
}

fn default_templates_dir() -> String {
    "templates".to_string()
}

fn default_date_format() -> String {
    "%m-%d-%Y".to_string()
}

fn default_days_back() -> u64 {
    1
}

fn default_gmail_api_base_url() -> String {
    "https://gmail.googleapis.com".to_string()
}

fn default_gmail_token_url() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

fn default_gmail_user_id() -> String {
    "me".to_string()
}

fn default_gmail_timeout_seconds() -> u64 {
    30
}

fn default_reset_command() -> String {
    "powershell.exe".to_string()
}

fn default_reset_args() -> Vec<String> {
    ["-ExecutionPolicy", "Bypass", "-File", "lib/reset_password.ps1"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_reset_timeout_seconds() -> u64 {
    120
}

fn default_sample_folder() -> String {
    "config/sample_student_data".to_string()
}

fn default_test_username() -> String {
    "test.student".to_string()
}

fn default_test_building() -> String {
    "OHHS".to_string()
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_log_file_name() -> String {
    "roster-notify.log".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> AppConfig {
        toml::from_str(
            r#"
[admin]
service_account_email = "notify@district.org"
sysadmin = "ops@district.org"

[transport]
provider = "dry-run"
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_minimal_config_defaults() {
        let config = minimal();
        assert!(config.validate().is_ok());
        assert_eq!(config.general.source_file_name, "StudentCreated.csv");
        assert_eq!(config.general.building_column, "School Name");
        assert_eq!(config.general.days_back, 1);
        assert_eq!(config.reset.timeout_seconds, 120);
        assert!(config.notifications.escalate_transport_failures);
        assert!(config.is_dry_run());
        assert!(config.general.data_folder().is_none());
    }

    #[test]
    fn test_admin_email_falls_back_to_sysadmin() {
        let mut config = minimal();
        assert_eq!(config.admin.admin_email(), "ops@district.org");

        config.admin.admin_email = Some("  ".to_string());
        assert_eq!(config.admin.admin_email(), "ops@district.org");

        config.admin.admin_email = Some("tech@district.org".to_string());
        assert_eq!(config.admin.admin_email(), "tech@district.org");
    }

    #[test]
    fn test_headers_parsing() {
        let mut general = GeneralConfig {
            csv_file_headers: Some("First Name, Last Name ,,Username".to_string()),
            ..Default::default()
        };
        assert_eq!(
            general.headers().unwrap(),
            vec!["First Name", "Last Name", "Username"]
        );

        general.csv_file_headers = Some(" , ".to_string());
        assert!(general.headers().is_none());
    }

    #[test]
    fn test_gmail_required_unless_dry_run() {
        let mut config = minimal();
        config.transport.provider = TransportProvider::Gmail;
        assert!(config.validate().is_err());

        config.application.dry_run = true;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_gmail_needs_credentials() {
        let gmail = GmailConfig::default();
        assert!(gmail.validate().is_err());

        let gmail = GmailConfig {
            access_token: Some(SecretString::new("ya29.token".to_string())),
            ..Default::default()
        };
        assert!(gmail.validate().is_ok());
    }

    #[test]
    fn test_invalid_testing_building() {
        let mut config = minimal();
        config.testing.building = "ZZZ".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.contains("testing.building"));
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = minimal();
        config.application.log_level = "verbose".to_string();
        assert!(config.validate().is_err());

        config.application.log_level = "CRITICAL".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_date_format() {
        let mut config = minimal();
        config.general.date_format = "%m-%Q".to_string();
        assert!(config.validate().unwrap_err().contains("date_format"));
    }

    #[test]
    fn test_log_type_from_str() {
        assert_eq!("Console".parse::<LogType>().unwrap(), LogType::Console);
        assert_eq!("FILE".parse::<LogType>().unwrap(), LogType::File);
        assert!("syslog".parse::<LogType>().is_err());
    }
}
