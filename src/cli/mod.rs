//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for roster-notify using clap.
//! Without `--reset-password` the daily batch export runs.

pub mod commands;

use crate::config::{AppConfig, LogType};
use clap::Parser;
use std::path::Path;

/// roster-notify - New student exports and password resets for building secretaries
#[derive(Parser, Debug)]
#[command(name = "roster-notify")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(
        short,
        long,
        default_value = "config/roster-notify.toml",
        env = "ROSTER_CONFIG"
    )]
    pub config: String,

    /// Log level (trace, debug, info, warning, error, critical)
    #[arg(short, long, env = "ROSTER_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Log output (console or file)
    #[arg(long, value_name = "TYPE")]
    pub log_type: Option<LogType>,

    /// Log file path, used when logging to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<String>,

    /// Use the sample data folder and canned reset identity
    #[arg(short, long)]
    pub testing: bool,

    /// Compose messages but do not send them
    #[arg(long)]
    pub dry_run: bool,

    /// Password reset options
    #[command(flatten)]
    pub reset: commands::reset::ResetArgs,
}

impl Cli {
    /// Applies command-line overrides to the loaded configuration
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(level) = &self.log_level {
            config.application.log_level = level.clone();
        }

        if let Some(log_type) = self.log_type {
            config.logging.log_type = log_type;
        }

        if let Some(log_file) = &self.log_file {
            let path = Path::new(log_file);
            if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
                config.logging.local_path = dir.to_string_lossy().into_owned();
            }
            if let Some(name) = path.file_name() {
                config.logging.file_name = name.to_string_lossy().into_owned();
            }
        }

        if self.dry_run {
            config.application.dry_run = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BuildingCode;

    #[test]
    fn test_cli_defaults_to_batch_export() {
        let cli = Cli::parse_from(["roster-notify"]);
        assert_eq!(cli.config, "config/roster-notify.toml");
        assert!(!cli.reset.reset_password);
        assert!(!cli.testing);
    }

    #[test]
    fn test_cli_parse_reset() {
        let cli = Cli::parse_from([
            "roster-notify",
            "--reset-password",
            "--username",
            "jdoe26",
            "--building",
            "dms",
        ]);
        assert!(cli.reset.reset_password);
        assert_eq!(cli.reset.username.unwrap().as_str(), "jdoe26");
        assert_eq!(cli.reset.building, Some(BuildingCode::Dms));
    }

    #[test]
    fn test_cli_reset_requires_username_and_building() {
        assert!(Cli::try_parse_from(["roster-notify", "-r", "-u", "jdoe26"]).is_err());
        assert!(Cli::try_parse_from(["roster-notify", "-r", "-b", "OHHS"]).is_err());
    }

    #[test]
    fn test_cli_rejects_unknown_building() {
        let err =
            Cli::try_parse_from(["roster-notify", "-r", "-u", "jdoe26", "-b", "XYZ"]).unwrap_err();
        assert!(err.to_string().contains("unknown building code"));

        assert!(Cli::try_parse_from(["roster-notify", "-r", "-u", "jdoe26", "-b", "OH1"]).is_err());
    }

    #[test]
    fn test_cli_rejects_flag_like_username() {
        assert!(Cli::try_parse_from([
            "roster-notify",
            "-r",
            "--username=-Force",
            "-b",
            "OHHS"
        ])
        .is_err());
    }

    #[test]
    fn test_cli_username_requires_reset() {
        assert!(Cli::try_parse_from(["roster-notify", "-u", "jdoe26"]).is_err());
    }

    #[test]
    fn test_apply_overrides() {
        let cli = Cli::parse_from([
            "roster-notify",
            "--log-level",
            "debug",
            "--log-type",
            "console",
            "--log-file",
            "/var/log/roster/run.log",
            "--dry-run",
        ]);

        let mut config: AppConfig = toml::from_str(
            r#"
[admin]
service_account_email = "notify@district.org"
sysadmin = "ops@district.org"
"#,
        )
        .unwrap();
        cli.apply_overrides(&mut config);

        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.logging.log_type, LogType::Console);
        assert_eq!(config.logging.local_path, "/var/log/roster");
        assert_eq!(config.logging.file_name, "run.log");
        assert!(config.is_dry_run());
    }
}
