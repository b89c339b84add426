//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::AppConfig;
use crate::domain::errors::RosterError;
use crate::domain::result::Result;
use regex::Regex;
use secrecy::SecretString;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file (an empty file is an error)
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into AppConfig
/// 4. Applies environment variable overrides (ROSTER_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Every failure is reported as [`RosterError::Configuration`].
///
/// # Examples
///
/// ```no_run
/// use roster_notify::config::loader::load_config;
///
/// let config = load_config("config/roster-notify.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(RosterError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        RosterError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    if contents.trim().is_empty() {
        return Err(RosterError::Configuration(format!(
            "Configuration file is empty: {}",
            path.display()
        )));
    }

    let contents = substitute_env_vars(&contents)?;

    let mut config: AppConfig = toml::from_str(&contents)
        .map_err(|e| RosterError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        RosterError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| RosterError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        // Comments keep their placeholders
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(RosterError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using ROSTER_* prefix
///
/// Environment variables follow the pattern: ROSTER_<SECTION>_<KEY>
/// For example: ROSTER_GENERAL_DATA_FOLDER, ROSTER_RESET_TIMEOUT_SECONDS
fn apply_env_overrides(config: &mut AppConfig) {
    // Application overrides
    if let Ok(val) = std::env::var("ROSTER_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("ROSTER_APPLICATION_DRY_RUN") {
        config.application.dry_run = val.parse().unwrap_or(false);
    }

    // General overrides
    if let Ok(val) = std::env::var("ROSTER_GENERAL_DATA_FOLDER") {
        config.general.data_folder = Some(val);
    }
    if let Ok(val) = std::env::var("ROSTER_GENERAL_CSV_FILE_HEADERS") {
        config.general.csv_file_headers = Some(val);
    }
    if let Ok(val) = std::env::var("ROSTER_GENERAL_TEMPLATES_DIR") {
        config.general.templates_dir = val;
    }

    // Admin overrides
    if let Ok(val) = std::env::var("ROSTER_ADMIN_SERVICE_ACCOUNT_EMAIL") {
        config.admin.service_account_email = val;
    }
    if let Ok(val) = std::env::var("ROSTER_ADMIN_SYSADMIN") {
        config.admin.sysadmin = val;
    }
    if let Ok(val) = std::env::var("ROSTER_ADMIN_ADMIN_EMAIL") {
        config.admin.admin_email = Some(val);
    }

    // Gmail overrides (only if Gmail is configured)
    if let Some(ref mut gmail) = config.gmail {
        if let Ok(val) = std::env::var("ROSTER_GMAIL_CLIENT_ID") {
            gmail.client_id = Some(val);
        }
        if let Ok(val) = std::env::var("ROSTER_GMAIL_CLIENT_SECRET") {
            gmail.client_secret = Some(SecretString::new(val));
        }
        if let Ok(val) = std::env::var("ROSTER_GMAIL_REFRESH_TOKEN") {
            gmail.refresh_token = Some(SecretString::new(val));
        }
        if let Ok(val) = std::env::var("ROSTER_GMAIL_ACCESS_TOKEN") {
            gmail.access_token = Some(SecretString::new(val));
        }
    }

    // Reset overrides
    if let Ok(val) = std::env::var("ROSTER_RESET_COMMAND") {
        config.reset.command = val;
    }
    if let Ok(val) = std::env::var("ROSTER_RESET_TIMEOUT_SECONDS") {
        if let Ok(seconds) = val.parse() {
            config.reset.timeout_seconds = seconds;
        }
    }

    // Logging overrides
    if let Ok(val) = std::env::var("ROSTER_LOGGING_LOG_TYPE") {
        if let Ok(log_type) = val.parse() {
            config.logging.log_type = log_type;
        }
    }
    if let Ok(val) = std::env::var("ROSTER_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}
