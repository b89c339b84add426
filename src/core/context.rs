//! Per-run application context
//!
//! Everything a run needs is built once from configuration and passed explicitly to
//! the exporter and the reset orchestrator.

use super::directory::SecretaryDirectory;
use super::notify::{EscalationPolicy, Notifier};
use crate::adapters::mail::{create_transport, MessageComposer, MessageTransport};
use crate::adapters::templates::{HandlebarsRenderer, TemplateRenderer};
use crate::config::AppConfig;
use crate::domain::{BuildingCode, Recipient, Result, RosterError, Username};
use chrono::{Days, Local, NaiveDate};
use std::sync::Arc;

/// Canned identity used for every reset in test mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestIdentity {
    /// Username handed to the reset tool
    pub username: Username,
    /// Building the reset is reported for
    pub building: BuildingCode,
}

/// Configuration and collaborators for one run
pub struct AppContext {
    /// Loaded configuration
    pub config: AppConfig,

    /// The only path to the transport
    pub notifier: Notifier,

    /// Building -> secretary lookup
    pub directory: SecretaryDirectory,

    /// Set when running with `--testing`
    pub testing: Option<TestIdentity>,

    /// Date the export folder is named after
    pub run_date: NaiveDate,
}

impl AppContext {
    /// Builds the context with the transport selected by configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the transport, sender or templates cannot be
    /// set up, or the test identity is invalid.
    pub fn from_config(config: AppConfig, testing: bool) -> Result<Self> {
        let transport = create_transport(&config)?;
        let renderer = HandlebarsRenderer::from_dir(&config.general.templates_dir)?;
        Self::with_collaborators(config, testing, Arc::new(renderer), transport)
    }

    /// Builds the context around the given renderer and transport
    pub fn with_collaborators(
        config: AppConfig,
        testing: bool,
        renderer: Arc<dyn TemplateRenderer>,
        transport: Arc<dyn MessageTransport>,
    ) -> Result<Self> {
        let composer = MessageComposer::new(&config.admin.service_account_email)?;
        let policy = EscalationPolicy::from_config(&config, testing);
        let notifier = Notifier::new(composer, renderer, transport, policy);

        let directory = SecretaryDirectory::new(
            config.building_secretaries.clone(),
            Recipient::parse(config.admin.admin_email()),
        );

        let testing = if testing {
            Some(TestIdentity {
                username: Username::new(config.testing.username.as_str())
                    .map_err(|e| RosterError::Configuration(format!("testing.username: {e}")))?,
                building: config
                    .testing
                    .building_code()
                    .map_err(RosterError::Configuration)?,
            })
        } else {
            None
        };

        let run_date = run_date(config.general.days_back);

        Ok(Self {
            config,
            notifier,
            directory,
            testing,
            run_date,
        })
    }

    /// Overrides the run date
    pub fn with_run_date(mut self, run_date: NaiveDate) -> Self {
        self.run_date = run_date;
        self
    }

    /// Whether the run is in test mode
    pub fn is_testing(&self) -> bool {
        self.testing.is_some()
    }

    /// Run date formatted for folder names and email text
    pub fn date_label(&self) -> String {
        self.run_date
            .format(&self.config.general.date_format)
            .to_string()
    }
}

fn run_date(days_back: u64) -> NaiveDate {
    let today = Local::now().date_naive();
    today.checked_sub_days(Days::new(days_back)).unwrap_or(today)
}
