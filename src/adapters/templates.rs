//! Email template rendering
//!
//! Templates are Handlebars HTML documents addressed by file name. Built-in copies are
//! compiled into the binary; a file of the same name in the configured templates
//! directory replaces the built-in one.

use crate::domain::notification::{
    BATCH_SUMMARY_TEMPLATE, ESCALATION_TEMPLATE, RESET_SUCCESS_TEMPLATE,
};
use crate::domain::{Result, RosterError};
use handlebars::Handlebars;
use serde_json::Value;
use std::path::Path;

const DEFAULT_TEMPLATES: [(&str, &str); 3] = [
    (
        BATCH_SUMMARY_TEMPLATE,
        include_str!("../../templates/new_students_email_template.html"),
    ),
    (
        RESET_SUCCESS_TEMPLATE,
        include_str!("../../templates/password_reset_email_template.html"),
    ),
    (
        ESCALATION_TEMPLATE,
        include_str!("../../templates/error_notification_template.html"),
    ),
];

/// Renders a named template with a data mapping
pub trait TemplateRenderer: Send + Sync {
    /// Renders `name` with `data`
    ///
    /// # Errors
    ///
    /// Returns a template error if the template is unknown or rendering fails.
    fn render(&self, name: &str, data: &Value) -> Result<String>;
}

/// Handlebars-backed renderer
pub struct HandlebarsRenderer {
    registry: Handlebars<'static>,
}

impl HandlebarsRenderer {
    /// Renderer with only the built-in templates
    pub fn with_defaults() -> Result<Self> {
        let mut registry = Handlebars::new();
        for (name, source) in DEFAULT_TEMPLATES {
            registry
                .register_template_string(name, source)
                .map_err(|e| RosterError::Template(format!("built-in template {name}: {e}")))?;
        }
        Ok(Self { registry })
    }

    /// Renderer with built-in templates overridden by files found in `dir`
    ///
    /// A missing directory is not an error; the built-in templates are used.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let mut renderer = Self::with_defaults()?;

        for (name, _) in DEFAULT_TEMPLATES {
            let path = dir.join(name);
            if !path.is_file() {
                continue;
            }
            renderer
                .registry
                .register_template_file(name, &path)
                .map_err(|e| {
                    RosterError::Template(format!("failed to load {}: {e}", path.display()))
                })?;
            tracing::debug!(template = name, path = %path.display(), "Using template override");
        }

        Ok(renderer)
    }

    /// Whether a template of this name is registered
    pub fn has_template(&self, name: &str) -> bool {
        self.registry.has_template(name)
    }
}

impl TemplateRenderer for HandlebarsRenderer {
    fn render(&self, name: &str, data: &Value) -> Result<String> {
        if !self.registry.has_template(name) {
            return Err(RosterError::Template(format!("unknown template '{name}'")));
        }
        self.registry
            .render(name, data)
            .map_err(|e| RosterError::Template(e.to_string()))
    }
}
