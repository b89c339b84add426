//! External system integrations for roster-notify.
//!
//! - [`mail`] - Message composition and transports (Gmail API, dry run)
//! - [`templates`] - Handlebars email templates
//! - [`reset_tool`] - The external credential reset process
//!
//! # Design Pattern
//!
//! Each external collaborator sits behind a trait ([`mail::MessageTransport`],
//! [`templates::TemplateRenderer`], [`reset_tool::ResetTool`]) so the core pipeline
//! can be exercised with in-memory doubles.

pub mod mail;
pub mod reset_tool;
pub mod templates;
