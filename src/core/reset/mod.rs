//! On-demand credential resets

pub mod orchestrator;

pub use orchestrator::{CredentialResetOrchestrator, ResetOutcome, ResetReport};
