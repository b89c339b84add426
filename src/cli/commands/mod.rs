//! CLI command implementations
//!
//! This module contains the batch export and password reset commands.

pub mod export;
pub mod reset;
