//! Notification delivery and escalation
//!
//! - [`notifier`] - The single choke point for outgoing mail
//! - [`policy`] - Which failures reach the operator

pub mod notifier;
pub mod policy;

pub use notifier::{Delivery, Notifier};
pub use policy::EscalationPolicy;
