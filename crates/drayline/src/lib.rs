//! Driver-job eligibility checks for drayage dispatch.
//!
//! The [`eligibility`] module holds the rule engine; the remaining modules
//! carry the configuration, logging, and error plumbing shared with the API
//! service.

pub mod clock;
pub mod config;
pub mod eligibility;
pub mod error;
pub mod roster;
pub mod telemetry;
