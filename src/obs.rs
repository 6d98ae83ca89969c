//! Optional observability helpers for gate checks.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to run each check inside a span named `backoffice_gate.check` (with the
//!   request `path` field) and to log denials and authority failures. Tokens only ever appear as
//!   fingerprints.
//! - Enable `metrics` to increment the `backoffice_gate_decision_total` counter for every
//!   verdict, labeled by `verdict` + `basis`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;
