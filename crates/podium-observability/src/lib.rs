//! # podium-observability
//!
//! Structured tracing with span definitions and event types, plus degradation
//! event tracking for ensemble results that did not take the full path.

pub mod degradation;
pub mod tracing_setup;

pub use degradation::{DegradationEvent, DegradationTracker, RecoveryStatus, TrackedDegradation};
