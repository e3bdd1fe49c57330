//! # podium-core
//!
//! Foundation crate for the Podium race-prediction ensemble.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::PodiumConfig;
pub use errors::{PodiumError, PodiumResult};
pub use models::{
    Distribution, EnsembleResult, EnsembleState, FeatureVector, ModelOutput, ParticipantId,
    PerformanceRecord, PerformanceSnapshot,
};
