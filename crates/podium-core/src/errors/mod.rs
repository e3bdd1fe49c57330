//! Error handling for Podium.
//! One error enum per subsystem, `thiserror` only.

pub mod adapter_error;
pub mod config_error;
pub mod distribution_error;
pub mod feature_error;
pub mod meta_error;
pub mod podium_error;
pub mod snapshot_error;

pub use adapter_error::AdapterError;
pub use config_error::ConfigError;
pub use distribution_error::DistributionError;
pub use feature_error::FeatureError;
pub use meta_error::MetaError;
pub use podium_error::{PodiumError, PodiumResult};
pub use snapshot_error::SnapshotError;
