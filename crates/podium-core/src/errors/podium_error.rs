use super::{
    AdapterError, ConfigError, DistributionError, FeatureError, MetaError, SnapshotError,
};

/// Top-level error for the Podium workspace.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum PodiumError {
    #[error("invalid feature vector: {0}")]
    InvalidFeatures(#[from] FeatureError),

    #[error("distribution error: {0}")]
    Distribution(#[from] DistributionError),

    #[error("model unavailable: {0}")]
    ModelUnavailable(#[from] AdapterError),

    #[error("performance snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error("meta model error: {0}")]
    Meta(#[from] MetaError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Convenience alias used throughout the workspace.
pub type PodiumResult<T> = Result<T, PodiumError>;
