use super::DistributionError;

/// A model adapter could not contribute to this request.
///
/// Every variant is recovered locally: the model is treated as absent and the
/// request continues with the remaining models.
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    #[error("model {model_id} failed: {reason}")]
    Failed { model_id: String, reason: String },

    #[error("model {model_id} timed out after {timeout_ms} ms")]
    TimedOut { model_id: String, timeout_ms: u64 },

    #[error("model {model_id} returned malformed output: {reason}")]
    Malformed { model_id: String, reason: String },

    #[error("model {model_id} returned an invalid distribution: {source}")]
    InvalidDistribution {
        model_id: String,
        #[source]
        source: DistributionError,
    },

    #[error("model {model_id} panicked during inference")]
    Panicked { model_id: String },

    #[error("model {model_id} is already contributing to this request")]
    Duplicate { model_id: String },
}

impl AdapterError {
    /// The id of the model that became unavailable.
    pub fn model_id(&self) -> &str {
        match self {
            Self::Failed { model_id, .. }
            | Self::TimedOut { model_id, .. }
            | Self::Malformed { model_id, .. }
            | Self::InvalidDistribution { model_id, .. }
            | Self::Panicked { model_id }
            | Self::Duplicate { model_id } => model_id,
        }
    }

    /// Short machine-readable failure kind, used in structured log events.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Failed { .. } => "failed",
            Self::TimedOut { .. } => "timed_out",
            Self::Malformed { .. } => "malformed",
            Self::InvalidDistribution { .. } => "invalid_distribution",
            Self::Panicked { .. } => "panicked",
            Self::Duplicate { .. } => "duplicate",
        }
    }
}
