/// Errors building a performance snapshot from externally supplied records.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("record for model {model_id}: cv_mean_score {value} is outside [0, 1]")]
    MeanOutOfRange { model_id: String, value: f64 },

    #[error("record for model {model_id}: cv_std_score {value} must be finite and >= 0")]
    InvalidSpread { model_id: String, value: f64 },

    #[error("record has an empty model id")]
    EmptyModelId,

    #[error("snapshot parse failed: {0}")]
    Parse(#[from] serde_json::Error),
}
