/// Meta model loading and inference errors.
#[derive(Debug, thiserror::Error)]
pub enum MetaError {
    #[error("meta model shape mismatch: {what} expected {expected}, got {actual}")]
    ShapeMismatch {
        what: String,
        expected: usize,
        actual: usize,
    },

    #[error("meta model input width mismatch: expected {expected}, got {actual}")]
    InputWidthMismatch { expected: usize, actual: usize },

    #[error("meta model has no base models in its training order")]
    EmptyModelOrder,

    #[error("meta model lists base model {model_id} more than once")]
    DuplicateModel { model_id: String },

    #[error("meta model contains non-finite parameter at {location}")]
    NonFiniteParameter { location: String },

    #[error("meta model artifact could not be read: {path}: {reason}")]
    ArtifactUnreadable { path: String, reason: String },

    #[error("meta model artifact parse failed: {0}")]
    Parse(#[from] serde_json::Error),
}
