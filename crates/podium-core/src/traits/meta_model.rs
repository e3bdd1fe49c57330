use crate::errors::MetaError;

/// A trained second-stage model that refines concatenated base distributions.
pub trait IMetaModel: Send + Sync {
    /// Base model ids in the order their probabilities were concatenated at training time.
    fn model_order(&self) -> &[String];

    /// Length of the input vector the model was trained on.
    fn input_width(&self) -> usize;

    /// Per-participant scores (one per participant, index = id - 1).
    fn predict_proba(&self, input: &[f64]) -> Result<Vec<f64>, MetaError>;
}
