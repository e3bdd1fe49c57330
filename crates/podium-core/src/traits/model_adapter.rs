use crate::errors::AdapterError;
use crate::models::{FeatureVector, ModelOutput, RawPrediction};

/// Uniform contract for one trained base predictor.
///
/// Implementations must not mutate shared state during inference; the engine
/// may call several adapters concurrently on the same feature vector.
///
/// `produce_distribution` must return in bounded time. A call that outlives
/// the engine's timeout is abandoned, not stopped, and keeps its blocking
/// thread until it returns.
pub trait IModelAdapter: Send + Sync {
    /// Stable identifier used for performance lookup and meta stacking order.
    fn model_id(&self) -> &str;

    /// Run inference and return raw per-participant scores.
    fn produce_distribution(&self, features: &FeatureVector) -> Result<RawPrediction, AdapterError>;

    /// Run inference and return a validated, renormalized output.
    fn produce(&self, features: &FeatureVector) -> Result<ModelOutput, AdapterError> {
        let raw = self.produce_distribution(features)?;
        ModelOutput::from_raw(self.model_id(), raw)
    }
}
