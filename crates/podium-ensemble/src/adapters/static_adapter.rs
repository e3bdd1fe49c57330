use podium_core::errors::AdapterError;
use podium_core::models::{FeatureVector, RawPrediction};
use podium_core::traits::IModelAdapter;

/// Replays a fixed prediction regardless of the features.
///
/// Used for recorded model outputs and in tests.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticAdapter {
    model_id: String,
    prediction: RawPrediction,
}

impl StaticAdapter {
    pub fn new(model_id: impl Into<String>, probabilities: Vec<(u8, f64)>, self_confidence: f64) -> Self {
        Self {
            model_id: model_id.into(),
            prediction: RawPrediction::new(probabilities, self_confidence),
        }
    }
}

impl IModelAdapter for StaticAdapter {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn produce_distribution(&self, _features: &FeatureVector) -> Result<RawPrediction, AdapterError> {
        Ok(self.prediction.clone())
    }
}
