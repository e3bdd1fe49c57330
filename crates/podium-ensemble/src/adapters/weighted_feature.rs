//! Linear scoring over named per-participant features.

use podium_core::constants::PARTICIPANT_COUNT;
use podium_core::errors::AdapterError;
use podium_core::models::{FeatureVector, RawPrediction};
use podium_core::traits::IModelAdapter;

/// Scores each participant as `Σ weight_f · value_f + lane_prior[lane]`.
///
/// Negative scores are floored at zero. Every configured field must be
/// present for every participant, otherwise the adapter fails for the
/// request. Self-confidence is the top raw score clamped to `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedFeatureAdapter {
    model_id: String,
    field_weights: Vec<(String, f64)>,
    lane_prior: Option<[f64; PARTICIPANT_COUNT]>,
}

impl WeightedFeatureAdapter {
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            field_weights: Vec::new(),
            lane_prior: None,
        }
    }

    pub fn with_field(mut self, field: impl Into<String>, weight: f64) -> Self {
        self.field_weights.push((field.into(), weight));
        self
    }

    pub fn with_lane_prior(mut self, prior: [f64; PARTICIPANT_COUNT]) -> Self {
        self.lane_prior = Some(prior);
        self
    }

    fn score(&self, features: &FeatureVector) -> Result<Vec<(u8, f64)>, AdapterError> {
        let mut scores = Vec::with_capacity(features.participants.len());
        for entry in &features.participants {
            let mut score = self
                .lane_prior
                .map(|prior| prior[entry.participant.index()])
                .unwrap_or(0.0);
            for (field, weight) in &self.field_weights {
                let value = entry.value(field).ok_or_else(|| AdapterError::Failed {
                    model_id: self.model_id.clone(),
                    reason: format!(
                        "participant {} is missing feature '{field}'",
                        entry.participant
                    ),
                })?;
                score += weight * value;
            }
            scores.push((entry.participant.get(), score));
        }
        Ok(scores)
    }
}

impl IModelAdapter for WeightedFeatureAdapter {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn produce_distribution(&self, features: &FeatureVector) -> Result<RawPrediction, AdapterError> {
        let scores = self.score(features)?;
        let top = scores
            .iter()
            .map(|(_, s)| *s)
            .fold(f64::NEG_INFINITY, f64::max);
        let self_confidence = if top.is_finite() { top.clamp(0.0, 1.0) } else { 0.0 };
        let probabilities = scores
            .into_iter()
            .map(|(id, s)| (id, if s.is_finite() { s.max(0.0) } else { s }))
            .collect();
        Ok(RawPrediction::new(probabilities, self_confidence))
    }
}
