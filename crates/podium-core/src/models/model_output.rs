use serde::{Deserialize, Serialize};

use crate::errors::{AdapterError, DistributionError};

use super::Distribution;

/// Unvalidated output of a base model, as produced by its adapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPrediction {
    /// `(participant id, score)` pairs. Scores need not sum to 1.0.
    pub probabilities: Vec<(u8, f64)>,
    /// The model's own confidence in this prediction, nominally in [0, 1].
    pub self_confidence: f64,
}

impl RawPrediction {
    pub fn new(probabilities: Vec<(u8, f64)>, self_confidence: f64) -> Self {
        Self {
            probabilities,
            self_confidence,
        }
    }
}

/// A validated, normalized prediction from one base model for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelOutput {
    pub model_id: String,
    pub distribution: Distribution,
    /// Clamped to [0, 1].
    pub self_confidence: f64,
}

impl ModelOutput {
    /// Create a model output. Non-finite confidence is malformed; finite
    /// confidence outside [0, 1] is clamped.
    pub fn new(
        model_id: impl Into<String>,
        distribution: Distribution,
        self_confidence: f64,
    ) -> Result<Self, AdapterError> {
        let model_id = model_id.into();
        if !self_confidence.is_finite() {
            return Err(AdapterError::Malformed {
                model_id,
                reason: format!("self confidence {self_confidence} is not finite"),
            });
        }
        Ok(Self {
            model_id,
            distribution,
            self_confidence: self_confidence.clamp(0.0, 1.0),
        })
    }

    /// Validate and renormalize a raw prediction.
    pub fn from_raw(model_id: &str, raw: RawPrediction) -> Result<Self, AdapterError> {
        let distribution = Distribution::from_raw(&raw.probabilities).map_err(|e| match e {
            DistributionError::InvalidParticipant { .. }
            | DistributionError::DuplicateParticipant { .. } => AdapterError::Malformed {
                model_id: model_id.to_string(),
                reason: e.to_string(),
            },
            other => AdapterError::InvalidDistribution {
                model_id: model_id.to_string(),
                source: other,
            },
        })?;
        Self::new(model_id, distribution, raw.self_confidence)
    }
}
