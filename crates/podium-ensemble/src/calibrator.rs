//! ConfidenceCalibrator: one bounded confidence per request.

use podium_core::config::CalibrationConfig;
use podium_core::models::{Distribution, ModelOutput};

/// Folds mean base confidence, the agreement bonus and the meta layer's
/// peak probability into a confidence within `[min_confidence, max_confidence]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfidenceCalibrator {
    min_confidence: f64,
    max_confidence: f64,
    meta_confidence_weight: f64,
}

impl ConfidenceCalibrator {
    pub fn new(min_confidence: f64, max_confidence: f64, meta_confidence_weight: f64) -> Self {
        Self {
            min_confidence,
            max_confidence,
            meta_confidence_weight,
        }
    }

    pub fn from_config(config: &CalibrationConfig) -> Self {
        Self::new(
            config.min_confidence,
            config.max_confidence,
            config.meta_confidence_weight,
        )
    }

    pub fn min_confidence(&self) -> f64 {
        self.min_confidence
    }

    pub fn max_confidence(&self) -> f64 {
        self.max_confidence
    }

    pub fn calibrate(
        &self,
        outputs: &[ModelOutput],
        agreement_bonus: f64,
        meta_distribution: Option<&Distribution>,
    ) -> f64 {
        let mut base = if outputs.is_empty() {
            0.0
        } else {
            outputs.iter().map(|o| o.self_confidence).sum::<f64>() / outputs.len() as f64
        };
        if let Some(meta) = meta_distribution {
            let w = self.meta_confidence_weight;
            base = (1.0 - w) * base + w * meta.max_probability();
        }
        self.bound(base + agreement_bonus)
    }

    /// Clamp into the configured bounds. Non-finite input maps to the floor.
    pub fn bound(&self, confidence: f64) -> f64 {
        if !confidence.is_finite() {
            return self.min_confidence;
        }
        confidence.min(self.max_confidence).max(self.min_confidence)
    }
}

impl Default for ConfidenceCalibrator {
    fn default() -> Self {
        Self::from_config(&CalibrationConfig::default())
    }
}
