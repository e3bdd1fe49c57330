use serde::{Deserialize, Serialize};

use super::defaults;

/// Bounds and blend weight for the final confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationConfig {
    pub min_confidence: f64,
    pub max_confidence: f64,
    /// Share of the meta distribution's top probability when folding it into base confidence.
    pub meta_confidence_weight: f64,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            min_confidence: defaults::DEFAULT_MIN_CONFIDENCE,
            max_confidence: defaults::DEFAULT_MAX_CONFIDENCE,
            meta_confidence_weight: defaults::DEFAULT_META_CONFIDENCE_WEIGHT,
        }
    }
}
