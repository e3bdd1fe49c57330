use serde::{Deserialize, Serialize};

use super::defaults;

/// Heuristic fallback used when no model produced an output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackConfig {
    /// Fixed confidence reported for heuristic results.
    pub heuristic_confidence: f64,
    /// Per-participant feature field read as raw strength.
    pub strength_field: String,
    /// Per-lane prior (lane 1 first) used when no strength values are usable.
    pub lane_prior: Vec<f64>,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            heuristic_confidence: defaults::DEFAULT_HEURISTIC_CONFIDENCE,
            strength_field: defaults::DEFAULT_STRENGTH_FIELD.to_string(),
            lane_prior: defaults::DEFAULT_LANE_PRIOR.to_vec(),
        }
    }
}
