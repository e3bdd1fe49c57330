use serde::{Deserialize, Serialize};

use super::defaults;

/// Weighting, adapter scheduling, and meta stacking configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnsembleConfig {
    /// Sharpness `k` in `exp(k * cv_mean_score)`. Higher lets strong models dominate.
    pub weight_sharpness: f64,
    /// Score assumed for models missing from the performance snapshot.
    pub neutral_score: f64,
    /// Per-adapter timeout; a slower adapter is treated as unavailable.
    pub adapter_timeout_ms: u64,
    /// Minimum contributing models before the meta layer is attempted.
    pub min_models_for_meta: usize,
    /// Share of the meta distribution in the final blend (the rest is the weighted aggregate).
    pub meta_distribution_weight: f64,
}

impl Default for EnsembleConfig {
    fn default() -> Self {
        Self {
            weight_sharpness: defaults::DEFAULT_WEIGHT_SHARPNESS,
            neutral_score: defaults::DEFAULT_NEUTRAL_SCORE,
            adapter_timeout_ms: defaults::DEFAULT_ADAPTER_TIMEOUT_MS,
            min_models_for_meta: defaults::DEFAULT_MIN_MODELS_FOR_META,
            meta_distribution_weight: defaults::DEFAULT_META_DISTRIBUTION_WEIGHT,
        }
    }
}
