use serde::{Deserialize, Serialize};

use super::defaults;

/// Agreement bonus: `min(cap, max(0, base - variance_scale * avg_variance))`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgreementConfig {
    pub cap: f64,
    pub base: f64,
    pub variance_scale: f64,
}

impl Default for AgreementConfig {
    fn default() -> Self {
        Self {
            cap: defaults::DEFAULT_AGREEMENT_CAP,
            base: defaults::DEFAULT_AGREEMENT_BASE,
            variance_scale: defaults::DEFAULT_AGREEMENT_VARIANCE_SCALE,
        }
    }
}
