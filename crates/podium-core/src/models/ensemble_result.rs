use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::{Distribution, ParticipantId};

/// Which aggregation path produced a result. Evaluated once per request in
/// declaration order; the first state whose condition holds wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnsembleState {
    /// Two or more models and the meta layer succeeded.
    FullEnsemble,
    /// Two or more models; meta layer absent, skipped, or failed.
    PartialEnsemble,
    /// Exactly one model succeeded.
    SingleModel,
    /// No model succeeded; distribution derived from raw features.
    HeuristicFallback,
}

impl EnsembleState {
    pub const ALL: [EnsembleState; 4] = [
        Self::FullEnsemble,
        Self::PartialEnsemble,
        Self::SingleModel,
        Self::HeuristicFallback,
    ];

    /// Every state other than `FullEnsemble` is degraded.
    pub fn is_degraded(self) -> bool {
        self != Self::FullEnsemble
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::FullEnsemble => "full_ensemble",
            Self::PartialEnsemble => "partial_ensemble",
            Self::SingleModel => "single_model",
            Self::HeuristicFallback => "heuristic_fallback",
        }
    }
}

impl fmt::Display for EnsembleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single artifact returned for a prediction request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnsembleResult {
    pub distribution: Distribution,
    /// Calibrated confidence, within the configured `[min, max]` bounds.
    pub confidence: f64,
    /// Models whose outputs were aggregated, in adapter order.
    pub contributing_models: Vec<String>,
    pub meta_used: bool,
    pub degraded: bool,
    pub state: EnsembleState,
    /// Normalized aggregation weight per contributing model.
    pub model_weights: BTreeMap<String, f64>,
    pub agreement_bonus: f64,
}

impl EnsembleResult {
    pub fn top_pick(&self) -> Option<ParticipantId> {
        self.distribution.top_pick()
    }

    pub fn ranked(&self) -> Vec<(ParticipantId, f64)> {
        self.distribution.ranked()
    }
}
