//! FallbackController: selects the aggregation path for a request.

use podium_core::config::EnsembleConfig;
use podium_core::models::EnsembleState;

/// Decides which stages may run given how many base models succeeded.
///
/// States are checked in order and the first satisfied one wins:
/// full ensemble, partial ensemble, single model, heuristic fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallbackController {
    min_models_for_meta: usize,
}

impl FallbackController {
    pub fn new(min_models_for_meta: usize) -> Self {
        Self {
            min_models_for_meta: min_models_for_meta.max(2),
        }
    }

    pub fn from_config(config: &EnsembleConfig) -> Self {
        Self::new(config.min_models_for_meta)
    }

    pub fn min_models_for_meta(&self) -> usize {
        self.min_models_for_meta
    }

    /// Whether the meta layer should be consulted at all.
    pub fn should_attempt_meta(&self, valid_outputs: usize, meta_trained: bool) -> bool {
        meta_trained && valid_outputs >= self.min_models_for_meta
    }

    pub fn resolve(&self, valid_outputs: usize, meta_succeeded: bool) -> EnsembleState {
        match valid_outputs {
            0 => EnsembleState::HeuristicFallback,
            1 => EnsembleState::SingleModel,
            n if meta_succeeded && n >= self.min_models_for_meta => EnsembleState::FullEnsemble,
            _ => EnsembleState::PartialEnsemble,
        }
    }
}

impl Default for FallbackController {
    fn default() -> Self {
        Self::from_config(&EnsembleConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_table() {
        let fc = FallbackController::default();
        assert_eq!(fc.resolve(0, false), EnsembleState::HeuristicFallback);
        assert_eq!(fc.resolve(0, true), EnsembleState::HeuristicFallback);
        assert_eq!(fc.resolve(1, true), EnsembleState::SingleModel);
        assert_eq!(fc.resolve(2, false), EnsembleState::PartialEnsemble);
        assert_eq!(fc.resolve(2, true), EnsembleState::FullEnsemble);
        assert_eq!(fc.resolve(5, true), EnsembleState::FullEnsemble);
    }

    #[test]
    fn meta_needs_training_and_enough_models() {
        let fc = FallbackController::default();
        assert!(!fc.should_attempt_meta(3, false));
        assert!(!fc.should_attempt_meta(1, true));
        assert!(fc.should_attempt_meta(2, true));

        let strict = FallbackController::new(3);
        assert!(!strict.should_attempt_meta(2, true));
        assert_eq!(strict.resolve(2, true), EnsembleState::PartialEnsemble);
    }
}
