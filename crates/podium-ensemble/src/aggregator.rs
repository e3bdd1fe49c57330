//! DynamicAggregator: performance-weighted blend of base distributions.

use std::collections::BTreeMap;

use podium_core::config::EnsembleConfig;
use podium_core::errors::DistributionError;
use podium_core::models::{Distribution, ModelOutput, ParticipantId, PerformanceSnapshot};

use crate::weighting;

/// Combines N model distributions into one.
///
/// For each participant reported by at least one model:
/// `aggregated(p) = Σ w(m)·dist_m(p) / Σ w(m)·[p ∈ dist_m]`, then the whole
/// result is renormalized. Models that did not report a participant neither
/// add to nor dilute its probability.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicAggregator {
    weight_sharpness: f64,
    neutral_score: f64,
}

impl DynamicAggregator {
    pub fn new(weight_sharpness: f64, neutral_score: f64) -> Self {
        Self {
            weight_sharpness,
            neutral_score,
        }
    }

    pub fn from_config(config: &EnsembleConfig) -> Self {
        Self::new(config.weight_sharpness, config.neutral_score)
    }

    /// Normalized weights aligned with `outputs`.
    pub fn weights(&self, outputs: &[ModelOutput], snapshot: &PerformanceSnapshot) -> Vec<f64> {
        weighting::compute_weights(outputs, snapshot, self.weight_sharpness, self.neutral_score)
    }

    pub fn aggregate(
        &self,
        outputs: &[ModelOutput],
        snapshot: &PerformanceSnapshot,
    ) -> Result<Distribution, DistributionError> {
        self.aggregate_weighted(outputs, snapshot)
            .map(|(distribution, _)| distribution)
    }

    /// Aggregate and also return the weights that were applied.
    pub fn aggregate_weighted(
        &self,
        outputs: &[ModelOutput],
        snapshot: &PerformanceSnapshot,
    ) -> Result<(Distribution, Vec<f64>), DistributionError> {
        if outputs.is_empty() {
            return Err(DistributionError::Empty);
        }
        let weights = self.weights(outputs, snapshot);

        // (weighted probability sum, weight of models reporting p)
        let mut sums: BTreeMap<ParticipantId, (f64, f64)> = BTreeMap::new();
        for (output, weight) in outputs.iter().zip(&weights) {
            for (participant, probability) in output.distribution.iter() {
                let entry = sums.entry(participant).or_insert((0.0, 0.0));
                entry.0 += weight * probability;
                entry.1 += weight;
            }
        }

        let scores = sums.into_iter().map(|(participant, (mass, coverage))| {
            let value = if coverage > 0.0 { mass / coverage } else { 0.0 };
            (participant, value)
        });
        let distribution = Distribution::from_scores(scores)?;
        Ok((distribution, weights))
    }
}

impl Default for DynamicAggregator {
    fn default() -> Self {
        Self::from_config(&EnsembleConfig::default())
    }
}
