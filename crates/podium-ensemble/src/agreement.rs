//! AgreementScorer: confidence bonus from how closely base models agree.

use std::collections::BTreeMap;

use podium_core::config::AgreementConfig;
use podium_core::models::{ModelOutput, ParticipantId};

/// Turns the spread of per-participant probabilities into a bonus in `[0, cap]`.
///
/// Per participant, the population variance is taken over the models that
/// reported it; participants reported by fewer than two models are skipped.
/// `bonus = min(cap, max(0, base - variance_scale * mean_variance))`.
#[derive(Debug, Clone, PartialEq)]
pub struct AgreementScorer {
    cap: f64,
    base: f64,
    variance_scale: f64,
}

impl AgreementScorer {
    pub fn new(cap: f64, base: f64, variance_scale: f64) -> Self {
        Self {
            cap,
            base,
            variance_scale,
        }
    }

    pub fn from_config(config: &AgreementConfig) -> Self {
        Self::new(config.cap, config.base, config.variance_scale)
    }

    /// Mean per-participant population variance, or `None` when no
    /// participant was reported by at least two models.
    pub fn average_variance(&self, outputs: &[ModelOutput]) -> Option<f64> {
        let mut reports: BTreeMap<ParticipantId, Vec<f64>> = BTreeMap::new();
        for output in outputs {
            for (participant, probability) in output.distribution.iter() {
                reports.entry(participant).or_default().push(probability);
            }
        }

        let variances: Vec<f64> = reports
            .values()
            .filter(|values| values.len() >= 2)
            .map(|values| population_variance(values))
            .collect();
        if variances.is_empty() {
            return None;
        }
        Some(variances.iter().sum::<f64>() / variances.len() as f64)
    }

    pub fn score(&self, outputs: &[ModelOutput]) -> f64 {
        let Some(avg_variance) = self.average_variance(outputs) else {
            return 0.0;
        };
        let raw = (self.base - self.variance_scale * avg_variance).max(0.0);
        let bonus = raw.min(self.cap);
        if bonus.is_finite() {
            bonus
        } else {
            0.0
        }
    }
}

impl Default for AgreementScorer {
    fn default() -> Self {
        Self::from_config(&AgreementConfig::default())
    }
}

fn population_variance(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n
}
