//! Performance-derived model weights.
//!
//! `weight_raw(m) = exp(k * cv_mean(m))`, with the neutral score standing in
//! for models that have no record. Weights are normalized to sum to 1.0; if
//! the raw sum is zero or not finite every model gets `1/N`.

use podium_core::models::{ModelOutput, PerformanceSnapshot};

/// Unnormalized weight for one model.
pub fn raw_weight(
    model_id: &str,
    snapshot: &PerformanceSnapshot,
    sharpness: f64,
    neutral_score: f64,
) -> f64 {
    let score = snapshot.cv_mean_score(model_id).unwrap_or(neutral_score);
    (sharpness * score).exp()
}

/// Normalized weights aligned with `outputs`.
pub fn compute_weights(
    outputs: &[ModelOutput],
    snapshot: &PerformanceSnapshot,
    sharpness: f64,
    neutral_score: f64,
) -> Vec<f64> {
    if outputs.is_empty() {
        return Vec::new();
    }
    let raw: Vec<f64> = outputs
        .iter()
        .map(|o| raw_weight(&o.model_id, snapshot, sharpness, neutral_score))
        .collect();
    let total: f64 = raw.iter().sum();
    if !total.is_finite() || total <= 0.0 {
        let uniform = 1.0 / outputs.len() as f64;
        return vec![uniform; outputs.len()];
    }
    raw.into_iter().map(|w| w / total).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use podium_core::models::{Distribution, PerformanceRecord};

    fn output(id: &str) -> ModelOutput {
        ModelOutput::new(id, Distribution::from_raw(&[(1, 1.0)]).unwrap(), 0.5).unwrap()
    }

    #[test]
    fn missing_record_uses_neutral_score() {
        let snapshot = PerformanceSnapshot::empty();
        let w = raw_weight("ghost", &snapshot, 3.0, 0.5);
        assert!((w - 1.5f64.exp()).abs() < 1e-12);
    }

    #[test]
    fn weights_sum_to_one() {
        let snapshot = PerformanceSnapshot::from_records(vec![
            PerformanceRecord::new("a", 0.9, 0.01, Utc::now()),
            PerformanceRecord::new("b", 0.2, 0.05, Utc::now()),
        ])
        .unwrap();
        let weights = compute_weights(&[output("a"), output("b"), output("c")], &snapshot, 3.0, 0.5);
        assert_eq!(weights.len(), 3);
        assert!((weights.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert!(weights[0] > weights[2] && weights[2] > weights[1]);
    }

    #[test]
    fn overflowing_weights_fall_back_to_uniform() {
        let snapshot = PerformanceSnapshot::from_records(vec![
            PerformanceRecord::new("a", 1.0, 0.0, Utc::now()),
            PerformanceRecord::new("b", 1.0, 0.0, Utc::now()),
        ])
        .unwrap();
        let weights = compute_weights(&[output("a"), output("b")], &snapshot, 1e6, 0.5);
        assert_eq!(weights, vec![0.5, 0.5]);
    }

    #[test]
    fn no_outputs_no_weights() {
        assert!(compute_weights(&[], &PerformanceSnapshot::empty(), 3.0, 0.5).is_empty());
    }
}
