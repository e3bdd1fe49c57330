use std::collections::BTreeMap;

use chrono::Utc;
use podium_core::constants::{DISTRIBUTION_TOLERANCE, WEIGHT_SUM_TOLERANCE};
use podium_core::models::{
    Distribution, FeatureVector, ModelOutput, ParticipantFeatures, ParticipantId,
    PerformanceRecord, PerformanceSnapshot,
};
use podium_core::EnsembleState;
use podium_ensemble::{AgreementScorer, ConfidenceCalibrator, DynamicAggregator, EnsembleEngine};
use proptest::prelude::*;

fn arb_distribution() -> impl Strategy<Value = Distribution> {
    proptest::collection::btree_map(1u8..=6, 0.01f64..1.0, 1..=6).prop_map(|m: BTreeMap<u8, f64>| {
        Distribution::from_scores(
            m.into_iter()
                .map(|(id, v)| (ParticipantId::new(id).unwrap(), v)),
        )
        .unwrap()
    })
}

fn arb_outputs() -> impl Strategy<Value = Vec<ModelOutput>> {
    proptest::collection::vec((arb_distribution(), 0.0f64..=1.0), 1..6).prop_map(|items| {
        items
            .into_iter()
            .enumerate()
            .map(|(i, (d, c))| ModelOutput::new(format!("model_{i}"), d, c).unwrap())
            .collect()
    })
}

fn arb_snapshot() -> impl Strategy<Value = PerformanceSnapshot> {
    proptest::collection::vec(proptest::option::of(0.0f64..=1.0), 6).prop_map(|scores| {
        let records = scores.into_iter().enumerate().filter_map(|(i, s)| {
            s.map(|s| PerformanceRecord::new(format!("model_{i}"), s, 0.01, Utc::now()))
        });
        PerformanceSnapshot::from_records(records).unwrap()
    })
}

proptest! {
    #[test]
    fn weights_sum_to_one(outputs in arb_outputs(), snapshot in arb_snapshot(), k in 0.1f64..10.0) {
        let agg = DynamicAggregator::new(k, 0.5);
        let weights = agg.weights(&outputs, &snapshot);
        prop_assert_eq!(weights.len(), outputs.len());
        prop_assert!((weights.iter().sum::<f64>() - 1.0).abs() <= WEIGHT_SUM_TOLERANCE);
    }

    #[test]
    fn aggregate_is_normalized_and_deterministic(outputs in arb_outputs(), snapshot in arb_snapshot()) {
        let agg = DynamicAggregator::default();
        let first = agg.aggregate(&outputs, &snapshot).unwrap();
        let second = agg.aggregate(&outputs, &snapshot).unwrap();
        prop_assert!((first.total() - 1.0).abs() <= DISTRIBUTION_TOLERANCE);
        prop_assert!(first.iter().all(|(_, v)| v >= 0.0));
        prop_assert_eq!(
            first.to_array().map(f64::to_bits),
            second.to_array().map(f64::to_bits)
        );
    }

    #[test]
    fn agreement_bonus_within_cap(outputs in arb_outputs()) {
        let bonus = AgreementScorer::default().score(&outputs);
        prop_assert!((0.0..=0.15).contains(&bonus));
    }

    #[test]
    fn confidence_within_bounds(
        outputs in arb_outputs(),
        bonus in 0.0f64..=0.15,
        meta in proptest::option::of(arb_distribution()),
    ) {
        let c = ConfidenceCalibrator::default().calibrate(&outputs, bonus, meta.as_ref());
        prop_assert!((0.30..=0.98).contains(&c));
    }

    #[test]
    fn resolve_state_matches_output_count(outputs in proptest::collection::vec(arb_distribution(), 0..4)) {
        let engine = EnsembleEngine::default();
        let features = FeatureVector::new(
            ParticipantId::ALL.iter().map(|p| ParticipantFeatures::new(*p)).collect(),
        );
        let outputs: Vec<ModelOutput> = outputs
            .into_iter()
            .enumerate()
            .map(|(i, d)| ModelOutput::new(format!("m{i}"), d, 0.5).unwrap())
            .collect();
        let n = outputs.len();
        let result = engine.resolve(&features, outputs, &PerformanceSnapshot::empty()).unwrap();
        prop_assert_eq!(result.contributing_models.len(), n);
        prop_assert!(result.degraded);
        prop_assert!((0.30..=0.98).contains(&result.confidence));
        match n {
            0 => prop_assert_eq!(result.state, EnsembleState::HeuristicFallback),
            1 => prop_assert_eq!(result.state, EnsembleState::SingleModel),
            _ => prop_assert_eq!(result.state, EnsembleState::PartialEnsemble),
        }
    }
}
