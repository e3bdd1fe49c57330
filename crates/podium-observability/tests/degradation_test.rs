//! Tests for degradation tracking and tracing setup.

use std::collections::BTreeMap;

use chrono::Utc;
use podium_core::constants::{COMPONENT_ENSEMBLE, COMPONENT_META};
use podium_core::models::{Distribution, EnsembleResult, EnsembleState};
use podium_observability::degradation::{DegradationEvent, DegradationTracker, RecoveryStatus};
use podium_observability::tracing_setup;

fn result(state: EnsembleState) -> EnsembleResult {
    EnsembleResult {
        distribution: Distribution::from_raw(&[(1, 0.6), (2, 0.4)]).unwrap(),
        confidence: 0.5,
        contributing_models: vec!["a".into()],
        meta_used: state == EnsembleState::FullEnsemble,
        degraded: state.is_degraded(),
        state,
        model_weights: BTreeMap::new(),
        agreement_bonus: 0.0,
    }
}

#[test]
fn full_ensemble_is_not_recorded() {
    let mut tracker = DegradationTracker::new();
    assert!(!tracker.record_result(&result(EnsembleState::FullEnsemble)));
    assert!(tracker.events().is_empty());
}

#[test]
fn degraded_results_are_recorded_with_component() {
    let mut tracker = DegradationTracker::new();
    assert!(tracker.record_result(&result(EnsembleState::PartialEnsemble)));
    assert!(tracker.record_result(&result(EnsembleState::SingleModel)));
    assert!(tracker.record_result(&result(EnsembleState::HeuristicFallback)));

    let events = tracker.events();
    assert_eq!(events.len(), 3);
    assert_eq!(events[0].event.component, COMPONENT_META);
    assert_eq!(events[1].event.component, COMPONENT_ENSEMBLE);
    assert_eq!(events[2].event.fallback_used, "heuristic_fallback");
    assert_eq!(tracker.active_degradations().len(), 3);
}

#[test]
fn count_by_state_groups_events() {
    let mut tracker = DegradationTracker::new();
    tracker.record_result(&result(EnsembleState::SingleModel));
    tracker.record_result(&result(EnsembleState::SingleModel));
    tracker.record_result(&result(EnsembleState::HeuristicFallback));

    let counts = tracker.count_by_state();
    assert_eq!(counts.get("single_model"), Some(&2));
    assert_eq!(counts.get("heuristic_fallback"), Some(&1));
    assert_eq!(counts.get("partial_ensemble"), None);
}

#[test]
fn full_ensemble_marks_active_events_recovered() {
    let mut tracker = DegradationTracker::new();
    tracker.record_result(&result(EnsembleState::PartialEnsemble));
    tracker.record_result(&result(EnsembleState::SingleModel));
    tracker.record_result(&result(EnsembleState::FullEnsemble));

    assert!(tracker.active_degradations().is_empty());
    for tracked in tracker.events() {
        assert_eq!(tracked.recovery_status, RecoveryStatus::Recovered);
        assert!(tracked.recovered_at.is_some());
    }
}

#[test]
fn mark_recovered_only_touches_component() {
    let mut tracker = DegradationTracker::new();
    tracker.record_result(&result(EnsembleState::PartialEnsemble));
    tracker.record_result(&result(EnsembleState::HeuristicFallback));

    tracker.mark_recovered(COMPONENT_META);
    let active = tracker.active_degradations();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].event.component, COMPONENT_ENSEMBLE);
    assert!(tracker.degraded_duration(COMPONENT_META).is_none());
    assert!(tracker.degraded_duration(COMPONENT_ENSEMBLE).is_some());
}

#[test]
fn recent_counts_respect_window() {
    let mut tracker = DegradationTracker::new();
    tracker.record(DegradationEvent {
        component: COMPONENT_ENSEMBLE.to_string(),
        failure: "no model available".to_string(),
        fallback_used: "heuristic_fallback".to_string(),
        state: EnsembleState::HeuristicFallback,
        timestamp: Utc::now() - chrono::Duration::hours(2),
    });
    tracker.record_result(&result(EnsembleState::SingleModel));

    assert_eq!(tracker.count_recent(COMPONENT_ENSEMBLE, 3600), 1);
    assert_eq!(tracker.count_all_recent(3600), 1);
    assert_eq!(tracker.count_all_recent(3 * 3600), 2);
}

#[test]
fn event_serializes_state_and_timestamp() {
    let event = DegradationEvent::from_result(&result(EnsembleState::SingleModel)).unwrap();
    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["state"], "SINGLE_MODEL");
    assert_eq!(json["fallback_used"], "single_model");
    assert!(json["timestamp"].is_string());
}

#[test]
fn init_tracing_is_idempotent() {
    tracing_setup::init_tracing_with_filter("podium=debug");
    tracing_setup::init_tracing();
    tracing_setup::events::meta_skipped("not_trained");
}
