//! Record every degradation event: component, failure mode, fallback used, timestamp, recovery status.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use podium_core::constants::{COMPONENT_ENSEMBLE, COMPONENT_META};
use podium_core::{EnsembleResult, EnsembleState};
use serde::{Deserialize, Serialize};

/// One request that resolved below the full ensemble path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DegradationEvent {
    pub component: String,
    pub failure: String,
    pub fallback_used: String,
    pub state: EnsembleState,
    pub timestamp: DateTime<Utc>,
}

impl DegradationEvent {
    /// Describe a degraded result. Returns `None` for a full ensemble.
    pub fn from_result(result: &EnsembleResult) -> Option<Self> {
        let (component, failure) = match result.state {
            EnsembleState::FullEnsemble => return None,
            EnsembleState::PartialEnsemble => (COMPONENT_META, "meta layer absent or skipped"),
            EnsembleState::SingleModel => (COMPONENT_ENSEMBLE, "only one model available"),
            EnsembleState::HeuristicFallback => (COMPONENT_ENSEMBLE, "no model available"),
        };
        Some(Self {
            component: component.to_string(),
            failure: failure.to_string(),
            fallback_used: result.state.as_str().to_string(),
            state: result.state,
            timestamp: Utc::now(),
        })
    }
}

/// Recovery status of a degradation event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecoveryStatus {
    /// Still in degraded mode.
    Active,
    /// Recovered to normal operation.
    Recovered,
}

/// A tracked degradation event with recovery status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackedDegradation {
    pub event: DegradationEvent,
    pub recovery_status: RecoveryStatus,
    pub recovered_at: Option<DateTime<Utc>>,
}

/// Caller-owned log of degraded ensemble results.
#[derive(Debug, Clone, Default)]
pub struct DegradationTracker {
    events: Vec<TrackedDegradation>,
}

impl DegradationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one ensemble result.
    ///
    /// Degraded results are recorded; a full ensemble marks every active
    /// degradation as recovered. Returns true if an event was recorded.
    pub fn record_result(&mut self, result: &EnsembleResult) -> bool {
        match DegradationEvent::from_result(result) {
            Some(event) => {
                self.record(event);
                true
            }
            None => {
                self.mark_all_recovered();
                false
            }
        }
    }

    /// Record a new degradation event.
    pub fn record(&mut self, event: DegradationEvent) {
        crate::tracing_setup::events::degradation_triggered(
            &event.component,
            &event.failure,
            &event.fallback_used,
        );
        self.events.push(TrackedDegradation {
            event,
            recovery_status: RecoveryStatus::Active,
            recovered_at: None,
        });
    }

    /// Mark every active degradation of `component` as recovered.
    pub fn mark_recovered(&mut self, component: &str) {
        let now = Utc::now();
        for tracked in self.events.iter_mut() {
            if tracked.event.component == component
                && tracked.recovery_status == RecoveryStatus::Active
            {
                tracked.recovery_status = RecoveryStatus::Recovered;
                tracked.recovered_at = Some(now);
            }
        }
    }

    fn mark_all_recovered(&mut self) {
        let now = Utc::now();
        for tracked in self
            .events
            .iter_mut()
            .filter(|t| t.recovery_status == RecoveryStatus::Active)
        {
            tracked.recovery_status = RecoveryStatus::Recovered;
            tracked.recovered_at = Some(now);
        }
    }

    pub fn events(&self) -> &[TrackedDegradation] {
        &self.events
    }

    /// Get active (unrecovered) degradations.
    pub fn active_degradations(&self) -> Vec<&TrackedDegradation> {
        self.events
            .iter()
            .filter(|t| t.recovery_status == RecoveryStatus::Active)
            .collect()
    }

    /// Number of recorded events per ensemble state.
    pub fn count_by_state(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for tracked in &self.events {
            *counts.entry(tracked.event.state.as_str()).or_insert(0) += 1;
        }
        counts
    }

    /// Count events in the last N seconds for a given component.
    pub fn count_recent(&self, component: &str, window_secs: i64) -> usize {
        let cutoff = Utc::now() - chrono::Duration::seconds(window_secs);
        self.events
            .iter()
            .filter(|t| t.event.component == component && t.event.timestamp > cutoff)
            .count()
    }

    /// Count events in the last N seconds across all components.
    pub fn count_all_recent(&self, window_secs: i64) -> usize {
        let cutoff = Utc::now() - chrono::Duration::seconds(window_secs);
        self.events
            .iter()
            .filter(|t| t.event.timestamp > cutoff)
            .count()
    }

    /// Duration a component has been continuously degraded, or None if not degraded.
    pub fn degraded_duration(&self, component: &str) -> Option<chrono::Duration> {
        let earliest = self
            .events
            .iter()
            .filter(|t| {
                t.event.component == component && t.recovery_status == RecoveryStatus::Active
            })
            .map(|t| t.event.timestamp)
            .min()?;
        Some(Utc::now() - earliest)
    }
}
