//! Structured log events for the ensemble pipeline.
//!
//! Each function emits a `tracing` event with structured fields.

/// Log an adapter that produced no usable output for this request.
pub fn model_unavailable(model_id: &str, kind: &str, reason: &str) {
    tracing::debug!(
        event = "model_unavailable",
        model_id = %model_id,
        kind = %kind,
        reason = %reason,
        "model unavailable"
    );
}

/// Log a distribution that failed validation.
pub fn distribution_rejected(model_id: &str, reason: &str) {
    tracing::debug!(
        event = "distribution_rejected",
        model_id = %model_id,
        reason = %reason,
        "distribution rejected"
    );
}

/// Log a skipped meta layer.
pub fn meta_skipped(reason: &str) {
    tracing::debug!(event = "meta_skipped", reason = %reason, "meta layer skipped");
}

/// Log the final state of a prediction request.
pub fn ensemble_resolved(state: &str, contributing: usize, confidence: f64, meta_used: bool) {
    tracing::debug!(
        event = "ensemble_resolved",
        state = %state,
        contributing = contributing,
        confidence = confidence,
        meta_used = meta_used,
        "ensemble resolved"
    );
}

/// Log a degradation trigger event.
pub fn degradation_triggered(component: &str, failure: &str, fallback: &str) {
    tracing::warn!(
        event = "degradation_triggered",
        component = %component,
        failure = %failure,
        fallback = %fallback,
        "degradation triggered"
    );
}
