//! Span definitions per operation.

/// Create a span around one prediction request.
#[macro_export]
macro_rules! ensemble_span {
    ($request_id:expr, $adapters:expr) => {
        tracing::info_span!("podium.ensemble", request_id = %$request_id, adapters = $adapters)
    };
}

/// Create a span around a single adapter invocation.
#[macro_export]
macro_rules! adapter_span {
    ($model_id:expr) => {
        tracing::debug_span!("podium.adapter", model_id = %$model_id)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const ENSEMBLE: &str = "podium.ensemble";
    pub const ADAPTER: &str = "podium.adapter";
}
