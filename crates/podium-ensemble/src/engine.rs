//! EnsembleEngine: runs adapters concurrently and resolves one result per request.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::time::Duration;

use podium_core::config::PodiumConfig;
use podium_core::errors::{AdapterError, ConfigError, PodiumResult};
use podium_core::models::{
    Distribution, EnsembleResult, EnsembleState, FeatureVector, ModelOutput, PerformanceSnapshot,
};
use podium_core::traits::{IMetaModel, IModelAdapter};
use podium_observability::tracing_setup::events;
use tokio::task::JoinSet;
use tracing::Instrument;

use crate::aggregator::DynamicAggregator;
use crate::agreement::AgreementScorer;
use crate::calibrator::ConfidenceCalibrator;
use crate::fallback::FallbackController;
use crate::heuristic::HeuristicFallback;
use crate::meta::{MetaSkipReason, MetaStacker};

/// Coordinates adapters, aggregation, agreement, meta stacking, calibration
/// and fallback.
///
/// Holds configuration only. Adapters and the performance snapshot are passed
/// per call, so one engine serves any number of concurrent requests.
#[derive(Debug, Clone)]
pub struct EnsembleEngine {
    aggregator: DynamicAggregator,
    agreement: AgreementScorer,
    calibrator: ConfidenceCalibrator,
    fallback: FallbackController,
    heuristic: HeuristicFallback,
    meta: MetaStacker,
    adapter_timeout: Duration,
    meta_distribution_weight: f64,
}

impl EnsembleEngine {
    /// Build an engine from a validated configuration.
    pub fn new(config: PodiumConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid_config(&config))
    }

    fn from_valid_config(config: &PodiumConfig) -> Self {
        Self {
            aggregator: DynamicAggregator::from_config(&config.ensemble),
            agreement: AgreementScorer::from_config(&config.agreement),
            calibrator: ConfidenceCalibrator::from_config(&config.calibration),
            fallback: FallbackController::from_config(&config.ensemble),
            heuristic: HeuristicFallback::from_config(&config.fallback),
            meta: MetaStacker::untrained(),
            adapter_timeout: Duration::from_millis(config.ensemble.adapter_timeout_ms),
            meta_distribution_weight: config.ensemble.meta_distribution_weight,
        }
    }

    /// Attach a trained meta model. It runs once `ensemble.min_models_for_meta`
    /// outputs are available.
    pub fn with_meta_model(mut self, model: Arc<dyn IMetaModel>) -> Self {
        self.meta = MetaStacker::new(model, self.fallback.min_models_for_meta());
        self
    }

    pub fn meta_stacker(&self) -> &MetaStacker {
        &self.meta
    }

    pub fn adapter_timeout(&self) -> Duration {
        self.adapter_timeout
    }

    /// Predict one race.
    ///
    /// Only a structurally invalid feature vector is an error. Failing,
    /// hanging, or panicking adapters are excluded and the result degrades.
    /// Dropping the returned future aborts all in-flight adapter tasks.
    pub async fn predict(
        &self,
        features: &FeatureVector,
        adapters: &[Arc<dyn IModelAdapter>],
        snapshot: &PerformanceSnapshot,
    ) -> PodiumResult<EnsembleResult> {
        features.validate()?;

        let request_id = uuid::Uuid::new_v4();
        let span = podium_observability::ensemble_span!(request_id, adapters.len());

        async {
            let outputs = self.collect_outputs(features, adapters).await;
            self.resolve(features, outputs, snapshot)
        }
        .instrument(span)
        .await
    }

    /// Query every adapter concurrently, each under the per-call timeout.
    ///
    /// Successful outputs are returned in adapter order. Later adapters that
    /// repeat an earlier model id are not invoked. An output naming a
    /// participant that is not in `features` is malformed.
    pub async fn collect_outputs(
        &self,
        features: &FeatureVector,
        adapters: &[Arc<dyn IModelAdapter>],
    ) -> Vec<ModelOutput> {
        let features = Arc::new(features.clone());
        let timeout = self.adapter_timeout;
        let timeout_ms = timeout.as_millis() as u64;

        let mut slots: Vec<Option<Result<ModelOutput, AdapterError>>> =
            (0..adapters.len()).map(|_| None).collect();
        let mut seen = BTreeSet::new();
        let mut tasks = JoinSet::new();

        for (idx, adapter) in adapters.iter().enumerate() {
            let model_id = adapter.model_id().to_string();
            if !seen.insert(model_id.clone()) {
                slots[idx] = Some(Err(AdapterError::Duplicate { model_id }));
                continue;
            }

            let span = podium_observability::adapter_span!(model_id);
            let adapter = Arc::clone(adapter);
            let features = Arc::clone(&features);
            tasks.spawn(
                async move {
                    let call = tokio::task::spawn_blocking(move || {
                        adapter
                            .produce(&features)
                            .and_then(|output| check_participants(&features, output))
                    });
                    let result = match tokio::time::timeout(timeout, call).await {
                        Ok(Ok(result)) => result,
                        Ok(Err(_join_error)) => Err(AdapterError::Panicked {
                            model_id: model_id.clone(),
                        }),
                        Err(_elapsed) => Err(AdapterError::TimedOut {
                            model_id: model_id.clone(),
                            timeout_ms,
                        }),
                    };
                    (idx, result)
                }
                .instrument(span),
            );
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((idx, result)) => slots[idx] = Some(result),
                Err(e) => tracing::warn!("adapter task failed to join: {e}"),
            }
        }

        let mut outputs = Vec::with_capacity(adapters.len());
        for (idx, slot) in slots.into_iter().enumerate() {
            let result = slot.unwrap_or_else(|| {
                Err(AdapterError::Panicked {
                    model_id: adapters[idx].model_id().to_string(),
                })
            });
            match result {
                Ok(output) => outputs.push(output),
                Err(e) => report_unavailable(&e),
            }
        }
        outputs
    }

    /// Combine already-collected outputs into the final result.
    ///
    /// Synchronous and deterministic for a given set of outputs.
    pub fn resolve(
        &self,
        features: &FeatureVector,
        outputs: Vec<ModelOutput>,
        snapshot: &PerformanceSnapshot,
    ) -> PodiumResult<EnsembleResult> {
        if outputs.is_empty() {
            return self.heuristic_result(features);
        }

        let (aggregated, weights) = self.aggregator.aggregate_weighted(&outputs, snapshot)?;
        let agreement_bonus = self.agreement.score(&outputs);

        let meta_distribution = self.run_meta(&outputs);
        let state = self
            .fallback
            .resolve(outputs.len(), meta_distribution.is_some());

        let distribution = match &meta_distribution {
            Some(meta) => meta.blend(&aggregated, self.meta_distribution_weight)?,
            None => aggregated,
        };
        let confidence =
            self.calibrator
                .calibrate(&outputs, agreement_bonus, meta_distribution.as_ref());

        let model_weights: BTreeMap<String, f64> = outputs
            .iter()
            .zip(&weights)
            .map(|(o, w)| (o.model_id.clone(), *w))
            .collect();
        let contributing_models: Vec<String> =
            outputs.into_iter().map(|o| o.model_id).collect();

        let result = EnsembleResult {
            distribution,
            confidence,
            contributing_models,
            meta_used: meta_distribution.is_some(),
            degraded: state.is_degraded(),
            state,
            model_weights,
            agreement_bonus,
        };
        events::ensemble_resolved(
            result.state.as_str(),
            result.contributing_models.len(),
            result.confidence,
            result.meta_used,
        );
        Ok(result)
    }

    fn run_meta(&self, outputs: &[ModelOutput]) -> Option<Distribution> {
        if !self
            .fallback
            .should_attempt_meta(outputs.len(), self.meta.is_trained())
        {
            if self.meta.is_trained() {
                events::meta_skipped(MetaSkipReason::TooFewModels.as_str());
            }
            return None;
        }
        match self.meta.evaluate(outputs) {
            Ok(distribution) => Some(distribution),
            Err(reason) => {
                events::meta_skipped(reason.as_str());
                None
            }
        }
    }

    fn heuristic_result(&self, features: &FeatureVector) -> PodiumResult<EnsembleResult> {
        let distribution = self.heuristic.distribution(features)?;
        let state = EnsembleState::HeuristicFallback;
        events::ensemble_resolved(state.as_str(), 0, self.heuristic.confidence(), false);
        Ok(EnsembleResult {
            distribution,
            confidence: self.heuristic.confidence(),
            contributing_models: Vec::new(),
            meta_used: false,
            degraded: true,
            state,
            model_weights: BTreeMap::new(),
            agreement_bonus: 0.0,
        })
    }
}

impl Default for EnsembleEngine {
    fn default() -> Self {
        Self::from_valid_config(&PodiumConfig::default())
    }
}

fn check_participants(
    features: &FeatureVector,
    output: ModelOutput,
) -> Result<ModelOutput, AdapterError> {
    let racing = features.participant_ids();
    let outsider = output
        .distribution
        .participants()
        .find(|p| !racing.contains(p));
    match outsider {
        Some(outsider) => Err(AdapterError::Malformed {
            model_id: output.model_id,
            reason: format!("participant {outsider} is not in the race"),
        }),
        None => Ok(output),
    }
}

fn report_unavailable(error: &AdapterError) {
    if let AdapterError::InvalidDistribution { model_id, source } = error {
        events::distribution_rejected(model_id, &source.to_string());
    }
    events::model_unavailable(error.model_id(), error.kind(), &error.to_string());
}
