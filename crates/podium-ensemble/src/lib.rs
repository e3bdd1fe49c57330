//! # podium-ensemble
//!
//! Combines per-model probability distributions over race participants into one
//! calibrated prediction.
//!
//! | Stage | Type |
//! |-------|------|
//! | Weighting | [`weighting::compute_weights`] |
//! | Aggregation | [`DynamicAggregator`] |
//! | Agreement | [`AgreementScorer`] |
//! | Meta stacking | [`MetaStacker`], [`LinearMetaModel`] |
//! | Calibration | [`ConfidenceCalibrator`] |
//! | Path selection | [`FallbackController`], [`HeuristicFallback`] |
//! | Orchestration | [`EnsembleEngine`] |

pub mod adapters;
pub mod aggregator;
pub mod agreement;
pub mod calibrator;
pub mod engine;
pub mod fallback;
pub mod heuristic;
pub mod meta;
pub mod weighting;

pub use adapters::{StaticAdapter, WeightedFeatureAdapter};
pub use aggregator::DynamicAggregator;
pub use agreement::AgreementScorer;
pub use calibrator::ConfidenceCalibrator;
pub use engine::EnsembleEngine;
pub use fallback::FallbackController;
pub use heuristic::HeuristicFallback;
pub use meta::{LinearMetaModel, MetaSkipReason, MetaStacker};
