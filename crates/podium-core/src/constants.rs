/// Podium engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Number of competitors in every race.
pub const PARTICIPANT_COUNT: usize = 6;

/// A distribution must sum to 1.0 within this tolerance after normalization.
pub const DISTRIBUTION_TOLERANCE: f64 = 1e-3;

/// Normalized model weights must sum to 1.0 within this tolerance.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Component names used when reporting degradation.
pub const COMPONENT_ENSEMBLE: &str = "ensemble";
pub const COMPONENT_META: &str = "meta_stacker";
