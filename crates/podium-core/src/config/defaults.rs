// Single source of truth for all default values.

// --- Files ---
pub const DEFAULT_CONFIG_FILENAME: &str = "podium.toml";

// --- Ensemble ---
pub const DEFAULT_WEIGHT_SHARPNESS: f64 = 3.0;
pub const DEFAULT_NEUTRAL_SCORE: f64 = 0.5;
pub const DEFAULT_ADAPTER_TIMEOUT_MS: u64 = 3_000;
pub const DEFAULT_MIN_MODELS_FOR_META: usize = 2;
pub const DEFAULT_META_DISTRIBUTION_WEIGHT: f64 = 0.7; // meta 70%, weighted blend 30%

// --- Agreement ---
pub const DEFAULT_AGREEMENT_CAP: f64 = 0.15;
pub const DEFAULT_AGREEMENT_BASE: f64 = 0.20;
pub const DEFAULT_AGREEMENT_VARIANCE_SCALE: f64 = 2.0;

// --- Calibration ---
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.30;
pub const DEFAULT_MAX_CONFIDENCE: f64 = 0.98;
pub const DEFAULT_META_CONFIDENCE_WEIGHT: f64 = 0.5;

// --- Fallback ---
pub const DEFAULT_HEURISTIC_CONFIDENCE: f64 = 0.30;
pub const DEFAULT_STRENGTH_FIELD: &str = "win_rate";
pub const DEFAULT_LANE_PRIOR: [f64; 6] = [0.30, 0.10, 0.08, 0.06, 0.04, 0.02];

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;
