//! Top-level Podium configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{
    defaults, AgreementConfig, CalibrationConfig, EnsembleConfig, FallbackConfig,
    ObservabilityConfig,
};
use crate::constants::PARTICIPANT_COUNT;
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`PODIUM_*`)
/// 2. Project config (`podium.toml` in the project root, or an explicit path)
/// 3. Compiled defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PodiumConfig {
    pub ensemble: EnsembleConfig,
    pub agreement: AgreementConfig,
    pub calibration: CalibrationConfig,
    pub fallback: FallbackConfig,
    pub observability: ObservabilityConfig,
}

impl PodiumConfig {
    /// Load configuration for a project rooted at `root`.
    ///
    /// A missing `podium.toml` is not an error; defaults are used.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let project_config_path = root.join(defaults::DEFAULT_CONFIG_FILENAME);
        let mut config = if project_config_path.exists() {
            Self::read_toml_file(&project_config_path)?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from an explicit file, then apply env overrides.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::read_toml_file(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML string. Missing keys take defaults.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let e = &self.ensemble;
        if !e.weight_sharpness.is_finite() || e.weight_sharpness <= 0.0 {
            return Err(invalid("ensemble.weight_sharpness", "must be finite and > 0"));
        }
        check_unit("ensemble.neutral_score", e.neutral_score)?;
        if e.adapter_timeout_ms == 0 {
            return Err(invalid("ensemble.adapter_timeout_ms", "must be greater than 0"));
        }
        if e.min_models_for_meta < 2 {
            return Err(invalid("ensemble.min_models_for_meta", "must be at least 2"));
        }
        check_unit("ensemble.meta_distribution_weight", e.meta_distribution_weight)?;

        let a = &self.agreement;
        check_unit("agreement.cap", a.cap)?;
        check_unit("agreement.base", a.base)?;
        if !a.variance_scale.is_finite() || a.variance_scale < 0.0 {
            return Err(invalid("agreement.variance_scale", "must be finite and >= 0"));
        }

        let c = &self.calibration;
        check_unit("calibration.min_confidence", c.min_confidence)?;
        check_unit("calibration.max_confidence", c.max_confidence)?;
        if c.min_confidence > c.max_confidence {
            return Err(invalid(
                "calibration.min_confidence",
                "must not exceed calibration.max_confidence",
            ));
        }
        check_unit("calibration.meta_confidence_weight", c.meta_confidence_weight)?;

        let f = &self.fallback;
        if !(c.min_confidence..=c.max_confidence).contains(&f.heuristic_confidence) {
            return Err(invalid(
                "fallback.heuristic_confidence",
                "must lie within [min_confidence, max_confidence]",
            ));
        }
        if f.strength_field.trim().is_empty() {
            return Err(invalid("fallback.strength_field", "must not be empty"));
        }
        if f.lane_prior.len() != PARTICIPANT_COUNT {
            return Err(invalid(
                "fallback.lane_prior",
                &format!("must have exactly {PARTICIPANT_COUNT} entries"),
            ));
        }
        if f.lane_prior.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(invalid("fallback.lane_prior", "entries must be finite and >= 0"));
        }
        if f.lane_prior.iter().sum::<f64>() <= 0.0 {
            return Err(invalid("fallback.lane_prior", "must have positive total"));
        }
        Ok(())
    }

    fn read_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Apply environment variable overrides.
    /// Pattern: `PODIUM_WEIGHT_SHARPNESS`, `PODIUM_ADAPTER_TIMEOUT_MS`, etc.
    /// Unparseable values are ignored.
    fn apply_env_overrides(&mut self) {
        if let Some(v) = env_parse::<f64>("PODIUM_WEIGHT_SHARPNESS") {
            self.ensemble.weight_sharpness = v;
        }
        if let Some(v) = env_parse::<u64>("PODIUM_ADAPTER_TIMEOUT_MS") {
            self.ensemble.adapter_timeout_ms = v;
        }
        if let Some(v) = env_parse::<f64>("PODIUM_META_DISTRIBUTION_WEIGHT") {
            self.ensemble.meta_distribution_weight = v;
        }
        if let Some(v) = env_parse::<f64>("PODIUM_AGREEMENT_CAP") {
            self.agreement.cap = v;
        }
        if let Some(v) = env_parse::<f64>("PODIUM_MIN_CONFIDENCE") {
            self.calibration.min_confidence = v;
        }
        if let Some(v) = env_parse::<f64>("PODIUM_MAX_CONFIDENCE") {
            self.calibration.max_confidence = v;
        }
        if let Some(v) = env_parse::<f64>("PODIUM_HEURISTIC_CONFIDENCE") {
            self.fallback.heuristic_confidence = v;
        }
        if let Ok(v) = std::env::var("PODIUM_STRENGTH_FIELD") {
            self.fallback.strength_field = v;
        }
        if let Ok(v) = std::env::var("PODIUM_LOG_LEVEL") {
            self.observability.log_level = v;
        }
        if let Some(v) = env_parse::<bool>("PODIUM_JSON_LOGS") {
            self.observability.json_logs = v;
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

fn check_unit(field: &str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(field, "must be between 0.0 and 1.0"))
    }
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::ValidationFailed {
        field: field.to_string(),
        message: message.to_string(),
    }
}
