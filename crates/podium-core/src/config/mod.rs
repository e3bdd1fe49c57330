//! Configuration system for Podium.
//! TOML-based, 3-layer resolution: env > project file > compiled defaults.

pub mod agreement_config;
pub mod calibration_config;
pub mod defaults;
pub mod ensemble_config;
pub mod fallback_config;
pub mod observability_config;
pub mod podium_config;

pub use agreement_config::AgreementConfig;
pub use calibration_config::CalibrationConfig;
pub use ensemble_config::EnsembleConfig;
pub use fallback_config::FallbackConfig;
pub use observability_config::ObservabilityConfig;
pub use podium_config::PodiumConfig;
