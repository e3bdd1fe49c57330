pub mod distribution;
pub mod ensemble_result;
pub mod features;
pub mod model_output;
pub mod participant;
pub mod performance;

pub use distribution::Distribution;
pub use ensemble_result::{EnsembleResult, EnsembleState};
pub use features::{FeatureVector, ParticipantFeatures};
pub use model_output::{ModelOutput, RawPrediction};
pub use participant::ParticipantId;
pub use performance::{PerformanceRecord, PerformanceSnapshot};
