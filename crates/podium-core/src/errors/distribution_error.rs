/// Reasons a set of per-participant scores cannot become a [`Distribution`].
///
/// [`Distribution`]: crate::models::Distribution
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DistributionError {
    #[error("distribution has no participants")]
    Empty,

    #[error("participant id {id} is outside 1..=6")]
    InvalidParticipant { id: u8 },

    #[error("participant {participant} appears more than once")]
    DuplicateParticipant { participant: u8 },

    #[error("participant {participant} has non-finite probability {value}")]
    NonFinite { participant: u8, value: f64 },

    #[error("participant {participant} has negative probability {value}")]
    Negative { participant: u8, value: f64 },

    #[error("distribution has no probability mass (total {total})")]
    NoMass { total: f64 },

    #[error("distribution sums to {total} after normalization")]
    NotNormalized { total: f64 },
}
