/// Structural problems with a feature vector. These are the only failures
/// that surface from a prediction request.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FeatureError {
    #[error("feature vector has no participants")]
    NoParticipants,

    #[error("feature vector has {count} participants, at most {max} allowed")]
    TooManyParticipants { count: usize, max: usize },

    #[error("participant {participant} appears more than once in the feature vector")]
    DuplicateParticipant { participant: u8 },

    #[error("feature field name is empty for participant {participant}")]
    EmptyFieldName { participant: u8 },
}
