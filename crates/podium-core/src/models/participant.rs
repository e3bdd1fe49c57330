use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::PARTICIPANT_COUNT;
use crate::errors::DistributionError;

/// Identifier of one of the six competitors in a race, always in `1..=6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ParticipantId(u8);

impl ParticipantId {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = PARTICIPANT_COUNT as u8;

    /// Every participant, in ascending order.
    pub const ALL: [ParticipantId; PARTICIPANT_COUNT] = [
        ParticipantId(1),
        ParticipantId(2),
        ParticipantId(3),
        ParticipantId(4),
        ParticipantId(5),
        ParticipantId(6),
    ];

    /// Create a participant id, or `None` if `id` is outside `1..=6`.
    pub fn new(id: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&id).then_some(Self(id))
    }

    /// The raw id.
    pub fn get(self) -> u8 {
        self.0
    }

    /// Zero-based position, used for fixed-width feature vectors.
    pub fn index(self) -> usize {
        usize::from(self.0 - 1)
    }
}

impl TryFrom<u8> for ParticipantId {
    type Error = DistributionError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Self::new(id).ok_or(DistributionError::InvalidParticipant { id })
    }
}

impl From<ParticipantId> for u8 {
    fn from(p: ParticipantId) -> Self {
        p.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
