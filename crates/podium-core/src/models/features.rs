use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::constants::PARTICIPANT_COUNT;
use crate::errors::FeatureError;

use super::ParticipantId;

/// Named numeric features for one participant (e.g. `win_rate`, `motor_rate`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantFeatures {
    pub participant: ParticipantId,
    #[serde(default)]
    pub values: BTreeMap<String, f64>,
}

impl ParticipantFeatures {
    pub fn new(participant: ParticipantId) -> Self {
        Self {
            participant,
            values: BTreeMap::new(),
        }
    }

    /// Builder-style setter.
    pub fn with(mut self, field: impl Into<String>, value: f64) -> Self {
        self.values.insert(field.into(), value);
        self
    }

    pub fn value(&self, field: &str) -> Option<f64> {
        self.values.get(field).copied()
    }
}

/// Features for one race, produced by an external extraction stage.
///
/// The engine checks structure only (participants present, unique, at most
/// six, named fields). The meaning of the values belongs to the adapters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    #[serde(default)]
    pub race_id: Option<String>,
    pub participants: Vec<ParticipantFeatures>,
}

impl FeatureVector {
    pub fn new(participants: Vec<ParticipantFeatures>) -> Self {
        Self {
            race_id: None,
            participants,
        }
    }

    pub fn with_race_id(mut self, race_id: impl Into<String>) -> Self {
        self.race_id = Some(race_id.into());
        self
    }

    /// Structural validation. A vector that fails here cannot be predicted at all.
    pub fn validate(&self) -> Result<(), FeatureError> {
        if self.participants.is_empty() {
            return Err(FeatureError::NoParticipants);
        }
        if self.participants.len() > PARTICIPANT_COUNT {
            return Err(FeatureError::TooManyParticipants {
                count: self.participants.len(),
                max: PARTICIPANT_COUNT,
            });
        }
        let mut seen = BTreeSet::new();
        for entry in &self.participants {
            if !seen.insert(entry.participant) {
                return Err(FeatureError::DuplicateParticipant {
                    participant: entry.participant.get(),
                });
            }
            if entry.values.keys().any(|k| k.trim().is_empty()) {
                return Err(FeatureError::EmptyFieldName {
                    participant: entry.participant.get(),
                });
            }
        }
        Ok(())
    }

    pub fn participant(&self, id: ParticipantId) -> Option<&ParticipantFeatures> {
        self.participants.iter().find(|p| p.participant == id)
    }

    /// Participant ids in feature order.
    pub fn participant_ids(&self) -> Vec<ParticipantId> {
        self.participants.iter().map(|p| p.participant).collect()
    }

    /// Value of `field` for `participant`, if present.
    pub fn field(&self, participant: ParticipantId, field: &str) -> Option<f64> {
        self.participant(participant).and_then(|p| p.value(field))
    }
}
