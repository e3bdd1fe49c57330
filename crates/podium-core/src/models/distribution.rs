use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::constants::{DISTRIBUTION_TOLERANCE, PARTICIPANT_COUNT};
use crate::errors::DistributionError;

use super::ParticipantId;

/// Probability assignment over race participants.
///
/// Always normalized: every value is finite and non-negative, and the values
/// sum to 1.0 within [`DISTRIBUTION_TOLERANCE`]. A distribution is never
/// mutated; every transformation builds a new one. Participants a model did
/// not report are simply absent (not zero).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<ParticipantId, f64>",
    into = "BTreeMap<ParticipantId, f64>"
)]
pub struct Distribution {
    probabilities: BTreeMap<ParticipantId, f64>,
}

impl Distribution {
    /// Build a distribution from raw non-negative scores, normalizing them.
    ///
    /// Rejects empty input, duplicate participants, negative or non-finite
    /// values, and inputs with no probability mass.
    pub fn from_scores<I>(scores: I) -> Result<Self, DistributionError>
    where
        I: IntoIterator<Item = (ParticipantId, f64)>,
    {
        let mut raw = BTreeMap::new();
        for (participant, value) in scores {
            if !value.is_finite() {
                return Err(DistributionError::NonFinite {
                    participant: participant.get(),
                    value,
                });
            }
            if value < 0.0 {
                return Err(DistributionError::Negative {
                    participant: participant.get(),
                    value,
                });
            }
            if raw.insert(participant, value).is_some() {
                return Err(DistributionError::DuplicateParticipant {
                    participant: participant.get(),
                });
            }
        }
        Self::normalize(raw)
    }

    /// Build a distribution from unvalidated `(id, score)` pairs.
    pub fn from_raw(scores: &[(u8, f64)]) -> Result<Self, DistributionError> {
        let mut typed = Vec::with_capacity(scores.len());
        for &(id, value) in scores {
            typed.push((ParticipantId::try_from(id)?, value));
        }
        Self::from_scores(typed)
    }

    /// Equal probability over the given participants.
    pub fn uniform<I>(participants: I) -> Result<Self, DistributionError>
    where
        I: IntoIterator<Item = ParticipantId>,
    {
        Self::from_scores(participants.into_iter().map(|p| (p, 1.0)))
    }

    fn normalize(raw: BTreeMap<ParticipantId, f64>) -> Result<Self, DistributionError> {
        if raw.is_empty() {
            return Err(DistributionError::Empty);
        }
        let total: f64 = raw.values().sum();
        if !total.is_finite() || total <= 0.0 {
            return Err(DistributionError::NoMass { total });
        }

        let probabilities: BTreeMap<ParticipantId, f64> =
            raw.into_iter().map(|(p, v)| (p, v / total)).collect();

        let normalized_total: f64 = probabilities.values().sum();
        if (normalized_total - 1.0).abs() > DISTRIBUTION_TOLERANCE {
            return Err(DistributionError::NotNormalized {
                total: normalized_total,
            });
        }
        Ok(Self { probabilities })
    }

    /// Probability of `participant`, or `None` if it was not reported.
    pub fn probability(&self, participant: ParticipantId) -> Option<f64> {
        self.probabilities.get(&participant).copied()
    }

    pub fn contains(&self, participant: ParticipantId) -> bool {
        self.probabilities.contains_key(&participant)
    }

    /// Iterate `(participant, probability)` in ascending participant order.
    pub fn iter(&self) -> impl Iterator<Item = (ParticipantId, f64)> + '_ {
        self.probabilities.iter().map(|(p, v)| (*p, *v))
    }

    /// Participants present, in ascending order.
    pub fn participants(&self) -> impl Iterator<Item = ParticipantId> + '_ {
        self.probabilities.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }

    /// Sum of all probabilities (1.0 within tolerance).
    pub fn total(&self) -> f64 {
        self.probabilities.values().sum()
    }

    /// Largest single probability.
    pub fn max_probability(&self) -> f64 {
        self.probabilities.values().copied().fold(0.0, f64::max)
    }

    /// Fixed-width view indexed by [`ParticipantId::index`], absent participants as 0.0.
    pub fn to_array(&self) -> [f64; PARTICIPANT_COUNT] {
        let mut out = [0.0; PARTICIPANT_COUNT];
        for (p, v) in self.iter() {
            out[p.index()] = v;
        }
        out
    }

    /// Participants by descending probability; ties broken by ascending id.
    pub fn ranked(&self) -> Vec<(ParticipantId, f64)> {
        let mut ranked: Vec<(ParticipantId, f64)> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked
    }

    /// The most likely participant.
    pub fn top_pick(&self) -> Option<ParticipantId> {
        self.ranked().first().map(|(p, _)| *p)
    }

    /// Linear blend `weight * self + (1 - weight) * other` over the union of
    /// participants, renormalized. `weight` is clamped to `[0, 1]`.
    pub fn blend(&self, other: &Distribution, weight: f64) -> Result<Self, DistributionError> {
        let weight = if weight.is_finite() {
            weight.clamp(0.0, 1.0)
        } else {
            1.0
        };
        let mut mixed: BTreeMap<ParticipantId, f64> = BTreeMap::new();
        for (p, v) in self.iter() {
            *mixed.entry(p).or_insert(0.0) += weight * v;
        }
        for (p, v) in other.iter() {
            *mixed.entry(p).or_insert(0.0) += (1.0 - weight) * v;
        }
        Self::normalize(mixed)
    }
}

impl TryFrom<BTreeMap<ParticipantId, f64>> for Distribution {
    type Error = DistributionError;

    fn try_from(map: BTreeMap<ParticipantId, f64>) -> Result<Self, Self::Error> {
        Self::from_scores(map)
    }
}

impl From<Distribution> for BTreeMap<ParticipantId, f64> {
    fn from(d: Distribution) -> Self {
        d.probabilities
    }
}
