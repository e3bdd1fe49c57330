//! HeuristicFallback: a naive distribution when no model is available.

use podium_core::config::FallbackConfig;
use podium_core::constants::PARTICIPANT_COUNT;
use podium_core::errors::DistributionError;
use podium_core::models::{Distribution, FeatureVector, ParticipantId};

/// Derives a distribution straight from the features.
///
/// Probabilities are proportional to the configured strength field. Values
/// that are missing, negative, or not finite are ignored. If nothing usable
/// remains, the per-lane prior over the participants present is used, and as
/// a last resort the uniform distribution.
#[derive(Debug, Clone, PartialEq)]
pub struct HeuristicFallback {
    strength_field: String,
    lane_prior: [f64; PARTICIPANT_COUNT],
    confidence: f64,
}

impl HeuristicFallback {
    pub fn new(
        strength_field: impl Into<String>,
        lane_prior: [f64; PARTICIPANT_COUNT],
        confidence: f64,
    ) -> Self {
        Self {
            strength_field: strength_field.into(),
            lane_prior,
            confidence,
        }
    }

    pub fn from_config(config: &FallbackConfig) -> Self {
        let mut lane_prior = [0.0; PARTICIPANT_COUNT];
        for (slot, value) in lane_prior.iter_mut().zip(&config.lane_prior) {
            *slot = *value;
        }
        Self::new(
            config.strength_field.clone(),
            lane_prior,
            config.heuristic_confidence,
        )
    }

    /// Fixed confidence reported for heuristic results.
    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn strength_field(&self) -> &str {
        &self.strength_field
    }

    pub fn distribution(&self, features: &FeatureVector) -> Result<Distribution, DistributionError> {
        let strengths: Vec<(ParticipantId, f64)> = features
            .participants
            .iter()
            .filter_map(|p| {
                p.value(&self.strength_field)
                    .filter(|v| v.is_finite() && *v >= 0.0)
                    .map(|v| (p.participant, v))
            })
            .collect();
        if strengths.iter().map(|(_, v)| v).sum::<f64>() > 0.0 {
            return Distribution::from_scores(strengths);
        }

        let participants = features.participant_ids();
        let prior = participants
            .iter()
            .map(|p| (*p, self.lane_prior[p.index()]));
        match Distribution::from_scores(prior) {
            Ok(distribution) => Ok(distribution),
            Err(DistributionError::NoMass { .. }) => Distribution::uniform(participants),
            Err(e) => Err(e),
        }
    }
}

impl Default for HeuristicFallback {
    fn default() -> Self {
        Self::from_config(&FallbackConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use podium_core::models::ParticipantFeatures;

    fn pid(id: u8) -> ParticipantId {
        ParticipantId::new(id).unwrap()
    }

    #[test]
    fn proportional_to_strength() {
        let features = FeatureVector::new(vec![
            ParticipantFeatures::new(pid(1)).with("win_rate", 6.0),
            ParticipantFeatures::new(pid(2)).with("win_rate", 3.0),
            ParticipantFeatures::new(pid(3)).with("win_rate", 1.0),
        ]);
        let d = HeuristicFallback::default().distribution(&features).unwrap();
        assert!((d.probability(pid(1)).unwrap() - 0.6).abs() < 1e-12);
        assert!((d.probability(pid(3)).unwrap() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn unusable_values_are_ignored() {
        let features = FeatureVector::new(vec![
            ParticipantFeatures::new(pid(1)).with("win_rate", 2.0),
            ParticipantFeatures::new(pid(2)).with("win_rate", f64::NAN),
            ParticipantFeatures::new(pid(3)).with("win_rate", -1.0),
            ParticipantFeatures::new(pid(4)),
        ]);
        let d = HeuristicFallback::default().distribution(&features).unwrap();
        assert_eq!(d.len(), 1);
        assert_eq!(d.top_pick(), Some(pid(1)));
    }

    #[test]
    fn lane_prior_when_no_strength() {
        let features = FeatureVector::new(vec![
            ParticipantFeatures::new(pid(1)),
            ParticipantFeatures::new(pid(2)),
        ]);
        let d = HeuristicFallback::default().distribution(&features).unwrap();
        assert!((d.probability(pid(1)).unwrap() - 0.75).abs() < 1e-12);
        assert!((d.probability(pid(2)).unwrap() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn uniform_when_prior_has_no_mass() {
        let fallback = HeuristicFallback::new("win_rate", [1.0, 0.0, 0.0, 0.0, 0.0, 0.0], 0.3);
        let features = FeatureVector::new(vec![
            ParticipantFeatures::new(pid(5)),
            ParticipantFeatures::new(pid(6)),
        ]);
        let d = fallback.distribution(&features).unwrap();
        assert_eq!(d.probability(pid(5)), Some(0.5));
    }
}
