use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::errors::SnapshotError;

/// Historical validation score of one base model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceRecord {
    pub model_id: String,
    /// Mean cross-validation score, in [0, 1].
    pub cv_mean_score: f64,
    /// Spread of the cross-validation score, >= 0.
    pub cv_std_score: f64,
    pub last_updated: DateTime<Utc>,
}

impl PerformanceRecord {
    pub fn new(
        model_id: impl Into<String>,
        cv_mean_score: f64,
        cv_std_score: f64,
        last_updated: DateTime<Utc>,
    ) -> Self {
        Self {
            model_id: model_id.into(),
            cv_mean_score,
            cv_std_score,
            last_updated,
        }
    }

    pub fn validate(&self) -> Result<(), SnapshotError> {
        if self.model_id.trim().is_empty() {
            return Err(SnapshotError::EmptyModelId);
        }
        if !(0.0..=1.0).contains(&self.cv_mean_score) {
            return Err(SnapshotError::MeanOutOfRange {
                model_id: self.model_id.clone(),
                value: self.cv_mean_score,
            });
        }
        if !self.cv_std_score.is_finite() || self.cv_std_score < 0.0 {
            return Err(SnapshotError::InvalidSpread {
                model_id: self.model_id.clone(),
                value: self.cv_std_score,
            });
        }
        Ok(())
    }
}

/// Immutable view of model performance supplied by the caller for one or more
/// requests. The engine only reads it.
///
/// Serialized as a plain list of records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PerformanceRecord>", into = "Vec<PerformanceRecord>")]
pub struct PerformanceSnapshot {
    records: BTreeMap<String, PerformanceRecord>,
}

impl PerformanceSnapshot {
    /// A snapshot with no records; every model gets the neutral weight.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a snapshot, validating every record. When a model id appears
    /// more than once the most recently updated record wins.
    pub fn from_records<I>(records: I) -> Result<Self, SnapshotError>
    where
        I: IntoIterator<Item = PerformanceRecord>,
    {
        let mut map: BTreeMap<String, PerformanceRecord> = BTreeMap::new();
        for record in records {
            record.validate()?;
            match map.get(&record.model_id) {
                Some(existing) if existing.last_updated >= record.last_updated => {}
                _ => {
                    map.insert(record.model_id.clone(), record);
                }
            }
        }
        Ok(Self { records: map })
    }

    /// Parse the external list format:
    /// `[{"model_id", "cv_mean_score", "cv_std_score", "last_updated"}, ...]`.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let records: Vec<PerformanceRecord> = serde_json::from_str(json)?;
        Self::from_records(records)
    }

    pub fn get(&self, model_id: &str) -> Option<&PerformanceRecord> {
        self.records.get(model_id)
    }

    pub fn cv_mean_score(&self, model_id: &str) -> Option<f64> {
        self.get(model_id).map(|r| r.cv_mean_score)
    }

    /// Records in ascending model id order.
    pub fn iter(&self) -> impl Iterator<Item = &PerformanceRecord> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl TryFrom<Vec<PerformanceRecord>> for PerformanceSnapshot {
    type Error = SnapshotError;

    fn try_from(records: Vec<PerformanceRecord>) -> Result<Self, Self::Error> {
        Self::from_records(records)
    }
}

impl From<PerformanceSnapshot> for Vec<PerformanceRecord> {
    fn from(snapshot: PerformanceSnapshot) -> Self {
        snapshot.records.into_values().collect()
    }
}
