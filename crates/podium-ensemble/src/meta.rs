//! Second-stage meta stacking over concatenated base distributions.

use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use podium_core::constants::PARTICIPANT_COUNT;
use podium_core::errors::MetaError;
use podium_core::models::{Distribution, ModelOutput, ParticipantId};
use podium_core::traits::IMetaModel;
use serde::{Deserialize, Serialize};

/// Why the meta layer produced no distribution for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaSkipReason {
    /// No meta model was supplied.
    NotTrained,
    /// Fewer base outputs than the meta layer needs.
    TooFewModels,
    /// A contributing model was not part of the training order.
    UnknownModel,
    /// Concatenated input width differs from the trained width.
    WidthMismatch,
    /// The meta model errored or returned an unusable vector.
    InvalidOutput,
}

impl MetaSkipReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotTrained => "not_trained",
            Self::TooFewModels => "too_few_models",
            Self::UnknownModel => "unknown_model",
            Self::WidthMismatch => "width_mismatch",
            Self::InvalidOutput => "invalid_output",
        }
    }
}

impl fmt::Display for MetaSkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional meta layer wrapping a trained [`IMetaModel`].
#[derive(Clone)]
pub struct MetaStacker {
    model: Option<Arc<dyn IMetaModel>>,
    min_models: usize,
}

impl fmt::Debug for MetaStacker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetaStacker")
            .field("trained", &self.is_trained())
            .field("model_order", &self.model.as_ref().map(|m| m.model_order()))
            .field("min_models", &self.min_models)
            .finish()
    }
}

impl MetaStacker {
    pub fn untrained() -> Self {
        Self {
            model: None,
            min_models: 2,
        }
    }

    pub fn new(model: Arc<dyn IMetaModel>, min_models: usize) -> Self {
        Self {
            model: Some(model),
            min_models: min_models.max(2),
        }
    }

    pub fn is_trained(&self) -> bool {
        self.model.is_some()
    }

    /// Meta distribution, or `None` if any precondition fails.
    pub fn meta_predict(&self, outputs: &[ModelOutput]) -> Option<Distribution> {
        self.evaluate(outputs).ok()
    }

    /// Like [`meta_predict`](Self::meta_predict) but names the skip reason.
    pub fn evaluate(&self, outputs: &[ModelOutput]) -> Result<Distribution, MetaSkipReason> {
        let model = self.model.as_ref().ok_or(MetaSkipReason::NotTrained)?;
        if outputs.len() < self.min_models.max(2) {
            return Err(MetaSkipReason::TooFewModels);
        }

        let input = stack_inputs(model.model_order(), outputs)?;
        if input.len() != model.input_width() {
            return Err(MetaSkipReason::WidthMismatch);
        }

        let scores = model
            .predict_proba(&input)
            .map_err(|_| MetaSkipReason::InvalidOutput)?;
        if scores.len() != PARTICIPANT_COUNT {
            return Err(MetaSkipReason::InvalidOutput);
        }

        // Only participants some base model reported can carry meta mass.
        let present: BTreeSet<ParticipantId> = outputs
            .iter()
            .flat_map(|o| o.distribution.participants())
            .collect();
        let restricted = present.into_iter().map(|p| (p, scores[p.index()]));
        Distribution::from_scores(restricted).map_err(|_| MetaSkipReason::InvalidOutput)
    }
}

impl Default for MetaStacker {
    fn default() -> Self {
        Self::untrained()
    }
}

/// Concatenate each output's six probabilities in `model_order`, absent
/// participants as 0.0. Models not in `model_order` are rejected.
pub fn stack_inputs(
    model_order: &[String],
    outputs: &[ModelOutput],
) -> Result<Vec<f64>, MetaSkipReason> {
    if outputs
        .iter()
        .any(|o| !model_order.iter().any(|id| *id == o.model_id))
    {
        return Err(MetaSkipReason::UnknownModel);
    }
    let mut input = Vec::with_capacity(model_order.len() * PARTICIPANT_COUNT);
    for id in model_order {
        if let Some(output) = outputs.iter().find(|o| o.model_id == *id) {
            input.extend_from_slice(&output.distribution.to_array());
        }
    }
    Ok(input)
}

#[derive(Deserialize)]
struct LinearMetaModelFile {
    model_order: Vec<String>,
    weights: Vec<Vec<f64>>,
    bias: Vec<f64>,
}

/// Multinomial logistic meta model: `softmax(W·x + b)`.
///
/// `weights` has one row per participant, each `6 * model_order.len()` wide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LinearMetaModelFile")]
pub struct LinearMetaModel {
    model_order: Vec<String>,
    weights: Vec<Vec<f64>>,
    bias: Vec<f64>,
}

impl LinearMetaModel {
    pub fn new(
        model_order: Vec<String>,
        weights: Vec<Vec<f64>>,
        bias: Vec<f64>,
    ) -> Result<Self, MetaError> {
        if model_order.is_empty() {
            return Err(MetaError::EmptyModelOrder);
        }
        let mut seen = BTreeSet::new();
        for id in &model_order {
            if !seen.insert(id.as_str()) {
                return Err(MetaError::DuplicateModel {
                    model_id: id.clone(),
                });
            }
        }
        if weights.len() != PARTICIPANT_COUNT {
            return Err(MetaError::ShapeMismatch {
                what: "weights rows".to_string(),
                expected: PARTICIPANT_COUNT,
                actual: weights.len(),
            });
        }
        if bias.len() != PARTICIPANT_COUNT {
            return Err(MetaError::ShapeMismatch {
                what: "bias".to_string(),
                expected: PARTICIPANT_COUNT,
                actual: bias.len(),
            });
        }
        let width = model_order.len() * PARTICIPANT_COUNT;
        for (row_index, row) in weights.iter().enumerate() {
            if row.len() != width {
                return Err(MetaError::ShapeMismatch {
                    what: format!("weights row {row_index}"),
                    expected: width,
                    actual: row.len(),
                });
            }
            if let Some(col) = row.iter().position(|v| !v.is_finite()) {
                return Err(MetaError::NonFiniteParameter {
                    location: format!("weights[{row_index}][{col}]"),
                });
            }
        }
        if let Some(i) = bias.iter().position(|v| !v.is_finite()) {
            return Err(MetaError::NonFiniteParameter {
                location: format!("bias[{i}]"),
            });
        }
        Ok(Self {
            model_order,
            weights,
            bias,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, MetaError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, MetaError> {
        let content = std::fs::read_to_string(path).map_err(|e| MetaError::ArtifactUnreadable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_json(&content)
    }
}

impl TryFrom<LinearMetaModelFile> for LinearMetaModel {
    type Error = MetaError;

    fn try_from(file: LinearMetaModelFile) -> Result<Self, Self::Error> {
        Self::new(file.model_order, file.weights, file.bias)
    }
}

impl IMetaModel for LinearMetaModel {
    fn model_order(&self) -> &[String] {
        &self.model_order
    }

    fn input_width(&self) -> usize {
        self.model_order.len() * PARTICIPANT_COUNT
    }

    fn predict_proba(&self, input: &[f64]) -> Result<Vec<f64>, MetaError> {
        if input.len() != self.input_width() {
            return Err(MetaError::InputWidthMismatch {
                expected: self.input_width(),
                actual: input.len(),
            });
        }
        let logits: Vec<f64> = self
            .weights
            .iter()
            .zip(&self.bias)
            .map(|(row, b)| row.iter().zip(input).map(|(w, x)| w * x).sum::<f64>() + b)
            .collect();
        let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let exps: Vec<f64> = logits.iter().map(|l| (l - max).exp()).collect();
        let total: f64 = exps.iter().sum();
        Ok(exps.into_iter().map(|e| e / total).collect())
    }
}
