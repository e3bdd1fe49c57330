//! Meta model artifact loading and stacking preconditions.

use std::sync::Arc;

use podium_core::errors::MetaError;
use podium_core::models::{Distribution, ModelOutput, ParticipantId};
use podium_core::traits::IMetaModel;
use podium_ensemble::meta::stack_inputs;
use podium_ensemble::{LinearMetaModel, MetaSkipReason, MetaStacker};
use test_fixtures::{fixture_path, load_fixture, load_fixture_text};

fn output(id: &str, probs: &[(u8, f64)]) -> ModelOutput {
    ModelOutput::new(id, Distribution::from_raw(probs).unwrap(), 0.6).unwrap()
}

fn fixture_model() -> LinearMetaModel {
    load_fixture("meta/linear_two_models.json")
}

#[test]
fn artifact_loads_from_path_and_json() {
    let from_path = LinearMetaModel::from_path(&fixture_path("meta/linear_two_models.json")).unwrap();
    let from_json = LinearMetaModel::from_json(&load_fixture_text("meta/linear_two_models.json")).unwrap();
    assert_eq!(from_path, from_json);
    assert_eq!(from_path.model_order(), ["statistical", "pattern"]);
    assert_eq!(from_path.input_width(), 12);
}

#[test]
fn missing_artifact_is_unreadable() {
    let dir = tempfile::TempDir::new().unwrap();
    let err = LinearMetaModel::from_path(&dir.path().join("meta.json")).unwrap_err();
    assert!(matches!(err, MetaError::ArtifactUnreadable { .. }));
}

#[test]
fn shape_errors_are_reported() {
    let err = LinearMetaModel::new(vec!["a".into()], vec![vec![0.0; 6]; 5], vec![0.0; 6]).unwrap_err();
    assert!(matches!(err, MetaError::ShapeMismatch { expected: 6, actual: 5, .. }));

    let err = LinearMetaModel::new(vec!["a".into()], vec![vec![0.0; 7]; 6], vec![0.0; 6]).unwrap_err();
    assert!(err.to_string().contains("weights row 0"));

    let err = LinearMetaModel::new(vec![], vec![vec![]; 6], vec![0.0; 6]).unwrap_err();
    assert!(matches!(err, MetaError::EmptyModelOrder));

    let err = LinearMetaModel::new(
        vec!["a".into(), "a".into()],
        vec![vec![0.0; 12]; 6],
        vec![0.0; 6],
    )
    .unwrap_err();
    assert!(matches!(err, MetaError::DuplicateModel { .. }));

    let mut bias = vec![0.0; 6];
    bias[3] = f64::INFINITY;
    let err = LinearMetaModel::new(vec!["a".into()], vec![vec![0.0; 6]; 6], bias).unwrap_err();
    assert!(err.to_string().contains("bias[3]"));
}

#[test]
fn malformed_artifact_json_is_a_parse_error() {
    let err = LinearMetaModel::from_json(r#"{"model_order": ["a"], "weights": [], "bias": []}"#)
        .unwrap_err();
    assert!(matches!(err, MetaError::Parse(_)));
}

#[test]
fn predict_proba_is_a_probability_vector() {
    let model = fixture_model();
    let probs = model.predict_proba(&[0.0; 12]).unwrap();
    assert_eq!(probs.len(), 6);
    assert!((probs.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    // Bias favours participant 1 when inputs carry no signal.
    assert!(probs[0] > probs[1]);

    let err = model.predict_proba(&[0.0; 6]).unwrap_err();
    assert!(matches!(err, MetaError::InputWidthMismatch { expected: 12, actual: 6 }));
}

#[test]
fn stacking_follows_training_order() {
    let order = vec!["statistical".to_string(), "pattern".to_string()];
    // Supplied in reverse order; stacked in training order.
    let outputs = [output("pattern", &[(2, 1.0)]), output("statistical", &[(1, 1.0)])];
    let input = stack_inputs(&order, &outputs).unwrap();
    assert_eq!(input.len(), 12);
    assert_eq!(input[0], 1.0);
    assert_eq!(input[7], 1.0);
    assert_eq!(input.iter().sum::<f64>(), 2.0);
}

#[test]
fn skip_reasons() {
    let untrained = MetaStacker::untrained();
    let outputs = [
        output("statistical", &[(1, 0.5), (2, 0.5)]),
        output("pattern", &[(1, 0.5), (2, 0.5)]),
    ];
    assert_eq!(untrained.evaluate(&outputs), Err(MetaSkipReason::NotTrained));

    let stacker = MetaStacker::new(Arc::new(fixture_model()), 2);
    assert_eq!(stacker.evaluate(&outputs[..1]), Err(MetaSkipReason::TooFewModels));
    assert!(stacker.meta_predict(&outputs[..1]).is_none());

    let unknown = [outputs[0].clone(), output("newcomer", &[(1, 1.0)])];
    assert_eq!(stacker.evaluate(&unknown), Err(MetaSkipReason::UnknownModel));
}

#[test]
fn meta_distribution_covers_reported_participants_only() {
    let stacker = MetaStacker::new(Arc::new(fixture_model()), 2);
    let outputs = [
        output("statistical", &[(1, 0.5), (2, 0.5)]),
        output("pattern", &[(1, 0.4), (3, 0.6)]),
    ];
    let d = stacker.meta_predict(&outputs).unwrap();
    assert_eq!(d.len(), 3);
    assert!(!d.contains(ParticipantId::new(4).unwrap()));
    assert!((d.total() - 1.0).abs() < 1e-9);
    assert_eq!(d.top_pick(), ParticipantId::new(1));
}
