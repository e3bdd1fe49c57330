use criterion::{black_box, criterion_group, criterion_main, Criterion};

use podium_core::models::{Distribution, FeatureVector, ModelOutput, ParticipantFeatures, ParticipantId};
use podium_core::PerformanceSnapshot;
use podium_ensemble::{AgreementScorer, DynamicAggregator, EnsembleEngine};

fn outputs(n: usize) -> Vec<ModelOutput> {
    (0..n)
        .map(|i| {
            let scores = ParticipantId::ALL
                .iter()
                .map(|p| (*p, 1.0 + ((i + p.index()) % 4) as f64));
            ModelOutput::new(format!("model_{i}"), Distribution::from_scores(scores).unwrap(), 0.6)
                .unwrap()
        })
        .collect()
}

fn bench_aggregate(c: &mut Criterion) {
    let snapshot = PerformanceSnapshot::empty();
    let aggregator = DynamicAggregator::default();
    let scorer = AgreementScorer::default();
    let five = outputs(5);

    c.bench_function("aggregate_5_models", |b| {
        b.iter(|| aggregator.aggregate(black_box(&five), &snapshot).unwrap())
    });
    c.bench_function("agreement_5_models", |b| b.iter(|| scorer.score(black_box(&five))));

    let engine = EnsembleEngine::default();
    let features = FeatureVector::new(
        ParticipantId::ALL.iter().map(|p| ParticipantFeatures::new(*p)).collect(),
    );
    c.bench_function("resolve_5_models", |b| {
        b.iter(|| {
            engine
                .resolve(&features, black_box(five.clone()), &snapshot)
                .unwrap()
        })
    });
}

criterion_group!(benches, bench_aggregate);
criterion_main!(benches);
