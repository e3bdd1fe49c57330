use podium_core::constants::DISTRIBUTION_TOLERANCE;
use podium_core::models::{Distribution, ParticipantId};
use proptest::prelude::*;

fn arb_scores() -> impl Strategy<Value = Vec<(ParticipantId, f64)>> {
    proptest::collection::btree_map(1u8..=6, 0.0f64..1000.0, 1..=6).prop_map(|m| {
        m.into_iter()
            .map(|(id, v)| (ParticipantId::new(id).unwrap(), v))
            .collect()
    })
}

proptest! {
    #[test]
    fn normalized_distribution_sums_to_one(scores in arb_scores()) {
        let total: f64 = scores.iter().map(|(_, v)| v).sum();
        prop_assume!(total > 0.0);
        let d = Distribution::from_scores(scores).unwrap();
        prop_assert!((d.total() - 1.0).abs() <= DISTRIBUTION_TOLERANCE);
        for (_, v) in d.iter() {
            prop_assert!(v >= 0.0);
        }
    }

    #[test]
    fn ranked_is_descending(scores in arb_scores()) {
        let total: f64 = scores.iter().map(|(_, v)| v).sum();
        prop_assume!(total > 0.0);
        let d = Distribution::from_scores(scores).unwrap();
        let ranked = d.ranked();
        for pair in ranked.windows(2) {
            prop_assert!(pair[0].1 >= pair[1].1);
        }
        prop_assert_eq!(ranked.len(), d.len());
    }

    #[test]
    fn blend_stays_normalized(a in arb_scores(), b in arb_scores(), w in 0.0f64..=1.0) {
        prop_assume!(a.iter().map(|(_, v)| v).sum::<f64>() > 0.0);
        prop_assume!(b.iter().map(|(_, v)| v).sum::<f64>() > 0.0);
        let da = Distribution::from_scores(a).unwrap();
        let db = Distribution::from_scores(b).unwrap();
        let mixed = da.blend(&db, w).unwrap();
        prop_assert!((mixed.total() - 1.0).abs() <= DISTRIBUTION_TOLERANCE);
    }
}
