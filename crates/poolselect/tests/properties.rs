//! Property tests for policy filtering and selection validation.

use std::collections::HashSet;
use std::sync::Arc;

use poolselect::{
    anti_affinity_label, prefer_anti_affinity_label, AntiAffinityLabel, InMemoryReplicaLister,
    PolicyContext, PreferAntiAffinityLabel, Selection,
};
use poolselect_core::{AffinityLabel, LabelKeys, PlacementRecord, PoolUid};
use proptest::prelude::*;

const SCOPE: &str = "vol-1";

fn context_with_occupied(occupied: &[String], noise: &[String]) -> PolicyContext {
    let keys = LabelKeys::default();
    let lister = InMemoryReplicaLister::new();
    for (i, pool) in occupied.iter().enumerate() {
        lister.insert(PlacementRecord::placed(
            format!("rep-{i}"),
            &keys,
            &AffinityLabel::from(SCOPE),
            &PoolUid::from(pool.as_str()),
        ));
    }
    // Replicas of another scope must never influence the result.
    for (i, pool) in noise.iter().enumerate() {
        lister.insert(PlacementRecord::placed(
            format!("other-{i}"),
            &keys,
            &AffinityLabel::from("vol-2"),
            &PoolUid::from(pool.as_str()),
        ));
    }
    PolicyContext::new(Arc::new(lister))
}

fn pool_ids() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("p[0-9]", 0..10)
}

fn set_difference(candidates: &[String], occupied: &[String]) -> Vec<PoolUid> {
    let occupied: HashSet<&String> = occupied.iter().collect();
    candidates
        .iter()
        .filter(|c| !occupied.contains(c))
        .map(|c| PoolUid::from(c.as_str()))
        .collect()
}

fn to_uids(ids: &[String]) -> Vec<PoolUid> {
    ids.iter().map(|s| PoolUid::from(s.as_str())).collect()
}

proptest! {
    /// Hard anti-affinity returns exactly the unoccupied candidates, in order.
    #[test]
    fn hard_filter_is_ordered_difference(
        candidates in pool_ids(),
        occupied in pool_ids(),
        noise in pool_ids(),
    ) {
        let ctx = context_with_occupied(&occupied, &noise);
        let output = AntiAffinityLabel::new(SCOPE, &ctx).filter(&to_uids(&candidates)).unwrap();

        prop_assert_eq!(output, set_difference(&candidates, &occupied));
    }

    /// Preferred anti-affinity returns the difference, or everything when it is empty.
    #[test]
    fn soft_filter_falls_back_to_candidates(
        candidates in pool_ids(),
        occupied in pool_ids(),
        noise in pool_ids(),
    ) {
        let ctx = context_with_occupied(&occupied, &noise);
        let output = PreferAntiAffinityLabel::new(SCOPE, &ctx).filter(&to_uids(&candidates)).unwrap();

        let difference = set_difference(&candidates, &occupied);
        if difference.is_empty() {
            prop_assert_eq!(output, to_uids(&candidates));
        } else {
            prop_assert_eq!(output, difference);
        }
    }

    /// Validation, and so filtering, fails exactly when both hard and soft
    /// policies are present.
    #[test]
    fn validate_rejects_only_mixed_kinds(kinds in prop::collection::vec(any::<bool>(), 0..6)) {
        let ctx = context_with_occupied(&[], &[]);
        let options = kinds.iter().enumerate().map(|(i, hard)| {
            let label = format!("label-{i}");
            if *hard { anti_affinity_label(&label) } else { prefer_anti_affinity_label(&label) }
        });
        let selection = Selection::new(Vec::new(), &ctx, options);

        let mixed = kinds.iter().any(|k| *k) && kinds.iter().any(|k| !*k);
        prop_assert_eq!(selection.validate().is_err(), mixed);
        prop_assert_eq!(selection.filter().is_err(), mixed);
    }
}
