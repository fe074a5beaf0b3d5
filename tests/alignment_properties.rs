use ckp_align::{align, CostModel};
use proptest::prelude::*;

proptest! {
    #[test]
    fn cost_is_symmetric(a in "[ACGT]{0,8}", b in "[ACGT]{0,8}") {
        // The gap model charges both directions identically, so swapping the
        // arguments cannot change the optimal cost (the alignment itself may
        // differ where gap directions tie).
        let costs = CostModel::default();
        let forward = align(a.as_bytes(), b.as_bytes(), &costs).unwrap();
        let reverse = align(b.as_bytes(), a.as_bytes(), &costs).unwrap();
        prop_assert_eq!(forward.cost, reverse.cost);
    }

    #[test]
    fn identity_costs_nothing_when_matches_are_free(s in "[ACGT]{0,10}", ge in 1i32..4) {
        let costs = CostModel::new(0, 1, 3, ge).unwrap();
        let result = align(s.as_bytes(), s.as_bytes(), &costs).unwrap();
        prop_assert_eq!(result.cost, 0);
        prop_assert!(result.aligned_a.iter().all(|sym| sym.is_some()));
        prop_assert!(result.aligned_b.iter().all(|sym| sym.is_some()));
    }

    #[test]
    fn raising_gap_costs_never_lowers_the_cost(a in "[ACGT]{0,7}", b in "[ACGT]{0,7}") {
        let cheap = CostModel::new(0, 1, 1, 1).unwrap();
        let dear = CostModel::new(0, 1, 4, 2).unwrap();
        let cheap_cost = align(a.as_bytes(), b.as_bytes(), &cheap).unwrap().cost;
        let dear_cost = align(a.as_bytes(), b.as_bytes(), &dear).unwrap().cost;
        prop_assert!(dear_cost >= cheap_cost);
    }

    #[test]
    fn alignment_is_deterministic(a in "[ACGT]{0,8}", b in "[ACGT]{0,8}") {
        let costs = CostModel::default();
        let first = align(a.as_bytes(), b.as_bytes(), &costs).unwrap();
        let second = align(a.as_bytes(), b.as_bytes(), &costs).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn column_count_is_bounded_by_the_sum_of_lengths(a in "[ACGT]{0,8}", b in "[ACGT]{0,8}") {
        let result = align(a.as_bytes(), b.as_bytes(), &CostModel::default()).unwrap();
        prop_assert!(result.len() >= a.len().max(b.len()));
        prop_assert!(result.len() <= a.len() + b.len());
    }
}

#[test]
fn positive_match_cost_still_charges_matches() {
    // With matches at 2 and gaps prohibitively dear, the optimum is the
    // all-diagonal alignment and its cost is just the match charges.
    let costs = CostModel::new(2, 3, 50, 10).unwrap();
    let result = align(b"ACGT", b"ACGT", &costs).unwrap();
    assert_eq!(result.cost, 8);
    assert_eq!(result.len(), 4);
}
