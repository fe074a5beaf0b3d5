use ckp_align::{align, AlignState, CostModel, UNREACHABLE};
use proptest::prelude::*;

fn full_affine_cost(a: &[u8], b: &[u8], costs: &CostModel) -> i32 {
    let n = a.len();
    let m = b.len();
    let mut table = vec![vec![[UNREACHABLE; 3]; m + 1]; n + 1];
    table[0][0][AlignState::Diagonal as usize] = 0;

    for i in 0..=n {
        for j in 0..=m {
            if i == 0 && j == 0 {
                continue;
            }
            for to in AlignState::ALL {
                let (pi, pj, sym_a, sym_b) = match to {
                    AlignState::Diagonal if i > 0 && j > 0 => {
                        (i - 1, j - 1, Some(&a[i - 1]), Some(&b[j - 1]))
                    }
                    AlignState::Vertical if i > 0 => (i - 1, j, Some(&a[i - 1]), None),
                    AlignState::Horizontal if j > 0 => (i, j - 1, None, Some(&b[j - 1])),
                    _ => continue,
                };
                let mut best = UNREACHABLE;
                for from in AlignState::ALL {
                    let cand = table[pi][pj][from as usize]
                        .saturating_add(costs.transition(from, to, sym_a, sym_b));
                    best = best.min(cand);
                }
                table[i][j][to as usize] = best;
            }
        }
    }

    *table[n][m].iter().min().unwrap_or(&UNREACHABLE)
}

fn rescore(aligned_a: &[Option<u8>], aligned_b: &[Option<u8>], costs: &CostModel) -> i32 {
    let mut state = AlignState::Diagonal;
    let mut total = 0i32;
    for (a, b) in aligned_a.iter().zip(aligned_b) {
        let to = match (a, b) {
            (Some(_), Some(_)) => AlignState::Diagonal,
            (Some(_), None) => AlignState::Vertical,
            (None, Some(_)) => AlignState::Horizontal,
            (None, None) => panic!("alignment column with two gaps"),
        };
        total = total.saturating_add(costs.transition(state, to, a.as_ref(), b.as_ref()));
        state = to;
    }
    total
}

proptest! {
    #[test]
    fn cost_matches_full_table(a in "[ACGT]{0,7}", b in "[ACGT]{0,7}") {
        let s = a.as_bytes();
        let t = b.as_bytes();
        let costs = CostModel::default();
        let result = align(s, t, &costs).unwrap();
        prop_assert_eq!(result.cost, full_affine_cost(s, t, &costs));
    }

    #[test]
    fn cost_matches_full_table_across_models(
        a in "[ACGT]{0,6}",
        b in "[ACGT]{0,6}",
        mat in 0i32..3,
        mis in 0i32..4,
        go in 0i32..6,
        ge in 0i32..3,
    ) {
        let s = a.as_bytes();
        let t = b.as_bytes();
        let costs = CostModel::new(mat, mis, go, ge).unwrap();
        let result = align(s, t, &costs).unwrap();
        prop_assert_eq!(result.cost, full_affine_cost(s, t, &costs));
    }

    #[test]
    fn emitted_alignment_rescores_to_its_cost(a in "[ACGT]{0,7}", b in "[ACGT]{0,7}") {
        let costs = CostModel::default();
        let result = align(a.as_bytes(), b.as_bytes(), &costs).unwrap();
        prop_assert_eq!(rescore(&result.aligned_a, &result.aligned_b, &costs), result.cost);
    }

    #[test]
    fn stripping_gaps_recovers_both_inputs(a in "[ACGT]{0,8}", b in "[ACGT]{0,8}") {
        let result = align(a.as_bytes(), b.as_bytes(), &CostModel::default()).unwrap();
        prop_assert_eq!(result.sequence_a(), a.as_bytes());
        prop_assert_eq!(result.sequence_b(), b.as_bytes());
        prop_assert_eq!(result.aligned_a.len(), result.aligned_b.len());
    }
}

#[test]
fn all_gaps_against_empty() {
    let costs = CostModel::default();
    let result = align(b"AAAA", b"", &costs).unwrap();
    assert_eq!(result.cost, full_affine_cost(b"AAAA", b"", &costs));
    assert_eq!(result.cost, costs.gap_open + 4 * costs.gap_extend);
}

#[test]
fn homopolymer_gap_extensions() {
    let costs = CostModel::new(0, 1, 5, 1).unwrap();
    let result = align(b"AAAAAA", b"AAA", &costs).unwrap();
    assert_eq!(result.cost, full_affine_cost(b"AAAAAA", b"AAA", &costs));
    // One run of three deletions beats splitting the run.
    assert_eq!(result.cost, 5 + 3);
}
