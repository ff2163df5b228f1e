//! Contradiction detection over the candidate pool.

use crate::heuristics::{Direction, Heuristic};
use std::collections::HashMap;

/// Groups candidate indices by the leading part id of each side.
///
/// `NotSure` candidates and candidates with an empty side carry no claim
/// and are left out.
fn leading_pair_buckets(heuristics: &[Heuristic]) -> HashMap<(usize, usize), Vec<usize>> {
    let mut buckets: HashMap<(usize, usize), Vec<usize>> = HashMap::new();
    for (i, h) in heuristics.iter().enumerate() {
        if h.direction == Direction::NotSure {
            continue;
        }
        let (Some(&a), Some(&b)) = (h.parts_a.first(), h.parts_b.first()) else {
            continue;
        };
        buckets.entry((a, b)).or_default().push(i);
    }
    buckets
}

/// Ordered index pairs of candidates that contradict each other.
///
/// Two candidates contradict when they compare the same leading part
/// pair but claim opposite directions, which happens when different
/// attributes of the same two parts point different ways. Only the first
/// id of each side's set takes part in the comparison — the whole group
/// for generated heuristics, an approximation for multi-part user rules:
/// a contradiction hidden behind a later group member is not reported.
///
/// The relation is symmetric, so `(i, j)` is reported iff `(j, i)` is.
/// Pairs come out sorted ascending, first index then second.
pub fn conflicting_pairs(heuristics: &[Heuristic]) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for indices in leading_pair_buckets(heuristics).values() {
        for &i in indices {
            for &j in indices {
                if i != j && heuristics[i].direction == heuristics[j].direction.opposite() {
                    pairs.push((i, j));
                }
            }
        }
    }
    pairs.sort_unstable();
    pairs
}

/// Indices of candidates involved in at least one conflicting pair,
/// ascending and without duplicates.
///
/// This is the view the strategies filter the pool by; see
/// [`conflicting_pairs`] for the pair relation itself.
pub fn conflicting_indices(heuristics: &[Heuristic]) -> Vec<usize> {
    // symmetry puts every involved index in first position at least once
    let mut indices: Vec<usize> = conflicting_pairs(heuristics)
        .into_iter()
        .map(|(i, _)| i)
        .collect();
    indices.dedup();
    indices
}

#[cfg(test)]
mod tests {
    use super::super::test_heuristic;
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_opposite_directions_conflict() {
        let heuristics = vec![
            test_heuristic(vec![0], vec![0], Direction::AMore),
            test_heuristic(vec![0], vec![0], Direction::BMore),
        ];
        assert_eq!(conflicting_pairs(&heuristics), vec![(0, 1), (1, 0)]);
        assert_eq!(conflicting_indices(&heuristics), vec![0, 1]);
    }

    #[test]
    fn test_different_pairs_do_not_conflict() {
        let heuristics = vec![
            test_heuristic(vec![0], vec![0], Direction::AMore),
            test_heuristic(vec![1], vec![0], Direction::BMore),
            test_heuristic(vec![0], vec![1], Direction::BMore),
        ];
        assert!(conflicting_pairs(&heuristics).is_empty());
        assert!(conflicting_indices(&heuristics).is_empty());
    }

    #[test]
    fn test_not_sure_never_conflicts() {
        let heuristics = vec![
            test_heuristic(vec![0], vec![0], Direction::NotSure),
            test_heuristic(vec![0], vec![0], Direction::NotSure),
            test_heuristic(vec![0], vec![0], Direction::AMore),
        ];
        assert!(conflicting_pairs(&heuristics).is_empty());
    }

    #[test]
    fn test_same_direction_does_not_conflict() {
        let heuristics = vec![
            test_heuristic(vec![0], vec![0], Direction::AMore),
            test_heuristic(vec![0], vec![0], Direction::AMore),
        ];
        assert!(conflicting_pairs(&heuristics).is_empty());
    }

    #[test]
    fn test_whole_group_is_flagged() {
        let heuristics = vec![
            test_heuristic(vec![0], vec![0], Direction::AMore),
            test_heuristic(vec![1], vec![1], Direction::AMore),
            test_heuristic(vec![0], vec![0], Direction::AMore),
            test_heuristic(vec![0], vec![0], Direction::BMore),
        ];
        // the two agreeing candidates both contradict the lone opposite one
        assert_eq!(
            conflicting_pairs(&heuristics),
            vec![(0, 3), (2, 3), (3, 0), (3, 2)]
        );
        assert_eq!(conflicting_indices(&heuristics), vec![0, 2, 3]);
    }

    #[test]
    fn test_leading_ids_decide_for_groups() {
        let heuristics = vec![
            test_heuristic(vec![0, 1], vec![2], Direction::AMore),
            test_heuristic(vec![0, 5], vec![2, 3], Direction::BMore),
        ];
        assert_eq!(conflicting_pairs(&heuristics), vec![(0, 1), (1, 0)]);
    }

    #[test]
    fn test_contradiction_behind_leading_ids_is_missed() {
        // parts 1 and 2 carry opposite claims, but only as second group
        // members; the leading pairs (0,2) and (1,2) differ, so nothing
        // is reported
        let heuristics = vec![
            test_heuristic(vec![0, 1], vec![2], Direction::AMore),
            test_heuristic(vec![1, 0], vec![2], Direction::BMore),
        ];
        assert!(conflicting_pairs(&heuristics).is_empty());
    }

    #[test]
    fn test_user_defined_pairs_are_still_reported() {
        // the user-rule exemption lives in pool filtering, not here
        let mut user = test_heuristic(vec![0], vec![0], Direction::AMore);
        user.user_defined = true;
        let heuristics = vec![user, test_heuristic(vec![0], vec![0], Direction::BMore)];
        assert_eq!(conflicting_pairs(&heuristics), vec![(0, 1), (1, 0)]);
    }

    #[test]
    fn test_empty_sides_are_skipped() {
        let heuristics = vec![
            test_heuristic(vec![], vec![0], Direction::AMore),
            test_heuristic(vec![], vec![0], Direction::BMore),
        ];
        assert!(conflicting_pairs(&heuristics).is_empty());
    }

    fn arb_heuristics() -> impl Strategy<Value = Vec<Heuristic>> {
        prop::collection::vec((0usize..4, 0usize..4, 0u8..3), 0..12).prop_map(|raw| {
            raw.into_iter()
                .map(|(a, b, d)| {
                    let direction = match d {
                        0 => Direction::AMore,
                        1 => Direction::BMore,
                        _ => Direction::NotSure,
                    };
                    test_heuristic(vec![a], vec![b], direction)
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_pairs_symmetric_and_justified(heuristics in arb_heuristics()) {
            let pairs = conflicting_pairs(&heuristics);
            for &(i, j) in &pairs {
                prop_assert!(pairs.contains(&(j, i)), "({i}, {j}) reported without ({j}, {i})");
                let (hi, hj) = (&heuristics[i], &heuristics[j]);
                prop_assert_eq!(hi.parts_a[0], hj.parts_a[0]);
                prop_assert_eq!(hi.parts_b[0], hj.parts_b[0]);
                prop_assert_eq!(hi.direction, hj.direction.opposite());
                prop_assert!(hi.direction != Direction::NotSure);
            }
            // the index view is exactly the members of the pair relation
            let mut from_pairs: Vec<usize> = pairs.iter().map(|&(i, _)| i).collect();
            from_pairs.sort_unstable();
            from_pairs.dedup();
            prop_assert_eq!(conflicting_indices(&heuristics), from_pairs);
        }
    }
}
