//! Greedy selection strategy.

use super::{candidate_pool, evidence_sides, verify_proposition, Selection};
use crate::bom::Design;
use crate::error::{Error, Result};
use crate::heuristics::{Direction, Heuristic};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::HashSet;
use tracing::debug;

/// Configuration for the greedy strategy.
///
/// # Examples
///
/// ```
/// use deltalca::select::GreedyConfig;
///
/// let config = GreedyConfig::default()
///     .with_randomize(false)
///     .with_filter_conflicts(true);
/// ```
#[derive(Debug, Clone)]
pub struct GreedyConfig {
    /// Shuffle the candidate pool before seeding the selection.
    ///
    /// Different orders can reach different local optima; rerunning
    /// with fresh seeds is a cheap way to retry a failed proof.
    pub randomize: bool,

    /// Random seed for reproducibility. `None` draws a fresh seed.
    pub seed: Option<u64>,

    /// Drop mutually contradicting candidates before selecting.
    pub filter_conflicts: bool,
}

impl Default for GreedyConfig {
    fn default() -> Self {
        Self {
            randomize: true,
            seed: None,
            filter_conflicts: true,
        }
    }
}

impl GreedyConfig {
    pub fn with_randomize(mut self, randomize: bool) -> Self {
        self.randomize = randomize;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_filter_conflicts(mut self, filter: bool) -> Self {
        self.filter_conflicts = filter;
        self
    }
}

/// Result of a greedy selection run.
#[derive(Debug, Clone)]
pub struct GreedyResult {
    /// The proving selection, if one was reached.
    pub selection: Option<Selection>,

    /// Candidates that survived pre-filtering.
    pub pool_size: usize,

    /// Heuristics admitted before the run ended.
    pub rounds: usize,

    /// Seed used to shuffle the pool, when randomization was on.
    pub seed_used: Option<u64>,
}

/// Executes the greedy strategy.
///
/// Seeds the selection with the first pool candidate, then repeatedly
/// admits the candidate adding the most uncovered parts, subject to no
/// evidence part backing two claims. The proposition is re-checked
/// after every admission; the run ends at the first proof, or without
/// a selection when no admissible candidate remains.
pub struct GreedyRunner;

impl GreedyRunner {
    /// Runs greedy selection.
    pub fn run(
        heuristics: &[Heuristic],
        design_a: &Design,
        design_b: &Design,
        proposition: Direction,
        config: &GreedyConfig,
    ) -> Result<GreedyResult> {
        if proposition == Direction::NotSure {
            return Err(Error::UnverifiableProposition);
        }
        let n_a = design_a.len();
        let n_b = design_b.len();

        let mut pool = candidate_pool(heuristics, proposition, config.filter_conflicts);
        let pool_size = pool.len();
        debug!(candidates = heuristics.len(), pool_size, "greedy pool filtered");
        if pool.is_empty() {
            return Ok(GreedyResult {
                selection: None,
                pool_size,
                rounds: 0,
                seed_used: None,
            });
        }

        let mut seed_used = None;
        if config.randomize {
            let seed = config.seed.unwrap_or_else(rand::random);
            pool.shuffle(&mut StdRng::seed_from_u64(seed));
            seed_used = Some(seed);
        }

        let mut selected = vec![pool.remove(0)];
        let mut rounds = 1usize;
        loop {
            if verify_proposition(&selected, n_a, n_b, proposition)? {
                debug!(rounds, "greedy selection proved the proposition");
                return Ok(GreedyResult {
                    selection: Some(Selection::from_heuristics(selected)),
                    pool_size,
                    rounds,
                    seed_used,
                });
            }

            let (used_from, covered_to) = coverage(&selected, proposition);
            let mut best: Option<(usize, usize)> = None; // (pool index, score)
            for (i, candidate) in pool.iter().enumerate() {
                if let Some(score) =
                    admission_score(candidate, &used_from, &covered_to, proposition)
                {
                    if best.is_none_or(|(_, s)| score > s) {
                        best = Some((i, score));
                    }
                }
            }
            let Some((index, _)) = best else {
                debug!(rounds, "no admissible candidate left");
                return Ok(GreedyResult {
                    selection: None,
                    pool_size,
                    rounds,
                    seed_used,
                });
            };
            selected.push(pool.remove(index));
            rounds += 1;
        }
    }
}

/// Evidence parts already claimed and covered parts already reached.
fn coverage(
    selected: &[Heuristic],
    proposition: Direction,
) -> (HashSet<usize>, HashSet<usize>) {
    let mut used_from = HashSet::new();
    let mut covered_to = HashSet::new();
    for h in selected {
        let (from, to) = evidence_sides(h, proposition);
        used_from.extend(from.iter().copied());
        covered_to.extend(to.iter().copied());
    }
    (used_from, covered_to)
}

/// Marginal parts the candidate would add, or `None` when it reuses an
/// already-claimed evidence part.
fn admission_score(
    candidate: &Heuristic,
    used_from: &HashSet<usize>,
    covered_to: &HashSet<usize>,
    proposition: Direction,
) -> Option<usize> {
    let (from, to) = evidence_sides(candidate, proposition);
    if from.iter().any(|p| used_from.contains(p)) {
        return None;
    }
    let new_from: HashSet<usize> = from.iter().copied().collect();
    let new_to: HashSet<usize> = to
        .iter()
        .copied()
        .filter(|p| !covered_to.contains(p))
        .collect();
    Some(new_from.len() + new_to.len())
}

#[cfg(test)]
mod tests {
    use super::super::test_heuristic;
    use super::*;
    use crate::bom::PartSpec;

    fn design(label: &str, n: usize) -> Design {
        Design::from_specs(label, (0..n).map(|i| PartSpec::new(format!("p{i}"))).collect())
    }

    fn no_shuffle() -> GreedyConfig {
        GreedyConfig::default().with_randomize(false)
    }

    #[test]
    fn test_greedy_proves_simple_cover() {
        let heuristics = vec![
            test_heuristic(vec![0], vec![0], Direction::AMore),
            test_heuristic(vec![1], vec![1], Direction::AMore),
        ];
        let result = GreedyRunner::run(
            &heuristics,
            &design("a", 2),
            &design("b", 2),
            Direction::AMore,
            &no_shuffle(),
        )
        .unwrap();

        let selection = result.selection.expect("proof expected");
        assert_eq!(selection.len(), 2);
        assert_eq!(result.rounds, 2);
        assert_eq!(result.pool_size, 2);
        assert!(result.seed_used.is_none());
    }

    #[test]
    fn test_greedy_ignores_wrong_direction_noise() {
        let heuristics = vec![
            test_heuristic(vec![0], vec![0], Direction::AMore),
            test_heuristic(vec![0], vec![1], Direction::BMore),
            test_heuristic(vec![1], vec![1], Direction::AMore),
        ];
        let result = GreedyRunner::run(
            &heuristics,
            &design("a", 2),
            &design("b", 2),
            Direction::AMore,
            &no_shuffle(),
        )
        .unwrap();

        assert!(result.selection.is_some());
        assert_eq!(result.pool_size, 2);
    }

    #[test]
    fn test_greedy_blocked_by_evidence_reuse() {
        let heuristics = vec![
            test_heuristic(vec![0], vec![0], Direction::AMore),
            test_heuristic(vec![0], vec![1], Direction::AMore),
        ];
        let result = GreedyRunner::run(
            &heuristics,
            &design("a", 1),
            &design("b", 2),
            Direction::AMore,
            &no_shuffle(),
        )
        .unwrap();

        assert!(result.selection.is_none());
        assert_eq!(result.rounds, 1);
    }

    #[test]
    fn test_greedy_prefers_wider_coverage() {
        let heuristics = vec![
            test_heuristic(vec![0], vec![0], Direction::AMore),
            test_heuristic(vec![1], vec![1], Direction::AMore),
            test_heuristic(vec![1], vec![1, 2], Direction::AMore),
        ];
        let result = GreedyRunner::run(
            &heuristics,
            &design("a", 2),
            &design("b", 3),
            Direction::AMore,
            &no_shuffle(),
        )
        .unwrap();

        let selection = result.selection.expect("proof expected");
        assert_eq!(result.rounds, 2);
        assert_eq!(selection.heuristics[1].parts_b, vec![1, 2]);
    }

    #[test]
    fn test_greedy_single_candidate_proof() {
        let heuristics = vec![test_heuristic(vec![0], vec![0, 1], Direction::AMore)];
        let result = GreedyRunner::run(
            &heuristics,
            &design("a", 1),
            &design("b", 2),
            Direction::AMore,
            &no_shuffle(),
        )
        .unwrap();

        assert!(result.selection.is_some());
        assert_eq!(result.rounds, 1);
    }

    #[test]
    fn test_greedy_seed_reproducible() {
        let heuristics: Vec<_> = (0..6)
            .map(|i| test_heuristic(vec![i], vec![i], Direction::AMore))
            .collect();
        let config = GreedyConfig::default().with_seed(42);
        let a = design("a", 6);
        let b = design("b", 6);

        let first = GreedyRunner::run(&heuristics, &a, &b, Direction::AMore, &config).unwrap();
        let second = GreedyRunner::run(&heuristics, &a, &b, Direction::AMore, &config).unwrap();

        assert_eq!(first.seed_used, Some(42));
        assert_eq!(first.selection, second.selection);
    }

    #[test]
    fn test_greedy_user_defined_survives_conflict() {
        let mut user = test_heuristic(vec![0], vec![0], Direction::AMore);
        user.user_defined = true;
        let heuristics = vec![
            user,
            test_heuristic(vec![0], vec![0], Direction::BMore),
        ];
        let result = GreedyRunner::run(
            &heuristics,
            &design("a", 1),
            &design("b", 1),
            Direction::AMore,
            &no_shuffle(),
        )
        .unwrap();

        let selection = result.selection.expect("user rule should carry the proof");
        assert!(selection.heuristics[0].user_defined);
    }

    #[test]
    fn test_greedy_empty_pool() {
        let heuristics = vec![test_heuristic(vec![0], vec![0], Direction::BMore)];
        let result = GreedyRunner::run(
            &heuristics,
            &design("a", 1),
            &design("b", 1),
            Direction::AMore,
            &no_shuffle(),
        )
        .unwrap();

        assert!(result.selection.is_none());
        assert_eq!(result.pool_size, 0);
        assert_eq!(result.rounds, 0);
    }

    #[test]
    fn test_greedy_not_sure_is_fatal() {
        let err = GreedyRunner::run(
            &[],
            &design("a", 1),
            &design("b", 1),
            Direction::NotSure,
            &no_shuffle(),
        )
        .unwrap_err();
        assert_eq!(err, Error::UnverifiableProposition);
    }
}
