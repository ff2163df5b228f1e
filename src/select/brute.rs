//! Brute-force selection strategy.

use super::{candidate_pool, verify_proposition, Selection};
use crate::bom::Design;
use crate::error::{Error, Result};
use crate::heuristics::{Direction, Heuristic};
use tracing::debug;

/// Largest candidate pool the brute-force strategy accepts by default.
pub const MAX_BRUTE_CANDIDATES: usize = 20;

/// Configuration for the brute-force strategy.
#[derive(Debug, Clone)]
pub struct BruteConfig {
    /// Stop at the first proving subset instead of collecting all.
    pub break_early: bool,

    /// Drop mutually contradicting candidates before enumerating.
    pub filter_conflicts: bool,

    /// Refuse pools larger than this (the subset count is `2^pool`).
    pub max_candidates: usize,
}

impl Default for BruteConfig {
    fn default() -> Self {
        Self {
            break_early: true,
            filter_conflicts: true,
            max_candidates: MAX_BRUTE_CANDIDATES,
        }
    }
}

impl BruteConfig {
    pub fn with_break_early(mut self, break_early: bool) -> Self {
        self.break_early = break_early;
        self
    }

    pub fn with_filter_conflicts(mut self, filter: bool) -> Self {
        self.filter_conflicts = filter;
        self
    }

    pub fn with_max_candidates(mut self, max: usize) -> Self {
        self.max_candidates = max;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.max_candidates >= 64 {
            return Err(format!(
                "max_candidates must be below 64, got {}",
                self.max_candidates
            ));
        }
        Ok(())
    }
}

/// Result of a brute-force enumeration.
#[derive(Debug, Clone)]
pub struct BruteResult {
    /// Every proving subset found, in ascending subset-mask order.
    pub selections: Vec<Selection>,

    /// Candidates that survived pre-filtering.
    pub pool_size: usize,

    /// Subsets checked against the proposition.
    pub subsets_tested: u64,
}

/// Executes the brute-force strategy.
///
/// Enumerates every subset of the filtered pool (bit `i` of the subset
/// mask selects candidate `i`) and records each one that proves the
/// proposition. Exhaustive, so it finds a proof whenever one exists in
/// the pool, at exponential cost.
pub struct BruteRunner;

impl BruteRunner {
    /// Runs the exhaustive enumeration.
    pub fn run(
        heuristics: &[Heuristic],
        design_a: &Design,
        design_b: &Design,
        proposition: Direction,
        config: &BruteConfig,
    ) -> Result<BruteResult> {
        if proposition == Direction::NotSure {
            return Err(Error::UnverifiableProposition);
        }
        config.validate().map_err(Error::Config)?;

        let pool = candidate_pool(heuristics, proposition, config.filter_conflicts);
        let pool_size = pool.len();
        if pool_size > config.max_candidates {
            return Err(Error::TooManyCandidates {
                count: pool_size,
                max: config.max_candidates,
            });
        }
        let n_a = design_a.len();
        let n_b = design_b.len();

        let mut selections = Vec::new();
        let mut subsets_tested = 0u64;
        for mask in 0u64..(1u64 << pool_size) {
            let subset: Vec<&Heuristic> = pool
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1u64 << i) != 0)
                .map(|(_, h)| h)
                .collect();
            subsets_tested += 1;
            if verify_proposition(&subset, n_a, n_b, proposition)? {
                selections.push(Selection::from_heuristics(
                    subset.into_iter().cloned().collect(),
                ));
                if config.break_early {
                    break;
                }
            }
        }
        debug!(
            pool_size,
            subsets_tested,
            proofs = selections.len(),
            "brute-force enumeration finished"
        );
        Ok(BruteResult {
            selections,
            pool_size,
            subsets_tested,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_heuristic;
    use super::*;
    use crate::bom::PartSpec;

    fn design(label: &str, n: usize) -> Design {
        Design::from_specs(label, (0..n).map(|i| PartSpec::new(format!("p{i}"))).collect())
    }

    fn pool_of_three() -> Vec<Heuristic> {
        vec![
            test_heuristic(vec![0], vec![0], Direction::AMore),
            test_heuristic(vec![1], vec![1], Direction::AMore),
            test_heuristic(vec![0], vec![0, 1], Direction::AMore),
        ]
    }

    #[test]
    fn test_brute_finds_all_proofs() {
        let config = BruteConfig::default().with_break_early(false);
        let result = BruteRunner::run(
            &pool_of_three(),
            &design("a", 2),
            &design("b", 2),
            Direction::AMore,
            &config,
        )
        .unwrap();

        // {h0, h1}, {h2}, {h1, h2}
        assert_eq!(result.selections.len(), 3);
        assert_eq!(result.subsets_tested, 8);
        assert_eq!(result.selections[0].len(), 2);
        assert_eq!(result.selections[1].len(), 1);
    }

    #[test]
    fn test_brute_break_early() {
        let result = BruteRunner::run(
            &pool_of_three(),
            &design("a", 2),
            &design("b", 2),
            Direction::AMore,
            &BruteConfig::default(),
        )
        .unwrap();

        assert_eq!(result.selections.len(), 1);
        // ascending masks reach {h0, h1} before {h2}
        assert_eq!(result.selections[0].len(), 2);
        assert!(result.subsets_tested < 8);
    }

    #[test]
    fn test_brute_no_proof() {
        let heuristics = vec![test_heuristic(vec![0], vec![0], Direction::AMore)];
        let result = BruteRunner::run(
            &heuristics,
            &design("a", 1),
            &design("b", 2),
            Direction::AMore,
            &BruteConfig::default(),
        )
        .unwrap();

        assert!(result.selections.is_empty());
        assert_eq!(result.subsets_tested, 2);
    }

    #[test]
    fn test_brute_pool_cap() {
        let heuristics: Vec<_> = (0..21)
            .map(|i| test_heuristic(vec![i], vec![i], Direction::AMore))
            .collect();
        let err = BruteRunner::run(
            &heuristics,
            &design("a", 21),
            &design("b", 21),
            Direction::AMore,
            &BruteConfig::default(),
        )
        .unwrap_err();

        assert_eq!(err, Error::TooManyCandidates { count: 21, max: 20 });
    }

    #[test]
    fn test_brute_cap_must_fit_mask() {
        let config = BruteConfig::default().with_max_candidates(64);
        let err = BruteRunner::run(
            &[],
            &design("a", 1),
            &design("b", 1),
            Direction::AMore,
            &config,
        )
        .unwrap_err();

        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_brute_empty_pool() {
        let heuristics = vec![test_heuristic(vec![0], vec![0], Direction::BMore)];
        let result = BruteRunner::run(
            &heuristics,
            &design("a", 1),
            &design("b", 1),
            Direction::AMore,
            &BruteConfig::default(),
        )
        .unwrap();

        assert_eq!(result.pool_size, 0);
        assert!(result.selections.is_empty());
    }

    #[test]
    fn test_brute_not_sure_is_fatal() {
        let err = BruteRunner::run(
            &[],
            &design("a", 1),
            &design("b", 1),
            Direction::NotSure,
            &BruteConfig::default(),
        )
        .unwrap_err();
        assert_eq!(err, Error::UnverifiableProposition);
    }
}
