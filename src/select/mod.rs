//! Selection strategies over heuristic candidates.
//!
//! Given a candidate pool and a proposition, a strategy picks a subset
//! of heuristics that together prove the proposition, or reports that
//! it could not. Three interchangeable strategies are provided:
//!
//! - [`ExactRunner`] — builds a 0-1 integer program and maximizes the
//!   number of covered parts; optimal, and the only strategy that can
//!   balance uncovered parts against their estimated footprints
//! - [`GreedyRunner`] — admits one candidate at a time by marginal
//!   coverage; fast, may miss provable propositions
//! - [`BruteRunner`] — enumerates every subset of a capped pool; finds
//!   all proofs, exponential
//!
//! All strategies share the same pool pre-filtering (wrong-direction
//! candidates drop, mutually contradicting candidates drop unless
//! filtering is disabled, user-defined candidates always survive) and
//! the same proof check, [`verify_proposition`].

mod brute;
mod conflict;
mod exact;
mod greedy;
mod verify;

pub use brute::{BruteConfig, BruteResult, BruteRunner, MAX_BRUTE_CANDIDATES};
pub use conflict::{conflicting_indices, conflicting_pairs};
pub use exact::{ExactConfig, ExactResult, ExactRunner};
pub use greedy::{GreedyConfig, GreedyResult, GreedyRunner};
pub use verify::verify_proposition;

use crate::heuristics::{Direction, Heuristic};
use std::collections::HashSet;
use tracing::debug;

/// A set of heuristics accepted as proof of a proposition.
///
/// The footprint id lists are only populated by the exact strategy:
/// they name the parts whose claims are not backed by a heuristic but
/// by their estimated footprints.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Selection {
    /// The selected heuristics.
    pub heuristics: Vec<Heuristic>,
    /// Side-A part ids covered by footprint estimates.
    pub footprint_a: Vec<usize>,
    /// Side-B part ids covered by footprint estimates.
    pub footprint_b: Vec<usize>,
}

impl Selection {
    /// Creates a selection backed by heuristics alone.
    pub fn from_heuristics(heuristics: Vec<Heuristic>) -> Self {
        Self {
            heuristics,
            footprint_a: Vec::new(),
            footprint_b: Vec::new(),
        }
    }

    /// Total number of heuristics in the selection.
    pub fn len(&self) -> usize {
        self.heuristics.len()
    }

    /// Whether the selection holds no heuristics.
    pub fn is_empty(&self) -> bool {
        self.heuristics.is_empty()
    }
}

/// Splits a heuristic into (evidence side, covered side) part ids for
/// the given proposition. For `AMore` the A parts are the evidence.
pub(crate) fn evidence_sides(h: &Heuristic, proposition: Direction) -> (&[usize], &[usize]) {
    match proposition {
        Direction::BMore => (&h.parts_b, &h.parts_a),
        _ => (&h.parts_a, &h.parts_b),
    }
}

/// Clones the candidates that survive pre-filtering.
///
/// Drops wrong-direction candidates, and (when `filter_conflicts`)
/// members of contradicting pairs. User-defined candidates are kept
/// unconditionally. Conflicts are detected on the unfiltered input.
pub(crate) fn candidate_pool(
    heuristics: &[Heuristic],
    proposition: Direction,
    filter_conflicts: bool,
) -> Vec<Heuristic> {
    let conflicted: HashSet<usize> = if filter_conflicts {
        conflicting_indices(heuristics).into_iter().collect()
    } else {
        HashSet::new()
    };
    if !conflicted.is_empty() {
        debug!(
            conflicted = conflicted.len(),
            "dropping contradicting candidates"
        );
    }
    heuristics
        .iter()
        .enumerate()
        .filter(|(i, h)| {
            h.user_defined || (h.direction == proposition && !conflicted.contains(i))
        })
        .map(|(_, h)| h.clone())
        .collect()
}

#[cfg(test)]
pub(crate) fn test_heuristic(
    parts_a: Vec<usize>,
    parts_b: Vec<usize>,
    direction: Direction,
) -> Heuristic {
    Heuristic {
        parts_a,
        parts_b,
        direction,
        explanation: String::new(),
        rule: "test".to_string(),
        user_defined: false,
    }
}
