//! Proof check for a selection of heuristics.

use super::evidence_sides;
use crate::error::{Error, Result};
use crate::heuristics::{Direction, Heuristic};
use std::borrow::Borrow;
use std::collections::HashSet;

/// Whether the given heuristics together prove the proposition for
/// designs of `n_a` and `n_b` parts.
///
/// A proof must cover every part of the claimed-smaller side with at
/// least one heuristic, while each part of the claimed-larger side
/// backs at most one heuristic. An empty selection proves nothing.
/// A `NotSure` proposition is not checkable and yields an error.
pub fn verify_proposition<H: Borrow<Heuristic>>(
    heuristics: &[H],
    n_a: usize,
    n_b: usize,
    proposition: Direction,
) -> Result<bool> {
    if proposition == Direction::NotSure {
        return Err(Error::UnverifiableProposition);
    }
    if heuristics.is_empty() {
        return Ok(false);
    }
    let (n_from, n_to) = match proposition {
        Direction::BMore => (n_b, n_a),
        _ => (n_a, n_b),
    };

    let mut from_count = 0usize;
    let mut from_seen: HashSet<usize> = HashSet::new();
    let mut to_seen: HashSet<usize> = HashSet::new();
    for h in heuristics {
        let (from, to) = evidence_sides(h.borrow(), proposition);
        from_count += from.len();
        from_seen.extend(from.iter().copied());
        to_seen.extend(to.iter().copied());
    }
    if from_count != from_seen.len() {
        // some evidence part backs two claims
        return Ok(false);
    }
    Ok(from_seen.len() <= n_from && to_seen.len() == n_to)
}
