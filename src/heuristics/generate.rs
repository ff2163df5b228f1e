//! Candidate generation over part pairs.

use super::rules::RuleSet;
use super::types::Heuristic;
use crate::bom::Design;
use tracing::debug;

/// Generates one heuristic per (A part, B part, rule) triple.
///
/// Iteration order is A-part order, then B-part order, then registry
/// order, so candidate indices are stable across runs with the same
/// inputs. Inconclusive verdicts are kept (filtering is the selection
/// layer's job).
pub fn generate(design_a: &Design, design_b: &Design, rules: &RuleSet) -> Vec<Heuristic> {
    let mut heuristics = Vec::with_capacity(design_a.len() * design_b.len() * rules.len());
    for a in design_a.parts() {
        for b in design_b.parts() {
            for rule in rules.rules() {
                heuristics.push(Heuristic::from_rule(a, b, rule.as_ref()));
            }
        }
    }
    debug!(
        candidates = heuristics.len(),
        rule_set = rules.name(),
        "generated heuristic candidates"
    );
    heuristics
}
