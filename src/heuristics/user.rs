//! User-asserted comparison rules.
//!
//! Rules are short texts of the form
//! `"2 x DDR3 + 1 x MCU >= 1 x SoC"`: each side lists `<count> x <name>`
//! terms, and the comparator states the claimed direction (`>=` claims
//! side A, `<=` claims side B; it must agree with the run proposition).
//! A rule is bound to concrete parts by name, as many disjoint times as
//! the designs supply, and each binding becomes one user-defined
//! heuristic. Selection treats those as pinned: they survive filtering,
//! and the exact strategy force-selects them.

use super::types::{Direction, Heuristic};
use crate::bom::{Design, Part};
use crate::error::{Error, Result};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// Which design a user-rule term refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    A,
    B,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::A => write!(f, "A"),
            Side::B => write!(f, "B"),
        }
    }
}

/// A failure to parse or bind one user rule.
///
/// Collected per rule; never fatal to the run or to other rules.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuleError {
    /// The rule text is malformed.
    #[error("parse error: {0}")]
    Parse(String),

    /// The comparator contradicts the proposition being proved.
    #[error("comparator mismatch: expected `{expected}`, found `{found}`")]
    ComparatorMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// A term names a part the design does not contain.
    #[error("no part named `{name}` on side {side}")]
    UnknownPart { name: String, side: Side },

    /// A term needs more instances than the design can still supply.
    #[error("side {side} has {available} unclaimed `{name}`, rule needs {needed}")]
    InsufficientParts {
        name: String,
        side: Side,
        needed: usize,
        available: usize,
    },
}

/// One term of a user rule: `<count> x <part name>`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Term {
    count: usize,
    name: String,
}

/// Result of applying a batch of user rules.
#[derive(Debug, Default)]
pub struct UserRuleOutcome {
    /// Heuristics instantiated from successfully bound rules.
    pub heuristics: Vec<Heuristic>,
    /// Failed rules paired with what went wrong.
    pub errors: Vec<(String, RuleError)>,
}

/// Parses and binds a batch of user rules against two designs.
///
/// Each rule is handled independently: a failure is recorded in the
/// outcome and the remaining rules still run. Binding is sequential
/// within the batch on the A side (parts claimed by an earlier rule are
/// not available to later ones); B-side parts may back several rules.
///
/// A `NotSure` proposition admits no user rules and is fatal.
pub fn apply_user_rules(
    design_a: &Design,
    design_b: &Design,
    rules: &[String],
    proposition: Direction,
) -> Result<UserRuleOutcome> {
    let expected = match proposition {
        Direction::AMore => ">=",
        Direction::BMore => "<=",
        Direction::NotSure => return Err(Error::UnverifiableProposition),
    };

    let mut outcome = UserRuleOutcome::default();
    let mut consumed_a: HashSet<usize> = HashSet::new();
    for text in rules {
        match bind_rule(text, design_a, design_b, expected, &consumed_a) {
            Ok(groups) => {
                for (group_a, group_b) in groups {
                    consumed_a.extend(group_a.iter().copied());
                    outcome.heuristics.push(Heuristic::from_user_rule(
                        group_a,
                        group_b,
                        proposition,
                        format!("User defined rule: {text}"),
                    ));
                }
            }
            Err(err) => {
                debug!(rule = text.as_str(), %err, "user rule rejected");
                outcome.errors.push((text.clone(), err));
            }
        }
    }
    Ok(outcome)
}

/// Parses one rule and binds it to as many disjoint part groups as the
/// designs supply. Returns `(A group, B group)` id pairs, one per
/// instantiation.
fn bind_rule(
    text: &str,
    design_a: &Design,
    design_b: &Design,
    expected: &'static str,
    consumed_a: &HashSet<usize>,
) -> std::result::Result<Vec<(Vec<usize>, Vec<usize>)>, RuleError> {
    let (lhs, rhs) = parse_rule(text, expected)?;
    let groups_a = bind_side(&lhs, design_a.parts(), consumed_a, Side::A)?;
    let no_exclusions = HashSet::new();
    let groups_b = bind_side(&rhs, design_b.parts(), &no_exclusions, Side::B)?;
    // each instantiation pairs one group per side; the shorter supply caps both
    Ok(groups_a.into_iter().zip(groups_b).collect())
}

fn parse_rule(
    text: &str,
    expected: &'static str,
) -> std::result::Result<(Vec<Term>, Vec<Term>), RuleError> {
    let found = if text.contains(">=") {
        ">="
    } else if text.contains("<=") {
        "<="
    } else {
        return Err(RuleError::Parse(format!("missing comparator `{expected}`")));
    };
    if found != expected {
        return Err(RuleError::ComparatorMismatch { expected, found });
    }
    let (lhs, rhs) = match text.split_once(expected) {
        Some(split) => split,
        None => return Err(RuleError::Parse(format!("missing comparator `{expected}`"))),
    };
    for side in [lhs, rhs] {
        if side.contains(">=") || side.contains("<=") {
            return Err(RuleError::Parse("more than one comparator".to_string()));
        }
    }
    Ok((parse_side(lhs)?, parse_side(rhs)?))
}

fn parse_side(side: &str) -> std::result::Result<Vec<Term>, RuleError> {
    let side = side.trim();
    if side.is_empty() {
        return Err(RuleError::Parse("empty side".to_string()));
    }
    let mut terms = Vec::new();
    for raw in side.split(" + ") {
        let raw = raw.trim();
        let (count_str, name) = raw
            .split_once(" x ")
            .ok_or_else(|| RuleError::Parse(format!("term `{raw}` is not `<count> x <name>`")))?;
        let count: usize = count_str
            .trim()
            .parse()
            .map_err(|_| RuleError::Parse(format!("bad count `{}`", count_str.trim())))?;
        if count == 0 {
            return Err(RuleError::Parse(format!("zero count in term `{raw}`")));
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(RuleError::Parse(format!("empty part name in term `{raw}`")));
        }
        terms.push(Term {
            count,
            name: name.to_string(),
        });
    }
    Ok(terms)
}

/// Greedily collects disjoint part groups matching the terms, repeating
/// until some term's supply runs out. Only complete groups count.
fn bind_side(
    terms: &[Term],
    parts: &[Part],
    excluded: &HashSet<usize>,
    side: Side,
) -> std::result::Result<Vec<Vec<usize>>, RuleError> {
    for term in terms {
        if !parts.iter().any(|p| p.name == term.name) {
            return Err(RuleError::UnknownPart {
                name: term.name.clone(),
                side,
            });
        }
    }

    let mut used: HashSet<usize> = HashSet::new();
    let mut groups: Vec<Vec<usize>> = Vec::new();
    loop {
        let mut group = Vec::new();
        let mut shortfall: Option<(usize, usize)> = None; // (term index, still needed)
        for (ti, term) in terms.iter().enumerate() {
            let mut need = term.count;
            for part in parts {
                if need == 0 {
                    break;
                }
                if part.name == term.name && !used.contains(&part.id) && !excluded.contains(&part.id)
                {
                    group.push(part.id);
                    used.insert(part.id);
                    need -= 1;
                }
            }
            if need > 0 && shortfall.is_none() {
                shortfall = Some((ti, need));
            }
        }
        match shortfall {
            None => groups.push(group),
            Some((ti, need)) => {
                if groups.is_empty() {
                    let term = &terms[ti];
                    return Err(RuleError::InsufficientParts {
                        name: term.name.clone(),
                        side,
                        needed: term.count,
                        available: term.count - need,
                    });
                }
                break;
            }
        }
    }
    Ok(groups)
}
