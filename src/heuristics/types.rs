//! Core heuristic types: directions, verdicts, and the rule trait.

use crate::bom::Part;
use std::fmt;

/// Which side of a comparison carries more environmental impact.
///
/// Doubles as a heuristic verdict and as the proposition a run tries to
/// prove. `NotSure` is a valid verdict but never a provable proposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Side A has more impact.
    AMore,
    /// Side B has more impact.
    BMore,
    /// The comparison is inconclusive.
    NotSure,
}

impl Direction {
    /// The direction claiming the opposite side.
    ///
    /// `NotSure` has no opposite and maps to itself, so it can never
    /// form a conflicting pair.
    pub fn opposite(self) -> Self {
        match self {
            Direction::AMore => Direction::BMore,
            Direction::BMore => Direction::AMore,
            Direction::NotSure => Direction::NotSure,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::AMore => write!(f, "A_MORE"),
            Direction::BMore => write!(f, "B_MORE"),
            Direction::NotSure => write!(f, "NOT_SURE"),
        }
    }
}

/// The outcome of applying a compare rule to one part pair.
#[derive(Debug, Clone)]
pub struct Verdict {
    /// Which side the rule found to have more impact.
    pub direction: Direction,
    /// Human-readable justification with the compared values.
    pub explanation: String,
}

impl Verdict {
    pub fn new(direction: Direction, explanation: impl Into<String>) -> Self {
        Self {
            direction,
            explanation: explanation.into(),
        }
    }
}

/// A pairwise comparison rule.
///
/// Rules inspect one attribute (or attribute combination) of two parts
/// and return a directional verdict with a justification. An unknown or
/// equal attribute must yield `NotSure`, never a guess.
///
/// # Examples
///
/// ```ignore
/// struct PinCount;
///
/// impl CompareRule for PinCount {
///     fn name(&self) -> &str { "PinCount" }
///     fn compare(&self, a: &Part, b: &Part) -> Verdict {
///         match (a.gpio_count, b.gpio_count) {
///             (Some(ga), Some(gb)) if ga > gb => Verdict::new(Direction::AMore, format!("A: {ga} > B: {gb}")),
///             (Some(ga), Some(gb)) if ga < gb => Verdict::new(Direction::BMore, format!("A: {ga} < B: {gb}")),
///             _ => Verdict::new(Direction::NotSure, "no usable GPIO information"),
///         }
///     }
/// }
/// ```
pub trait CompareRule: Send + Sync {
    /// Returns the name of this rule.
    fn name(&self) -> &str;

    /// Compares one part from side A against one from side B.
    fn compare(&self, a: &Part, b: &Part) -> Verdict;
}

/// One piece of comparative evidence: a directional claim that a group
/// of parts on one side outweighs a group on the other.
///
/// Generated heuristics pair a single part per side; user-defined ones
/// may group several. Part id lists are non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Heuristic {
    /// Ids of the side-A parts backing this claim.
    pub parts_a: Vec<usize>,
    /// Ids of the side-B parts backing this claim.
    pub parts_b: Vec<usize>,
    /// Which side the claim favors.
    pub direction: Direction,
    /// Human-readable justification.
    pub explanation: String,
    /// Name of the rule that produced this heuristic.
    pub rule: String,
    /// Whether a user asserted this heuristic directly.
    pub user_defined: bool,
}

impl Heuristic {
    /// Pairwise heuristic from one rule applied to one part pair.
    pub fn from_rule(a: &Part, b: &Part, rule: &dyn CompareRule) -> Self {
        let verdict = rule.compare(a, b);
        Self {
            parts_a: vec![a.id],
            parts_b: vec![b.id],
            direction: verdict.direction,
            explanation: verdict.explanation,
            rule: rule.name().to_string(),
            user_defined: false,
        }
    }

    /// Group heuristic asserted by a user rule.
    pub fn from_user_rule(
        parts_a: Vec<usize>,
        parts_b: Vec<usize>,
        direction: Direction,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            parts_a,
            parts_b,
            direction,
            explanation: explanation.into(),
            rule: "UserRule".to_string(),
            user_defined: true,
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "parts_a: {:?}; parts_b: {:?}; direction: {}; rule: {} ({})",
            self.parts_a, self.parts_b, self.direction, self.rule, self.explanation
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bom::{Design, PartSpec};

    #[test]
    fn test_opposite() {
        assert_eq!(Direction::AMore.opposite(), Direction::BMore);
        assert_eq!(Direction::BMore.opposite(), Direction::AMore);
        assert_eq!(Direction::NotSure.opposite(), Direction::NotSure);
    }

    #[test]
    fn test_direction_display() {
        assert_eq!(Direction::AMore.to_string(), "A_MORE");
        assert_eq!(Direction::BMore.to_string(), "B_MORE");
        assert_eq!(Direction::NotSure.to_string(), "NOT_SURE");
    }

    #[test]
    fn test_heuristic_display() {
        let h = Heuristic::from_user_rule(vec![0, 1], vec![2], Direction::AMore, "asserted");
        let s = h.to_string();
        assert!(s.contains("parts_a: [0, 1]"));
        assert!(s.contains("parts_b: [2]"));
        assert!(s.contains("A_MORE"));
        assert!(s.contains("UserRule"));
    }

    #[test]
    fn test_from_rule_records_name_and_ids() {
        struct AlwaysA;
        impl CompareRule for AlwaysA {
            fn name(&self) -> &str {
                "AlwaysA"
            }
            fn compare(&self, _a: &Part, _b: &Part) -> Verdict {
                Verdict::new(Direction::AMore, "fixed")
            }
        }

        let a = Design::from_specs("A", vec![PartSpec::new("x"), PartSpec::new("y")]);
        let b = Design::from_specs("B", vec![PartSpec::new("z")]);
        let h = Heuristic::from_rule(&a.parts()[1], &b.parts()[0], &AlwaysA);
        assert_eq!(h.parts_a, vec![1]);
        assert_eq!(h.parts_b, vec![0]);
        assert_eq!(h.rule, "AlwaysA");
        assert!(!h.user_defined);
    }
}
