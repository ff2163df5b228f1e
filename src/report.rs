//! Coverage reporting over a finished selection.
//!
//! A report answers the practical question after a run: which parts of
//! each design does the accepted evidence account for, and how much
//! estimated footprint was counted where no heuristic reached. Parts
//! are grouped by name so a design with forty identical capacitors
//! reads as one line.

use crate::bom::{Design, Part};
use crate::select::Selection;
use std::collections::HashSet;

/// Parts sharing a name, with multiplicity.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PartGroup {
    /// Part name as declared in the design.
    pub name: String,
    /// How many parts of this name fall in the group.
    pub count: usize,
}

/// Matched and unmatched part groups for one design.
///
/// Groups appear in first-occurrence order of the underlying parts.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SideCoverage {
    /// Parts accounted for by a heuristic or a footprint estimate.
    pub matched: Vec<PartGroup>,
    /// Parts nothing accounts for.
    pub unmatched: Vec<PartGroup>,
}

impl SideCoverage {
    /// Whether every part on this side is accounted for.
    pub fn is_fully_matched(&self) -> bool {
        self.unmatched.is_empty()
    }
}

/// How much of each design a selection accounts for.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoverageReport {
    /// Coverage of design A.
    pub side_a: SideCoverage,
    /// Coverage of design B.
    pub side_b: SideCoverage,
    /// Estimated footprint counted on side A, in grams CO2e.
    pub footprint_a: f64,
    /// Estimated footprint counted on side B, in grams CO2e.
    pub footprint_b: f64,
}

impl CoverageReport {
    /// Builds the report for a selection over two designs.
    pub fn build(design_a: &Design, design_b: &Design, selection: &Selection) -> Self {
        let mut covered_a: HashSet<usize> = selection.footprint_a.iter().copied().collect();
        let mut covered_b: HashSet<usize> = selection.footprint_b.iter().copied().collect();
        for h in &selection.heuristics {
            covered_a.extend(h.parts_a.iter().copied());
            covered_b.extend(h.parts_b.iter().copied());
        }
        Self {
            side_a: side_coverage(design_a, &covered_a),
            side_b: side_coverage(design_b, &covered_b),
            footprint_a: estimate_sum(design_a, &selection.footprint_a),
            footprint_b: estimate_sum(design_b, &selection.footprint_b),
        }
    }

    /// Whether every part on both sides is accounted for.
    pub fn is_complete(&self) -> bool {
        self.side_a.is_fully_matched() && self.side_b.is_fully_matched()
    }
}

fn side_coverage(design: &Design, covered: &HashSet<usize>) -> SideCoverage {
    SideCoverage {
        matched: group_by_name(design.parts().iter().filter(|p| covered.contains(&p.id))),
        unmatched: group_by_name(design.parts().iter().filter(|p| !covered.contains(&p.id))),
    }
}

fn group_by_name<'a>(parts: impl Iterator<Item = &'a Part>) -> Vec<PartGroup> {
    let mut groups: Vec<PartGroup> = Vec::new();
    for part in parts {
        match groups.iter_mut().find(|g| g.name == part.name) {
            Some(group) => group.count += 1,
            None => groups.push(PartGroup {
                name: part.name.clone(),
                count: 1,
            }),
        }
    }
    groups
}

fn estimate_sum(design: &Design, ids: &[usize]) -> f64 {
    let footprints = design.footprints();
    ids.iter()
        .filter_map(|&id| footprints.get(id).copied().flatten())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bom::PartSpec;
    use crate::heuristics::{Direction, Heuristic};

    fn heuristic(parts_a: Vec<usize>, parts_b: Vec<usize>) -> Heuristic {
        Heuristic {
            parts_a,
            parts_b,
            direction: Direction::AMore,
            explanation: String::new(),
            rule: "test".to_string(),
            user_defined: false,
        }
    }

    fn designs() -> (Design, Design) {
        let a = Design::from_specs(
            "A",
            vec![
                PartSpec::new("DDR3").with_count(2), // ids 0, 1
                PartSpec::new("MCU"),                // id 2
            ],
        );
        let b = Design::from_specs("B", vec![PartSpec::new("SoC")]);
        (a, b)
    }

    #[test]
    fn test_report_groups_by_name() {
        let (a, b) = designs();
        let selection =
            Selection::from_heuristics(vec![heuristic(vec![0, 2], vec![0])]);
        let report = CoverageReport::build(&a, &b, &selection);

        assert_eq!(
            report.side_a.matched,
            vec![
                PartGroup { name: "DDR3".to_string(), count: 1 },
                PartGroup { name: "MCU".to_string(), count: 1 },
            ]
        );
        assert_eq!(
            report.side_a.unmatched,
            vec![PartGroup { name: "DDR3".to_string(), count: 1 }]
        );
        assert!(report.side_b.is_fully_matched());
        assert!(!report.is_complete());
    }

    #[test]
    fn test_report_complete_cover() {
        let (a, b) = designs();
        let selection =
            Selection::from_heuristics(vec![heuristic(vec![0, 1, 2], vec![0])]);
        let report = CoverageReport::build(&a, &b, &selection);

        assert!(report.is_complete());
        assert!(report.side_a.unmatched.is_empty());
        assert_eq!(report.footprint_a, 0.0);
        assert_eq!(report.footprint_b, 0.0);
    }

    #[test]
    fn test_report_counts_footprint_estimates() {
        let a = Design::from_specs(
            "A",
            vec![
                PartSpec::new("x0").with_carbon_footprint(2.0),
                PartSpec::new("x1").with_carbon_footprint(1.0),
            ],
        );
        let b = Design::from_specs("b", vec![PartSpec::new("y0").with_carbon_footprint(2.5)]);
        let selection = Selection {
            heuristics: Vec::new(),
            footprint_a: vec![0, 1],
            footprint_b: vec![0],
        };
        let report = CoverageReport::build(&a, &b, &selection);

        assert!(report.is_complete());
        assert!((report.footprint_a - 3.0).abs() < 1e-12);
        assert!((report.footprint_b - 2.5).abs() < 1e-12);
        assert_eq!(report.side_a.matched.len(), 2);
    }

    #[test]
    fn test_report_empty_selection() {
        let (a, b) = designs();
        let report = CoverageReport::build(&a, &b, &Selection::from_heuristics(Vec::new()));

        assert!(report.side_a.matched.is_empty());
        assert_eq!(
            report.side_a.unmatched,
            vec![
                PartGroup { name: "DDR3".to_string(), count: 2 },
                PartGroup { name: "MCU".to_string(), count: 1 },
            ]
        );
        assert!(!report.is_complete());
    }
}
