//! Built-in compare rules and the rule registries.

use super::types::{CompareRule, Direction, Verdict};
use crate::bom::{estimate, Part};

/// Shared comparison core for attributes where the larger value means
/// more impact.
fn larger_has_more(attr: &str, va: Option<f64>, vb: Option<f64>) -> Verdict {
    let (va, vb) = match (va, vb) {
        (Some(va), Some(vb)) => (va, vb),
        (va, vb) => {
            return Verdict::new(
                Direction::NotSure,
                format!("no information about {attr}, A: {va:?}, B: {vb:?}"),
            )
        }
    };
    if va > vb {
        Verdict::new(Direction::AMore, format!("A: {va:.4} > B: {vb:.4}"))
    } else if va < vb {
        Verdict::new(Direction::BMore, format!("A: {va:.4} < B: {vb:.4}"))
    } else {
        Verdict::new(Direction::NotSure, format!("A: {va:.4} = B: {vb:.4}"))
    }
}

/// A larger die takes more material and fab effort to produce.
pub struct DieArea;

impl CompareRule for DieArea {
    fn name(&self) -> &str {
        "DieArea"
    }

    fn compare(&self, a: &Part, b: &Part) -> Verdict {
        larger_has_more("die area", a.die_area, b.die_area)
    }
}

/// Higher power draw dominates the use stage.
pub struct PowerDraw;

impl CompareRule for PowerDraw {
    fn name(&self) -> &str {
        "PowerDraw"
    }

    fn compare(&self, a: &Part, b: &Part) -> Verdict {
        larger_has_more("power draw", a.power_draw, b.power_draw)
    }
}

/// Smallest package area as a proxy when the die itself is unknown.
pub struct PackageArea;

impl CompareRule for PackageArea {
    fn name(&self) -> &str {
        "PackageArea"
    }

    fn compare(&self, a: &Part, b: &Part) -> Verdict {
        larger_has_more("package area", a.package_area, b.package_area)
    }
}

/// Narrower process nodes are more advanced and costlier to fabricate,
/// so this rule is inverted: the side with the smaller node width has
/// more impact.
pub struct ProcessNode;

impl CompareRule for ProcessNode {
    fn name(&self) -> &str {
        "ProcessNode"
    }

    fn compare(&self, a: &Part, b: &Part) -> Verdict {
        let (va, vb) = match (a.process_node, b.process_node) {
            (Some(va), Some(vb)) => (va, vb),
            (va, vb) => {
                return Verdict::new(
                    Direction::NotSure,
                    format!("no information about process node, A: {va:?}, B: {vb:?}"),
                )
            }
        };
        if va > vb {
            Verdict::new(Direction::BMore, format!("A: {va:.4} > B: {vb:.4}"))
        } else if va < vb {
            Verdict::new(Direction::AMore, format!("A: {va:.4} < B: {vb:.4}"))
        } else {
            Verdict::new(Direction::NotSure, format!("A: {va:.4} = B: {vb:.4}"))
        }
    }
}

/// Die area scaled into B's process before comparing.
///
/// A's area is multiplied by the regression-derived [`node_ratio`]
/// between the two node widths, folding die size and process advancement
/// into a single comparison.
///
/// [`node_ratio`]: estimate::node_ratio
pub struct EffectiveDieArea;

impl CompareRule for EffectiveDieArea {
    fn name(&self) -> &str {
        "EffectiveDieArea"
    }

    fn compare(&self, a: &Part, b: &Part) -> Verdict {
        let (da, db) = match (a.die_area, b.die_area) {
            (Some(da), Some(db)) => (da, db),
            (da, db) => {
                return Verdict::new(
                    Direction::NotSure,
                    format!("no information about die area, A: {da:?}, B: {db:?}"),
                )
            }
        };
        let (na, nb) = match (a.process_node, b.process_node) {
            (Some(na), Some(nb)) => (na, nb),
            (na, nb) => {
                return Verdict::new(
                    Direction::NotSure,
                    format!("no information about process node, A: {na:?}, B: {nb:?}"),
                )
            }
        };
        let ratio = if na == nb {
            1.0
        } else {
            estimate::node_ratio(na, nb)
        };
        let effective = da * ratio;
        if effective > db {
            Verdict::new(Direction::AMore, format!("A: {effective:.4} > B: {db:.4}"))
        } else if effective < db {
            Verdict::new(Direction::BMore, format!("A: {effective:.4} < B: {db:.4}"))
        } else {
            Verdict::new(Direction::NotSure, format!("A: {effective:.4} = B: {db:.4}"))
        }
    }
}

/// A named, ordered collection of compare rules.
///
/// Generation iterates rules in registry order, so the registry fully
/// determines which heuristics exist and where they sit in the
/// candidate list.
///
/// # Examples
///
/// ```
/// use deltalca::heuristics::RuleSet;
///
/// let rules = RuleSet::standard();
/// assert_eq!(rules.len(), 4);
/// assert_eq!(rules.name(), "standard");
/// ```
pub struct RuleSet {
    name: String,
    rules: Vec<Box<dyn CompareRule>>,
}

impl RuleSet {
    /// The default registry: die area, power draw, package area, and
    /// process node, in that order.
    pub fn standard() -> Self {
        Self {
            name: "standard".to_string(),
            rules: vec![
                Box::new(DieArea),
                Box::new(PowerDraw),
                Box::new(PackageArea),
                Box::new(ProcessNode),
            ],
        }
    }

    /// The process-normalized registry: effective die area and power
    /// draw.
    pub fn effective() -> Self {
        Self {
            name: "effective".to_string(),
            rules: vec![Box::new(EffectiveDieArea), Box::new(PowerDraw)],
        }
    }

    /// A registry with caller-chosen rules.
    pub fn custom(name: impl Into<String>, rules: Vec<Box<dyn CompareRule>>) -> Self {
        Self {
            name: name.into(),
            rules,
        }
    }

    /// Registry name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rules in registry order.
    pub fn rules(&self) -> &[Box<dyn CompareRule>] {
        &self.rules
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rule names in registry order.
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }
}
