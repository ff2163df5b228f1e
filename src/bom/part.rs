//! Component records and design construction.

use super::estimate;

/// A single component instance on one side of a comparison.
///
/// Ids are dense (`0..design.len()`), unique per side, and assigned at
/// construction. Every attribute except the id and name is optional;
/// `None` means "unknown" and must make comparisons inconclusive, never
/// be treated as zero.
#[derive(Debug, Clone)]
pub struct Part {
    /// Dense per-side id.
    pub id: usize,
    /// Part name (not required to be unique; counts expand to instances).
    pub name: String,
    /// Die area in mm^2.
    pub die_area: Option<f64>,
    /// Power draw in W.
    pub power_draw: Option<f64>,
    /// Smallest package variant area in mm^2.
    pub package_area: Option<f64>,
    /// Process node width in nm.
    pub process_node: Option<f64>,
    /// Memory size in KB.
    pub memory_size: Option<f64>,
    /// Number of GPIO pins.
    pub gpio_count: Option<u32>,
    /// Declared or estimated carbon footprint in gram CO2 eq.
    pub carbon_footprint: Option<f64>,
}

/// A declared BOM row: component attributes plus an instance count.
///
/// # Examples
///
/// ```
/// use deltalca::bom::PartSpec;
///
/// let row = PartSpec::new("ATmega32U4")
///     .with_count(2)
///     .with_die_area(5.76)
///     .with_process_node(90.0);
/// assert_eq!(row.count, 2);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PartSpec {
    /// Part name.
    pub name: String,
    /// Number of instances of this row.
    pub count: usize,
    /// Die area in mm^2.
    pub die_area: Option<f64>,
    /// Power draw in W.
    pub power_draw: Option<f64>,
    /// Smallest package variant area in mm^2.
    pub package_area: Option<f64>,
    /// Process node width in nm.
    pub process_node: Option<f64>,
    /// Memory size in KB.
    pub memory_size: Option<f64>,
    /// Number of GPIO pins.
    pub gpio_count: Option<u32>,
    /// Declared carbon footprint in gram CO2 eq. Wins over estimation.
    pub carbon_footprint: Option<f64>,
}

impl PartSpec {
    /// Creates a row with one instance and no known attributes.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            count: 1,
            die_area: None,
            power_draw: None,
            package_area: None,
            process_node: None,
            memory_size: None,
            gpio_count: None,
            carbon_footprint: None,
        }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn with_die_area(mut self, mm2: f64) -> Self {
        self.die_area = Some(mm2);
        self
    }

    pub fn with_power_draw(mut self, watts: f64) -> Self {
        self.power_draw = Some(watts);
        self
    }

    pub fn with_package_area(mut self, mm2: f64) -> Self {
        self.package_area = Some(mm2);
        self
    }

    pub fn with_process_node(mut self, nm: f64) -> Self {
        self.process_node = Some(nm);
        self
    }

    pub fn with_memory_size(mut self, kb: f64) -> Self {
        self.memory_size = Some(kb);
        self
    }

    pub fn with_gpio_count(mut self, pins: u32) -> Self {
        self.gpio_count = Some(pins);
        self
    }

    pub fn with_carbon_footprint(mut self, grams: f64) -> Self {
        self.carbon_footprint = Some(grams);
        self
    }

    /// Footprint this row's instances will carry: the declared value, or
    /// the process-node estimate when both node and die area are known.
    fn resolved_footprint(&self) -> Option<f64> {
        if self.carbon_footprint.is_some() {
            return self.carbon_footprint;
        }
        match (self.process_node, self.die_area) {
            (Some(node), Some(_)) => Some(estimate::node_footprint(node)),
            _ => None,
        }
    }
}

/// One side of a comparison: an expanded, immutable list of parts.
#[derive(Debug, Clone)]
pub struct Design {
    label: String,
    parts: Vec<Part>,
}

impl Design {
    /// Expands declared rows into per-instance parts with dense ids.
    ///
    /// A row with `count` N becomes N parts sharing the row's attributes.
    /// Ids follow row order, then instance order within a row.
    pub fn from_specs(label: impl Into<String>, specs: Vec<PartSpec>) -> Self {
        let mut parts = Vec::new();
        for spec in &specs {
            let footprint = spec.resolved_footprint();
            for _ in 0..spec.count {
                parts.push(Part {
                    id: parts.len(),
                    name: spec.name.clone(),
                    die_area: spec.die_area,
                    power_draw: spec.power_draw,
                    package_area: spec.package_area,
                    process_node: spec.process_node,
                    memory_size: spec.memory_size,
                    gpio_count: spec.gpio_count,
                    carbon_footprint: footprint,
                });
            }
        }
        Self {
            label: label.into(),
            parts,
        }
    }

    /// Design label (diagnostic only).
    pub fn label(&self) -> &str {
        &self.label
    }

    /// All parts, in id order.
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Number of parts.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Whether the design has no parts.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Per-part footprints, indexed by id.
    pub fn footprints(&self) -> Vec<Option<f64>> {
        self.parts.iter().map(|p| p.carbon_footprint).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_specs_expands_counts() {
        let design = Design::from_specs(
            "A",
            vec![
                PartSpec::new("MCU").with_die_area(4.0),
                PartSpec::new("RAM").with_count(3),
                PartSpec::new("PHY"),
            ],
        );
        assert_eq!(design.len(), 5);
        let ids: Vec<usize> = design.parts().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
        let names: Vec<&str> = design.parts().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["MCU", "RAM", "RAM", "RAM", "PHY"]);
    }

    #[test]
    fn test_footprint_estimated_from_node() {
        let design = Design::from_specs(
            "A",
            vec![PartSpec::new("MCU")
                .with_die_area(4.0)
                .with_process_node(28.0)],
        );
        let f = design.parts()[0].carbon_footprint.unwrap();
        assert!((f - 0.9096).abs() < 1e-10);
    }

    #[test]
    fn test_declared_footprint_wins() {
        let design = Design::from_specs(
            "A",
            vec![PartSpec::new("MCU")
                .with_die_area(4.0)
                .with_process_node(28.0)
                .with_carbon_footprint(7.5)],
        );
        assert_eq!(design.parts()[0].carbon_footprint, Some(7.5));
    }

    #[test]
    fn test_no_estimate_without_die_area() {
        // a node width alone does not produce an estimate
        let design = Design::from_specs("A", vec![PartSpec::new("MCU").with_process_node(28.0)]);
        assert_eq!(design.parts()[0].carbon_footprint, None);
    }

    #[test]
    fn test_zero_count_row() {
        let design = Design::from_specs(
            "A",
            vec![
                PartSpec::new("MCU").with_count(0),
                PartSpec::new("RAM").with_count(2),
            ],
        );
        assert_eq!(design.len(), 2);
        assert_eq!(design.parts()[0].name, "RAM");
        assert_eq!(design.parts()[0].id, 0);
    }
}
