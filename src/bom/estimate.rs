//! Footprint estimation: process-node regressions and passive-part tables.

/// Energy-per-area regression slope (per nm of node width).
const EPA_SLOPE: f64 = -0.0283;
/// Energy-per-area regression intercept.
const EPA_INTERCEPT: f64 = 1.702;
/// Gas-per-area regression slope (per nm of node width).
const GPA_SLOPE: f64 = -2.609;
/// Gas-per-area regression intercept.
const GPA_INTERCEPT: f64 = 168.207;

/// Energy-per-area regression evaluated at a node width in nm.
pub fn epa_at(node_nm: f64) -> f64 {
    EPA_SLOPE * node_nm + EPA_INTERCEPT
}

/// Gas-per-area regression evaluated at a node width in nm.
pub fn gpa_at(node_nm: f64) -> f64 {
    GPA_SLOPE * node_nm + GPA_INTERCEPT
}

/// Estimated fabrication footprint for a die at the given node width.
///
/// Wide (old) nodes drive the regression negative, so the magnitude is
/// what matters.
pub fn node_footprint(node_nm: f64) -> f64 {
    epa_at(node_nm).abs()
}

/// Process-normalization ratio between two node widths.
///
/// Mean of the energy-per-area and gas-per-area regression ratios, with
/// the second node as the baseline. Used to scale one die area into the
/// other side's process before comparing.
pub fn node_ratio(node_a_nm: f64, node_b_nm: f64) -> f64 {
    let epa_ratio = epa_at(node_a_nm) / epa_at(node_b_nm);
    let gpa_ratio = gpa_at(node_a_nm) / gpa_at(node_b_nm);
    (epa_ratio + gpa_ratio) / 2.0
}

/// Discrete passive categories with tabulated per-piece footprints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PassiveKind {
    Resistor,
    Capacitor,
    Inductor,
}

// Unit: gram CO2 eq. per piece, keyed by imperial package size code.
const RESISTOR_TABLE: &[(&str, f64)] = &[
    ("0201", 0.01),
    ("0402", 0.04),
    ("0603", 0.12),
    ("0805", 0.36),
    ("1206", 0.6),
];

const CAPACITOR_TABLE: &[(&str, f64)] = &[
    ("0201", 0.03589),
    ("0402", 0.1455),
    ("0603", 0.6111),
    ("0805", 1.067),
];

const INDUCTOR_TABLE: &[(&str, f64)] = &[
    ("0201", 0.02231),
    ("0402", 0.0776),
    ("0603", 0.3298),
    ("0805", 1.358),
];

/// FR-4 substrate footprint in gram CO2 eq. per mm^2 per layer.
pub const FR4_PER_MM2_LAYER: f64 = 0.006125;

/// Tabulated footprint for one passive of the given package size code.
///
/// Returns `None` for size codes outside the table; callers should skip
/// those rather than substitute a guess.
pub fn passive_footprint(kind: PassiveKind, size_code: &str) -> Option<f64> {
    let table = match kind {
        PassiveKind::Resistor => RESISTOR_TABLE,
        PassiveKind::Capacitor => CAPACITOR_TABLE,
        PassiveKind::Inductor => INDUCTOR_TABLE,
    };
    table
        .iter()
        .find(|(code, _)| *code == size_code)
        .map(|&(_, grams)| grams)
}

/// Footprint of a bare FR-4 board with the given area and layer count.
pub fn board_footprint(area_mm2: f64, layers: u32) -> f64 {
    FR4_PER_MM2_LAYER * area_mm2 * layers as f64
}
