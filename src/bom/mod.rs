//! Bills of materials: component records, designs, and footprint tables.
//!
//! A [`Design`] is one side of a comparison, built from declared
//! [`PartSpec`] rows. Rows carry attribute data and counts; construction
//! expands them into per-instance [`Part`] records with dense ids, which
//! every other module addresses parts by.
//!
//! The [`estimate`] submodule holds the process-node footprint
//! regressions and the passive-part carbon tables. Callers that want
//! board substrate or discrete passives in the accounting fold them into
//! footprint-only rows (a synthetic "Board" part, say) before building
//! the design; the engine treats those like any other part with a
//! declared footprint.

pub mod estimate;
mod part;

pub use estimate::PassiveKind;
pub use part::{Design, Part, PartSpec};
