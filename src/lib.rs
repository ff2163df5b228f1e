//! Comparative life-cycle assessment over electronics bills of materials.
//!
//! Answers one question: can design A be shown to carry at least the
//! embodied carbon of design B, given incomplete part data? Absolute
//! footprints for electronics are rarely trustworthy, so the engine
//! argues in relative terms instead. Evidence comes as **heuristics**,
//! per-part-pair claims derived from comparable attributes, and a proof
//! is a consistent subset of them covering every part of the lesser
//! design:
//!
//! - **BOM model**: [`PartSpec`] rows expand into [`Design`]s of
//!   per-instance parts; process-node regressions and passive tables
//!   estimate footprints where none are declared.
//! - **Heuristics**: a [`RuleSet`] of attribute comparisons crossed
//!   over every part pair, plus user-asserted rules such as
//!   `"2 x DDR3 >= 1 x SoC"`. Contradicting claims cancel each other.
//! - **Selection**: three interchangeable strategies pick the proving
//!   subset — exact over a 0-1 integer program, greedy by marginal
//!   coverage, or brute-force enumeration.
//! - **Reporting**: a [`CoverageReport`] summarizes which part groups
//!   the accepted evidence accounts for.
//!
//! # Architecture
//!
//! [`bom`] holds the input model, [`heuristics`] produces candidates,
//! [`select`] picks proving subsets (the exact strategy modeling over
//! the [`ip`] layer), and [`report`] summarizes coverage. [`compare`]
//! ties the phases into one call. Each layer is usable on its own;
//! nothing below [`compare`] knows about run options.
//!
//! # Example
//!
//! ```
//! use deltalca::{compare, CompareOptions, Design, Direction, PartSpec, RuleSet, Strategy};
//! use deltalca::select::GreedyConfig;
//!
//! let a = Design::from_specs("A", vec![PartSpec::new("MCU").with_die_area(9.0)]);
//! let b = Design::from_specs("B", vec![PartSpec::new("SoC").with_die_area(4.0)]);
//!
//! let options = CompareOptions::new(Direction::AMore)
//!     .with_strategy(Strategy::Greedy(GreedyConfig::default().with_seed(7)));
//! let outcome = compare(&a, &b, &RuleSet::standard(), &options)?;
//! assert!(outcome.proved);
//! # Ok::<(), deltalca::Error>(())
//! ```

pub mod bom;
pub mod compare;
pub mod error;
pub mod heuristics;
pub mod ip;
pub mod report;
pub mod select;

pub use bom::{Design, Part, PartSpec};
pub use compare::{compare, CompareOptions, CompareStats, ComparisonOutcome, Strategy};
pub use error::{Error, Result};
pub use heuristics::{CompareRule, Direction, Heuristic, RuleError, RuleSet, Verdict};
pub use report::{CoverageReport, PartGroup, SideCoverage};
pub use select::Selection;
