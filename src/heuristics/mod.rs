//! Heuristic candidates and the rules that produce them.
//!
//! A [`Heuristic`] is one piece of comparative evidence: a claim that a
//! group of parts in design A carries at least the footprint of a group
//! in design B (or vice versa), with a recorded direction and a human
//! readable explanation. Candidates come from two places:
//!
//! - [`generate`] crosses every part pair with a [`RuleSet`] of
//!   attribute comparisons ([`CompareRule`] implementations).
//! - [`user::apply_user_rules`] binds user-asserted rules such as
//!   `"2 x DDR3 >= 1 x SoC"` to concrete parts.
//!
//! Selection then picks a consistent subset of these candidates.

mod generate;
mod rules;
mod types;
pub mod user;

pub use generate::generate;
pub use rules::{DieArea, EffectiveDieArea, PackageArea, PowerDraw, ProcessNode, RuleSet};
pub use types::{CompareRule, Direction, Heuristic, Verdict};
pub use user::{apply_user_rules, RuleError, Side, UserRuleOutcome};
