//! One-call comparison runs.
//!
//! [`compare`] wires the full pipeline together: generate heuristic
//! candidates from a rule set, bind any user-asserted rules, hand the
//! pool to the configured selection strategy, and summarize what the
//! accepted evidence covers. Callers that need finer control, such as
//! plugging in their own solver or inspecting the pool between phases,
//! use the underlying modules directly.

use crate::bom::Design;
use crate::error::{Error, Result};
use crate::heuristics::{self, Direction, Heuristic, RuleError, RuleSet};
use crate::ip::BranchBoundSolver;
use crate::report::CoverageReport;
use crate::select::{
    BruteConfig, BruteRunner, ExactConfig, ExactRunner, GreedyConfig, GreedyRunner, Selection,
};
use std::time::Instant;
use tracing::debug;

/// Selection strategy for a comparison run.
#[derive(Debug, Clone)]
pub enum Strategy {
    /// Optimal 0-1 program selection; the only strategy that can fold
    /// footprint estimates into the proof.
    Exact(ExactConfig),

    /// Fast marginal-coverage selection; may miss provable propositions.
    Greedy(GreedyConfig),

    /// Exhaustive subset enumeration over a capped pool.
    BruteForce(BruteConfig),
}

impl Strategy {
    fn name(&self) -> &'static str {
        match self {
            Strategy::Exact(_) => "exact",
            Strategy::Greedy(_) => "greedy",
            Strategy::BruteForce(_) => "brute_force",
        }
    }
}

/// Options for a comparison run.
#[derive(Debug, Clone)]
pub struct CompareOptions {
    /// The proposition to prove. `NotSure` is rejected.
    pub proposition: Direction,

    /// Selection strategy; defaults to exact with footprint slack.
    pub strategy: Strategy,

    /// User-asserted rules such as `"2 x DDR3 >= 1 x SoC"`.
    pub user_rules: Vec<String>,
}

impl CompareOptions {
    pub fn new(proposition: Direction) -> Self {
        Self {
            proposition,
            strategy: Strategy::Exact(ExactConfig::new()),
            user_rules: Vec::new(),
        }
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_user_rule(mut self, rule: impl Into<String>) -> Self {
        self.user_rules.push(rule.into());
        self
    }

    pub fn with_user_rules(mut self, rules: Vec<String>) -> Self {
        self.user_rules = rules;
        self
    }
}

/// Counters and phase timings for one run.
#[derive(Debug, Clone, Default)]
pub struct CompareStats {
    /// Candidates produced by rule generation.
    pub generated: usize,

    /// Heuristics instantiated from user rules.
    pub user_heuristics: usize,

    /// Time spent generating candidates, in milliseconds.
    pub generation_ms: f64,

    /// Time spent binding user rules, in milliseconds.
    pub user_rules_ms: f64,

    /// Time spent in the selection strategy, in milliseconds.
    pub selection_ms: f64,
}

/// Everything a comparison run produced.
#[derive(Debug, Clone)]
pub struct ComparisonOutcome {
    /// The proposition the run tried to prove.
    pub proposition: Direction,

    /// Whether the accepted evidence proves the proposition.
    pub proved: bool,

    /// The accepted evidence. The exact strategy always reports its
    /// best selection, even a partial or empty one; greedy and brute
    /// force report `None` when they found no proof.
    pub selection: Option<Selection>,

    /// Part-level coverage of the selection, when one exists.
    pub report: Option<CoverageReport>,

    /// User rules that failed to bind, with what went wrong.
    pub rule_errors: Vec<(String, RuleError)>,

    /// Counters and phase timings.
    pub stats: CompareStats,
}

/// Runs a full comparison of two designs.
///
/// Generates candidates for every part pair from `rules`, binds the
/// user rules in `options`, then asks the configured strategy for a
/// proving selection. Failed user rules are collected in the outcome
/// rather than raised; a `NotSure` proposition is rejected up front.
pub fn compare(
    design_a: &Design,
    design_b: &Design,
    rules: &RuleSet,
    options: &CompareOptions,
) -> Result<ComparisonOutcome> {
    if options.proposition == Direction::NotSure {
        return Err(Error::UnverifiableProposition);
    }

    let started = Instant::now();
    let mut candidates = heuristics::generate(design_a, design_b, rules);
    let generation_ms = elapsed_ms(&started);
    let generated = candidates.len();

    let started = Instant::now();
    let user = heuristics::apply_user_rules(
        design_a,
        design_b,
        &options.user_rules,
        options.proposition,
    )?;
    let user_rules_ms = elapsed_ms(&started);
    let user_heuristics = user.heuristics.len();
    if !user.errors.is_empty() {
        debug!(failed = user.errors.len(), "some user rules did not bind");
    }
    candidates.extend(user.heuristics);

    let started = Instant::now();
    let (proved, selection) = run_strategy(
        &candidates,
        design_a,
        design_b,
        options.proposition,
        &options.strategy,
    )?;
    let selection_ms = elapsed_ms(&started);
    debug!(
        strategy = options.strategy.name(),
        proposition = %options.proposition,
        proved,
        generation_ms,
        user_rules_ms,
        selection_ms,
        "comparison finished"
    );

    let report = selection
        .as_ref()
        .map(|s| CoverageReport::build(design_a, design_b, s));
    Ok(ComparisonOutcome {
        proposition: options.proposition,
        proved,
        selection,
        report,
        rule_errors: user.errors,
        stats: CompareStats {
            generated,
            user_heuristics,
            generation_ms,
            user_rules_ms,
            selection_ms,
        },
    })
}

fn run_strategy(
    candidates: &[Heuristic],
    design_a: &Design,
    design_b: &Design,
    proposition: Direction,
    strategy: &Strategy,
) -> Result<(bool, Option<Selection>)> {
    match strategy {
        Strategy::Exact(config) => {
            let result = ExactRunner::run(
                candidates,
                design_a,
                design_b,
                proposition,
                config,
                &BranchBoundSolver::new(),
            )?;
            let covered_design = match proposition {
                Direction::BMore => design_a,
                _ => design_b,
            };
            Ok((
                result.covered == covered_design.len(),
                Some(result.selection),
            ))
        }
        Strategy::Greedy(config) => {
            let result = GreedyRunner::run(candidates, design_a, design_b, proposition, config)?;
            Ok((result.selection.is_some(), result.selection))
        }
        Strategy::BruteForce(config) => {
            let result = BruteRunner::run(candidates, design_a, design_b, proposition, config)?;
            let selection = result.selections.into_iter().next();
            Ok((selection.is_some(), selection))
        }
    }
}

fn elapsed_ms(started: &Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1e3
}
