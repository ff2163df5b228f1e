//! Exact selection strategy over a 0-1 integer program.

use super::{conflicting_indices, evidence_sides, Selection};
use crate::bom::Design;
use crate::error::{Error, Result};
use crate::heuristics::{Direction, Heuristic};
use crate::ip::{IpModel, IpSolution, IpSolver, LinExpr, Objective, SolverConfig, SolverStatus, VarId};
use std::collections::HashSet;
use tracing::debug;

/// Objective weight that breaks ties toward fewer selected heuristics
/// and footprint estimates. Must stay far below 1 divided by the
/// variable count so it can never trade away a covered part.
const TIE_BREAK: f64 = 1e-4;

/// Configuration for the exact strategy.
#[derive(Debug, Clone)]
pub struct ExactConfig {
    /// Drop mutually contradicting candidates before solving.
    pub filter_conflicts: bool,

    /// Allow parts without a heuristic to be balanced by their
    /// estimated footprints.
    pub footprint_slack: bool,

    /// Configuration passed through to the solver.
    pub solver: SolverConfig,
}

impl Default for ExactConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ExactConfig {
    pub fn new() -> Self {
        Self {
            filter_conflicts: true,
            footprint_slack: true,
            solver: SolverConfig::default(),
        }
    }

    pub fn with_filter_conflicts(mut self, filter: bool) -> Self {
        self.filter_conflicts = filter;
        self
    }

    pub fn with_footprint_slack(mut self, slack: bool) -> Self {
        self.footprint_slack = slack;
        self
    }

    pub fn with_solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }
}

/// Result of an exact selection run.
#[derive(Debug, Clone)]
pub struct ExactResult {
    /// The optimal selection (possibly empty when nothing is provable).
    pub selection: Selection,

    /// Covered-side parts accounted for, by heuristic or by estimate.
    /// The proposition is proved when this reaches the covered design's
    /// part count.
    pub covered: usize,

    /// Terminal solver status.
    pub status: SolverStatus,

    /// Solve time reported by the solver, in milliseconds.
    pub solve_time_ms: i64,
}

/// Executes the exact strategy.
///
/// Builds a 0-1 program with one variable per candidate and one per
/// covered-side part, then maximizes the number of covered parts. Each
/// evidence-side part may back at most one selected candidate; a
/// covered-side part counts only when a selected candidate or its own
/// footprint estimate accounts for it. Estimates on both sides must
/// balance: the estimated evidence mass has to outweigh the estimated
/// mass it covers. User-defined candidates are forced into the
/// selection; wrong-direction and contradicting candidates are forced
/// out. Ties are broken toward fewer heuristics and fewer estimates.
pub struct ExactRunner;

impl ExactRunner {
    /// Runs exact selection with the given solver.
    pub fn run<S: IpSolver>(
        heuristics: &[Heuristic],
        design_a: &Design,
        design_b: &Design,
        proposition: Direction,
        config: &ExactConfig,
        solver: &S,
    ) -> Result<ExactResult> {
        if proposition == Direction::NotSure {
            return Err(Error::UnverifiableProposition);
        }
        let from_is_a = proposition == Direction::AMore;
        let (from_design, to_design) = if from_is_a {
            (design_a, design_b)
        } else {
            (design_b, design_a)
        };
        let n_from = from_design.len();
        let n_to = to_design.len();

        let conflicted: HashSet<usize> = if config.filter_conflicts {
            conflicting_indices(heuristics).into_iter().collect()
        } else {
            HashSet::new()
        };
        let ignored: Vec<bool> = heuristics
            .iter()
            .enumerate()
            .map(|(i, h)| {
                !h.user_defined && (h.direction != proposition || conflicted.contains(&i))
            })
            .collect();

        let mut model = IpModel::new("selection");
        let cover_vars: Vec<VarId> = (0..n_to)
            .map(|q| model.add_bool_var(format!("cov_{q}")))
            .collect();
        let h_vars: Vec<VarId> = (0..heuristics.len())
            .map(|i| model.add_bool_var(format!("h_{i}")))
            .collect();
        for (i, h) in heuristics.iter().enumerate() {
            if h.user_defined {
                model.fix(h_vars[i], true);
            } else if ignored[i] {
                model.fix(h_vars[i], false);
            }
        }

        // which live candidates touch each part
        let mut from_touch: Vec<Vec<VarId>> = vec![Vec::new(); n_from];
        let mut to_touch: Vec<Vec<VarId>> = vec![Vec::new(); n_to];
        for (i, h) in heuristics.iter().enumerate() {
            if ignored[i] {
                continue;
            }
            let (from, to) = evidence_sides(h, proposition);
            for &p in from {
                match from_touch.get_mut(p) {
                    Some(vars) => vars.push(h_vars[i]),
                    None => {
                        return Err(Error::InvalidModel(format!(
                            "unknown part id {p} on the evidence side"
                        )))
                    }
                }
            }
            for &q in to {
                match to_touch.get_mut(q) {
                    Some(vars) => vars.push(h_vars[i]),
                    None => {
                        return Err(Error::InvalidModel(format!(
                            "unknown part id {q} on the covered side"
                        )))
                    }
                }
            }
        }

        let slack = if config.footprint_slack {
            let from_slack: Vec<VarId> = (0..n_from)
                .map(|p| model.add_bool_var(format!("sf_{p}")))
                .collect();
            let to_slack: Vec<VarId> = (0..n_to)
                .map(|q| model.add_bool_var(format!("st_{q}")))
                .collect();
            let mut margin = LinExpr::new();
            for (p, footprint) in from_design.footprints().into_iter().enumerate() {
                match footprint {
                    Some(grams) => margin.add(from_slack[p], grams),
                    None => model.fix(from_slack[p], false),
                }
            }
            for (q, footprint) in to_design.footprints().into_iter().enumerate() {
                match footprint {
                    Some(grams) => margin.add(to_slack[q], -grams),
                    None => model.fix(to_slack[q], false),
                }
            }
            // estimated evidence must outweigh the estimates it covers
            model.add_ge(margin, 0.0);
            Some((from_slack, to_slack))
        } else {
            None
        };

        for (p, touching) in from_touch.iter().enumerate() {
            let mut lhs = LinExpr::sum(touching);
            if let Some((from_slack, _)) = &slack {
                lhs.add(from_slack[p], 1.0);
            }
            model.add_le(lhs, 1.0);
        }
        for (q, touching) in to_touch.iter().enumerate() {
            let mut lhs = LinExpr::new().with(cover_vars[q], 1.0);
            for &var in touching {
                lhs.add(var, -1.0);
            }
            if let Some((_, to_slack)) = &slack {
                lhs.add(to_slack[q], -1.0);
            }
            model.add_le(lhs, 0.0);
        }

        let mut objective = LinExpr::sum(&cover_vars);
        for &var in &h_vars {
            objective.add(var, -TIE_BREAK);
        }
        if let Some((from_slack, to_slack)) = &slack {
            for &var in from_slack.iter().chain(to_slack.iter()) {
                objective.add(var, -TIE_BREAK);
            }
        }
        model.set_objective(Objective::Maximize(objective));
        model.validate().map_err(Error::InvalidModel)?;
        debug!(
            vars = model.var_count(),
            constraints = model.constraint_count(),
            "selection model built"
        );

        let solution = solver.solve(&model, &config.solver);
        if !solution.is_solution_found() {
            return Err(Error::Solver {
                status: solution.status,
            });
        }

        let selected: Vec<Heuristic> = heuristics
            .iter()
            .enumerate()
            .filter(|(i, _)| solution.value(h_vars[*i]))
            .map(|(_, h)| h.clone())
            .collect();
        let covered = cover_vars
            .iter()
            .filter(|&&var| solution.value(var))
            .count();
        let (footprint_from, footprint_to) = match &slack {
            Some((from_slack, to_slack)) => (
                selected_indices(from_slack, &solution),
                selected_indices(to_slack, &solution),
            ),
            None => (Vec::new(), Vec::new()),
        };
        let (footprint_a, footprint_b) = if from_is_a {
            (footprint_from, footprint_to)
        } else {
            (footprint_to, footprint_from)
        };
        debug!(
            status = ?solution.status,
            covered,
            selected = selected.len(),
            "exact selection solved"
        );
        Ok(ExactResult {
            selection: Selection {
                heuristics: selected,
                footprint_a,
                footprint_b,
            },
            covered,
            status: solution.status,
            solve_time_ms: solution.solve_time_ms,
        })
    }
}

fn selected_indices(vars: &[VarId], solution: &IpSolution) -> Vec<usize> {
    vars.iter()
        .enumerate()
        .filter(|(_, &var)| solution.value(var))
        .map(|(idx, _)| idx)
        .collect()
}
