//! IP solver interface and the bundled branch-and-bound implementation.

use super::model::{Comparator, IpModel, LinExpr, Objective, EPS};
use super::VarId;
use std::time::{Duration, Instant};
use tracing::debug;

/// Status of the solver after execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverStatus {
    /// Proven optimal solution found.
    Optimal,
    /// Feasible (but not necessarily optimal) solution found.
    Feasible,
    /// No feasible solution exists.
    Infeasible,
    /// Model is invalid or malformed.
    ModelInvalid,
    /// Solver exceeded time limit without finding a solution.
    Timeout,
    /// No solution found for unknown reasons.
    Unknown,
}

/// Solution from an IP solver.
#[derive(Debug, Clone)]
pub struct IpSolution {
    /// Solver status.
    pub status: SolverStatus,
    /// Objective function value (if the model has an objective).
    pub objective_value: Option<f64>,
    /// Variable assignments, indexed by [`VarId`].
    pub values: Vec<bool>,
    /// Solve time in milliseconds.
    pub solve_time_ms: i64,
    /// Search nodes explored.
    pub nodes_explored: u64,
}

impl IpSolution {
    /// Creates an empty solution with the given status.
    pub fn empty(status: SolverStatus) -> Self {
        Self {
            status,
            objective_value: None,
            values: Vec::new(),
            solve_time_ms: 0,
            nodes_explored: 0,
        }
    }

    /// Whether a feasible solution was found.
    pub fn is_solution_found(&self) -> bool {
        matches!(self.status, SolverStatus::Optimal | SolverStatus::Feasible)
    }

    /// Returns the assigned value of a variable (false if absent).
    pub fn value(&self, var: VarId) -> bool {
        self.values.get(var.0).copied().unwrap_or(false)
    }
}

/// Solver configuration.
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Maximum solve time in milliseconds. Non-positive disables the limit.
    pub time_limit_ms: i64,
    /// Stop after finding the first feasible solution.
    pub stop_after_first: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            time_limit_ms: 60_000,
            stop_after_first: false,
        }
    }
}

impl SolverConfig {
    /// Sets the time limit in milliseconds.
    pub fn with_time_limit_ms(mut self, ms: i64) -> Self {
        self.time_limit_ms = ms;
        self
    }

    /// Sets whether to stop at the first feasible solution.
    pub fn with_stop_after_first(mut self, stop: bool) -> Self {
        self.stop_after_first = stop;
        self
    }
}

/// Trait for IP solver implementations.
///
/// Implementors provide the actual optimization logic. This can wrap
/// external MILP solvers or provide custom search.
pub trait IpSolver {
    /// Solves the model and returns a solution.
    fn solve(&self, model: &IpModel, config: &SolverConfig) -> IpSolution;
}

/// Depth-first branch and bound over the boolean variables.
///
/// Branches in variable order, value true first. Nodes are pruned when
/// some constraint can no longer be satisfied by any completion of the
/// partial assignment (interval reasoning over the free variables), or
/// when an optimistic objective bound cannot beat the incumbent. On
/// completion the incumbent is the proven optimum.
pub struct BranchBoundSolver;

impl BranchBoundSolver {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BranchBoundSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl IpSolver for BranchBoundSolver {
    fn solve(&self, model: &IpModel, config: &SolverConfig) -> IpSolution {
        if let Err(err) = model.validate() {
            debug!(model = model.name.as_str(), error = err.as_str(), "invalid model");
            return IpSolution::empty(SolverStatus::ModelInvalid);
        }

        let start_time = Instant::now();

        // Normalize to maximization; remember to restore the sign.
        let (objective, negated) = match &model.objective {
            None => (None, false),
            Some(Objective::Maximize(expr)) => (Some(expr.clone()), false),
            Some(Objective::Minimize(expr)) => {
                let flipped = LinExpr {
                    terms: expr.terms.iter().map(|&(var, c)| (var, -c)).collect(),
                };
                (Some(flipped), true)
            }
        };

        let mut search = Search {
            model,
            objective,
            values: vec![false; model.var_count()],
            best: None,
            nodes: 0,
            deadline: (config.time_limit_ms > 0)
                .then(|| start_time + Duration::from_millis(config.time_limit_ms as u64)),
            timed_out: false,
            stop_after_first: config.stop_after_first,
            stopped: false,
        };
        search.dfs(0);

        let status = match (&search.best, search.timed_out, search.stopped) {
            (Some(_), false, false) => SolverStatus::Optimal,
            (Some(_), _, _) => SolverStatus::Feasible,
            (None, true, _) => SolverStatus::Timeout,
            (None, false, _) => SolverStatus::Infeasible,
        };
        let solution = match search.best {
            Some((value, values)) => IpSolution {
                status,
                objective_value: model
                    .objective
                    .as_ref()
                    .map(|_| if negated { -value } else { value }),
                values,
                solve_time_ms: start_time.elapsed().as_millis() as i64,
                nodes_explored: search.nodes,
            },
            None => IpSolution {
                solve_time_ms: start_time.elapsed().as_millis() as i64,
                nodes_explored: search.nodes,
                ..IpSolution::empty(status)
            },
        };
        debug!(
            model = model.name.as_str(),
            status = ?solution.status,
            nodes = solution.nodes_explored,
            ms = solution.solve_time_ms,
            "branch and bound finished"
        );
        solution
    }
}

struct Search<'a> {
    model: &'a IpModel,
    /// Objective normalized to maximization.
    objective: Option<LinExpr>,
    values: Vec<bool>,
    best: Option<(f64, Vec<bool>)>,
    nodes: u64,
    deadline: Option<Instant>,
    timed_out: bool,
    stop_after_first: bool,
    stopped: bool,
}

impl Search<'_> {
    fn dfs(&mut self, depth: usize) {
        if self.timed_out || self.stopped {
            return;
        }
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                self.timed_out = true;
                return;
            }
        }
        self.nodes += 1;

        if !self.feasible_so_far(depth) {
            return;
        }
        if let Some((incumbent, _)) = &self.best {
            if self.upper_bound(depth) <= incumbent + EPS {
                return;
            }
        }
        if depth == self.model.var_count() {
            let value = self
                .objective
                .as_ref()
                .map_or(0.0, |expr| expr.eval(&self.values));
            self.best = Some((value, self.values.clone()));
            if self.stop_after_first {
                self.stopped = true;
            }
            return;
        }

        let choices: &[bool] = match self.model.vars[depth].fixed {
            Some(true) => &[true],
            Some(false) => &[false],
            None => &[true, false],
        };
        for &choice in choices {
            self.values[depth] = choice;
            self.dfs(depth + 1);
        }
    }

    /// Whether every constraint can still be satisfied by some
    /// completion of the assignment prefix `values[..depth]`.
    fn feasible_so_far(&self, depth: usize) -> bool {
        for constraint in &self.model.constraints {
            let mut lo = 0.0;
            let mut hi = 0.0;
            for &(var, coeff) in &constraint.lhs.terms {
                match self.contribution(var, coeff, depth) {
                    Some(exact) => {
                        lo += exact;
                        hi += exact;
                    }
                    None => {
                        lo += coeff.min(0.0);
                        hi += coeff.max(0.0);
                    }
                }
            }
            let ok = match constraint.cmp {
                Comparator::Le => lo <= constraint.rhs + EPS,
                Comparator::Ge => hi >= constraint.rhs - EPS,
                Comparator::Eq => {
                    lo <= constraint.rhs + EPS && hi >= constraint.rhs - EPS
                }
            };
            if !ok {
                return false;
            }
        }
        true
    }

    /// Optimistic objective value reachable from this node.
    fn upper_bound(&self, depth: usize) -> f64 {
        let Some(objective) = &self.objective else {
            return 0.0;
        };
        let mut bound = 0.0;
        for &(var, coeff) in &objective.terms {
            match self.contribution(var, coeff, depth) {
                Some(exact) => bound += exact,
                None => bound += coeff.max(0.0),
            }
        }
        bound
    }

    /// Exact contribution of a term if the variable is decided
    /// (assigned below `depth` or fixed), `None` if still free.
    fn contribution(&self, var: VarId, coeff: f64, depth: usize) -> Option<f64> {
        if var.0 < depth {
            Some(if self.values[var.0] { coeff } else { 0.0 })
        } else {
            self.model.vars[var.0]
                .fixed
                .map(|v| if v { coeff } else { 0.0 })
        }
    }
}
