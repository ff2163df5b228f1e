//! 0-1 integer programming layer.
//!
//! Provides a small modeling language over boolean decision variables
//! with linear constraints, and a solver seam for optimizing over it.
//!
//! # Key Components
//!
//! - **Variables**: [`BoolVar`], addressed by [`VarId`] — binary decisions
//! - **Expressions**: [`LinExpr`] — linear combinations of variables
//! - **Model**: [`IpModel`] — container for variables, constraints, objective
//! - **Solver**: [`IpSolver`] trait — interface for solver implementations
//!
//! # Design
//!
//! The modeling layer is independent of any particular backend. The
//! [`IpSolver`] trait allows plugging in external MILP solvers; the
//! bundled [`BranchBoundSolver`] is a depth-first branch and bound that
//! proves optimality on the model sizes the selection layer produces.
//!
//! # References
//!
//! Wolsey (1998), "Integer Programming"

mod model;
mod solver;

pub use model::{BoolVar, Comparator, Constraint, IpModel, LinExpr, Objective, VarId};
pub use solver::{BranchBoundSolver, IpSolution, IpSolver, SolverConfig, SolverStatus};
