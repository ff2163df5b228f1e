//! 0-1 integer program model definition.

/// Floating-point tolerance for constraint satisfaction and pruning.
pub(crate) const EPS: f64 = 1e-9;

/// Handle to a boolean variable in an [`IpModel`].
///
/// Returned by [`IpModel::add_bool_var`]. Indexes the model's variable
/// list and the value vector of a solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VarId(pub usize);

/// A boolean decision variable.
#[derive(Debug, Clone)]
pub struct BoolVar {
    /// Variable name (for diagnostics; uniqueness is not required).
    pub name: String,
    /// Fixed value, if any.
    pub fixed: Option<bool>,
}

/// A linear expression over boolean variables.
///
/// Terms are (variable, coefficient) pairs; a variable may appear more
/// than once, in which case its coefficients add up.
#[derive(Debug, Clone, Default)]
pub struct LinExpr {
    /// (variable, coefficient) pairs.
    pub terms: Vec<(VarId, f64)>,
}

impl LinExpr {
    /// Creates an empty expression.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a unit-coefficient sum over the given variables.
    pub fn sum(vars: &[VarId]) -> Self {
        Self {
            terms: vars.iter().map(|&var| (var, 1.0)).collect(),
        }
    }

    /// Appends a term.
    pub fn add(&mut self, var: VarId, coeff: f64) {
        self.terms.push((var, coeff));
    }

    /// Builder form of [`add`](Self::add).
    pub fn with(mut self, var: VarId, coeff: f64) -> Self {
        self.add(var, coeff);
        self
    }

    /// Evaluates the expression under an assignment.
    ///
    /// Variables beyond the end of `values` count as false.
    pub fn eval(&self, values: &[bool]) -> f64 {
        self.terms
            .iter()
            .filter(|(var, _)| values.get(var.0).copied().unwrap_or(false))
            .map(|&(_, coeff)| coeff)
            .sum()
    }

    /// Whether the expression has no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Comparison operator of a linear constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    /// `lhs <= rhs`
    Le,
    /// `lhs >= rhs`
    Ge,
    /// `lhs == rhs`
    Eq,
}

/// A linear constraint `lhs <cmp> rhs`.
#[derive(Debug, Clone)]
pub struct Constraint {
    /// Left-hand side expression.
    pub lhs: LinExpr,
    /// Comparison operator.
    pub cmp: Comparator,
    /// Right-hand side constant.
    pub rhs: f64,
}

impl Constraint {
    /// Whether the constraint holds under an assignment, within
    /// floating-point tolerance.
    pub fn satisfied(&self, values: &[bool]) -> bool {
        let lhs = self.lhs.eval(values);
        match self.cmp {
            Comparator::Le => lhs <= self.rhs + EPS,
            Comparator::Ge => lhs >= self.rhs - EPS,
            Comparator::Eq => (lhs - self.rhs).abs() <= EPS,
        }
    }
}

/// Objective function for the model.
#[derive(Debug, Clone)]
pub enum Objective {
    /// Minimize a linear expression.
    Minimize(LinExpr),
    /// Maximize a linear expression.
    Maximize(LinExpr),
}

/// A 0-1 integer program.
///
/// Contains boolean variables, linear constraints, and an optional
/// objective function.
///
/// # Examples
///
/// ```
/// use deltalca::ip::{IpModel, LinExpr, Objective};
///
/// let mut model = IpModel::new("example");
/// let x = model.add_bool_var("x");
/// let y = model.add_bool_var("y");
/// model.add_le(LinExpr::sum(&[x, y]), 1.0);
/// model.set_objective(Objective::Maximize(LinExpr::sum(&[x, y])));
/// assert!(model.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct IpModel {
    /// Model name.
    pub name: String,
    /// Boolean variables, indexed by [`VarId`].
    pub vars: Vec<BoolVar>,
    /// Constraints.
    pub constraints: Vec<Constraint>,
    /// Objective function.
    pub objective: Option<Objective>,
}

impl IpModel {
    /// Creates a new empty model.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vars: Vec::new(),
            constraints: Vec::new(),
            objective: None,
        }
    }

    /// Adds a boolean variable and returns its handle.
    pub fn add_bool_var(&mut self, name: impl Into<String>) -> VarId {
        let id = VarId(self.vars.len());
        self.vars.push(BoolVar {
            name: name.into(),
            fixed: None,
        });
        id
    }

    /// Fixes a variable to a value.
    pub fn fix(&mut self, var: VarId, value: bool) {
        if let Some(v) = self.vars.get_mut(var.0) {
            v.fixed = Some(value);
        }
    }

    /// Adds a constraint.
    pub fn add_constraint(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    /// Convenience: add `lhs <= rhs`.
    pub fn add_le(&mut self, lhs: LinExpr, rhs: f64) {
        self.constraints.push(Constraint {
            lhs,
            cmp: Comparator::Le,
            rhs,
        });
    }

    /// Convenience: add `lhs >= rhs`.
    pub fn add_ge(&mut self, lhs: LinExpr, rhs: f64) {
        self.constraints.push(Constraint {
            lhs,
            cmp: Comparator::Ge,
            rhs,
        });
    }

    /// Sets the objective function.
    pub fn set_objective(&mut self, objective: Objective) {
        self.objective = Some(objective);
    }

    /// Validates the model for consistency.
    ///
    /// Checks that every referenced variable exists and that every
    /// coefficient and right-hand side is finite.
    pub fn validate(&self) -> Result<(), String> {
        for (idx, constraint) in self.constraints.iter().enumerate() {
            if !constraint.rhs.is_finite() {
                return Err(format!("constraint {idx}: non-finite rhs"));
            }
            self.check_expr(&constraint.lhs, &format!("constraint {idx}"))?;
        }
        if let Some(Objective::Minimize(expr) | Objective::Maximize(expr)) = &self.objective {
            self.check_expr(expr, "objective")?;
        }
        Ok(())
    }

    fn check_expr(&self, expr: &LinExpr, context: &str) -> Result<(), String> {
        for &(var, coeff) in &expr.terms {
            if var.0 >= self.vars.len() {
                return Err(format!("{context}: undefined variable id {}", var.0));
            }
            if !coeff.is_finite() {
                return Err(format!(
                    "{context}: non-finite coefficient for {}",
                    self.vars[var.0].name
                ));
            }
        }
        Ok(())
    }

    /// Returns the number of variables.
    pub fn var_count(&self) -> usize {
        self.vars.len()
    }

    /// Returns the number of constraints.
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }
}
