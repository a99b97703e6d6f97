//! Solver-independent MILP model: variables, linear expressions, constraints.
//!
//! A [`Model`] is plain data. It is lowered to SCIP in [`crate::solver`] and
//! is never touched again once handed over.

use std::fmt;

/// Handle to a variable of a [`Model`]. Indexes the solver's value vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(usize);

impl VarId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Domain of a decision variable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Domain {
    /// {0, 1}
    Binary,
    /// Integers in `[lower, upper]`.
    Integer { lower: f64, upper: f64 },
    /// Reals in `[lower, +inf)`.
    Continuous { lower: f64 },
}

impl Domain {
    /// Bounds as `(lower, upper)` with an infinite upper side for continuous
    /// variables.
    pub fn bounds(self) -> (f64, f64) {
        match self {
            Domain::Binary => (0., 1.),
            Domain::Integer { lower, upper } => (lower, upper),
            Domain::Continuous { lower } => (lower, f64::INFINITY),
        }
    }

    /// Whether solved values must be snapped to the nearest integer.
    pub fn is_integral(self) -> bool {
        !matches!(self, Domain::Continuous { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    pub domain: Domain,
}

/// `Σ coef·var + constant`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinearExpr {
    terms: Vec<(VarId, f64)>,
    constant: f64,
}

impl LinearExpr {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn constant(value: f64) -> Self {
        Self {
            terms: Vec::new(),
            constant: value,
        }
    }

    /// `1·var`
    pub fn var(var: VarId) -> Self {
        Self::new().term(var, 1.)
    }

    /// Sum of the given variables, each with coefficient 1.
    pub fn sum(vars: impl IntoIterator<Item = VarId>) -> Self {
        vars.into_iter().fold(Self::new(), |expr, var| expr.term(var, 1.))
    }

    pub fn term(mut self, var: VarId, coef: f64) -> Self {
        self.terms.push((var, coef));
        self
    }

    pub fn plus(mut self, other: LinearExpr) -> Self {
        self.terms.extend(other.terms);
        self.constant += other.constant;
        self
    }

    pub fn scaled(mut self, factor: f64) -> Self {
        for (_, coef) in &mut self.terms {
            *coef *= factor;
        }
        self.constant *= factor;
        self
    }

    pub fn terms(&self) -> &[(VarId, f64)] {
        &self.terms
    }

    pub fn constant_term(&self) -> f64 {
        self.constant
    }

    /// Coefficients merged per variable, in first-appearance order.
    pub fn collected(&self) -> Vec<(VarId, f64)> {
        let mut merged: Vec<(VarId, f64)> = Vec::with_capacity(self.terms.len());
        for &(var, coef) in &self.terms {
            match merged.iter_mut().find(|(v, _)| *v == var) {
                Some((_, acc)) => *acc += coef,
                None => merged.push((var, coef)),
            }
        }
        merged
    }

    /// Evaluates the expression; `values` is indexed by [`VarId::index`].
    pub fn evaluate(&self, values: &[f64]) -> f64 {
        self.terms
            .iter()
            .map(|&(var, coef)| coef * values[var.index()])
            .sum::<f64>()
            + self.constant
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    LessEq,
    GreaterEq,
    Equal,
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Comparison::LessEq => "<=",
            Comparison::GreaterEq => ">=",
            Comparison::Equal => "==",
        })
    }
}

/// `expr <cmp> rhs`, named for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    pub name: String,
    pub expr: LinearExpr,
    pub cmp: Comparison,
    pub rhs: f64,
}

impl Constraint {
    /// Row bounds `(lhs, rhs)` on the variable part of the expression, with the
    /// expression constant moved across.
    pub fn row_bounds(&self) -> (f64, f64) {
        let bound = self.rhs - self.expr.constant_term();
        match self.cmp {
            Comparison::LessEq => (f64::NEG_INFINITY, bound),
            Comparison::GreaterEq => (bound, f64::INFINITY),
            Comparison::Equal => (bound, bound),
        }
    }

    pub fn is_satisfied(&self, values: &[f64], tolerance: f64) -> bool {
        let lhs = self.expr.evaluate(values);
        match self.cmp {
            Comparison::LessEq => lhs <= self.rhs + tolerance,
            Comparison::GreaterEq => lhs >= self.rhs - tolerance,
            Comparison::Equal => (lhs - self.rhs).abs() <= tolerance,
        }
    }
}

/// Variables, an objective to minimise, and constraints.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    name: String,
    vars: Vec<Variable>,
    objective: LinearExpr,
    constraints: Vec<Constraint>,
}

impl Model {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vars: Vec::new(),
            objective: LinearExpr::new(),
            constraints: Vec::new(),
        }
    }

    pub fn add_var(&mut self, name: impl Into<String>, domain: Domain) -> VarId {
        self.vars.push(Variable {
            name: name.into(),
            domain,
        });
        VarId(self.vars.len() - 1)
    }

    pub fn set_objective(&mut self, objective: LinearExpr) {
        self.objective = objective;
    }

    pub fn add_constraint(
        &mut self,
        name: impl Into<String>,
        expr: LinearExpr,
        cmp: Comparison,
        rhs: f64,
    ) {
        self.constraints.push(Constraint {
            name: name.into(),
            expr,
            cmp,
            rhs,
        });
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vars(&self) -> &[Variable] {
        &self.vars
    }

    pub fn var(&self, id: VarId) -> &Variable {
        &self.vars[id.index()]
    }

    pub fn objective(&self) -> &LinearExpr {
        &self.objective
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn constraint(&self, name: &str) -> Option<&Constraint> {
        self.constraints.iter().find(|c| c.name == name)
    }

    /// Dense objective coefficients, one per variable.
    pub fn objective_coefficients(&self) -> Vec<f64> {
        let mut coefs = vec![0.; self.vars.len()];
        for &(var, coef) in self.objective.terms() {
            coefs[var.index()] += coef;
        }
        coefs
    }

    /// Whether no variable can push the objective towards -inf: every
    /// positive coefficient sits on a variable with a finite lower bound and
    /// every negative one on a finite upper bound.
    pub fn objective_bounded_below(&self) -> bool {
        self.objective_coefficients()
            .iter()
            .zip(&self.vars)
            .all(|(&coef, var)| {
                let (lower, upper) = var.domain.bounds();
                (coef >= 0. || upper.is_finite()) && (coef <= 0. || lower.is_finite())
            })
    }
}
