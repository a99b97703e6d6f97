//! Lowers a [`Model`] to SCIP and reads the result back.

use std::fmt;

use russcip::{Model as ScipModel, ObjSense, ProblemOrSolving, Status, VarType, WithSolutions};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::SolveError;
use crate::model::{Domain, Model, VarId};

/// Outcome of a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SolveStatus {
    Optimal,
    Infeasible,
    Unbounded,
    NotSolved,
    Undefined,
}

impl From<Status> for SolveStatus {
    fn from(status: Status) -> Self {
        match status {
            Status::Optimal => SolveStatus::Optimal,
            Status::Infeasible => SolveStatus::Infeasible,
            Status::Unbounded => SolveStatus::Unbounded,
            Status::Inforunbd => SolveStatus::Undefined,
            // Unknown, interrupts and every limit: the search stopped early.
            _ => SolveStatus::NotSolved,
        }
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SolveStatus::Optimal => "Optimal",
            SolveStatus::Infeasible => "Infeasible",
            SolveStatus::Unbounded => "Unbounded",
            SolveStatus::NotSolved => "Not Solved",
            SolveStatus::Undefined => "Undefined",
        })
    }
}

/// Solver output. Values exist only for optimal solves.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    status: SolveStatus,
    values: Vec<f64>,
    objective: Option<f64>,
}

impl Solution {
    /// `values` is indexed by [`VarId::index`]; `objective` includes the
    /// objective's constant term.
    pub fn optimal(values: Vec<f64>, objective: f64) -> Self {
        Self {
            status: SolveStatus::Optimal,
            values,
            objective: Some(objective),
        }
    }

    pub fn unsolved(status: SolveStatus) -> Self {
        Self {
            status,
            values: Vec::new(),
            objective: None,
        }
    }

    pub fn status(&self) -> SolveStatus {
        self.status
    }

    pub fn is_optimal(&self) -> bool {
        self.status == SolveStatus::Optimal
    }

    pub fn value(&self, var: VarId) -> Option<f64> {
        self.values.get(var.index()).copied()
    }

    /// Value as the nearest integer, for binary and integer variables.
    pub fn rounded(&self, var: VarId) -> Option<i64> {
        self.value(var).map(|v| v.round() as i64)
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn objective(&self) -> Option<f64> {
        self.objective
    }
}

fn var_type(domain: Domain) -> VarType {
    match domain {
        Domain::Binary => VarType::Binary,
        Domain::Integer { .. } => VarType::Integer,
        Domain::Continuous { .. } => VarType::Continuous,
    }
}

/// Minimises `model` with SCIP, output hidden.
///
/// Blocks until SCIP finishes; there is no time limit. A non-optimal status is
/// returned as a [`Solution`] without values, not as an error.
pub fn solve(model: &Model) -> Result<Solution, SolveError> {
    let mut scip = ScipModel::new()
        .hide_output()
        .include_default_plugins()
        .create_prob(model.name())
        .set_obj_sense(ObjSense::Minimize);

    let objective = model.objective_coefficients();
    let vars: Vec<_> = model
        .vars()
        .iter()
        .zip(&objective)
        .map(|(var, &obj)| {
            let (lb, ub) = var.domain.bounds();
            scip.add_var(lb, ub, obj, &var.name, var_type(var.domain))
        })
        .collect();

    for constraint in model.constraints() {
        let terms = constraint.expr.collected();
        let (lhs, rhs) = constraint.row_bounds();
        let coefs: Vec<f64> = terms.iter().map(|&(_, coef)| coef).collect();
        scip.add_cons(
            terms.iter().map(|&(var, _)| &vars[var.index()]).collect(),
            &coefs,
            lhs,
            rhs,
            &constraint.name,
        );
        debug!(name = %constraint.name, cmp = %constraint.cmp, lhs, rhs, "added row");
    }

    let solved = scip.solve();
    let status = match SolveStatus::from(solved.status()) {
        // With dual reductions presolve may stop at "infeasible or
        // unbounded"; a bounded objective rules out the second.
        SolveStatus::Undefined if model.objective_bounded_below() => SolveStatus::Infeasible,
        status => status,
    };
    info!(%status, problem = model.name(), "solver finished");

    if status != SolveStatus::Optimal {
        return Ok(Solution::unsolved(status));
    }

    let sol = solved
        .best_sol()
        .ok_or(SolveError::MissingSolution { status })?;
    // Integral values are snapped: SCIP may return 0.9999999 for a set binary.
    let values = vars
        .iter()
        .zip(model.vars())
        .map(|(scip_var, var)| {
            let raw = sol.val(scip_var);
            if var.domain.is_integral() { raw.round() } else { raw }
        })
        .collect();
    // SCIP only sees the variable part of the objective.
    let objective = solved.obj_val() + model.objective().constant_term();

    Ok(Solution::optimal(values, objective))
}
