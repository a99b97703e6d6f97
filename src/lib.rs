//! Cheapest city-break itinerary under a budget cap.
//!
//! The trip is formulated as a small mixed-integer linear program: binaries
//! pick one airport transfer and one place to stay, continuous variables carry
//! the daily meal spend and an integer counts paid attractions. SCIP (through
//! `russcip`) solves it and [`report`] turns the solution back into a cost
//! breakdown.
//!
//! ```no_run
//! use citybreak_lp::{ScenarioConfig, plan};
//!
//! let scenario = ScenarioConfig::default();
//! let outcome = plan(&scenario.costs, scenario.budget)?;
//! println!("{outcome}");
//! # Ok::<(), citybreak_lp::PlannerError>(())
//! ```

pub mod config;
pub mod error;
pub mod model;
pub mod report;
pub mod solver;
pub mod trip;

pub use config::{ScenarioConfig, TripCosts};
pub use error::{ConfigError, PlannerError, ReportError, SolveError};
pub use model::{Comparison, Constraint, Domain, LinearExpr, Model, VarId, Variable};
pub use report::{CostBreakdown, Itinerary, MealSpend, Outcome};
pub use solver::{Solution, SolveStatus, solve};
pub use trip::{Accommodation, TRIP_DAYS, TransportMode, TripModel, TripVars, build_model};

/// Builds the trip model, solves it and decodes the result.
pub fn plan(costs: &TripCosts, budget: f64) -> Result<Outcome, PlannerError> {
    let trip = build_model(costs, budget);
    let solution = solve(&trip.model)?;
    let outcome = Outcome::decode(costs, &trip.vars, &solution, budget)?;
    Ok(outcome)
}
