//! Decodes an optimal solution into an itinerary and renders it.
//!
//! Category subtotals are recomputed from the decoded choices instead of being
//! read off the objective, so the breakdown doubles as a check on the solver
//! total.

use std::fmt;

use serde::Serialize;
use tracing::warn;

use crate::config::TripCosts;
use crate::error::ReportError;
use crate::model::VarId;
use crate::solver::{Solution, SolveStatus};
use crate::trip::{Accommodation, TRIP_DAYS, TransportMode, TripVars};

/// Largest accepted gap between the recomputed subtotals and the solver total.
pub const TOTAL_TOLERANCE: f64 = 0.01;

/// Daily meal spend, euros per day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MealSpend {
    pub breakfast: f64,
    pub lunch: f64,
    pub dinner: f64,
}

impl MealSpend {
    pub fn per_day(&self) -> f64 {
        self.breakfast + self.lunch + self.dinner
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub flight: f64,
    pub transport: f64,
    pub accommodation: f64,
    pub food: f64,
    pub attractions: f64,
}

impl CostBreakdown {
    pub fn total(&self) -> f64 {
        self.flight + self.transport + self.accommodation + self.food + self.attractions
    }
}

/// The cheapest plan found under the budget.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Itinerary {
    /// Rounded value of every transfer binary.
    pub transport_picks: Vec<(TransportMode, i64)>,
    pub transport: TransportMode,
    /// Rounded value of every accommodation binary.
    pub accommodation_picks: Vec<(Accommodation, i64)>,
    pub accommodation: Accommodation,
    pub meals: MealSpend,
    pub attractions: i64,
    pub breakdown: CostBreakdown,
    /// Objective value reported by the solver.
    pub total_cost: f64,
    pub budget: f64,
    /// `budget - total_cost`; never clipped.
    pub remaining: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Planned(Itinerary),
    NotOptimal { status: SolveStatus, budget: f64 },
}

fn value_of(solution: &Solution, var: VarId, name: &str) -> Result<f64, ReportError> {
    solution.value(var).ok_or_else(|| ReportError::MissingValue {
        name: name.to_owned(),
    })
}

fn rounded_of(solution: &Solution, var: VarId, name: &str) -> Result<i64, ReportError> {
    solution.rounded(var).ok_or_else(|| ReportError::MissingValue {
        name: name.to_owned(),
    })
}

/// Rounded binaries of one exclusive choice, plus the option set to 1.
fn decode_choice<T: Copy + fmt::Display>(
    solution: &Solution,
    options: &[(T, VarId)],
    choice: &'static str,
) -> Result<(Vec<(T, i64)>, T), ReportError> {
    let picks = options
        .iter()
        .map(|&(option, var)| Ok((option, rounded_of(solution, var, &option.to_string())?)))
        .collect::<Result<Vec<_>, ReportError>>()?;
    let selected = picks
        .iter()
        .find(|&&(_, pick)| pick == 1)
        .map(|&(option, _)| option)
        .ok_or(ReportError::NoSelection { choice })?;
    Ok((picks, selected))
}

impl Outcome {
    /// Turns a solver result into an outcome for `budget`.
    ///
    /// Non-optimal statuses are an outcome, not an error.
    pub fn decode(
        costs: &TripCosts,
        vars: &TripVars,
        solution: &Solution,
        budget: f64,
    ) -> Result<Self, ReportError> {
        if !solution.is_optimal() {
            return Ok(Outcome::NotOptimal {
                status: solution.status(),
                budget,
            });
        }

        let (transport_picks, transport) =
            decode_choice(solution, &vars.transport, "airport transport")?;
        let (accommodation_picks, accommodation) =
            decode_choice(solution, &vars.accommodation, "accommodation")?;

        let meals = MealSpend {
            breakfast: value_of(solution, vars.breakfast, "breakfast")?,
            lunch: value_of(solution, vars.lunch, "lunch")?,
            dinner: value_of(solution, vars.dinner, "dinner")?,
        };
        let attractions = rounded_of(solution, vars.attractions, "attractions")?;

        let breakdown = CostBreakdown {
            flight: costs.flight,
            transport: transport_picks
                .iter()
                .map(|&(mode, pick)| mode.cost(costs) * pick as f64)
                .sum(),
            accommodation: accommodation_picks
                .iter()
                .map(|&(kind, pick)| kind.cost(costs) * pick as f64)
                .sum(),
            food: TRIP_DAYS * meals.per_day(),
            attractions: costs.attraction_avg * attractions as f64,
        };

        let total_cost = solution
            .objective()
            .ok_or_else(|| ReportError::MissingValue {
                name: "objective".to_owned(),
            })?;

        let recomputed = breakdown.total();
        if (recomputed - total_cost).abs() > TOTAL_TOLERANCE {
            warn!(
                recomputed,
                reported = total_cost,
                "cost breakdown does not add up to the solver total"
            );
        }

        Ok(Outcome::Planned(Itinerary {
            transport_picks,
            transport,
            accommodation_picks,
            accommodation,
            meals,
            attractions,
            breakdown,
            total_cost,
            budget,
            remaining: budget - total_cost,
        }))
    }

    pub fn status(&self) -> SolveStatus {
        match self {
            Outcome::Planned(_) => SolveStatus::Optimal,
            Outcome::NotOptimal { status, .. } => *status,
        }
    }

    pub fn itinerary(&self) -> Option<&Itinerary> {
        match self {
            Outcome::Planned(itinerary) => Some(itinerary),
            Outcome::NotOptimal { .. } => None,
        }
    }
}

/// Round half away from zero to cents.
pub fn round2(value: f64) -> f64 {
    (value * 100.).round() / 100.
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Status: {}", self.status())?;
        match self {
            Outcome::NotOptimal { budget, .. } => {
                write!(f, "Model is not optimal under budget {budget} €.")
            }
            Outcome::Planned(itinerary) => write!(f, "\n{itinerary}"),
        }
    }
}

impl fmt::Display for Itinerary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Optimal decisions:")?;
        writeln!(f, "Airport transport:")?;
        for (mode, pick) in &self.transport_picks {
            writeln!(f, "  {mode}: {pick}")?;
        }

        writeln!(f, "\nAccommodation choice:")?;
        for (kind, pick) in &self.accommodation_picks {
            writeln!(f, "  {kind}: {pick}")?;
        }

        writeln!(f, "\nDaily food costs (€ per day):")?;
        writeln!(f, "  Breakfast: {:.2}", round2(self.meals.breakfast))?;
        writeln!(f, "  Lunch: {:.2}", round2(self.meals.lunch))?;
        writeln!(f, "  Dinner: {:.2}", round2(self.meals.dinner))?;

        writeln!(f, "\nPaid attractions visited: {}", self.attractions)?;

        let b = &self.breakdown;
        writeln!(f, "\nCost breakdown (€):")?;
        writeln!(f, "  Flight: {:.2}", round2(b.flight))?;
        writeln!(f, "  Transport: {:.2}", round2(b.transport))?;
        writeln!(f, "  Accommodation (3 nights): {:.2}", round2(b.accommodation))?;
        writeln!(f, "  Food (3 days): {:.2}", round2(b.food))?;
        writeln!(f, "  Attractions: {:.2}", round2(b.attractions))?;

        writeln!(f, "\nMinimum total cost (€): {:.2}", round2(self.total_cost))?;
        writeln!(f, "Budget limit (€): {}", self.budget)?;
        write!(f, "Budget remaining (€): {:.2}", round2(self.remaining))
    }
}
