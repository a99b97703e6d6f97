//! The city-break model: which transfer, where to sleep, how much to eat and
//! how many attractions to pay for.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::config::TripCosts;
use crate::model::{Comparison, Domain, LinearExpr, Model, VarId};

/// Length of the stay, in days of food and nights of accommodation.
pub const TRIP_DAYS: f64 = 3.;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TransportMode {
    Uber,
    Train,
}

impl TransportMode {
    pub const ALL: [TransportMode; 2] = [TransportMode::Uber, TransportMode::Train];

    pub fn cost(self, costs: &TripCosts) -> f64 {
        match self {
            TransportMode::Uber => costs.uber,
            TransportMode::Train => costs.train,
        }
    }

    fn var_name(self) -> &'static str {
        match self {
            TransportMode::Uber => "Uber_Transport",
            TransportMode::Train => "Train_Transport",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Accommodation {
    Hotel,
    Airbnb,
    Hostel,
}

impl Accommodation {
    pub const ALL: [Accommodation; 3] = [
        Accommodation::Hotel,
        Accommodation::Airbnb,
        Accommodation::Hostel,
    ];

    /// Price for the whole stay.
    pub fn cost(self, costs: &TripCosts) -> f64 {
        match self {
            Accommodation::Hotel => costs.hotel,
            Accommodation::Airbnb => costs.airbnb,
            Accommodation::Hostel => costs.hostel,
        }
    }
}

impl fmt::Display for Accommodation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Handles to the variables of a built trip model.
#[derive(Debug, Clone)]
pub struct TripVars {
    pub transport: [(TransportMode, VarId); 2],
    pub accommodation: [(Accommodation, VarId); 3],
    pub breakfast: VarId,
    pub lunch: VarId,
    pub dinner: VarId,
    pub attractions: VarId,
}

#[derive(Debug, Clone)]
pub struct TripModel {
    pub model: Model,
    pub vars: TripVars,
    /// Objective expression, flight included.
    pub total_cost: LinearExpr,
}

/// Builds the trip MILP for `budget`.
///
/// Nothing is validated here: a budget below the unavoidable spend produces a
/// model the solver reports as infeasible.
pub fn build_model(costs: &TripCosts, budget: f64) -> TripModel {
    let mut model = Model::new("CityBreak_3Day_Optimization");

    let transport =
        TransportMode::ALL.map(|mode| (mode, model.add_var(mode.var_name(), Domain::Binary)));
    let accommodation =
        Accommodation::ALL.map(|kind| (kind, model.add_var(kind.to_string(), Domain::Binary)));

    let meal = Domain::Continuous { lower: 0. };
    let breakfast = model.add_var("Breakfast_per_day", meal);
    let lunch = model.add_var("Lunch_per_day", meal);
    let dinner = model.add_var("Dinner_per_day", meal);

    let attractions = model.add_var(
        "Paid_Attractions",
        Domain::Integer {
            lower: 0.,
            upper: f64::from(costs.max_attractions),
        },
    );

    let transport_cost = transport
        .iter()
        .fold(LinearExpr::new(), |expr, &(mode, var)| expr.term(var, mode.cost(costs)));
    let accommodation_cost = accommodation
        .iter()
        .fold(LinearExpr::new(), |expr, &(kind, var)| expr.term(var, kind.cost(costs)));
    let food_cost = LinearExpr::sum([breakfast, lunch, dinner]).scaled(TRIP_DAYS);

    let total_cost = LinearExpr::constant(costs.flight)
        .plus(transport_cost)
        .plus(accommodation_cost)
        .plus(food_cost)
        .term(attractions, costs.attraction_avg);

    model.set_objective(total_cost.clone());

    model.add_constraint(
        "One_Airport_Transport",
        LinearExpr::sum(transport.map(|(_, var)| var)),
        Comparison::Equal,
        1.,
    );
    model.add_constraint(
        "One_Accommodation_Type",
        LinearExpr::sum(accommodation.map(|(_, var)| var)),
        Comparison::Equal,
        1.,
    );
    model.add_constraint(
        "Min_Breakfast_Cost",
        LinearExpr::var(breakfast),
        Comparison::GreaterEq,
        costs.min_breakfast,
    );
    model.add_constraint(
        "Min_Lunch_Cost",
        LinearExpr::var(lunch),
        Comparison::GreaterEq,
        costs.min_lunch,
    );
    model.add_constraint(
        "Min_Dinner_Cost",
        LinearExpr::var(dinner),
        Comparison::GreaterEq,
        costs.min_dinner,
    );
    model.add_constraint(
        "Min_Attractions",
        LinearExpr::var(attractions),
        Comparison::GreaterEq,
        f64::from(costs.min_attractions),
    );
    model.add_constraint(
        "Budget_Constraint",
        total_cost.clone(),
        Comparison::LessEq,
        budget,
    );

    debug!(
        vars = model.vars().len(),
        constraints = model.constraints().len(),
        budget,
        "built trip model"
    );

    TripModel {
        model,
        vars: TripVars {
            transport,
            accommodation,
            breakfast,
            lunch,
            dinner,
            attractions,
        },
        total_cost,
    }
}
