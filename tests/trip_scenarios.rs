//! End-to-end planning runs against SCIP.

use citybreak_lp::{
    Accommodation, Itinerary, Outcome, SolveStatus, TransportMode, TripCosts, build_model, plan,
    solve,
};
use proptest::prelude::*;
use rstest::rstest;

/// flight + train + hostel + 3 days of minimum meals + 3 attractions
const CHEAPEST_TOTAL: f64 = 58. + 12. + 75. + 3. * (8. + 15. + 18.5) + 9. * 3.;

fn planned(costs: &TripCosts, budget: f64) -> Itinerary {
    let outcome = plan(costs, budget).expect("planning should not error");
    match outcome {
        Outcome::Planned(itinerary) => itinerary,
        other => panic!("expected an optimal plan under {budget}, found {other:?}"),
    }
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, found {actual}"
    );
}

#[test]
fn default_budget_buys_the_cheapest_trip() {
    let itinerary = planned(&TripCosts::default(), 300.);

    assert_eq!(itinerary.transport, TransportMode::Train);
    assert_eq!(itinerary.accommodation, Accommodation::Hostel);
    assert_close(itinerary.meals.breakfast, 8.);
    assert_close(itinerary.meals.lunch, 15.);
    assert_close(itinerary.meals.dinner, 18.5);
    assert_eq!(itinerary.attractions, 3);
    assert_close(itinerary.total_cost, 296.5);
    assert_close(itinerary.remaining, 3.5);
}

#[test]
fn default_budget_report_text() {
    let outcome = plan(&TripCosts::default(), 300.).expect("planning should not error");
    let text = outcome.to_string();

    assert!(text.starts_with("Status: Optimal\n"));
    assert!(text.contains("  Uber: 0\n  Train: 1\n"));
    assert!(text.contains("  Hotel: 0\n  Airbnb: 0\n  Hostel: 1\n"));
    assert!(text.contains("Minimum total cost (€): 296.50\n"));
    assert!(text.ends_with("Budget remaining (€): 3.50"));
}

#[test]
fn large_budget_still_spends_the_minimum() {
    let itinerary = planned(&TripCosts::default(), 10_000.);
    assert_close(itinerary.total_cost, CHEAPEST_TOTAL);
    assert_close(itinerary.remaining, 10_000. - CHEAPEST_TOTAL);
}

#[test]
fn budget_equal_to_minimum_is_feasible() {
    let itinerary = planned(&TripCosts::default(), CHEAPEST_TOTAL);
    assert_close(itinerary.remaining, 0.);
}

#[rstest]
#[case(0.)]
#[case(100.)]
#[case(250.)]
#[case(296.4)]
#[case(-50.)]
fn budget_below_minimum_is_infeasible(#[case] budget: f64) {
    let outcome = plan(&TripCosts::default(), budget).expect("planning should not error");
    assert_eq!(outcome.status(), SolveStatus::Infeasible);
    assert_eq!(outcome.itinerary(), None);
    assert!(
        outcome
            .to_string()
            .ends_with(&format!("Model is not optimal under budget {budget} €."))
    );
}

#[rstest]
#[case(TripCosts { train: 60., ..TripCosts::default() }, TransportMode::Uber, Accommodation::Hostel)]
#[case(TripCosts { hostel: 200., ..TripCosts::default() }, TransportMode::Train, Accommodation::Airbnb)]
#[case(TripCosts { hotel: 10., uber: 0., ..TripCosts::default() }, TransportMode::Uber, Accommodation::Hotel)]
fn cheapest_option_wins(
    #[case] costs: TripCosts,
    #[case] transport: TransportMode,
    #[case] accommodation: Accommodation,
) {
    let itinerary = planned(&costs, 1_000.);
    assert_eq!(itinerary.transport, transport);
    assert_eq!(itinerary.accommodation, accommodation);
}

#[test]
fn solved_values_satisfy_every_constraint() {
    let trip = build_model(&TripCosts::default(), 300.);
    let solution = solve(&trip.model).expect("solve should succeed");
    assert!(solution.is_optimal());

    for constraint in trip.model.constraints() {
        assert!(
            constraint.is_satisfied(solution.values(), 1e-6),
            "{} violated",
            constraint.name
        );
    }
    let objective = solution.objective().expect("objective");
    assert_close(trip.total_cost.evaluate(solution.values()), objective);
}

#[test]
fn raised_attraction_floor_is_respected() {
    let costs = TripCosts {
        min_attractions: 5,
        ..TripCosts::default()
    };
    let itinerary = planned(&costs, 400.);
    assert_eq!(itinerary.attractions, 5);
    assert_close(itinerary.breakdown.attractions, 45.);
}

fn exactly_one(picks: &[(impl Copy, i64)]) -> bool {
    picks.iter().map(|&(_, pick)| pick).sum::<i64>() == 1
        && picks.iter().all(|&(_, pick)| pick == 0 || pick == 1)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn any_feasible_budget_gives_a_consistent_plan(budget in CHEAPEST_TOTAL..5_000.0f64) {
        let costs = TripCosts::default();
        let itinerary = planned(&costs, budget);

        prop_assert!(exactly_one(&itinerary.transport_picks));
        prop_assert!(exactly_one(&itinerary.accommodation_picks));
        prop_assert!(
            (i64::from(costs.min_attractions)..=i64::from(costs.max_attractions))
                .contains(&itinerary.attractions)
        );
        prop_assert!((itinerary.breakdown.total() - itinerary.total_cost).abs() <= 0.01);
        prop_assert!((itinerary.total_cost - CHEAPEST_TOTAL).abs() < 1e-6);
        prop_assert!(itinerary.total_cost <= budget + 1e-6);
    }

    #[test]
    fn any_short_budget_is_infeasible(budget in -1_000.0f64..296.0) {
        let outcome = plan(&TripCosts::default(), budget).expect("planning should not error");
        prop_assert_eq!(outcome.status(), SolveStatus::Infeasible);
    }
}
