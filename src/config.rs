//! Scenario configuration.
//!
//! Every field falls back to the Rome city-break figures, so a scenario file
//! only needs the values it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Cost parameters of the trip, in euros.
///
/// Accommodation prices cover all three nights; meal figures are per day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TripCosts {
    /// Return flight, paid regardless of every other choice.
    pub flight: f64,
    pub uber: f64,
    pub train: f64,
    pub hotel: f64,
    pub airbnb: f64,
    pub hostel: f64,
    pub min_breakfast: f64,
    pub min_lunch: f64,
    pub min_dinner: f64,
    /// Average price of one paid attraction.
    pub attraction_avg: f64,
    pub min_attractions: u32,
    pub max_attractions: u32,
}

impl Default for TripCosts {
    fn default() -> Self {
        Self {
            flight: 58.,
            uber: 50.,
            train: 12.,
            hotel: 300.,
            airbnb: 120.,
            hostel: 75.,
            min_breakfast: 8.,
            min_lunch: 15.,
            min_dinner: 18.5,
            attraction_avg: 9.,
            min_attractions: 3,
            max_attractions: 5,
        }
    }
}

impl TripCosts {
    /// Rejects non-finite or negative prices and an empty attraction range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let prices = [
            ("flight", self.flight),
            ("uber", self.uber),
            ("train", self.train),
            ("hotel", self.hotel),
            ("airbnb", self.airbnb),
            ("hostel", self.hostel),
            ("min_breakfast", self.min_breakfast),
            ("min_lunch", self.min_lunch),
            ("min_dinner", self.min_dinner),
            ("attraction_avg", self.attraction_avg),
        ];
        for (field, value) in prices {
            if !value.is_finite() || value < 0. {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("expected a finite, non-negative amount, got {value}"),
                });
            }
        }

        if self.min_attractions > self.max_attractions {
            return Err(ConfigError::Invalid {
                field: "min_attractions",
                reason: format!(
                    "{} exceeds max_attractions {}",
                    self.min_attractions, self.max_attractions
                ),
            });
        }

        Ok(())
    }

    /// Daily minimum spend on breakfast, lunch and dinner together.
    pub fn min_daily_food(&self) -> f64 {
        self.min_breakfast + self.min_lunch + self.min_dinner
    }
}

pub const DEFAULT_BUDGET: f64 = 300.;

fn default_budget() -> f64 {
    DEFAULT_BUDGET
}

/// One planning run: a budget and the prices it is checked against.
///
/// The budget is not validated; an impossible one shows up as an infeasible
/// solve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    #[serde(default = "default_budget")]
    pub budget: f64,

    #[serde(default)]
    pub costs: TripCosts,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            budget: DEFAULT_BUDGET,
            costs: TripCosts::default(),
        }
    }
}

impl ScenarioConfig {
    /// Loads and validates a scenario from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_owned(),
            source: e,
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_owned(),
            source: e,
        })?;
        config.costs.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.costs.validate()?;
        Ok(config)
    }

    pub fn example_toml() -> &'static str {
        r#"# citybreak scenario file. Omitted keys keep their default.

# Total budget in euros.
budget = 300.0

[costs]
# Return flight.
flight = 58.0

# Airport transfer, one of the two is taken.
uber = 50.0
train = 12.0

# Accommodation for all three nights, one is booked.
hotel = 300.0
airbnb = 120.0
hostel = 75.0

# Minimum spend per day.
min_breakfast = 8.0
min_lunch = 15.0
min_dinner = 18.5

# Paid attractions over the whole stay.
attraction_avg = 9.0
min_attractions = 3
max_attractions = 5
"#
    }
}
