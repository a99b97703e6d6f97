//! citybreak CLI - cheapest 3-day city break under a budget.

use std::path::PathBuf;

use anyhow::{Context, Result};
use citybreak_lp::{ScenarioConfig, plan};
use clap::Parser;
use tracing::{Level, debug};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "citybreak")]
#[command(version)]
#[command(about = "Pick the cheapest transfer, stay, food and sights for a 3-day city break")]
struct Cli {
    /// Total budget in euros (overrides the scenario file)
    #[arg(
        short,
        long,
        value_name = "EUR",
        allow_negative_numbers = true,
        value_parser = parse_budget
    )]
    budget: Option<f64>,

    /// Scenario TOML file with cost parameters
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Print an example scenario file and exit
    #[arg(long)]
    example_config: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Any finite amount; negative budgets are left for the solver to reject.
fn parse_budget(raw: &str) -> Result<f64, String> {
    let budget: f64 = raw
        .parse()
        .map_err(|e| format!("`{raw}` is not a number: {e}"))?;
    if !budget.is_finite() {
        return Err(format!("budget must be a finite amount, got `{raw}`"));
    }
    Ok(budget)
}

fn setup_logging(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("failed to set subscriber")
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose)?;

    if cli.example_config {
        print!("{}", ScenarioConfig::example_toml());
        return Ok(());
    }

    let mut scenario = match &cli.config {
        Some(path) => ScenarioConfig::from_file(path)
            .with_context(|| format!("failed to load scenario from {path:?}"))?,
        None => ScenarioConfig::default(),
    };
    if let Some(budget) = cli.budget {
        scenario.budget = budget;
    }
    debug!(budget = scenario.budget, "scenario resolved");

    let outcome = plan(&scenario.costs, scenario.budget)
        .with_context(|| format!("failed to plan under budget {}", scenario.budget))?;

    // Non-optimal outcomes are reported, not failed: exit code stays 0.
    if cli.json {
        let json = serde_json::to_string_pretty(&outcome).context("failed to serialise report")?;
        println!("{json}");
    } else {
        println!("{outcome}");
    }

    Ok(())
}
