//! Scenario command: JSON scenario templates and runs.

use std::path::PathBuf;

use clap::Subcommand;

use fatiguecalc_core::{Config, Scenario, ScenarioHarness};

use super::simulate::{print_chart, print_report};

#[derive(Subcommand)]
pub enum ScenarioAction {
    /// Write a scenario built from the current config
    Template {
        /// Scenario name
        #[arg(long, default_value = "baseline")]
        name: String,
        /// Output file (stdout if omitted)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Run a scenario file
    Run {
        /// Scenario JSON file
        file: PathBuf,
        /// Print an hourly chart of day N (1-based)
        #[arg(long, value_name = "DAY")]
        chart: Option<usize>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: ScenarioAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ScenarioAction::Template { name, output } => {
            let config = Config::load_or_default();
            let scenario = Scenario::new(name)
                .with_duration_hours(config.duration_hours()?)
                .with_sleep(config.sleep_schedule())
                .with_work(config.work_schedule())
                .with_profile(config.profile.clone())
                .with_params(config.model.clone());
            match output {
                Some(path) => {
                    scenario.export(&path)?;
                    println!("scenario written to {}", path.display());
                }
                None => println!("{}", serde_json::to_string_pretty(&scenario)?),
            }
        }
        ScenarioAction::Run { file, chart, json } => {
            let scenario = Scenario::import(&file)?;
            let mut harness = ScenarioHarness::new();
            let outcome = harness.run_scenario(&scenario)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
                return Ok(());
            }
            println!("Scenario: {}", scenario.name);
            print_report(&outcome.report);
            if let Some(day) = chart {
                print_chart(&outcome.result, day)?;
            }
        }
    }
    Ok(())
}
