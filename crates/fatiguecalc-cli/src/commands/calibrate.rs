//! Calibrate command: fit the enhancement factor from a CSV file.

use std::fs::File;
use std::path::PathBuf;

use clap::Args;

use fatiguecalc_core::export::read_calibration_pairs;
use fatiguecalc_core::{calibrate, Config, SearchSpace};

#[derive(Args)]
pub struct CalibrateArgs {
    /// CSV file with `predicted,actual` columns and a header row
    #[arg(long, short)]
    input: PathBuf,
    /// Lowest candidate factor
    #[arg(long)]
    low: Option<f64>,
    /// Highest candidate factor
    #[arg(long)]
    high: Option<f64>,
    /// Number of candidates, both ends included
    #[arg(long)]
    steps: Option<usize>,
    /// Store the factor as model.ml_enhancement
    #[arg(long)]
    save: bool,
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: CalibrateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load_or_default();
    let defaults = config.calibration;
    let space = SearchSpace::new(
        args.low.unwrap_or(defaults.low),
        args.high.unwrap_or(defaults.high),
        args.steps.unwrap_or(defaults.steps),
    )?;

    let (predicted, actual) = read_calibration_pairs(File::open(&args.input)?)?;
    let fit = calibrate(&predicted, &actual, space)?;

    if args.save {
        config.model.ml_enhancement = fit.best_factor;
        config.save()?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&fit)?);
        return Ok(());
    }

    println!("Calibration over {} samples", predicted.len());
    println!("  Grid:        [{}, {}] x {}", space.low, space.high, space.steps);
    println!("  Best factor: {:.4}", fit.best_factor);
    println!("  RMSE:        {:.4}", fit.best_rmse);
    if args.save {
        println!("  Saved as model.ml_enhancement");
    }
    Ok(())
}
