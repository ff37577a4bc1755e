//! Sweep command: sleep-restriction study table.

use clap::Args;

use fatiguecalc_core::scenario::sleep_restriction_study;
use fatiguecalc_core::{Config, RestrictionStudy};

use crate::inputs::ModelArgs;

#[derive(Args)]
pub struct SweepArgs {
    /// Nightly sleep durations in hours, comma separated
    #[arg(long, value_delimiter = ',', default_values_t = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0])]
    durations: Vec<f64>,
    /// Days per run
    #[arg(long, default_value_t = 7)]
    days: u32,
    /// Output as JSON
    #[arg(long)]
    json: bool,
    #[command(flatten)]
    model: ModelArgs,
}

pub fn run(args: SweepArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load_or_default();
    args.model.apply(&mut config)?;

    // Fair sleep unless a quality flag was given.
    let quality = if args.model.quality.is_some() || args.model.quality_rating.is_some() {
        config.sleep.quality
    } else {
        0.7
    };

    let study = RestrictionStudy {
        durations: args.durations,
        days: args.days,
        quality,
        work: config.work_schedule(),
        profile: config.profile.clone(),
        params: config.model.clone(),
    };
    let outcomes = sleep_restriction_study(&study)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcomes)?);
        return Ok(());
    }

    println!("\nSleep restriction over {} days (quality {:.2})", study.days, study.quality);
    println!("{}", "=".repeat(60));
    println!("  Sleep   Mean    Min    Max   Risk%   Work mean");
    for outcome in &outcomes {
        let work_mean = outcome
            .work_mean
            .map(|m| format!("{m:9.1}"))
            .unwrap_or_else(|| format!("{:>9}", "-"));
        println!(
            "  {:>4.1}h  {:5.1}  {:5.1}  {:5.1}  {:6.1}  {}",
            outcome.sleep_hours,
            outcome.report.mean,
            outcome.report.min,
            outcome.report.max,
            outcome.report.risk_percentage,
            work_mean
        );
    }
    Ok(())
}
