//! Circadian command: oscillator values by hour.

use clap::Args;

use fatiguecalc_core::process::{circadian, DEFAULT_ULTRADIAN_AMPLITUDE};
use fatiguecalc_core::schedule::Chronotype;

#[derive(Args)]
pub struct CircadianArgs {
    /// Chronotype offset in hours
    #[arg(long, allow_hyphen_values = true, default_value_t = 0.0, conflicts_with = "chronotype")]
    offset: f64,
    /// Chronotype rating 1-5
    #[arg(long)]
    chronotype: Option<u8>,
    /// Hours to print
    #[arg(long, default_value_t = 24)]
    hours: u32,
    /// Ultradian amplitude
    #[arg(long, default_value_t = DEFAULT_ULTRADIAN_AMPLITUDE)]
    amplitude: f64,
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: CircadianArgs) -> Result<(), Box<dyn std::error::Error>> {
    let offset = match args.chronotype {
        Some(rating) => Chronotype::from_rating(rating)?.offset(),
        None => args.offset,
    };
    let values: Vec<f64> = (0..args.hours)
        .map(|t| circadian(t, offset, args.amplitude, 0.0))
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&values)?);
        return Ok(());
    }

    println!("Hour  Circadian  (offset {offset:+.1}h)");
    for (t, value) in values.iter().enumerate() {
        let bar_length = ((value + 2.0) * 5.0).round().clamp(0.0, 20.0) as usize;
        println!("{:>4}  {:>9.3}  {}", t, value, "█".repeat(bar_length));
    }
    Ok(())
}
