use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod inputs;

#[derive(Parser)]
#[command(name = "fatiguecalc-cli", version, about = "Cognitive performance and fatigue prediction")]
struct Cli {
    /// Log debug events to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate hourly performance
    Simulate(commands::simulate::SimulateArgs),
    /// Fit the enhancement factor to observed scores
    Calibrate(commands::calibrate::CalibrateArgs),
    /// Compare nightly sleep durations over a week
    Sweep(commands::sweep::SweepArgs),
    /// Print the circadian oscillator
    Circadian(commands::circadian::CircadianArgs),
    /// Scenario files
    Scenario {
        #[command(subcommand)]
        action: commands::scenario::ScenarioAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Simulate(args) => commands::simulate::run(args),
        Commands::Calibrate(args) => commands::calibrate::run(args),
        Commands::Sweep(args) => commands::sweep::run(args),
        Commands::Circadian(args) => commands::circadian::run(args),
        Commands::Scenario { action } => commands::scenario::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
