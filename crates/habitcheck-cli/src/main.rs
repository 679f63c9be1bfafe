use clap::{Parser, Subcommand};
use habitcheck_core::Config;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "habitcheck", version, about = "Habit goal compliance checks")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the complete Monday..Sunday weeks in a range
    Weeks(commands::weeks::WeeksArgs),
    /// Check distinct verified days per week against a target
    Frequency(commands::frequency::FrequencyArgs),
    /// Check a weekly schedule against verified days
    Schedule(commands::schedule::ScheduleArgs),
    /// Evaluate every goal in an input file
    Evaluate(commands::evaluate::EvaluateArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();

    let loaded = Config::load();
    init_logging(&loaded.as_ref().cloned().unwrap_or_default());
    if let Err(e) = &loaded {
        tracing::warn!(error = %e, "using default logging configuration");
    }

    let result = match cli.command {
        Commands::Weeks(args) => commands::weeks::run(args, loaded),
        Commands::Frequency(args) => commands::frequency::run(args, loaded),
        Commands::Schedule(args) => commands::schedule::run(args, loaded),
        Commands::Evaluate(args) => commands::evaluate::run(args, loaded),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
