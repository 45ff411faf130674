use clap::{Parser, Subcommand};
use commands::{
    metrics::{self, MetricsArgs},
    run::{self, RunArgs},
};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "overlay", about = "Self-organizing peer overlay simulator CLI")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Execute a simulation run from a configuration file.
    Run(RunArgs),
    /// Recompute observational metrics for a stored topology snapshot.
    Metrics(MetricsArgs),
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Command::Run(args) => run::run(&args),
        Command::Metrics(args) => metrics::run(&args),
    };
    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
