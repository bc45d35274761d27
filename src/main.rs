use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use cpu_drainer::Result;
use cpu_drainer::clock::ProcessClock;
use cpu_drainer::load::HEAVY_DURATION;
use cpu_drainer::simulator::Simulator;

/// Burn one CPU core for 15 seconds of CPU time, then keep a light periodic
/// load until killed.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Accepted and ignored; the workload takes no options.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    ignored: Vec<String>,
}

fn init_tracing() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(fmt::layer().with_writer(io::stderr))
        .try_init()?;
    Ok(())
}

fn run() -> Result<()> {
    let simulator = Simulator::new(ProcessClock, io::stdout(), HEAVY_DURATION);
    match simulator.run()? {}
}

fn main() -> ExitCode {
    better_panic::Settings::auto()
        .most_recent_first(false)
        .lineno_suffix(true)
        .install();

    let _cli = Cli::parse();

    if let Err(e) = init_tracing() {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
