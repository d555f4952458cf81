use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use crossbeam_channel::bounded;
use std::io::IsTerminal;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod search;
mod square;

use search::parallel::config::DEFAULT_WORKERS;
use search::{Algorithm, ParallelConfig, SearchConfig, SearchResult, run_parallel_search};

// --- Command Line Arguments ---

#[derive(Parser)]
#[command(name = "magic-squares")]
#[command(about = "Search for a 3x3 magic square of squares")]
#[command(version)]
struct Args {
    /// Grid generation strategy
    #[arg(long, value_enum, default_value = "random")]
    algorithm: CliAlgorithm,
    /// Number of worker threads
    #[arg(long, short = 'j', default_value_t = DEFAULT_WORKERS)]
    workers: usize,
    /// Base random seed for reproducibility (worker i uses seed + i)
    #[arg(long)]
    seed: Option<u64>,
    /// Cursor value to resume the sequence strategy after
    #[arg(long, default_value = "0")]
    start: u64,
    /// Stop after this many attempts across all workers
    #[arg(long)]
    iterations: Option<u64>,
    /// Enable verbose output
    #[arg(long, short)]
    verbose: bool,
}

/// CLI algorithm selection
#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliAlgorithm {
    /// Uniform random sampling of distinct values
    Random,
    /// Deterministic enumeration of base-100 cursor values
    Sequence,
}

impl From<CliAlgorithm> for Algorithm {
    fn from(cli: CliAlgorithm) -> Self {
        match cli {
            CliAlgorithm::Random => Algorithm::Random,
            CliAlgorithm::Sequence => Algorithm::Sequence,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(std::io::stdout().is_terminal())
        .init();
}

fn run(args: Args) -> Result<SearchResult> {
    let search_config = SearchConfig::default()
        .with_algorithm(args.algorithm.into())
        .with_start(args.start)
        .with_max_attempts_option(args.iterations);
    let parallel_config = ParallelConfig::default()
        .with_workers(args.workers)
        .with_seed_option(args.seed);

    info!(
        algorithm = %search_config.algorithm,
        workers = parallel_config.num_workers,
        cores = num_cpus::get(),
        "Started using {} workers on {} cores",
        parallel_config.num_workers,
        num_cpus::get()
    );
    if search_config.algorithm == Algorithm::Sequence {
        info!("Sequence search from {}", search_config.start);
    }

    // SIGINT and SIGTERM both end the search with a summary
    let (interrupt_tx, interrupt_rx) = bounded(1);
    ctrlc::set_handler(move || {
        let _ = interrupt_tx.try_send(());
    })
    .context("failed to install interrupt handler")?;

    Ok(run_parallel_search(
        &search_config,
        &parallel_config,
        &interrupt_rx,
    ))
}

// --- Main Function ---
fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    println!("Magic square search");
    let result = run(args)?;
    info!(outcome = %result.outcome, "Search finished");
    println!("{}", result);

    Ok(())
}
