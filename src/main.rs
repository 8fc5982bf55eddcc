use clap::{Parser, Subcommand};
use eyre::Result;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

mod config;
mod display;
mod graph;
mod rates;

use config::{demo_graph, demo_rate_table, DEMO_DESTINATION, DEMO_SOURCE};
use display::{print_report, print_report_json, RatioReport};
use graph::RatioFinder;

#[derive(Parser)]
#[command(name = "fx-ratio")]
#[command(about = "Currency conversion ratio finder", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the built-in demo conversion (default)
    Demo,

    /// Compute the conversion ratio between two currencies in the demo market
    Ratio {
        /// Source currency symbol
        #[arg(long)]
        from: String,

        /// Destination currency symbol
        #[arg(long)]
        to: String,

        /// Emit the result as JSON instead of a formatted line
        #[arg(long, default_value = "false")]
        json: bool,
    },
}

fn run_demo() -> Result<()> {
    run_ratio(DEMO_SOURCE, DEMO_DESTINATION, false)
}

fn run_ratio(from: &str, to: &str, json: bool) -> Result<()> {
    let from = from.to_lowercase();
    let to = to.to_lowercase();

    let graph = demo_graph();
    let rates = demo_rate_table();
    info!(
        "demo market loaded: {} currencies, {} edges, {} quotes",
        graph.node_count(),
        graph.edge_count(),
        rates.len()
    );

    let finder = RatioFinder::new(&graph, &rates);
    let ratio = finder.find_ratio(&from, &to)?;

    let report = RatioReport::new(&from, &to, ratio);
    if json {
        print_report_json(&report);
    } else {
        print_report(&report);
    }

    Ok(())
}

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::WARN)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Demo) | None => run_demo(),
        Some(Commands::Ratio { from, to, json }) => run_ratio(&from, &to, json),
    }
}
