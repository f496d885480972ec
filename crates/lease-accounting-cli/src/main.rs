mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::{fmt, EnvFilter};

use commands::lease::{CompareArgs, LeaseArgs};

/// ASC 842 and IFRS 16 lease schedules
#[derive(Parser)]
#[command(
    name = "lease",
    version,
    about = "ASC 842 and IFRS 16 lease schedules",
    long_about = "Computes lessee lease accounting with decimal precision: initial \
                  measurement of the lease liability and right-of-use asset, and \
                  period-by-period schedules for ASC 842 finance and operating leases \
                  and the IFRS 16 single model."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Initial lease liability and ROU asset
    Measure(LeaseArgs),
    /// ASC 842 schedule (finance or operating)
    Asc842(LeaseArgs),
    /// IFRS 16 schedule
    Ifrs16(LeaseArgs),
    /// ASC 842 and IFRS 16 side by side
    Compare(CompareArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

/// Log to stderr so stdout stays machine-readable. `RUST_LOG` overrides the
/// default level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("lease_accounting_core=warn,lease=warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Measure(args) => commands::lease::run_measure(args),
        Commands::Asc842(args) => commands::lease::run_asc842(args),
        Commands::Ifrs16(args) => commands::lease::run_ifrs16(args),
        Commands::Compare(args) => commands::lease::run_compare(args),
        Commands::Version => {
            println!("lease {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
