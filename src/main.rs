//! Growth Analyzer CLI
//!
//! # Commands
//!
//! - `cycles`: HP-filter business-cycle comparison of two output series
//! - `growth`: growth accounting over a country-year panel
//! - `solow`: Solow-residual TFP growth from output, capital and labour
//! - `series`: list the registered series
//!
//! Results are printed to stdout as JSON; logs go to stderr.
//! Exit code 0 on success, 1 on any error.

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use growth_analyzer_lib::config::AppConfig;

mod commands;

/// Growth Analyzer - business cycles and growth accounting
#[derive(Parser)]
#[command(name = "growth-analyzer")]
#[command(version)]
#[command(about = "Business-cycle and growth-accounting analysis of macroeconomic series")]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare HP-filter cycles of two output series
    Cycles(commands::cycles::CyclesArgs),
    /// Growth accounting over a country panel file
    Growth(commands::growth::GrowthArgs),
    /// Solow residual from output, capital and labour series
    Solow(commands::solow::SolowArgs),
    /// List registered series
    Series,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();

    let exit_code = run(cli.command).await;
    std::process::exit(exit_code);
}

async fn run(command: Commands) -> i32 {
    let outcome = match command {
        Commands::Growth(args) => commands::growth::growth_command(args),
        Commands::Series => commands::list_series(),
        Commands::Cycles(args) => match AppConfig::from_env() {
            Ok(config) => commands::cycles::cycles_command(args, &config).await,
            Err(e) => Err(e),
        },
        Commands::Solow(args) => match AppConfig::from_env() {
            Ok(config) => commands::solow::solow_command(args, &config).await,
            Err(e) => Err(e),
        },
    };

    let rendered = outcome.and_then(|value| Ok(serde_json::to_string_pretty(&value)?));
    match rendered {
        Ok(text) => {
            println!("{}", text);
            0
        }
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("Error: {:#}", e);
            1
        }
    }
}
