mod commands;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cardlens", about = "Trading card photo comparison tool")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show image dimensions and how they fit the comparison view
    Info(commands::info::InfoArgs),
    /// Render the difference between a reference and an aligned upload
    Diff(commands::diff::DiffArgs),
    /// Solve the alignment that centers a picked point
    Center(commands::center::CenterArgs),
    /// Print where the aligned upload lands in the view
    Place(commands::place::PlaceArgs),
    /// Print the default viewer config as TOML
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Info(args) => commands::info::run(args),
        Commands::Diff(args) => commands::diff::run(args),
        Commands::Center(args) => commands::center::run(args),
        Commands::Place(args) => commands::place::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
