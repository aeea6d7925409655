//! polycrete CLI
//!
//! Command-line interface for tracking molds and planning
//! polymer-concrete mixtures.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use polycrete_core::{Config, MoldStore};

mod commands;
mod output;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "polycrete")]
#[command(about = "polycrete - mold tracking and mixture planning")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a mold
    #[command(alias = "new")]
    Add {
        /// Interior volume in milliliters
        volume_ml: f64,
        /// Display name (auto-numbered when omitted)
        name: Option<String>,
    },
    /// List molds with the batch totals
    #[command(alias = "ls")]
    List,
    /// Show the mixture breakdown for the active molds
    Mix,
    /// Toggle whether a mold counts toward the batch
    Toggle {
        /// Mold ID (full id or prefix)
        id: String,
    },
    /// Delete a mold
    #[command(alias = "rm")]
    Delete {
        /// Mold ID (full id or prefix)
        id: String,
    },
    /// Delete every mold
    Clear,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    let config = Config::load()?;
    let mut store = MoldStore::open(&config)?;

    match cli.command {
        Commands::Add { volume_ml, name } => {
            commands::mold::add(&mut store, name.as_deref().unwrap_or(""), volume_ml, &output)
        }
        Commands::List => commands::mold::list(&store, &output),
        Commands::Mix => commands::mix::show(&store, &output),
        Commands::Toggle { id } => commands::mold::toggle(&mut store, &id, &output),
        Commands::Delete { id } => commands::mold::delete(&mut store, &id, &output),
        Commands::Clear => commands::mold::clear(&mut store, &output),
    }
}
