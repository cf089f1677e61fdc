//! Lectern CLI - compiles annotated course notes into slide pages.
//!
//! Provides commands for:
//! - `build`: Compile a source tree of markdown documents to HTML

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::BuildArgs;
use output::Output;

/// Lectern - course page compiler.
#[derive(Parser)]
#[command(name = "lectern", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile every markdown document under the source tree.
    Build(BuildArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let verbose = matches!(&cli.command, Commands::Build(args) if args.verbose);
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = match cli.command {
        Commands::Build(args) => args.execute(&output),
    };

    match result {
        Ok(failed) if failed > 0 => std::process::exit(1),
        Ok(_) => {}
        Err(err) => {
            output.error(&format!("Error: {err}"));
            std::process::exit(1);
        }
    }
}
