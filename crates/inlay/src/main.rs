//! Inlay CLI - retargets copyable UI component sources to a consumer project.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "inlay")]
#[command(about = "Retarget copyable UI component sources to your project")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to components.json config file
    #[arg(short, long, default_value = "components.json")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a components.json in the current project
    Init {
        /// Skip interactive prompts, use defaults
        #[arg(short, long)]
        yes: bool,
    },

    /// Transform registry sources for this project and write them out
    Apply {
        /// Files or directories to transform
        paths: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long, default_value = "components")]
        out: PathBuf,

        /// Base color payload (JSON) for projects without CSS variables
        #[arg(long)]
        colors: Option<PathBuf>,

        /// Icon lookup table (JSON) overriding the bundled one
        #[arg(long)]
        icons: Option<PathBuf>,

        /// Treat sources as coming from a third-party registry
        #[arg(long)]
        remote: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    // Execute command
    match cli.command {
        Commands::Init { yes } => {
            commands::init::run(yes)?;
        }
        Commands::Apply {
            paths,
            out,
            colors,
            icons,
            remote,
        } => {
            commands::apply::run(&cli.config, &paths, &out, colors.as_deref(), icons.as_deref(), remote)?;
        }
    }

    Ok(())
}
