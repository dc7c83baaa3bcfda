//! Fascia CLI - renders hosted-CMS pages into a static site.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "fascia")]
#[command(about = "Renders pages from a hosted visual CMS into a static site")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to fascia.toml config file
    #[arg(short, long, default_value = "fascia.toml")]
    config: PathBuf,

    /// CMS API key (overrides fascia.toml)
    #[arg(long, env = "FASCIA_API_KEY")]
    api_key: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize fascia in the current project
    Init {
        /// Skip interactive prompts, use defaults
        #[arg(short, long)]
        yes: bool,
    },

    /// Build the static site from CMS content
    Build {
        /// Output directory (defaults to config or "dist")
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip minification
        #[arg(long)]
        no_minify: bool,
    },

    /// Serve the site with on-demand generation and revalidation
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Do not open browser
        #[arg(long)]
        no_open: bool,
    },

    /// Start an editor preview session server
    Preview {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Do not open browser
        #[arg(long)]
        no_open: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
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
            commands::init::run(yes).await?;
        }
        Commands::Build { output, no_minify } => {
            let minify = if no_minify { Some(false) } else { None };
            commands::build::run(&cli.config, cli.api_key, output, minify).await?;
        }
        Commands::Serve { port, no_open } => {
            commands::serve::run(&cli.config, cli.api_key, port, !no_open).await?;
        }
        Commands::Preview { port, no_open } => {
            commands::preview::run(&cli.config, cli.api_key, port, !no_open).await?;
        }
    }

    Ok(())
}
