//! Stanza CLI
//!
//! Fetch a random poem from PoetryDB and render it as HTML.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod output;

/// Stanza - random poems as HTML
#[derive(Parser)]
#[command(name = "stanza")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "stanza.yaml", env = "STANZA_CONFIG")]
    config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter stanza.yaml
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: String,
    },

    /// Fetch one random poem and print its HTML
    Fetch {
        /// Wrap the poem in a standalone HTML page
        #[arg(long)]
        page: bool,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<String>,

        /// Configuration profile to use
        #[arg(short, long)]
        profile: Option<String>,
    },

    /// Render a saved PoetryDB response ("-" reads stdin)
    Render {
        /// JSON file with the API response
        file: String,

        /// Wrap the poem in a standalone HTML page
        #[arg(long)]
        page: bool,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<String>,

        /// Configuration profile to use
        #[arg(short, long)]
        profile: Option<String>,
    },

    /// Press Enter for a new poem, "q" to quit
    Interactive {
        /// Wrap each poem in a standalone HTML page
        #[arg(long)]
        page: bool,

        /// Rewrite this file with every new poem instead of printing it
        #[arg(short, long)]
        output: Option<String>,

        /// Replay a saved response instead of calling the API
        #[arg(long)]
        from: Option<String>,

        /// Configuration profile to use
        #[arg(short, long)]
        profile: Option<String>,
    },

    /// Validate configuration without fetching
    Validate {
        /// Configuration profile to use
        #[arg(short, long)]
        profile: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for HTML
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Init { path } => {
            commands::init::run(&path).await?;
        }
        Commands::Fetch {
            page,
            output,
            profile,
        } => {
            commands::fetch::run(&cli.config, profile.as_deref(), page, output.as_deref()).await?;
        }
        Commands::Render {
            file,
            page,
            output,
            profile,
        } => {
            commands::render::run(
                &cli.config,
                profile.as_deref(),
                &file,
                page,
                output.as_deref(),
            )
            .await?;
        }
        Commands::Interactive {
            page,
            output,
            from,
            profile,
        } => {
            commands::interactive::run(
                &cli.config,
                profile.as_deref(),
                page,
                output.as_deref(),
                from.as_deref(),
            )
            .await?;
        }
        Commands::Validate { profile } => {
            commands::validate::run(&cli.config, profile.as_deref()).await?;
        }
    }

    Ok(())
}
