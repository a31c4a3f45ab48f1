//! AFG CLI - Command-line interface
//!
//! Usage:
//!   afg run [--input DIR] [--output DIR] [--config FILE]
//!   afg entities [--input DIR] [--config FILE]
//!   afg classify <sentence>

use std::path::{Path, PathBuf};

use afg_cli::{load_documents, run_and_export, Pipeline};
use afg_core::{Affordance, AppConfig, EntityType, LoggingConfig};
use afg_extractor::{classify_affordance, LexiconSentiment, SentimentScorer};
use anyhow::Context;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "afg")]
#[command(about = "Affordance graph extraction from interview transcripts")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline and write nodes.csv / edges.csv
    Run {
        /// Directory of transcripts (demo transcripts when omitted)
        #[arg(long)]
        input: Option<PathBuf>,
        /// Directory the CSV files are written into
        #[arg(long)]
        output: Option<PathBuf>,
        /// TOML configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the extracted entity registry as JSON
    Entities {
        /// Directory of transcripts (demo transcripts when omitted)
        #[arg(long)]
        input: Option<PathBuf>,
        /// TOML configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Show how a single sentence would be labeled
    Classify {
        /// Sentence to classify
        sentence: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            input,
            output,
            config,
        } => {
            let mut config = load_config(config.as_deref())?;
            if let Some(dir) = input {
                config.input.directory = Some(dir);
            }
            if let Some(dir) = output {
                config.output.directory = dir;
            }
            init_tracing(&config.logging);

            let (output, summary) = run_and_export(&config).context("Pipeline run failed")?;

            tracing::info!("Run summary: {}", serde_json::to_string(&output.summary())?);

            let stats = output.graph.stats();
            tracing::info!(
                "Graph: {} people, {} technologies, {} edges",
                stats.people,
                stats.technologies,
                stats.edge_count
            );
            for (affordance, count) in &stats.edges_by_affordance {
                tracing::info!("  {} ({}): {}", affordance, affordance.description(), count);
            }

            println!(
                "Wrote {} nodes to {}",
                summary.node_rows,
                summary.nodes_path.display()
            );
            println!(
                "Wrote {} edges to {}",
                summary.edge_rows,
                summary.edges_path.display()
            );
        }
        Commands::Entities { input, config } => {
            let mut config = load_config(config.as_deref())?;
            if let Some(dir) = input {
                config.input.directory = Some(dir);
            }
            init_tracing(&config.logging);

            let documents = load_documents(&config.input)?;
            let (registry, stats) = Pipeline::from_config(&config).extract(&documents)?;
            tracing::info!(
                "{} people, {} technologies, {} roles assigned",
                stats.people_added,
                stats.technologies_added,
                stats.roles_assigned
            );

            println!("{}", serde_json::to_string_pretty(&registry)?);
        }
        Commands::Classify { sentence } => {
            let config = AppConfig::from_env()?;
            init_tracing(&config.logging);

            let affordance: Affordance =
                classify_affordance(&sentence, EntityType::Person, EntityType::Technology);
            let polarity = LexiconSentiment::default().polarity(&sentence);

            println!("Affordance: {} ({})", affordance, affordance.description());
            println!("Sentiment:  {:.3}", polarity);
        }
    }

    Ok(())
}

/// Configuration file (if any) with environment overrides applied
fn load_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    let config = match path {
        Some(path) => AppConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?
            .with_env_override()?,
        None => AppConfig::from_env()?,
    };
    Ok(config)
}

/// Log to stderr so stdout only carries command output
fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if logging.json_format {
        builder.json().init();
    } else {
        builder.init();
    }
}
