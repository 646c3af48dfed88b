use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use console::style;
use words_prep::commands::{annotate_embeddings, fetch_words, merge_new_words, self_test};
use words_prep::config::{Config, get_config_dir, init_config, show_config};

#[derive(Parser)]
#[command(name = "words-prep")]
#[command(about = "Prepare the untranslatable words dataset: import, merge and embed")]
#[command(version)]
struct Cli {
    /// Directory holding config.toml (defaults to ~/.words-prep)
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download the published CSV word list and save it as JSON
    Fetch,
    /// Merge curated words into a dataset, skipping duplicates
    Merge {
        /// Dataset to merge into
        dataset: PathBuf,
        /// JSON file of candidate words (defaults to the built-in curated list)
        #[arg(long)]
        words: Option<PathBuf>,
    },
    /// Generate embeddings for every word that lacks one
    Embed {
        /// Dataset to annotate
        input: PathBuf,
    },
    /// Run sanity checks on the sample data and the reference dataset
    SelfTest,
    /// Write the default configuration file or show the current one
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}

fn parse_cli() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            // Usage errors share the exit status of every other failure
            let _ = e.print();
            process::exit(1);
        }
    }
}

/// One-line report for a failed run, including every context layer.
///
/// A cause already spelled out by the layer above it is not repeated.
fn error_report(error: &anyhow::Error) -> String {
    let mut report = format!("Error: {error}");
    let mut previous = error.to_string();

    for cause in error.chain().skip(1) {
        let text = cause.to_string();
        if !previous.contains(&text) {
            report.push_str(": ");
            report.push_str(&text);
        }
        previous = text;
    }

    report
}

fn run(cli: Cli) -> Result<()> {
    let config_dir = match cli.config_dir {
        Some(dir) => dir,
        None => get_config_dir()?,
    };
    let config = Config::load(&config_dir)?;

    match cli.command {
        Commands::Fetch => {
            fetch_words(&config)?;
        }
        Commands::Merge { dataset, words } => {
            merge_new_words(&config, &dataset, words.as_deref())?;
        }
        Commands::Embed { input } => {
            let api_key = config.embedding.api_key_from_env()?;
            annotate_embeddings(&config, &input, api_key)?;
        }
        Commands::SelfTest => {
            self_test(&config);
        }
        Commands::Config { show } => {
            if show {
                show_config(&config);
            } else if init_config(&config_dir)? {
                eprintln!(
                    "{} Configuration written to {}",
                    style("✓").green(),
                    style(config.config_file_path().display()).cyan()
                );
            } else {
                eprintln!(
                    "Configuration already exists at {}",
                    style(config.config_file_path().display()).cyan()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    if let Err(e) = run(parse_cli()) {
        eprintln!("{}", error_report(&e));
        process::exit(1);
    }
}
