//! Sentiment Shield command-line host
//!
//! Classifies text, scans JSON-lines content and manages the persisted
//! settings used by the scanner.

use anyhow::{Context, Result};
use clap::Parser;
use sentiment_shield_scanner::cli::{Cli, Commands};
use sentiment_shield_scanner::{commands, AppConfig, LogConfig};
use std::fs::File;
use std::io::{self, BufReader, Read};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(state) = cli.state {
        config.state_path = state;
    }
    if let Some(lexicon) = cli.lexicon {
        config.lexicon_path = Some(lexicon);
    }

    init_tracing(&config.log, cli.verbose, cli.json_logs);

    let mut stdout = io::stdout();

    match cli.command {
        Commands::Classify { text, author, json } => {
            let text = match text {
                Some(text) => text,
                None => {
                    let mut buf = String::new();
                    io::stdin()
                        .read_to_string(&mut buf)
                        .context("Failed to read text from stdin")?;
                    buf
                }
            };
            commands::classify(&config, &text, &author, json, &mut stdout)?;
        }

        Commands::Scan { input, watch } => {
            let mut scanner = commands::open_scanner(&config)?;
            if watch {
                commands::watch(scanner, BufReader::new(io::stdin()), &mut stdout).await?;
            } else if input.as_os_str() == "-" {
                commands::scan(&mut scanner, io::stdin().lock(), &mut stdout)?;
            } else {
                let file = File::open(&input)
                    .with_context(|| format!("Failed to open {}", input.display()))?;
                commands::scan(&mut scanner, BufReader::new(file), &mut stdout)?;
            }
        }

        Commands::Stats { reset, json } => {
            let mut scanner = commands::open_scanner(&config)?;
            commands::stats(&mut scanner, reset, json, &mut stdout)?;
        }

        Commands::Settings(args) => {
            let mut scanner = commands::open_scanner(&config)?;
            commands::settings(&mut scanner, args.action, &mut stdout)?;
        }
    }

    Ok(())
}

/// Initialize tracing subscriber; logs go to stderr so stdout stays parseable
fn init_tracing(log: &LogConfig, verbose: bool, json: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("sentiment_shield=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("sentiment_shield={}", log.level))
        })
    };

    let registry = tracing_subscriber::registry().with(filter);
    if json || log.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();
    }
}
