//! Main entry point for the Microsoft Translator demo CLI

#![forbid(unsafe_code)]

use clap::Parser;
use dotenvy::dotenv;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use microsoft_translator::{TranslatorClient, TranslatorConfig};

mod cli;

use cli::commands::Commands;

/// Microsoft Translator - translate, detect and split text from the command line
#[derive(Parser, Debug)]
#[command(name = "microsoft-translator", version, about, long_about = None)]
struct Args {
    /// Subscription key (optional, defaults to MS_TRANSLATOR_SUBSCRIPTION_KEY env var)
    #[arg(long)]
    subscription_key: Option<String>,

    /// JSON configuration file (overrides environment configuration)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose {
        "debug".to_string()
    } else {
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("{}={}", env!("CARGO_CRATE_NAME"), log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = match &args.config {
        Some(path) => TranslatorConfig::from_file(path)?,
        None => TranslatorConfig::from_env()?,
    };

    // Override config with CLI args if provided
    if let Some(key) = args.subscription_key {
        config.subscription_key = Some(key);
    }

    let Some(command) = args.command else {
        println!("Please specify a command. Use --help for more information.");
        return Ok(());
    };

    let client = TranslatorClient::new(config)?;

    match command {
        Commands::Translate { text, from, to } => {
            cli::commands::handle_translate(client, text, from, to).await?;
        }
        Commands::Detect { text } => {
            cli::commands::handle_detect(client, text).await?;
        }
        Commands::BreakSentences { text, language } => {
            cli::commands::handle_break_sentences(client, text, language).await?;
        }
        Commands::Languages { locale } => {
            cli::commands::handle_languages(client, locale).await?;
        }
    }

    Ok(())
}
