//! CLI command definitions and handlers

use clap::Subcommand;
use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::time::Duration;
use tracing::info;

use microsoft_translator::{Language, TranslatorClient, TranslatorError};

/// Commands for the Microsoft Translator demo
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Translate text
    Translate {
        /// Text to translate; several values are translated in one request
        #[arg(required = true)]
        text: Vec<String>,

        /// Source language (auto-detect if not specified)
        #[arg(short, long)]
        from: Option<Language>,

        /// Target language
        #[arg(short, long)]
        to: Language,
    },

    /// Detect the language of text
    Detect {
        /// Text to inspect; several values are detected in one request
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// Report sentence lengths
    BreakSentences {
        /// Text to split
        text: String,

        /// Language the text is written in
        #[arg(short, long)]
        language: Language,
    },

    /// List languages with names localized into a locale
    Languages {
        #[arg(short, long, default_value = "en")]
        locale: Language,
    },
}

/// Run a client call on a background task while a spinner ticks
async fn in_background<T, F>(message: &str, call: F) -> anyhow::Result<Result<T, TranslatorError>>
where
    T: Send + 'static,
    F: Future<Output = Result<T, TranslatorError>> + Send + 'static,
{
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = tokio::spawn(call).await?;

    spinner.finish_and_clear();
    Ok(result)
}

fn report(err: &TranslatorError) {
    eprintln!("❌ {}", err);
    if err.is_transient() {
        eprintln!("   The service may recover; try again later.");
    } else if err.is_input_error() {
        eprintln!("   Check the input or configuration.");
    }
}

/// Handle translate command
pub async fn handle_translate(
    client: TranslatorClient,
    text: Vec<String>,
    from: Option<Language>,
    to: Language,
) -> anyhow::Result<()> {
    info!("Translating {} texts to {}", text.len(), to);

    let result = in_background("Translating...", async move {
        if text.len() == 1 {
            client.translate(&text[0], from, to).await.map(|t| vec![t])
        } else {
            client.translate_batch(&text, from, to).await
        }
    })
    .await?;

    match result {
        Ok(translations) => {
            for translation in translations {
                println!("{}", translation);
            }
        }
        Err(e) => report(&e),
    }

    Ok(())
}

/// Handle detect command
pub async fn handle_detect(client: TranslatorClient, text: Vec<String>) -> anyhow::Result<()> {
    let texts = text.clone();
    let result = in_background("Detecting...", async move { client.detect_results(&texts).await }).await?;

    match result {
        Ok(results) => {
            for (input, detected) in text.iter().zip(results) {
                let label = Language::from_code(&detected.language)
                    .map(|l| l.label())
                    .unwrap_or("unknown");
                println!(
                    "{}\t{} ({}, score {:.2})",
                    input, detected.language, label, detected.score
                );
            }
        }
        Err(e) => report(&e),
    }

    Ok(())
}

/// Handle break-sentences command
pub async fn handle_break_sentences(
    client: TranslatorClient,
    text: String,
    language: Language,
) -> anyhow::Result<()> {
    let input = text.clone();
    let result = in_background("Breaking sentences...", async move {
        client.break_sentences(&input, language).await
    })
    .await?;

    match result {
        Ok(lengths) => {
            let chars: Vec<char> = text.chars().collect();
            let mut start = 0;
            for len in lengths {
                let end = (start + len as usize).min(chars.len());
                let sentence: String = chars[start..end].iter().collect();
                println!("{:>4}  {}", len, sentence.trim());
                start = end;
            }
        }
        Err(e) => report(&e),
    }

    Ok(())
}

/// Handle languages command
pub async fn handle_languages(client: TranslatorClient, locale: Language) -> anyhow::Result<()> {
    let result = in_background("Loading languages...", async move {
        client.localized_names(locale).await
    })
    .await?;

    match result {
        Ok(names) => {
            for (name, language) in names {
                println!("{:<10} {}", language.code(), name);
            }
        }
        Err(e) => report(&e),
    }

    Ok(())
}
