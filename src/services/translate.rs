//! Text translation (`POST /translate`)

use reqwest::Method;
use tracing::debug;

use crate::core::errors::{Result, TranslatorError};
use crate::core::executor::HttpExecutor;
use crate::core::language::Language;
use crate::core::models::TranslationResult;
use crate::services::expect_results;
use crate::services::limits::TRANSLATE_LIMITS;

const SERVICE_PATH: &str = "translate";

/// Translate one text; `from = None` lets the service detect the source
pub async fn translate(
    executor: &HttpExecutor,
    text: &str,
    from: Option<Language>,
    to: Language,
) -> Result<String> {
    let results = retrieve_results(executor, from, to, &[text]).await?;

    results
        .first()
        .and_then(|result| result.first_text())
        .map(str::to_string)
        .ok_or_else(|| TranslatorError::no_result("Translate returned no translation"))
}

/// Translate every text, in input order
///
/// Entries the service returned without a translation map to `""`.
pub async fn translate_batch<S: AsRef<str>>(
    executor: &HttpExecutor,
    texts: &[S],
    from: Option<Language>,
    to: Language,
) -> Result<Vec<String>> {
    let results = retrieve_results(executor, from, to, texts).await?;

    Ok(results
        .iter()
        .map(|result| result.first_text().unwrap_or_default().to_string())
        .collect())
}

/// Full translation results, one per text
pub async fn retrieve_results<S: AsRef<str>>(
    executor: &HttpExecutor,
    from: Option<Language>,
    to: Language,
    texts: &[S],
) -> Result<Vec<TranslationResult>> {
    if to.is_auto_detect() {
        return Err(TranslatorError::InvalidInput {
            message: "Translate needs a concrete target language".to_string(),
        });
    }

    let request = TRANSLATE_LIMITS.check(texts)?;

    let mut query = Vec::with_capacity(2);
    if let Some(from) = from.filter(|l| !l.is_auto_detect()) {
        query.push(("from", from.code()));
    }
    query.push(("to", to.code()));
    let url = executor.endpoint_url(SERVICE_PATH, &query)?;

    debug!("Translating {} texts to {}", request.len(), to);
    let results = executor
        .execute(Method::POST, url, Some(&request), None)
        .await?;

    expect_results(results, request.len(), TRANSLATE_LIMITS.endpoint)
}
