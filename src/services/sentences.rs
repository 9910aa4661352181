//! Sentence boundary detection (`POST /breaksentence`)

use reqwest::Method;
use tracing::debug;

use crate::core::errors::{Result, TranslatorError};
use crate::core::executor::HttpExecutor;
use crate::core::language::Language;
use crate::core::models::BreakSentencesResult;
use crate::services::expect_results;
use crate::services::limits::BREAK_SENTENCES_LIMITS;

const SERVICE_PATH: &str = "breaksentence";

/// Lengths of the sentences found in `text`
pub async fn break_sentences(executor: &HttpExecutor, text: &str, from: Language) -> Result<Vec<u32>> {
    let results = retrieve_results(executor, from, &[text]).await?;

    results
        .into_iter()
        .next()
        .map(|result| result.sentence_lengths)
        .ok_or_else(|| TranslatorError::no_result("BreakSentences returned no results"))
}

/// Full sentence-break results, one per text
pub async fn retrieve_results<S: AsRef<str>>(
    executor: &HttpExecutor,
    from: Language,
    texts: &[S],
) -> Result<Vec<BreakSentencesResult>> {
    if from.is_auto_detect() {
        return Err(TranslatorError::InvalidInput {
            message: "BreakSentences does not support auto-detect; specify the origin language"
                .to_string(),
        });
    }

    let request = BREAK_SENTENCES_LIMITS.check(texts)?;
    let url = executor.endpoint_url(SERVICE_PATH, &[("language", from.code())])?;

    debug!("Breaking {} texts into sentences ({})", request.len(), from);
    let results = executor
        .execute(Method::POST, url, Some(&request), None)
        .await?;

    expect_results(results, request.len(), BREAK_SENTENCES_LIMITS.endpoint)
}
