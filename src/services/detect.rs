//! Language detection (`POST /detect`)

use reqwest::Method;
use tracing::debug;

use crate::core::errors::{Result, TranslatorError};
use crate::core::executor::HttpExecutor;
use crate::core::models::DetectResult;
use crate::services::expect_results;
use crate::services::limits::DETECT_LIMITS;

const SERVICE_PATH: &str = "detect";

/// Detect the language of a single text, returning its language code
pub async fn detect(executor: &HttpExecutor, text: &str) -> Result<String> {
    let results = retrieve_results(executor, &[text]).await?;

    results
        .into_iter()
        .next()
        .map(|result| result.language)
        .ok_or_else(|| TranslatorError::no_result("Detect returned no results"))
}

/// Detect the language of every text, in input order
pub async fn detect_batch<S: AsRef<str>>(executor: &HttpExecutor, texts: &[S]) -> Result<Vec<String>> {
    let results = retrieve_results(executor, texts).await?;
    Ok(results.into_iter().map(|result| result.language).collect())
}

/// Full detection results, one per text
pub async fn retrieve_results<S: AsRef<str>>(
    executor: &HttpExecutor,
    texts: &[S],
) -> Result<Vec<DetectResult>> {
    let request = DETECT_LIMITS.check(texts)?;
    let url = executor.endpoint_url(SERVICE_PATH, &[])?;

    debug!("Detecting language of {} texts", request.len());
    let results = executor
        .execute(Method::POST, url, Some(&request), None)
        .await?;

    expect_results(results, request.len(), DETECT_LIMITS.endpoint)
}
