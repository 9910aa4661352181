//! Translator Text API endpoints
//!
//! Each endpoint validates its request against the service limits, sends it
//! through the shared [`HttpExecutor`](crate::core::executor::HttpExecutor)
//! and maps the decoded response into the value callers want.

pub mod detect;
pub mod limits;
pub mod sentences;
pub mod translate;

use crate::core::errors::{Result, TranslatorError};

/// Require one result per input, in input order
pub(crate) fn expect_results<T>(results: Option<Vec<T>>, expected: usize, endpoint: &str) -> Result<Vec<T>> {
    let results = results.unwrap_or_default();

    if results.is_empty() {
        return Err(TranslatorError::no_result(format!("{} returned no results", endpoint)));
    }

    if results.len() != expected {
        return Err(TranslatorError::no_result(format!(
            "{} returned {} results for {} texts",
            endpoint,
            results.len(),
            expected
        )));
    }

    Ok(results)
}
