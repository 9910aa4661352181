//! Request-size limits enforced before any network call
//!
//! Lengths are counted in UTF-16 code units, the unit the service bills and
//! limits by, so characters outside the Basic Multilingual Plane count twice.

use crate::core::errors::{Result, TranslatorError};
use crate::core::models::{TextArrayRequest, TextItem};

/// Size limits of one endpoint, measured on the JSON-encoded body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestLimits {
    /// Endpoint name used in error messages
    pub endpoint: &'static str,
    /// Most texts one request may carry
    pub max_texts: usize,
    /// Per `{"Text": ...}` element; `None` when the endpoint has no such limit
    pub max_item_chars: Option<usize>,
    /// Whole JSON array
    pub max_request_chars: usize,
}

/// Limits of `POST /detect`
pub const DETECT_LIMITS: RequestLimits = RequestLimits {
    endpoint: "Detect",
    max_texts: 100,
    max_item_chars: Some(10_000),
    max_request_chars: 50_000,
};

/// Limits of `POST /breaksentence`
pub const BREAK_SENTENCES_LIMITS: RequestLimits = RequestLimits {
    endpoint: "BreakSentences",
    max_texts: 100,
    max_item_chars: Some(10_000),
    max_request_chars: 50_000,
};

/// Limits of `POST /translate`; no per-element limit
pub const TRANSLATE_LIMITS: RequestLimits = RequestLimits {
    endpoint: "Translate",
    max_texts: 100,
    max_item_chars: None,
    max_request_chars: 5_000,
};

impl RequestLimits {
    /// Validate `texts` and build the request body
    pub fn check<S: AsRef<str>>(&self, texts: &[S]) -> Result<TextArrayRequest> {
        if texts.is_empty() {
            return Err(TranslatorError::InvalidInput {
                message: format!("{} needs at least one text", self.endpoint),
            });
        }

        if texts.len() > self.max_texts {
            return Err(self.exceeded(
                "TEXT_COUNT_OVER_LIMIT",
                format!("can handle up to {} texts per request", self.max_texts),
            ));
        }

        if let Some(max_item) = self.max_item_chars {
            for text in texts {
                let json = serde_json::to_string(&TextItem::new(text.as_ref()))?;
                if utf16_len(&json) > max_item {
                    return Err(self.exceeded(
                        "TEXT_TOO_LARGE",
                        format!(
                            "can handle up to {} characters per array element",
                            thousands(max_item)
                        ),
                    ));
                }
            }
        }

        let request = TextArrayRequest::build(texts);
        let json = serde_json::to_string(&request)?;
        if utf16_len(&json) > self.max_request_chars {
            return Err(self.exceeded(
                "TEXT_TOO_LARGE",
                format!(
                    "can handle up to {} characters per request",
                    thousands(self.max_request_chars)
                ),
            ));
        }

        Ok(request)
    }

    fn exceeded(&self, limit: &'static str, message: String) -> TranslatorError {
        TranslatorError::LimitExceeded {
            endpoint: self.endpoint,
            limit,
            message,
        }
    }
}

fn utf16_len(s: &str) -> usize {
    s.encode_utf16().count()
}

fn thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
