//! Microsoft Translator - async Rust client for the Translator Text API v3
//!
//! This library provides language detection, sentence breaking, translation
//! and localized language names, with bearer-token caching and request-size
//! validation handled by the client.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod core;
pub mod services;

// Re-export key types for convenience
pub use crate::core::{
    client::TranslatorClient,
    config::TranslatorConfig,
    errors::{Result, TranslatorError},
    language::{Language, LanguageCatalog},
    models::{BreakSentencesResult, DetectResult, TranslationResult},
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
