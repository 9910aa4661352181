//! Translator client: one configured session over the Translator Text API

use std::collections::BTreeMap;
use tracing::info;

use crate::core::config::TranslatorConfig;
use crate::core::errors::Result;
use crate::core::executor::HttpExecutor;
use crate::core::language::{Language, LanguageCatalog};
use crate::core::models::{BreakSentencesResult, DetectResult, TranslationResult};
use crate::services::{detect, sentences, translate};

/// Async Translator client holding its own credentials, token cache and name cache
///
/// Clones share the same state; separately constructed clients are independent.
#[derive(Debug, Clone)]
pub struct TranslatorClient {
    executor: HttpExecutor,
    catalog: LanguageCatalog,
}

impl TranslatorClient {
    /// Create a new client
    pub fn new(config: TranslatorConfig) -> Result<Self> {
        let executor = HttpExecutor::new(config)?;
        let catalog = LanguageCatalog::new(executor.clone());

        info!(
            "Translator client ready for {}",
            executor.config().api_base_url
        );

        Ok(Self { executor, catalog })
    }

    /// Create from environment
    pub fn from_env() -> Result<Self> {
        let config = TranslatorConfig::from_env()?;
        Self::new(config)
    }

    /// Replace the subscription key used by subsequent requests
    pub async fn set_subscription_key(&self, key: impl Into<String>) {
        self.executor.set_subscription_key(Some(key.into())).await;
    }

    /// Detect the language of `text`, returning its code
    pub async fn detect(&self, text: &str) -> Result<String> {
        detect::detect(&self.executor, text).await
    }

    /// Detect the language of each text
    pub async fn detect_batch<S: AsRef<str>>(&self, texts: &[S]) -> Result<Vec<String>> {
        detect::detect_batch(&self.executor, texts).await
    }

    /// Full detect results, alternatives included
    pub async fn detect_results<S: AsRef<str>>(&self, texts: &[S]) -> Result<Vec<DetectResult>> {
        detect::retrieve_results(&self.executor, texts).await
    }

    /// Sentence lengths of `text`, which is written in `from`
    pub async fn break_sentences(&self, text: &str, from: Language) -> Result<Vec<u32>> {
        sentences::break_sentences(&self.executor, text, from).await
    }

    /// Full breaksentence results for texts written in `from`
    pub async fn break_sentences_results<S: AsRef<str>>(
        &self,
        from: Language,
        texts: &[S],
    ) -> Result<Vec<BreakSentencesResult>> {
        sentences::retrieve_results(&self.executor, from, texts).await
    }

    /// Translate `text` into `to`; `from = None` auto-detects the source
    pub async fn translate(&self, text: &str, from: Option<Language>, to: Language) -> Result<String> {
        translate::translate(&self.executor, text, from, to).await
    }

    /// Translate each text, keeping input order
    pub async fn translate_batch<S: AsRef<str>>(
        &self,
        texts: &[S],
        from: Option<Language>,
        to: Language,
    ) -> Result<Vec<String>> {
        translate::translate_batch(&self.executor, texts, from, to).await
    }

    /// Full translate results, detected source language included
    pub async fn translate_results<S: AsRef<str>>(
        &self,
        from: Option<Language>,
        to: Language,
        texts: &[S],
    ) -> Result<Vec<TranslationResult>> {
        translate::retrieve_results(&self.executor, from, to, texts).await
    }

    /// Name of `language` in the language of `locale`
    pub async fn name_of(&self, language: Language, locale: Language) -> Result<String> {
        self.catalog.name_of(language, locale).await
    }

    /// Display name to language, names written in `locale`
    pub async fn localized_names(&self, locale: Language) -> Result<BTreeMap<String, Language>> {
        self.catalog.localized_names(locale).await
    }

    /// Codes the service currently accepts for translation
    pub async fn language_codes_for_translation(&self) -> Result<Vec<String>> {
        self.catalog.language_codes_for_translation().await
    }

    /// Forget every memoized language name
    pub async fn flush_name_cache(&self) {
        self.catalog.flush_cache().await
    }

    /// Force the next request to issue a new bearer token
    pub async fn reset_token(&self) {
        self.executor.tokens().reset().await
    }

    /// Underlying request executor
    pub fn executor(&self) -> &HttpExecutor {
        &self.executor
    }

    /// Underlying language name catalog
    pub fn catalog(&self) -> &LanguageCatalog {
        &self.catalog
    }
}
