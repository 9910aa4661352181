//! Wire models for the Translator Text API v3

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One element of a text array request body, serialized as `{"Text": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextItem {
    /// Input text, unmodified
    #[serde(rename = "Text")]
    pub text: String,
}

impl TextItem {
    /// Wrap one input text
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Ordered request body shared by detect, breaksentence and translate
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TextArrayRequest(pub Vec<TextItem>);

impl TextArrayRequest {
    /// One item per text, in input order
    pub fn build<S: AsRef<str>>(texts: &[S]) -> Self {
        Self(texts.iter().map(|t| TextItem::new(t.as_ref())).collect())
    }

    /// Number of texts
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the request carries no text
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Items in input order
    pub fn items(&self) -> &[TextItem] {
        &self.0
    }
}

/// Candidate language reported by the detect endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DetectAlternative {
    /// Language code
    pub language: String,
    /// Confidence between 0 and 1
    pub score: f32,
    /// Whether the language can be translated to and from
    pub is_translation_supported: bool,
    /// Whether the language can be transliterated
    pub is_transliteration_supported: bool,
}

/// Detect result for one input text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DetectResult {
    /// Code of the top-ranked language
    pub language: String,
    /// Confidence between 0 and 1
    pub score: f32,
    /// Whether the language can be translated to and from
    pub is_translation_supported: bool,
    /// Whether the language can be transliterated
    pub is_transliteration_supported: bool,
    /// Lower-ranked candidates
    pub alternatives: Vec<DetectAlternative>,
}

/// Language guess attached to breaksentence and translate results
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectedLanguage {
    /// Language code
    pub language: String,
    /// Confidence between 0 and 1
    pub score: f32,
}

/// Breaksentence result for one input text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BreakSentencesResult {
    /// Length of each sentence, in order
    #[serde(rename = "sentLen")]
    pub sentence_lengths: Vec<u32>,
    /// Present when the request did not name a language
    pub detected_language: Option<DetectedLanguage>,
}

/// A single target-language rendering
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Translation {
    /// Translated text
    pub text: String,
    /// Target language code
    pub to: String,
}

/// Translate result for one input text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TranslationResult {
    /// Present when the source language was auto-detected
    pub detected_language: Option<DetectedLanguage>,
    /// One entry per requested target
    pub translations: Vec<Translation>,
}

impl TranslationResult {
    /// Text of the first translation, if the service returned any
    pub fn first_text(&self) -> Option<&str> {
        self.translations.first().map(|t| t.text.as_str())
    }
}

/// Display names of one language in the requested locale
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LanguageName {
    /// Name in the requested locale
    pub name: String,
    /// Name in the language itself
    pub native_name: String,
    /// `ltr` or `rtl`
    pub dir: String,
}

/// Response of `GET /languages?scope=translation`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguagesResult {
    /// Names keyed by language code
    pub translation: HashMap<String, LanguageName>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_json_diff::assert_json_eq;
    use serde_json::json;

    #[test]
    fn test_text_array_request_shape() {
        let request = TextArrayRequest::build(&["Hello", "World"]);
        assert_json_eq!(
            serde_json::to_value(&request).unwrap(),
            json!([{"Text": "Hello"}, {"Text": "World"}])
        );
        assert_eq!(
            serde_json::to_string(&TextItem::new("Hi")).unwrap(),
            r#"{"Text":"Hi"}"#
        );
    }

    #[test]
    fn test_detect_result_with_missing_fields() {
        let results: Vec<DetectResult> =
            serde_json::from_str(r#"[{"language":"es","score":0.9,"alternatives":[]}]"#).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].language, "es");
        assert!(!results[0].is_translation_supported);
        assert!(results[0].alternatives.is_empty());
    }

    #[test]
    fn test_break_sentences_result() {
        let results: Vec<BreakSentencesResult> = serde_json::from_str(
            r#"[{"sentLen":[3,4],"detectedLanguage":{"language":"en","score":1.0}}]"#,
        )
        .unwrap();
        assert_eq!(results[0].sentence_lengths, vec![3, 4]);
        assert_eq!(results[0].detected_language.as_ref().unwrap().language, "en");
    }

    #[test]
    fn test_translation_result_first_text() {
        let results: Vec<TranslationResult> = serde_json::from_str(
            r#"[{"translations":[{"text":"Bonjour","to":"fr"}]},{"translations":[]}]"#,
        )
        .unwrap();
        assert_eq!(results[0].first_text(), Some("Bonjour"));
        assert!(results[0].detected_language.is_none());
        assert_eq!(results[1].first_text(), None);
    }

    #[test]
    fn test_languages_result() {
        let result: LanguagesResult = serde_json::from_str(
            r#"{"translation":{"fr":{"name":"French","nativeName":"Français","dir":"ltr"}}}"#,
        )
        .unwrap();
        assert_eq!(result.translation["fr"].native_name, "Français");
    }
}
