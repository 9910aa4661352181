//! Supported languages and their localized display names

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use reqwest::Method;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::core::errors::{Result, TranslatorError};
use crate::core::executor::HttpExecutor;
use crate::core::models::LanguagesResult;

macro_rules! languages {
    ($($variant:ident => $code:literal, $label:literal;)+) => {
        /// Languages supported by the Translator Text API
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Language {
            $(
                #[doc = $label]
                $variant,
            )+
        }

        const ALL_LANGUAGES: &[Language] = &[$(Language::$variant,)+];

        impl Language {
            /// Canonical code used on the wire (`""` for auto-detect)
            pub fn code(&self) -> &'static str {
                match self {
                    $(Language::$variant => $code,)+
                }
            }

            /// English label, available without a network call
            pub fn label(&self) -> &'static str {
                match self {
                    $(Language::$variant => $label,)+
                }
            }

            /// Parse a language from its canonical code
            pub fn from_code(code: &str) -> Option<Language> {
                match code {
                    $($code => Some(Language::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

languages! {
    AutoDetect => "", "Auto Detect";
    Afrikaans => "af", "Afrikaans";
    Arabic => "ar", "Arabic";
    Bangla => "bn", "Bangla";
    BosnianLatin => "bs", "Bosnian (Latin)";
    Bulgarian => "bg", "Bulgarian";
    CantoneseTraditional => "yue", "Cantonese (Traditional)";
    Catalan => "ca", "Catalan";
    ChineseSimplified => "zh-Hans", "Chinese Simplified";
    ChineseTraditional => "zh-Hant", "Chinese Traditional";
    Croatian => "hr", "Croatian";
    Czech => "cs", "Czech";
    Danish => "da", "Danish";
    Dutch => "nl", "Dutch";
    English => "en", "English";
    Estonian => "et", "Estonian";
    Fijian => "fj", "Fijian";
    Filipino => "fil", "Filipino";
    Finnish => "fi", "Finnish";
    French => "fr", "French";
    German => "de", "German";
    Greek => "el", "Greek";
    HaitianCreole => "ht", "Haitian Creole";
    Hebrew => "he", "Hebrew";
    Hindi => "hi", "Hindi";
    HmongDaw => "mww", "Hmong Daw";
    Hungarian => "hu", "Hungarian";
    Icelandic => "is", "Icelandic";
    Indonesian => "id", "Indonesian";
    Italian => "it", "Italian";
    Japanese => "ja", "Japanese";
    Kiswahili => "sw", "Kiswahili";
    Klingon => "tlh", "Klingon";
    KlingonPiqad => "tlh-Piqd", "Klingon (plqaD)";
    Korean => "ko", "Korean";
    Latvian => "lv", "Latvian";
    Lithuanian => "lt", "Lithuanian";
    Malagasy => "mg", "Malagasy";
    Malay => "ms", "Malay";
    Maltese => "mt", "Maltese";
    Norwegian => "nb", "Norwegian";
    Persian => "fa", "Persian";
    Polish => "pl", "Polish";
    Portuguese => "pt", "Portuguese";
    QueretaroOtomi => "otq", "Querétaro Otomi";
    Romanian => "ro", "Romanian";
    Russian => "ru", "Russian";
    Samoan => "sm", "Samoan";
    SerbianCyrillic => "sr-Cyrl", "Serbian (Cyrillic)";
    SerbianLatin => "sr-Latn", "Serbian (Latin)";
    Slovak => "sk", "Slovak";
    Slovenian => "sl", "Slovenian";
    Spanish => "es", "Spanish";
    Swedish => "sv", "Swedish";
    Tahitian => "ty", "Tahitian";
    Tamil => "ta", "Tamil";
    Telugu => "te", "Telugu";
    Thai => "th", "Thai";
    Tongan => "to", "Tongan";
    Turkish => "tr", "Turkish";
    Ukrainian => "uk", "Ukrainian";
    Urdu => "ur", "Urdu";
    Vietnamese => "vi", "Vietnamese";
    Welsh => "cy", "Welsh";
    YucatecMaya => "yua", "Yucatec Maya";
}

impl Language {
    /// Every supported language, auto-detect first
    pub fn all() -> &'static [Language] {
        ALL_LANGUAGES
    }

    /// Languages usable as a translation target
    pub fn translation_targets() -> &'static [Language] {
        &ALL_LANGUAGES[1..]
    }

    /// Whether this is the auto-detect placeholder
    pub fn is_auto_detect(&self) -> bool {
        matches!(self, Language::AutoDetect)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Language {
    type Err = TranslatorError;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("auto") {
            return Ok(Language::AutoDetect);
        }
        Language::from_code(s).ok_or_else(|| TranslatorError::InvalidInput {
            message: format!("unsupported language code '{}'", s),
        })
    }
}

impl Serialize for Language {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for Language {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Language::from_code(&code)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown language code '{}'", code)))
    }
}

/// Localized language names keyed by the locale they are written in
#[derive(Debug, Clone)]
pub struct LanguageCatalog {
    executor: HttpExecutor,
    names: Arc<RwLock<HashMap<Language, HashMap<String, String>>>>,
}

impl LanguageCatalog {
    /// Empty catalog that loads names through `executor`
    pub fn new(executor: HttpExecutor) -> Self {
        Self {
            executor,
            names: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Name of `language` written in `locale`
    pub async fn name_of(&self, language: Language, locale: Language) -> Result<String> {
        {
            let names = self.names.read().await;
            if let Some(in_locale) = names.get(&locale) {
                return lookup(in_locale, language, locale);
            }
        }

        let in_locale = self.load_locale(locale).await?;
        lookup(&in_locale, language, locale)
    }

    /// Display name to language for every language the service names in `locale`
    pub async fn localized_names(&self, locale: Language) -> Result<BTreeMap<String, Language>> {
        let in_locale = self.names_in(locale).await?;

        Ok(Language::translation_targets()
            .iter()
            .filter_map(|lang| in_locale.get(lang.code()).map(|name| (name.clone(), *lang)))
            .collect())
    }

    /// Codes the service currently accepts for translation
    pub async fn language_codes_for_translation(&self) -> Result<Vec<String>> {
        let in_locale = self.names_in(Language::English).await?;
        let mut codes: Vec<String> = in_locale.into_keys().collect();
        codes.sort();
        Ok(codes)
    }

    /// Forget every memoized name
    pub async fn flush_cache(&self) {
        self.names.write().await.clear();
        debug!("Language name cache flushed");
    }

    async fn names_in(&self, locale: Language) -> Result<HashMap<String, String>> {
        if let Some(in_locale) = self.names.read().await.get(&locale) {
            return Ok(in_locale.clone());
        }
        self.load_locale(locale).await
    }

    async fn load_locale(&self, locale: Language) -> Result<HashMap<String, String>> {
        if locale.is_auto_detect() {
            return Err(TranslatorError::InvalidInput {
                message: "language names need a concrete locale".to_string(),
            });
        }

        let url = self
            .executor
            .endpoint_url("languages", &[("scope", "translation")])?;

        let mut headers = HeaderMap::new();
        let accept = HeaderValue::from_str(locale.code()).map_err(|e| TranslatorError::InvalidInput {
            message: e.to_string(),
        })?;
        headers.insert(ACCEPT_LANGUAGE, accept);

        debug!("Loading language names for locale {}", locale);
        let listing: LanguagesResult = self
            .executor
            .execute::<(), _>(Method::GET, url, None, Some(headers))
            .await?
            .ok_or_else(|| TranslatorError::no_result("empty language listing"))?;

        let in_locale: HashMap<String, String> = listing
            .translation
            .into_iter()
            .map(|(code, name)| (code, name.name))
            .collect();

        self.names.write().await.insert(locale, in_locale.clone());
        Ok(in_locale)
    }
}

fn lookup(in_locale: &HashMap<String, String>, language: Language, locale: Language) -> Result<String> {
    in_locale.get(language.code()).cloned().ok_or_else(|| {
        TranslatorError::no_result(format!(
            "no name for '{}' in locale '{}'",
            language.code(),
            locale.code()
        ))
    })
}
