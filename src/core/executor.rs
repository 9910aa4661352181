//! Authenticated JSON request execution against the Translator API

use reqwest::header::{HeaderMap, CONTENT_TYPE, REFERER};
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::core::config::TranslatorConfig;
use crate::core::errors::{Result, TranslatorError};
use crate::core::token::{TokenManager, SUBSCRIPTION_KEY_HEADER};

/// API version sent with every v3 call
pub const API_VERSION: &str = "3.0";

/// Sends signed requests and decodes their JSON responses
#[derive(Debug, Clone)]
pub struct HttpExecutor {
    client: reqwest::Client,
    config: Arc<TranslatorConfig>,
    subscription_key: Arc<RwLock<Option<String>>>,
    tokens: TokenManager,
}

impl HttpExecutor {
    /// Create a new executor
    pub fn new(config: TranslatorConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = reqwest::Client::builder()
            .pool_idle_timeout(Some(std::time::Duration::from_secs(30)));
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        let tokens = TokenManager::new(config.token_url.clone(), config.token_ttl());
        let subscription_key = Arc::new(RwLock::new(config.subscription_key.clone()));

        Ok(Self {
            client,
            config: Arc::new(config),
            subscription_key,
            tokens,
        })
    }

    /// Replace the subscription key and drop any token issued for the old one
    pub async fn set_subscription_key(&self, key: Option<String>) {
        *self.subscription_key.write().await = key.filter(|k| !k.is_empty());
        self.tokens.reset().await;
    }

    /// Fail fast when no subscription key is configured
    pub async fn ensure_configured(&self) -> Result<String> {
        self.subscription_key
            .read()
            .await
            .clone()
            .ok_or_else(|| TranslatorError::ConfigError {
                message: "Must provide a Microsoft Translator subscription key".to_string(),
            })
    }

    /// Build `<api_base_url>/<path>?api-version=3.0&<query>`
    pub fn endpoint_url(&self, path: &str, query: &[(&str, &str)]) -> Result<Url> {
        let raw = format!(
            "{}/{}",
            self.config.api_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        let mut url = Url::parse(&raw).map_err(|e| TranslatorError::ConfigError {
            message: format!("Invalid endpoint URL {}: {}", raw, e),
        })?;

        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("api-version", API_VERSION);
            for (name, value) in query {
                pairs.append_pair(name, value);
            }
        }

        Ok(url)
    }

    /// Perform one round trip and decode the response body
    ///
    /// Returns `Ok(None)` when the service answered 200/204 with an empty or
    /// `null` body.
    pub async fn execute<RQ, RP>(
        &self,
        method: Method,
        url: Url,
        body: Option<&RQ>,
        headers: Option<HeaderMap>,
    ) -> Result<Option<RP>>
    where
        RQ: Serialize + ?Sized,
        RP: DeserializeOwned,
    {
        let key = self.ensure_configured().await?;
        let token = self.tokens.bearer(&self.client, &key).await?;

        debug!("{} {}", method, url.path());

        let mut request = self
            .client
            .request(method.clone(), url)
            .header(CONTENT_TYPE, "application/json")
            .header(SUBSCRIPTION_KEY_HEADER, key.as_str())
            .bearer_auth(token);

        if let Some(referrer) = &self.config.referrer {
            request = request.header(REFERER, referrer.as_str());
        }

        if let Some(headers) = headers {
            request = request.headers(headers);
        }

        if method == Method::POST {
            let payload = match body {
                Some(body) => serde_json::to_string(body)?,
                None => String::new(),
            };
            request = request.body(payload);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;

        if status != 200 && status != 204 {
            warn!("Translator API returned {}", status);
            return Err(TranslatorError::ApiError { status, body: text });
        }

        // The service sometimes prefixes responses with a zero-width no-break space.
        let text = text.replace('\u{FEFF}', "");
        if text.trim().is_empty() {
            return Ok(None);
        }

        let decoded: Option<RP> = serde_json::from_str(&text)?;
        Ok(decoded)
    }

    /// Token manager shared by every request of this executor
    pub fn tokens(&self) -> &TokenManager {
        &self.tokens
    }

    /// Configuration this executor was built from
    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn executor_for(server: &MockServer, key: Option<&str>) -> HttpExecutor {
        Mock::given(method("POST"))
            .and(path("/sts/v1.0/issueToken"))
            .respond_with(ResponseTemplate::new(200).set_body_string("tok"))
            .mount(server)
            .await;

        HttpExecutor::new(TranslatorConfig {
            subscription_key: key.map(str::to_string),
            api_base_url: server.uri(),
            token_url: format!("{}/sts/v1.0/issueToken", server.uri()),
            ..Default::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_endpoint_url_puts_api_version_first() {
        let executor = HttpExecutor::new(TranslatorConfig::default()).unwrap();
        let url = executor
            .endpoint_url("translate", &[("from", "en"), ("to", "zh-Hans")])
            .unwrap();

        assert_eq!(
            url.as_str(),
            "https://api.cognitive.microsofttranslator.com/translate?api-version=3.0&from=en&to=zh-Hans"
        );
    }

    #[tokio::test]
    async fn test_execute_sends_auth_headers_and_body() {
        let server = MockServer::start().await;
        let executor = executor_for(&server, Some("key")).await;

        Mock::given(method("POST"))
            .and(path("/detect"))
            .and(query_param("api-version", "3.0"))
            .and(header("Ocp-Apim-Subscription-Key", "key"))
            .and(header("Authorization", "Bearer tok"))
            .and(header("Content-Type", "application/json"))
            .and(body_json(json!([{"Text": "Hola"}])))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"language": "es"}])))
            .expect(1)
            .mount(&server)
            .await;

        let url = executor.endpoint_url("detect", &[]).unwrap();
        let body = json!([{"Text": "Hola"}]);
        let result: Option<serde_json::Value> = executor
            .execute(Method::POST, url, Some(&body), None)
            .await
            .unwrap();

        assert_eq!(result.unwrap()[0]["language"], "es");
    }

    #[tokio::test]
    async fn test_execute_without_key_makes_no_request() {
        let server = MockServer::start().await;
        let executor = executor_for(&server, None).await;

        let url = executor.endpoint_url("detect", &[]).unwrap();
        let err = executor
            .execute::<(), serde_json::Value>(Method::GET, url, None, None)
            .await
            .unwrap_err();

        assert!(matches!(err, TranslatorError::ConfigError { .. }));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_execute_maps_error_status() {
        let server = MockServer::start().await;
        let executor = executor_for(&server, Some("key")).await;

        Mock::given(method("POST"))
            .and(path("/translate"))
            .respond_with(ResponseTemplate::new(400).set_body_string(r#"{"error":{"code":400036}}"#))
            .mount(&server)
            .await;

        let url = executor.endpoint_url("translate", &[]).unwrap();
        let err = executor
            .execute::<_, serde_json::Value>(Method::POST, url, Some(&json!([])), None)
            .await
            .unwrap_err();

        match err {
            TranslatorError::ApiError { status, body } => {
                assert_eq!(status, 400);
                assert!(body.contains("400036"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_execute_strips_bom_and_handles_empty_body() {
        let server = MockServer::start().await;
        let executor = executor_for(&server, Some("key")).await;

        Mock::given(method("GET"))
            .and(path("/bom"))
            .respond_with(ResponseTemplate::new(200).set_body_string("\u{FEFF}[1,2]"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/empty"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let values: Option<Vec<u32>> = executor
            .execute::<(), _>(Method::GET, executor.endpoint_url("bom", &[]).unwrap(), None, None)
            .await
            .unwrap();
        assert_eq!(values, Some(vec![1, 2]));

        let empty: Option<Vec<u32>> = executor
            .execute::<(), _>(Method::GET, executor.endpoint_url("empty", &[]).unwrap(), None, None)
            .await
            .unwrap();
        assert!(empty.is_none());
    }

    #[tokio::test]
    async fn test_execute_malformed_json_is_decode_error() {
        let server = MockServer::start().await;
        let executor = executor_for(&server, Some("key")).await;

        Mock::given(method("GET"))
            .and(path("/broken"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[{\"language\":"))
            .mount(&server)
            .await;

        let err = executor
            .execute::<(), Vec<serde_json::Value>>(
                Method::GET,
                executor.endpoint_url("broken", &[]).unwrap(),
                None,
                None,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, TranslatorError::DecodeError { .. }));
    }

    #[tokio::test]
    async fn test_set_subscription_key_resets_token() {
        let server = MockServer::start().await;
        let executor = executor_for(&server, Some("old")).await;

        Mock::given(method("GET"))
            .and(path("/ping"))
            .respond_with(ResponseTemplate::new(200).set_body_string("true"))
            .mount(&server)
            .await;

        let url = executor.endpoint_url("ping", &[]).unwrap();
        let _: Option<bool> = executor
            .execute::<(), _>(Method::GET, url.clone(), None, None)
            .await
            .unwrap();
        assert!(executor.tokens().is_valid().await);

        executor.set_subscription_key(Some("new".to_string())).await;
        assert!(!executor.tokens().is_valid().await);
        assert_eq!(executor.ensure_configured().await.unwrap(), "new");

        executor.set_subscription_key(None).await;
        assert!(executor.ensure_configured().await.is_err());
    }
}
