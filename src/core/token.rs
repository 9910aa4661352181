//! Bearer token issuance and caching

use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::core::errors::{Result, TranslatorError};

/// Header carrying the subscription key on every call
pub const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// A token together with the key that issued it and the instant it stops being reused
#[derive(Debug, Clone)]
pub struct CachedToken {
    /// Raw token returned by the issuance endpoint
    pub value: String,
    /// Subscription key the token was issued for
    pub subscription_key: String,
    /// Instant after which the token is re-issued
    pub expires_at: DateTime<Utc>,
}

impl CachedToken {
    /// Whether the token's TTL has elapsed
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Whether the token may be sent alongside `subscription_key`
    pub fn is_usable_for(&self, subscription_key: &str) -> bool {
        !self.is_expired() && self.subscription_key == subscription_key
    }
}

/// Exchanges a subscription key for a bearer token and reuses it for a fixed TTL
#[derive(Debug, Clone)]
pub struct TokenManager {
    token_url: String,
    ttl: Duration,
    cached: Arc<RwLock<Option<CachedToken>>>,
    issued: Arc<AtomicUsize>,
}

impl TokenManager {
    /// Create a new token manager
    pub fn new(token_url: impl Into<String>, ttl: Duration) -> Self {
        Self {
            token_url: token_url.into(),
            ttl,
            cached: Arc::new(RwLock::new(None)),
            issued: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Request a fresh token from the issuance endpoint
    pub async fn get_token(&self, http: &reqwest::Client, subscription_key: &str) -> Result<String> {
        debug!("Requesting bearer token from {}", self.token_url);

        let response = http
            .post(&self.token_url)
            .header(SUBSCRIPTION_KEY_HEADER, subscription_key)
            .body("")
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        if status != 200 {
            return Err(TranslatorError::AuthError {
                status,
                message: body,
            });
        }

        self.issued.fetch_add(1, Ordering::Relaxed);
        Ok(body)
    }

    /// Return the cached token, issuing a new one once the previous has expired
    ///
    /// A token issued for a different subscription key is never reused.
    pub async fn bearer(&self, http: &reqwest::Client, subscription_key: &str) -> Result<String> {
        {
            let cached = self.cached.read().await;
            if let Some(token) = cached.as_ref().filter(|t| t.is_usable_for(subscription_key)) {
                return Ok(token.value.clone());
            }
        }

        let value = self.get_token(http, subscription_key).await?;
        let ttl = chrono::Duration::milliseconds(self.ttl.as_millis().min(i64::MAX as u128) as i64);
        let expires_at = Utc::now()
            .checked_add_signed(ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        // Concurrent refreshes race here; the last one to finish wins. A
        // token stored for a rotated-out key is skipped by the key check.
        *self.cached.write().await = Some(CachedToken {
            value: value.clone(),
            subscription_key: subscription_key.to_string(),
            expires_at,
        });
        debug!("Cached bearer token until {}", expires_at);

        Ok(value)
    }

    /// Whether a non-expired token is cached
    pub async fn is_valid(&self) -> bool {
        self.cached
            .read()
            .await
            .as_ref()
            .map(|t| !t.is_expired())
            .unwrap_or(false)
    }

    /// Expiry of the cached token, if any
    pub async fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.cached.read().await.as_ref().map(|t| t.expires_at)
    }

    /// Drop the cached token so the next request issues a new one
    pub async fn reset(&self) {
        *self.cached.write().await = None;
        info!("Bearer token reset");
    }

    /// Number of tokens successfully issued by this manager
    pub fn issued_count(&self) -> usize {
        self.issued.load(Ordering::Relaxed)
    }

    /// How long an issued token is reused
    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn issue_server(expected: u64) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/sts/v1.0/issueToken"))
            .and(header(SUBSCRIPTION_KEY_HEADER, "key"))
            .and(body_string(""))
            .respond_with(ResponseTemplate::new(200).set_body_string("tok"))
            .expect(expected)
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn test_token_reused_within_ttl() {
        let server = issue_server(1).await;
        let manager = TokenManager::new(
            format!("{}/sts/v1.0/issueToken", server.uri()),
            Duration::from_secs(300),
        );
        let http = reqwest::Client::new();

        assert_eq!(manager.bearer(&http, "key").await.unwrap(), "tok");
        assert_eq!(manager.bearer(&http, "key").await.unwrap(), "tok");
        assert!(manager.is_valid().await);
        assert_eq!(manager.issued_count(), 1);
    }

    #[tokio::test]
    async fn test_token_reissued_after_reset() {
        let server = issue_server(2).await;
        let manager = TokenManager::new(
            format!("{}/sts/v1.0/issueToken", server.uri()),
            Duration::from_secs(300),
        );
        let http = reqwest::Client::new();

        manager.bearer(&http, "key").await.unwrap();
        manager.reset().await;
        assert!(!manager.is_valid().await);
        assert!(manager.expires_at().await.is_none());
        manager.bearer(&http, "key").await.unwrap();
        assert_eq!(manager.issued_count(), 2);
    }

    #[tokio::test]
    async fn test_token_for_other_key_is_not_reused() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header(SUBSCRIPTION_KEY_HEADER, "old"))
            .respond_with(ResponseTemplate::new(200).set_body_string("tok-old"))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(header(SUBSCRIPTION_KEY_HEADER, "new"))
            .respond_with(ResponseTemplate::new(200).set_body_string("tok-new"))
            .expect(1)
            .mount(&server)
            .await;

        let manager = TokenManager::new(server.uri(), Duration::from_secs(300));
        let http = reqwest::Client::new();

        assert_eq!(manager.bearer(&http, "old").await.unwrap(), "tok-old");
        assert_eq!(manager.bearer(&http, "new").await.unwrap(), "tok-new");
        assert_eq!(manager.bearer(&http, "new").await.unwrap(), "tok-new");
    }

    #[tokio::test]
    async fn test_non_200_is_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Access denied"))
            .expect(1)
            .mount(&server)
            .await;

        let manager = TokenManager::new(server.uri(), Duration::from_secs(300));
        let err = manager
            .bearer(&reqwest::Client::new(), "wrong")
            .await
            .unwrap_err();

        match err {
            TranslatorError::AuthError { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Access denied");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(!manager.is_valid().await);
        assert_eq!(manager.issued_count(), 0);
    }
}
