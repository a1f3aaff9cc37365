//! Keycloak Authentication
//!
//! Supplies the bearer token attached to every admin API call, either a fixed
//! token or one obtained (and cached) through the OpenID Connect token endpoint.

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::config::Credentials;
use crate::error::{Error, Result};

/// Token expiry buffer - refresh tokens this much before they actually expire
/// This prevents using tokens that are about to expire during a request
const TOKEN_EXPIRY_BUFFER: Duration = Duration::from_secs(10);

/// TTL used when the token endpoint omits `expires_in` (Keycloak default: 60s)
const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(60);

/// Source of the current bearer credential
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// May suspend while a token is refreshed
    async fn token(&self) -> Result<String>;
}

/// A fixed, externally managed bearer token
#[derive(Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl std::fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("StaticToken(***)")
    }
}

#[async_trait]
impl TokenProvider for StaticToken {
    async fn token(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}

/// Response of the OpenID Connect token endpoint
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

#[derive(Clone)]
struct CachedToken {
    token: String,
    /// When this token expires (with buffer applied)
    expires_at: Instant,
}

impl CachedToken {
    fn is_valid(&self) -> bool {
        Instant::now() < self.expires_at
    }
}

/// Resource-owner password (or client-credentials) grant with token caching
#[derive(Clone)]
pub struct PasswordGrant {
    http: reqwest::Client,
    token_url: String,
    credentials: Credentials,
    token_cache: Arc<RwLock<Option<CachedToken>>>,
}

impl PasswordGrant {
    /// `base_url` is the server root (e.g. `http://127.0.0.1:8080/auth`),
    /// `realm` the realm the admin account lives in
    pub fn new(http: reqwest::Client, base_url: &str, realm: &str, credentials: Credentials) -> Self {
        Self {
            http,
            token_url: token_url(base_url, realm),
            credentials,
            token_cache: Arc::new(RwLock::new(None)),
        }
    }

    pub fn token_url(&self) -> &str {
        &self.token_url
    }

    /// Force refresh the token
    pub async fn refresh(&self) -> Result<String> {
        {
            let mut cache = self.token_cache.write().await;
            *cache = None;
        }

        self.token().await
    }

    async fn request_token(&self) -> Result<CachedToken> {
        let response = self
            .http
            .post(&self.token_url)
            .form(&self.credentials.form_fields())
            .send()
            .await
            .map_err(|e| Error::Credential(format!("Failed to reach token endpoint: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Credential(format!("Failed to read token response: {e}")))?;

        if !status.is_success() {
            tracing::error!("Token request failed: {}", status);
            return Err(Error::Credential(format!("token endpoint returned {status}")));
        }

        let parsed: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| Error::Credential(format!("Failed to parse token response: {e}")))?;

        let ttl = parsed.expires_in.map(Duration::from_secs).unwrap_or(DEFAULT_TOKEN_TTL);

        Ok(CachedToken {
            token: parsed.access_token,
            expires_at: Instant::now() + ttl.saturating_sub(TOKEN_EXPIRY_BUFFER),
        })
    }
}

#[async_trait]
impl TokenProvider for PasswordGrant {
    /// Checks token expiry before returning the cached token
    async fn token(&self) -> Result<String> {
        {
            let cache = self.token_cache.read().await;
            if let Some(cached) = cache.as_ref() {
                if cached.is_valid() {
                    return Ok(cached.token.clone());
                }
                tracing::debug!("Cached token expired, fetching new token");
            }
        }

        let fresh = self.request_token().await?;
        let token = fresh.token.clone();

        tracing::debug!(
            "New token cached, expires in ~{}s",
            fresh.expires_at.saturating_duration_since(Instant::now()).as_secs()
        );

        {
            let mut cache = self.token_cache.write().await;
            *cache = Some(fresh);
        }

        Ok(token)
    }
}

/// OpenID Connect token endpoint of `realm`
pub fn token_url(base_url: &str, realm: &str) -> String {
    format!(
        "{}/realms/{}/protocol/openid-connect/token",
        base_url.trim_end_matches('/'),
        urlencoding::encode(realm)
    )
}
