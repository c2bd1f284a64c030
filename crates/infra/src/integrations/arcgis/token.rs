//! GIS token acquisition and caching
//!
//! Every feature-service call is authorized by a short-lived token issued
//! by the platform's token endpoint. The token is requested for 60
//! minutes and cached for 55, so a cached token is never within five
//! minutes of expiry when it is handed out.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use omflow_domain::constants::{TOKEN_CACHE_MINUTES, TOKEN_REQUEST_MINUTES};
use omflow_domain::time::Clock;
use omflow_domain::{ArcGisConfig, OmFlowError, Result};
use reqwest::Method;
use tokio::sync::RwLock;
use tracing::debug;

use crate::http::HttpClient;

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    expires_at: DateTime<Utc>,
}

/// Process-wide cache of the GIS bearer token
///
/// Two tasks hitting an expired cache may both fetch a fresh token; the
/// endpoint issues tokens idempotently, so the second fetch only wastes a
/// round trip.
pub struct TokenCache {
    http: HttpClient,
    token_url: String,
    username: String,
    password: String,
    referer: String,
    clock: Arc<dyn Clock>,
    state: RwLock<Option<CachedToken>>,
}

impl TokenCache {
    pub fn new(http: HttpClient, config: &ArcGisConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            http,
            token_url: config.token_url.clone(),
            username: config.username.clone(),
            password: config.password.clone(),
            referer: config.referer.clone(),
            clock,
            state: RwLock::new(None),
        }
    }

    /// Current token, re-fetched when the cached one is stale.
    pub async fn current(&self) -> Result<String> {
        let now = self.clock.now_utc();
        {
            let state = self.state.read().await;
            if let Some(cached) = state.as_ref() {
                if now < cached.expires_at {
                    return Ok(cached.value.clone());
                }
            }
        }

        let value = self.fetch_token().await?;
        let expires_at = self.clock.now_utc() + Duration::minutes(TOKEN_CACHE_MINUTES);
        *self.state.write().await = Some(CachedToken { value: value.clone(), expires_at });
        Ok(value)
    }

    async fn fetch_token(&self) -> Result<String> {
        let expiration = TOKEN_REQUEST_MINUTES.to_string();
        let form = [
            ("username", self.username.as_str()),
            ("password", self.password.as_str()),
            ("client", "referer"),
            ("referer", self.referer.as_str()),
            ("expiration", expiration.as_str()),
            ("f", "json"),
        ];

        let request = self.http.request(Method::POST, &self.token_url).form(&form);
        let response = self
            .http
            .send(request)
            .await
            .map_err(|err| OmFlowError::Auth(format!("token request failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(OmFlowError::Auth(format!("token endpoint returned HTTP {status}")));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|err| OmFlowError::Auth(format!("token response could not be parsed: {err}")))?;

        let token = body
            .get("token")
            .and_then(|token| token.as_str())
            .ok_or_else(|| OmFlowError::Auth("token response has no token field".to_string()))?;

        debug!("obtained fresh GIS token");
        Ok(token.to_string())
    }
}
