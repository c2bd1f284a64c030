//! ArcGIS Feature Service client
//!
//! One client instance covers a feature service: queries, related
//! records, field aliases, attachments and attribute edits all flow
//! through it, each authorized by the shared [`TokenCache`]. The
//! per-concern implementations live in the sibling modules; this file
//! holds construction and the `omflow-core` port implementations.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use omflow_core::activity::ActivityKey;
use omflow_core::ports::{GisQueries, OrderEdits};
use omflow_domain::time::{Clock, SystemClock};
use omflow_domain::{ArcGisConfig, AttachmentRef, FeatureRow, FieldAliases, Result};

use crate::http::HttpClient;
use crate::integrations::arcgis::token::TokenCache;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client for one ArcGIS feature service
pub struct ArcGisClient {
    pub(super) http: HttpClient,
    pub(super) tokens: TokenCache,
}

impl ArcGisClient {
    /// Create a client using the system clock.
    pub fn new(config: ArcGisConfig) -> Result<Self> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create a client with an injected clock (token expiry under test).
    pub fn with_clock(config: ArcGisConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        let http =
            HttpClient::builder().timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS)).build()?;
        let tokens = TokenCache::new(http.clone(), &config, clock);
        Ok(Self { http, tokens })
    }
}

#[async_trait]
impl GisQueries for ArcGisClient {
    async fn query_features(
        &self,
        layer_url: &str,
        fields: &[&str],
        where_clause: &str,
    ) -> Result<Vec<FeatureRow>> {
        Self::query_features(self, layer_url, fields, where_clause).await
    }

    async fn query_related(
        &self,
        layer_url: &str,
        object_id: i64,
        relationship_id: &str,
    ) -> Result<Vec<FeatureRow>> {
        Self::query_related(self, layer_url, object_id, relationship_id).await
    }

    async fn field_aliases(&self, layer_url: &str) -> Result<FieldAliases> {
        Self::field_aliases(self, layer_url).await
    }

    async fn list_attachments(
        &self,
        feature_server_url: &str,
        object_ids: &[i64],
    ) -> Result<Vec<AttachmentRef>> {
        Self::list_attachments(self, feature_server_url, object_ids).await
    }
}

#[async_trait]
impl OrderEdits for ArcGisClient {
    async fn approve_order(&self, layer_url: &str, object_id: i64) -> Result<bool> {
        Self::approve_order(self, layer_url, object_id).await
    }

    async fn reject_order(&self, layer_url: &str, object_id: i64, note: &str) -> Result<bool> {
        Self::reject_order(self, layer_url, object_id, note).await
    }

    async fn approve_activity(
        &self,
        layer_url: &str,
        object_id: i64,
        key: &ActivityKey,
    ) -> Result<bool> {
        Self::approve_activity(self, layer_url, object_id, key).await
    }

    async fn reject_activity(
        &self,
        layer_url: &str,
        object_id: i64,
        key: &ActivityKey,
    ) -> Result<bool> {
        Self::reject_activity(self, layer_url, object_id, key).await
    }
}
