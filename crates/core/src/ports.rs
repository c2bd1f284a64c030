//! Integration port interfaces
//!
//! Implemented by `omflow-infra`; the services in this crate only ever see
//! these traits.

use async_trait::async_trait;
use omflow_domain::{AttachmentRef, FeatureRow, FieldAliases, Result, SapOutcome, WorkConfirmation};

use crate::activity::ActivityKey;

/// Read-side operations against the GIS feature service
#[async_trait]
pub trait GisQueries: Send + Sync {
    /// Query attribute rows from a layer. Only the requested fields are
    /// copied into each row; fields absent from a feature are omitted.
    async fn query_features(
        &self,
        layer_url: &str,
        fields: &[&str],
        where_clause: &str,
    ) -> Result<Vec<FeatureRow>>;

    /// Query the child records related to `object_id` through
    /// `relationship_id`, flattened across record groups.
    async fn query_related(
        &self,
        layer_url: &str,
        object_id: i64,
        relationship_id: &str,
    ) -> Result<Vec<FeatureRow>>;

    /// Field-name to display-alias mapping of a layer.
    async fn field_aliases(&self, layer_url: &str) -> Result<FieldAliases>;

    /// Attachment descriptors for each of the given parent object ids,
    /// with download URLs authenticated by the current token.
    async fn list_attachments(
        &self,
        feature_server_url: &str,
        object_ids: &[i64],
    ) -> Result<Vec<AttachmentRef>>;
}

/// Attribute-edit operations against the GIS feature service
///
/// `Ok(false)` means the server received the edit but did not confirm it;
/// transport failures are `Err`.
#[async_trait]
pub trait OrderEdits: Send + Sync {
    async fn approve_order(&self, layer_url: &str, object_id: i64) -> Result<bool>;

    async fn reject_order(&self, layer_url: &str, object_id: i64, note: &str) -> Result<bool>;

    async fn approve_activity(
        &self,
        layer_url: &str,
        object_id: i64,
        key: &ActivityKey,
    ) -> Result<bool>;

    async fn reject_activity(
        &self,
        layer_url: &str,
        object_id: i64,
        key: &ActivityKey,
    ) -> Result<bool>;
}

/// Downstream SAP confirmation
#[async_trait]
pub trait SapNotifications: Send + Sync {
    /// Post a work confirmation. Infallible at this boundary: every
    /// failure mode is folded into the returned outcome.
    async fn confirm(&self, confirmation: &WorkConfirmation) -> SapOutcome;
}
