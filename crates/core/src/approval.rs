//! Approval orchestration
//!
//! Composes the GIS edit with the downstream SAP confirmation. The two
//! steps are not atomic: when the edit applies but SAP rejects the
//! confirmation, the order stays approved on the layer and the outcome
//! carries the SAP failure so the caller can surface both facts.

use std::sync::Arc;

use omflow_domain::{Result, WorkConfirmation};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::activity::ActivityKey;
use crate::ports::{OrderEdits, SapNotifications};

/// Result of an approval or rejection request, as surfaced to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalOutcome {
    pub success: bool,
    pub message: String,
}

impl ApprovalOutcome {
    fn ok(message: impl Into<String>) -> Self {
        Self { success: true, message: message.into() }
    }

    fn failed(message: impl Into<String>) -> Self {
        Self { success: false, message: message.into() }
    }
}

/// Work-order and activity approval service
pub struct ApprovalService {
    edits: Arc<dyn OrderEdits>,
    sap: Arc<dyn SapNotifications>,
    order_layer_url: String,
    activity_layer_url: String,
}

impl ApprovalService {
    pub fn new(
        edits: Arc<dyn OrderEdits>,
        sap: Arc<dyn SapNotifications>,
        order_layer_url: impl Into<String>,
        activity_layer_url: impl Into<String>,
    ) -> Self {
        Self {
            edits,
            sap,
            order_layer_url: order_layer_url.into(),
            activity_layer_url: activity_layer_url.into(),
        }
    }

    /// Approve a work order and, once the edit is confirmed, notify SAP.
    ///
    /// SAP is only contacted after the GIS edit is confirmed. There is no
    /// rollback: a SAP failure after a confirmed edit yields a failure
    /// outcome while the order remains approved on the layer.
    pub async fn approve_order(
        &self,
        object_id: i64,
        confirmation: &WorkConfirmation,
    ) -> Result<ApprovalOutcome> {
        let applied = self.edits.approve_order(&self.order_layer_url, object_id).await?;
        if !applied {
            warn!(object_id, "work order approval edit was not applied");
            return Ok(ApprovalOutcome::failed("The work order could not be approved."));
        }

        let sap_outcome = self.sap.confirm(confirmation).await;
        if sap_outcome.success {
            info!(object_id, order_id = %confirmation.order_id, "work order approved and confirmed in SAP");
            Ok(ApprovalOutcome::ok("Work order approved and confirmed in SAP."))
        } else {
            warn!(
                object_id,
                order_id = %confirmation.order_id,
                message = %sap_outcome.message,
                "work order approved in GIS but SAP confirmation failed"
            );
            Ok(ApprovalOutcome::failed(sap_outcome.message))
        }
    }

    /// Reject a work order with an observation note. No SAP involvement.
    pub async fn reject_order(&self, object_id: i64, note: &str) -> Result<ApprovalOutcome> {
        let applied = self.edits.reject_order(&self.order_layer_url, object_id, note).await?;
        if applied {
            info!(object_id, "work order rejected");
            Ok(ApprovalOutcome::ok("Work order rejected."))
        } else {
            Ok(ApprovalOutcome::failed("The work order could not be rejected."))
        }
    }

    /// Approve one activity slot of an order.
    pub async fn approve_activity(
        &self,
        object_id: i64,
        key: &ActivityKey,
    ) -> Result<ApprovalOutcome> {
        let applied =
            self.edits.approve_activity(&self.activity_layer_url, object_id, key).await?;
        if applied {
            info!(object_id, key = %key, "activity approved");
            Ok(ApprovalOutcome::ok("Activity approved."))
        } else {
            Ok(ApprovalOutcome::failed("The activity could not be approved."))
        }
    }

    /// Reject one activity slot of an order.
    pub async fn reject_activity(
        &self,
        object_id: i64,
        key: &ActivityKey,
    ) -> Result<ApprovalOutcome> {
        let applied = self.edits.reject_activity(&self.activity_layer_url, object_id, key).await?;
        if applied {
            info!(object_id, key = %key, "activity rejected");
            Ok(ApprovalOutcome::ok("Activity rejected."))
        } else {
            Ok(ApprovalOutcome::failed("The activity could not be rejected."))
        }
    }
}
