//! Attribute edits (applyEdits)
//!
//! Every business action is a one-element `updates` array, form-encoded
//! and POSTed to the layer's applyEdits endpoint. The endpoint reports
//! per-feature results in the response body; an edit only counts as
//! applied when the body carries the success marker. `Ok(false)` means
//! "the server answered but did not confirm the change" - callers must
//! not read it as a transport failure.

use omflow_core::activity::ActivityKey;
use omflow_domain::constants::{ACCEPT, EDIT_SUCCESS_MARKER, REJECT, STATE_SEND_TO_SAP};
use omflow_domain::{OmFlowError, Result};
use reqwest::Method;
use serde::Serialize;
use serde_json::json;
use tracing::debug;

use crate::errors::InfraError;
use crate::integrations::arcgis::client::ArcGisClient;

#[derive(Debug, Serialize)]
struct FeatureUpdate<T: Serialize> {
    attributes: T,
}

#[derive(Debug, Serialize)]
struct OrderApproval {
    objectid: i64,
    aceptar: i32,
    estado: i32,
}

#[derive(Debug, Serialize)]
struct OrderRejection<'a> {
    objectid: i64,
    aceptar: i32,
    estado: i32,
    obs_activ: &'a str,
}

impl ArcGisClient {
    /// Mark a work order accepted and ready for SAP forwarding.
    pub async fn approve_order(&self, layer_url: &str, object_id: i64) -> Result<bool> {
        let update = FeatureUpdate {
            attributes: OrderApproval {
                objectid: object_id,
                aceptar: ACCEPT,
                estado: STATE_SEND_TO_SAP,
            },
        };
        self.apply_edit(layer_url, &update).await
    }

    /// Mark a work order rejected, recording the reviewer's note.
    pub async fn reject_order(&self, layer_url: &str, object_id: i64, note: &str) -> Result<bool> {
        let update = FeatureUpdate {
            attributes: OrderRejection {
                objectid: object_id,
                aceptar: REJECT,
                estado: STATE_SEND_TO_SAP,
                obs_activ: note,
            },
        };
        self.apply_edit(layer_url, &update).await
    }

    /// Accept one activity slot of an order.
    pub async fn approve_activity(
        &self,
        layer_url: &str,
        object_id: i64,
        key: &ActivityKey,
    ) -> Result<bool> {
        self.set_activity_flag(layer_url, object_id, key, ACCEPT).await
    }

    /// Reject one activity slot of an order.
    pub async fn reject_activity(
        &self,
        layer_url: &str,
        object_id: i64,
        key: &ActivityKey,
    ) -> Result<bool> {
        self.set_activity_flag(layer_url, object_id, key, REJECT).await
    }

    async fn set_activity_flag(
        &self,
        layer_url: &str,
        object_id: i64,
        key: &ActivityKey,
        flag: i32,
    ) -> Result<bool> {
        let mut attributes = serde_json::Map::new();
        attributes.insert("objectid".to_string(), json!(object_id));
        attributes.insert(key.acceptance_field(), json!(flag));

        let update = FeatureUpdate { attributes };
        self.apply_edit(layer_url, &update).await
    }

    async fn apply_edit<T: Serialize>(
        &self,
        layer_url: &str,
        update: &FeatureUpdate<T>,
    ) -> Result<bool> {
        let token = self.tokens.current().await?;
        let update_json = serde_json::to_string(update).map_err(|err| {
            OmFlowError::Internal(format!("edit payload could not be serialized: {err}"))
        })?;

        let url = format!("{layer_url}/applyEdits");
        let form =
            [("updates", format!("[{update_json}]")), ("token", token), ("f", "json".to_string())];

        let request = self.http.request(Method::POST, &url).form(&form);
        let response = self.http.send(request).await?;

        let status = response.status();
        let body = response.text().await.map_err(|err| {
            let infra: InfraError = err.into();
            OmFlowError::from(infra)
        })?;

        let applied = status.is_success() && body.contains(EDIT_SUCCESS_MARKER);
        if !applied {
            debug!(layer_url, %status, "applyEdits did not confirm the update");
        }
        Ok(applied)
    }
}
