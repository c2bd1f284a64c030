//! Attachment listing
//!
//! The wire API only answers attachment queries per parent id, so parents
//! are visited one at a time. One token snapshot is taken up front: the
//! produced download URLs embed it, and they must all stay valid for the
//! same window even if the cache were to refresh mid-iteration.

use omflow_domain::{AttachmentRef, OmFlowError, Result};
use reqwest::Method;
use serde::Deserialize;
use tracing::debug;

use crate::integrations::arcgis::client::ArcGisClient;

impl ArcGisClient {
    /// Attachment descriptors for each of the given parent object ids.
    pub async fn list_attachments(
        &self,
        feature_server_url: &str,
        object_ids: &[i64],
    ) -> Result<Vec<AttachmentRef>> {
        let token = self.tokens.current().await?;
        let mut attachments = Vec::new();

        for &object_id in object_ids {
            let object_id_param = object_id.to_string();
            let url = format!("{feature_server_url}/queryAttachments");

            let request = self.http.request(Method::GET, &url).query(&[
                ("objectIds", object_id_param.as_str()),
                ("f", "json"),
                ("token", token.as_str()),
            ]);
            let response = self.http.send(request).await?;

            let status = response.status();
            if !status.is_success() {
                return Err(OmFlowError::Query(format!(
                    "attachment query for object {object_id} returned HTTP {status}"
                )));
            }

            let parsed: AttachmentQueryResponse = response.json().await.map_err(|err| {
                OmFlowError::Query(format!("attachment query response invalid: {err}"))
            })?;

            for group in parsed.attachment_groups {
                for info in group.attachment_infos {
                    attachments.push(AttachmentRef {
                        object_id,
                        url: format!(
                            "{feature_server_url}/{object_id}/attachments/{}?token={token}",
                            info.id
                        ),
                        keyword: info.keywords,
                    });
                }
            }
        }

        debug!(feature_server_url, count = attachments.len(), "attachment listing complete");
        Ok(attachments)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AttachmentQueryResponse {
    #[serde(default)]
    attachment_groups: Vec<AttachmentGroup>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AttachmentGroup {
    #[serde(default)]
    attachment_infos: Vec<AttachmentInfo>,
}

#[derive(Debug, Deserialize)]
struct AttachmentInfo {
    id: i64,
    #[serde(default)]
    keywords: String,
}
