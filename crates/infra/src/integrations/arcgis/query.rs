//! Feature queries, related records and field aliases

use omflow_domain::{FeatureRow, FieldAliases, FieldValue, OmFlowError, Result};
use reqwest::Method;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::integrations::arcgis::client::ArcGisClient;

impl ArcGisClient {
    /// Query attribute rows from a layer.
    ///
    /// Only the requested fields are copied into each row. Numeric values
    /// are collapsed to `f64` and other scalars to their string form on
    /// this path; fields that are absent (or null) in a feature are
    /// omitted rather than defaulted.
    pub async fn query_features(
        &self,
        layer_url: &str,
        fields: &[&str],
        where_clause: &str,
    ) -> Result<Vec<FeatureRow>> {
        let token = self.tokens.current().await?;
        let out_fields = fields.join(",");
        let url = format!("{layer_url}/query");

        let request = self.http.request(Method::GET, &url).query(&[
            ("where", where_clause),
            ("outFields", out_fields.as_str()),
            ("returnGeometry", "false"),
            ("f", "json"),
            ("token", token.as_str()),
        ]);
        let response = self.http.send(request).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(OmFlowError::Query(format!("feature query returned HTTP {status}")));
        }

        let parsed: FeatureQueryResponse = response
            .json()
            .await
            .map_err(|err| OmFlowError::Query(format!("feature query response invalid: {err}")))?;

        debug!(layer_url, rows = parsed.features.len(), "feature query complete");

        Ok(parsed
            .features
            .iter()
            .map(|feature| project_row(&feature.attributes, fields))
            .collect())
    }

    /// Query the child records related to `object_id`, flattened across
    /// all record groups.
    ///
    /// Unlike [`Self::query_features`], value kinds are preserved here:
    /// these attributes feed later edit payloads, where an integer must
    /// stay an integer.
    pub async fn query_related(
        &self,
        layer_url: &str,
        object_id: i64,
        relationship_id: &str,
    ) -> Result<Vec<FeatureRow>> {
        let token = self.tokens.current().await?;
        let object_ids = object_id.to_string();
        let url = format!("{layer_url}/queryRelatedRecords");

        let request = self.http.request(Method::GET, &url).query(&[
            ("objectIds", object_ids.as_str()),
            ("relationshipId", relationship_id),
            ("outFields", "*"),
            ("f", "json"),
            ("token", token.as_str()),
        ]);
        let response = self.http.send(request).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(OmFlowError::Query(format!(
                "related-records query returned HTTP {status}"
            )));
        }

        let parsed: RelatedRecordsResponse = response.json().await.map_err(|err| {
            OmFlowError::Query(format!("related-records response invalid: {err}"))
        })?;

        let mut rows = Vec::new();
        for group in &parsed.related_record_groups {
            for record in &group.related_records {
                let mut row = FeatureRow::new();
                for (name, value) in &record.attributes {
                    if let Some(mapped) = FieldValue::from_related_json(value) {
                        row.insert(name.clone(), mapped);
                    }
                }
                rows.push(row);
            }
        }

        debug!(layer_url, object_id, rows = rows.len(), "related-records query complete");
        Ok(rows)
    }

    /// Field-name to display-alias mapping of a layer.
    ///
    /// A layer without a `fields` property yields an empty mapping; any
    /// HTTP or parse failure propagates.
    pub async fn field_aliases(&self, layer_url: &str) -> Result<FieldAliases> {
        let token = self.tokens.current().await?;

        let request = self
            .http
            .request(Method::GET, layer_url)
            .query(&[("f", "json"), ("token", token.as_str())]);
        let response = self.http.send(request).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(OmFlowError::Query(format!("layer metadata returned HTTP {status}")));
        }

        let parsed: LayerMetadataResponse = response
            .json()
            .await
            .map_err(|err| OmFlowError::Query(format!("layer metadata invalid: {err}")))?;

        Ok(parsed
            .fields
            .unwrap_or_default()
            .into_iter()
            .map(|field| (field.name, field.alias))
            .collect())
    }
}

/// Copy the requested fields out of a feature's attribute map.
///
/// Exact key match wins; otherwise the first ASCII case-insensitive match
/// is taken. The output row is keyed by the requested names.
fn project_row(attributes: &Map<String, Value>, fields: &[&str]) -> FeatureRow {
    let mut row = FeatureRow::new();
    for &field in fields {
        let value = attributes.get(field).or_else(|| {
            attributes
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(field))
                .map(|(_, value)| value)
        });
        if let Some(value) = value {
            if let Some(mapped) = FieldValue::from_query_json(value) {
                row.insert(field.to_string(), mapped);
            }
        }
    }
    row
}

// =============================================================================
// Wire types
// =============================================================================

#[derive(Debug, Deserialize)]
struct FeatureQueryResponse {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    #[serde(default)]
    attributes: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RelatedRecordsResponse {
    #[serde(default)]
    related_record_groups: Vec<RelatedRecordGroup>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RelatedRecordGroup {
    #[serde(default)]
    related_records: Vec<RelatedRecord>,
}

#[derive(Debug, Deserialize)]
struct RelatedRecord {
    #[serde(default)]
    attributes: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct LayerMetadataResponse {
    fields: Option<Vec<LayerField>>,
}

#[derive(Debug, Deserialize)]
struct LayerField {
    name: String,
    alias: String,
}
