//! Order directory
//!
//! Query compositions the approval screens are built from: the order
//! listing, a single-order lookup, the activities related to an order, and
//! the attachments of those activities.

use std::sync::Arc;

use omflow_domain::{AttachmentRef, FeatureRow, OmFlowError, Result};

use crate::ports::GisQueries;

/// Field projection used for order listings
pub const ORDER_FIELDS: [&str; 14] = [
    "objectid",
    "uniquerowid",
    "globalid",
    "actividad",
    "tipo_trabaj",
    "created_date",
    "om_text",
    "instalac",
    "responsable",
    "jefe_faen",
    "organizac",
    "zona_name",
    "equipo",
    "jefe_act",
];

/// Relationship linking orders to their activity records
pub const ACTIVITY_RELATIONSHIP_ID: &str = "7";

/// Read-side access to work orders and their activities
pub struct OrderDirectory {
    gis: Arc<dyn GisQueries>,
    order_layer_url: String,
    activity_layer_url: String,
}

impl OrderDirectory {
    pub fn new(
        gis: Arc<dyn GisQueries>,
        order_layer_url: impl Into<String>,
        activity_layer_url: impl Into<String>,
    ) -> Self {
        Self {
            gis,
            order_layer_url: order_layer_url.into(),
            activity_layer_url: activity_layer_url.into(),
        }
    }

    /// All work orders, with the standard listing projection.
    pub async fn list_orders(&self) -> Result<Vec<FeatureRow>> {
        self.gis.query_features(&self.order_layer_url, &ORDER_FIELDS, "1=1").await
    }

    /// The work order(s) carrying the given maintenance-order id.
    ///
    /// The id is interpolated into the layer filter, so anything but a
    /// plain number is rejected up front.
    pub async fn find_order(&self, om_id: &str) -> Result<Vec<FeatureRow>> {
        if om_id.is_empty() || !om_id.bytes().all(|b| b.is_ascii_digit()) {
            return Err(OmFlowError::InvalidInput(format!(
                "maintenance order id must be numeric, got {:?}",
                om_id
            )));
        }
        let where_clause = format!("orde_m_id={om_id}");
        self.gis.query_features(&self.order_layer_url, &ORDER_FIELDS, &where_clause).await
    }

    /// Activity records related to an order.
    pub async fn order_activities(&self, object_id: i64) -> Result<Vec<FeatureRow>> {
        self.gis
            .query_related(&self.order_layer_url, object_id, ACTIVITY_RELATIONSHIP_ID)
            .await
    }

    /// Attachments of the given activity records.
    pub async fn order_attachments(&self, object_ids: &[i64]) -> Result<Vec<AttachmentRef>> {
        self.gis.list_attachments(&self.activity_layer_url, object_ids).await
    }

    /// Display aliases for the order layer's fields.
    pub async fn order_field_aliases(&self) -> Result<omflow_domain::FieldAliases> {
        self.gis.field_aliases(&self.order_layer_url).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use omflow_domain::{FieldAliases, FieldValue};

    use super::*;

    #[derive(Default)]
    struct RecordingGis {
        queries: Mutex<Vec<(String, Vec<String>, String)>>,
        related: Mutex<Vec<(String, i64, String)>>,
    }

    #[async_trait]
    impl GisQueries for RecordingGis {
        async fn query_features(
            &self,
            layer_url: &str,
            fields: &[&str],
            where_clause: &str,
        ) -> Result<Vec<FeatureRow>> {
            self.queries.lock().unwrap().push((
                layer_url.to_string(),
                fields.iter().map(|f| f.to_string()).collect(),
                where_clause.to_string(),
            ));
            let mut row = FeatureRow::new();
            row.insert("objectid".into(), FieldValue::Number(55.0));
            Ok(vec![row])
        }

        async fn query_related(
            &self,
            layer_url: &str,
            object_id: i64,
            relationship_id: &str,
        ) -> Result<Vec<FeatureRow>> {
            self.related.lock().unwrap().push((
                layer_url.to_string(),
                object_id,
                relationship_id.to_string(),
            ));
            Ok(vec![])
        }

        async fn field_aliases(&self, _layer_url: &str) -> Result<FieldAliases> {
            Ok(FieldAliases::new())
        }

        async fn list_attachments(
            &self,
            _feature_server_url: &str,
            _object_ids: &[i64],
        ) -> Result<Vec<AttachmentRef>> {
            Ok(vec![])
        }
    }

    fn directory(gis: Arc<RecordingGis>) -> OrderDirectory {
        OrderDirectory::new(gis, "https://gis/layers/0", "https://gis/layers/1")
    }

    #[tokio::test]
    async fn list_orders_uses_standard_projection() {
        let gis = Arc::new(RecordingGis::default());
        let dir = directory(gis.clone());

        dir.list_orders().await.unwrap();

        let queries = gis.queries.lock().unwrap();
        assert_eq!(queries.len(), 1);
        let (layer, fields, where_clause) = &queries[0];
        assert_eq!(layer, "https://gis/layers/0");
        assert_eq!(fields.len(), ORDER_FIELDS.len());
        assert_eq!(fields[0], "objectid");
        assert_eq!(where_clause, "1=1");
    }

    #[tokio::test]
    async fn find_order_builds_numeric_filter() {
        let gis = Arc::new(RecordingGis::default());
        let dir = directory(gis.clone());

        dir.find_order("8262538").await.unwrap();

        let queries = gis.queries.lock().unwrap();
        assert_eq!(queries[0].2, "orde_m_id=8262538");
    }

    #[tokio::test]
    async fn find_order_rejects_non_numeric_id() {
        let gis = Arc::new(RecordingGis::default());
        let dir = directory(gis.clone());

        let result = dir.find_order("8262538 OR 1=1").await;

        assert!(matches!(result, Err(OmFlowError::InvalidInput(_))));
        assert!(gis.queries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn order_activities_uses_activity_relationship() {
        let gis = Arc::new(RecordingGis::default());
        let dir = directory(gis.clone());

        dir.order_activities(55).await.unwrap();

        let related = gis.related.lock().unwrap();
        assert_eq!(related[0], ("https://gis/layers/0".to_string(), 55, "7".to_string()));
    }
}
