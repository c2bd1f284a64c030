//! Configuration structures
//!
//! Deserialized from environment variables or a config file by
//! `omflow-infra::config::loader`.

use serde::{Deserialize, Serialize};

/// Top-level application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub arcgis: ArcGisConfig,
    pub sap: SapConfig,
}

/// ArcGIS Feature Service connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArcGisConfig {
    /// Token endpoint of the GIS platform
    pub token_url: String,
    pub username: String,
    pub password: String,
    /// Referer bound to issued tokens (`client=referer` token requests)
    pub referer: String,
    /// Layer holding the work orders
    pub order_layer_url: String,
    /// Layer holding the per-order activities and their attachments
    pub activity_layer_url: String,
}

/// SAP confirmation endpoint settings (HTTP Basic credentials)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SapConfig {
    pub api_url: String,
    pub user: String,
    pub password: String,
}
