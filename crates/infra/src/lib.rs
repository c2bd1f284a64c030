//! # omflow Infrastructure
//!
//! Infrastructure implementations of the core ports.
//!
//! This crate contains:
//! - The HTTP client wrapper
//! - Configuration loading (environment and files)
//! - External service integrations (ArcGIS, SAP)
//!
//! ## Architecture
//! - Implements traits defined in `omflow-core`
//! - Depends on `omflow-domain` and `omflow-core`
//! - Contains all "impure" code (I/O)

pub mod config;
pub mod errors;
pub mod http;
pub mod integrations;

// Re-export commonly used items
pub use http::HttpClient;
pub use integrations::arcgis::ArcGisClient;
pub use integrations::sap::SapNotifier;
