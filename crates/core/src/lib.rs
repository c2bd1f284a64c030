//! # omflow Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port/adapter interfaces (traits) for the GIS and SAP integrations
//! - The approval orchestration service
//! - The order directory (query compositions over the GIS ports)
//!
//! ## Architecture Principles
//! - Only depends on `omflow-domain`
//! - No HTTP or platform code
//! - All external dependencies via traits

pub mod activity;
pub mod approval;
pub mod orders;
pub mod ports;

pub use activity::ActivityKey;
pub use approval::{ApprovalOutcome, ApprovalService};
pub use orders::OrderDirectory;
pub use ports::{GisQueries, OrderEdits, SapNotifications};
