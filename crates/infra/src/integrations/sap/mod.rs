//! SAP integration
//!
//! Posts work confirmations to the downstream maintenance system once a
//! work order has been approved on the GIS side.
//!
//! # Error Handling
//!
//! This is the one integration that never errors past its boundary: the
//! caller composes the result with the preceding GIS-edit outcome, so
//! every failure mode (validation, transport, non-success status)
//! collapses into `SapOutcome { success: false, .. }`.

pub mod client;

pub use client::SapNotifier;
