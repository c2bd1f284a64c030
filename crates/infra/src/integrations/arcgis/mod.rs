//! ArcGIS Feature Service integration
//!
//! # Architecture
//!
//! - **Client**: [`ArcGisClient`] - queries, related records, field
//!   aliases, attachments and attribute edits against a feature service
//! - **Token cache**: [`TokenCache`] - acquires and reuses the short-lived
//!   bearer token every other call depends on
//!
//! # Wire protocol
//!
//! Query operations are `GET {layer}/{operation}?...&f=json&token=...`;
//! edits are form-encoded `POST {layer}/applyEdits` with a one-element
//! `updates` array. Attribute values come back as loosely-typed JSON and
//! are normalized into `FieldValue` (two distinct rules; see
//! `omflow-domain::types::gis`).
//!
//! # Error Handling
//!
//! - Token acquisition failures: `OmFlowError::Auth`
//! - Query/metadata failures: `OmFlowError::Query`
//! - Unconfirmed edits: `Ok(false)` - the server answered but did not
//!   report the update as applied
//! - Transport failures: `OmFlowError::Network`, never retried

pub mod client;
pub mod token;

mod attachments;
mod edits;
mod query;

pub use client::ArcGisClient;
pub use token::TokenCache;
