//! Domain data types

pub mod gis;
pub mod sap;

pub use gis::{AttachmentRef, FeatureRow, FieldAliases, FieldValue};
pub use sap::{SapOutcome, WorkConfirmation};
