//! SAP-side domain types

use serde::{Deserialize, Serialize};

/// Input to a SAP work confirmation
///
/// The timestamps are carried as the raw attribute strings read from the
/// GIS layer (Unix epoch milliseconds); the notifier validates and
/// converts them when it builds the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkConfirmation {
    /// Maintenance order id (`AUFNR`)
    pub order_id: String,
    /// Executing work center (`ARBPL`)
    pub work_center: String,
    /// Work start, Unix epoch milliseconds
    pub started_at_ms: String,
    /// Work end, Unix epoch milliseconds
    pub finished_at_ms: String,
}

/// Result of a SAP notification
///
/// The notifier never raises past its boundary: every failure mode is
/// collapsed into `success == false` plus a human-readable message, so the
/// caller can compose it with the preceding GIS-edit outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SapOutcome {
    pub success: bool,
    pub message: String,
}

impl SapOutcome {
    pub fn ok(message: impl Into<String>) -> Self {
        Self { success: true, message: message.into() }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self { success: false, message: message.into() }
    }
}
