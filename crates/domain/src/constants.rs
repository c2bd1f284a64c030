//! Application constants
//!
//! Centralized location for the wire-level constants shared by the GIS
//! edit submitter and the SAP notifier.

// GIS acceptance flag values written by applyEdits
pub const ACCEPT: i32 = 1;
pub const REJECT: i32 = 2;
/// `estado` value that marks an order as ready for SAP forwarding
pub const STATE_SEND_TO_SAP: i32 = 2;

/// Prefix of the per-slot activity acceptance fields (`g1vala{key}`)
pub const ACTIVITY_FLAG_PREFIX: &str = "g1vala";

/// Substring the applyEdits response must contain for an edit to count as
/// applied. The endpoint reports per-feature results in its body; this is
/// the canonical compact form.
pub const EDIT_SUCCESS_MARKER: &str = "\"success\":true";

// Token lifecycle: request 60 minutes, cache for 55 so a token is never
// used within five minutes of its expiry.
pub const TOKEN_REQUEST_MINUTES: u32 = 60;
pub const TOKEN_CACHE_MINUTES: i64 = 55;

// Fixed SAP confirmation codes
pub const SAP_OPERATION: &str = "0010"; // VORNR
pub const SAP_REASON: &str = "TRFI"; // GRUND
pub const SAP_PLANT: &str = "0060"; // PLANT
