//! Activity slot keys
//!
//! Each activity slot of an order has its own acceptance flag field on the
//! layer, named `g1vala{key}`. Building that name from an unchecked string
//! would let a malformed key produce an invalid field name in an edit
//! payload, so keys are validated once at the boundary.

use std::fmt;

use omflow_domain::constants::ACTIVITY_FLAG_PREFIX;
use omflow_domain::{OmFlowError, Result};
use serde::{Deserialize, Serialize};

const MAX_KEY_LEN: usize = 4;

/// Validated key of an activity slot (1-4 digits)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ActivityKey(String);

impl ActivityKey {
    /// Validate and wrap a raw key
    pub fn new(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        if raw.is_empty() || raw.len() > MAX_KEY_LEN {
            return Err(OmFlowError::InvalidInput(format!(
                "activity key must be 1-{MAX_KEY_LEN} digits, got {:?}",
                raw
            )));
        }
        if !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(OmFlowError::InvalidInput(format!(
                "activity key must be numeric, got {:?}",
                raw
            )));
        }
        Ok(Self(raw))
    }

    /// Name of the acceptance flag field for this slot
    pub fn acceptance_field(&self) -> String {
        format!("{ACTIVITY_FLAG_PREFIX}{}", self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActivityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ActivityKey {
    type Error = OmFlowError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<ActivityKey> for String {
    fn from(key: ActivityKey) -> Self {
        key.0
    }
}
