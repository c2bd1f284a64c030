//! Wall-clock abstraction
//!
//! The token cache and the SAP notifier both depend on "now" (token expiry
//! checks, posting-date computation). Injecting the clock keeps those
//! paths deterministic under test.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};

/// Source of the current wall-clock time
pub trait Clock: Send + Sync {
    /// Current UTC time
    fn now_utc(&self) -> DateTime<Utc>;
}

/// Real system clock. Use this in production code.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Controllable clock for deterministic tests
///
/// Clones share the same underlying time, so a clone handed to a client
/// under test can be advanced from the test body.
#[derive(Debug, Clone)]
pub struct MockClock {
    current: Arc<Mutex<DateTime<Utc>>>,
}

impl MockClock {
    /// Create a mock clock pinned to `start`
    pub fn starting_at(start: DateTime<Utc>) -> Self {
        Self { current: Arc::new(Mutex::new(start)) }
    }

    /// Move the clock forward by `step`
    pub fn advance(&self, step: Duration) {
        // Test utility: panic on poisoned mutex to fail tests early
        #[allow(clippy::expect_used)]
        let mut current = self.current.lock().expect("mock clock mutex poisoned");
        *current = *current + step;
    }

    /// Jump the clock to an absolute instant
    pub fn set(&self, instant: DateTime<Utc>) {
        #[allow(clippy::expect_used)]
        let mut current = self.current.lock().expect("mock clock mutex poisoned");
        *current = instant;
    }
}

impl Clock for MockClock {
    fn now_utc(&self) -> DateTime<Utc> {
        #[allow(clippy::expect_used)]
        let current = self.current.lock().expect("mock clock mutex poisoned");
        *current
    }
}
