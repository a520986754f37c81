//! Time abstraction for testability
//!
//! The token store reads wall-clock time through a trait so expiry can be
//! tested deterministically without real time passing.

use std::time::{SystemTime, UNIX_EPOCH};

/// Trait for time operations to enable testing
pub trait Clock: Send + Sync {
    /// Milliseconds since the UNIX epoch.
    fn millis_since_epoch(&self) -> u64;
}

/// Real system clock implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn millis_since_epoch(&self) -> u64 {
        SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis() as u64
    }
}

/// Mock clock for deterministic testing
///
/// Starts at an arbitrary fixed point and only moves when advanced manually.
#[cfg(any(test, feature = "test-utils"))]
#[derive(Debug, Clone, Default)]
pub struct MockClock {
    now_ms: std::sync::Arc<std::sync::Mutex<u64>>,
}

#[cfg(any(test, feature = "test-utils"))]
impl MockClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward.
    pub fn advance(&self, duration: std::time::Duration) {
        let mut now = self.now_ms.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *now += duration.as_millis() as u64;
    }
}

#[cfg(any(test, feature = "test-utils"))]
impl Clock for MockClock {
    fn millis_since_epoch(&self) -> u64 {
        *self.now_ms.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
