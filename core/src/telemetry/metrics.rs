use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Counters for classifier traffic flowing into the registry.
pub struct MetricsRecorder {
    inner: Mutex<MetricsSnapshot>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub recorded: usize,
    pub rejected: usize,
    pub annotations: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(MetricsSnapshot::default()),
        }
    }

    pub fn record_detection(&self) {
        self.lock().recorded += 1;
    }

    pub fn record_rejection(&self) {
        self.lock().rejected += 1;
    }

    pub fn record_annotation(&self) {
        self.lock().annotations += 1;
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        *self.lock()
    }

    /// Counters stay usable after a panicking holder poisons the lock.
    fn lock(&self) -> MutexGuard<'_, MetricsSnapshot> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}
