use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

use crate::domain::TimestampMs;
use crate::engine::Clock;

/// Реальное время.
#[derive(Clone, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> TimestampMs {
        Utc::now().timestamp_millis()
    }
}

/// Управляемые часы для тестов и реплея.
#[derive(Debug, Default)]
pub struct FixedClock {
    now: AtomicI64,
}

impl FixedClock {
    pub fn at(ms: TimestampMs) -> Self {
        Self {
            now: AtomicI64::new(ms),
        }
    }

    pub fn set(&self, ms: TimestampMs) {
        self.now.store(ms, Ordering::Relaxed);
    }
}

impl Clock for FixedClock {
    fn now_ms(&self) -> TimestampMs {
        self.now.load(Ordering::Relaxed)
    }
}
