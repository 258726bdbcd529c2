//! Wall-clock source for log timestamps.
//!
//! Instants carry the local UTC offset in effect when they were taken, so
//! spans between them stay correct across daylight-saving changes while the
//! log still shows local time.

use chrono::{DateTime, FixedOffset, Local, TimeDelta};
use std::sync::{Arc, Mutex};

pub trait Clock: Send + Sync {
    /// Current instant with the local offset.
    fn now(&self) -> DateTime<FixedOffset>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Manually driven clock, shared between clones.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Arc<Mutex<DateTime<FixedOffset>>>,
}

impl FixedClock {
    pub fn new(now: DateTime<FixedOffset>) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    pub fn set(&self, now: DateTime<FixedOffset>) {
        *self.now.lock().unwrap_or_else(|p| p.into_inner()) = now;
    }

    pub fn advance(&self, seconds: i64) {
        let mut guard = self.now.lock().unwrap_or_else(|p| p.into_inner());
        *guard += TimeDelta::seconds(seconds);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        *self.now.lock().unwrap_or_else(|p| p.into_inner())
    }
}
