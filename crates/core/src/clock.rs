// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clock abstraction for testable timestamps

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use std::cell::RefCell;
use std::rc::Rc;

/// Wall-clock source for event timestamps.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Render a timestamp the way event records carry it: ISO-8601 with
/// millisecond precision and a `Z` suffix.
pub fn format_timestamp(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Real system clock
#[derive(Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Fake clock for testing with controllable time
#[derive(Clone)]
pub struct FakeClock {
    current: Rc<RefCell<DateTime<Utc>>>,
}

impl FakeClock {
    pub fn new() -> Self {
        Self {
            current: Rc::new(RefCell::new(Utc::now())),
        }
    }

    /// Start at a specific instant.
    pub fn at(start: DateTime<Utc>) -> Self {
        Self {
            current: Rc::new(RefCell::new(start)),
        }
    }

    /// Advance the clock by the given duration
    pub fn advance(&self, delta: Duration) {
        let mut current = self.current.borrow_mut();
        *current += delta;
    }

    /// Set the clock to a specific instant
    pub fn set(&self, instant: DateTime<Utc>) {
        *self.current.borrow_mut() = instant;
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FakeClock {
    fn now(&self) -> DateTime<Utc> {
        *self.current.borrow()
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
