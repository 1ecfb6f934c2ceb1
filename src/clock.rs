//! Injectable local clock.
//!
//! All checklist timing is evaluated against local wall-clock time. The
//! [`Clock`] trait lets callers swap the system clock for a fixed instant so
//! due/late checks are deterministic under test.

use chrono::{Local, NaiveDateTime};

/// Source of the current local date and time.
pub trait Clock {
    /// Current local wall-clock instant.
    fn now(&self) -> NaiveDateTime;
}

/// Reads the operating system's local clock on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl FixedClock {
    /// Freeze the clock at `now`.
    #[must_use]
    pub fn at(now: NaiveDateTime) -> Self {
        Self(now)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}
