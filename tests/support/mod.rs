//! Shared helpers for integration tests.

use chrono::{DateTime, Local, Utc};
use mockable::Clock;
use std::sync::{Arc, RwLock};

/// Clock pinned to an explicit instant, advanced by hand.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Arc<RwLock<DateTime<Utc>>>,
}

impl FixedClock {
    /// Creates a clock pinned to the given instant.
    #[must_use]
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(RwLock::new(now)),
        }
    }

    /// Moves the clock to a later (or earlier) instant.
    pub fn advance_to(&self, now: DateTime<Utc>) {
        if let Ok(mut guard) = self.now.write() {
            *guard = now;
        }
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.now.read().map(|guard| *guard).unwrap_or_default()
    }
}
