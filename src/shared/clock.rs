use chrono::{DateTime, TimeDelta, Utc};
use std::sync::Mutex;

/// Timestamp source whose readings strictly increase.
///
/// Two calls within the same wall-clock tick still return distinct,
/// ordered values: the later call is bumped one microsecond past the
/// previous reading.
#[derive(Debug)]
pub struct MonotonicClock {
    last: Mutex<Option<DateTime<Utc>>>,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            last: Mutex::new(None),
        }
    }

    /// Next timestamp, strictly greater than every earlier one from this clock
    pub fn now(&self) -> DateTime<Utc> {
        let wall = Utc::now();
        // A poisoned value is still a valid timestamp
        let mut last = self.last.lock().unwrap_or_else(|e| e.into_inner());

        let next = match *last {
            Some(prev) if wall <= prev => prev + TimeDelta::microseconds(1),
            _ => wall,
        };
        *last = Some(next);
        next
    }

    /// Next timestamp that is also strictly after `floor`
    pub fn now_after(&self, floor: DateTime<Utc>) -> DateTime<Utc> {
        let next = self.now();
        if next > floor {
            return next;
        }

        let bumped = floor + TimeDelta::microseconds(1);
        let mut last = self.last.lock().unwrap_or_else(|e| e.into_inner());
        if last.map_or(true, |prev| prev < bumped) {
            *last = Some(bumped);
        }
        bumped
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}
