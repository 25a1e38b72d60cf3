//! Nullable clock: deterministic tick time for testing.

use std::cell::Cell;
use std::time::Duration;
use verity_types::Timestamp;

/// A deterministic clock for testing.
///
/// Time only advances when you tell it to.
pub struct NullClock {
    current: Cell<Timestamp>,
}

impl NullClock {
    pub fn new(initial: Timestamp) -> Self {
        Self {
            current: Cell::new(initial),
        }
    }

    pub fn now(&self) -> Timestamp {
        self.current.get()
    }

    pub fn advance(&self, by: Duration) {
        self.current.set(self.current.get().saturating_add(by));
    }

    pub fn set(&self, to: Timestamp) {
        self.current.set(to);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_only_on_request() {
        let clock = NullClock::new(Timestamp::from_secs(10));
        assert_eq!(clock.now(), Timestamp::from_secs(10));
        clock.advance(Duration::from_secs(5));
        assert_eq!(clock.now(), Timestamp::from_secs(15));
        clock.set(Timestamp::from_secs(1));
        assert_eq!(clock.now(), Timestamp::from_secs(1));
    }
}
