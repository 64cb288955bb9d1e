use chrono::{DateTime, Datelike, Utc};

use crate::model::Day;

/// Source of "now" for registration timestamps; fixed in tests.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    Default,
    Fixed(DateTime<Utc>),
}

impl Clock {
    /// Returns a clock that uses the current system time.
    #[must_use]
    pub fn default_clock() -> Self {
        Self::Default
    }

    /// Returns a clock fixed at the given timestamp.
    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::Default => Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }

    /// The lesson day matching today's weekday, if lessons run today.
    #[must_use]
    pub fn lesson_day(&self) -> Option<Day> {
        Day::try_from(self.now().weekday()).ok()
    }
}

/// Deterministic timestamp for tests (2023-11-14T22:13:20Z, a Tuesday).
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

/// Returns a deterministic `DateTime<Utc>` for tests.
///
/// # Panics
///
/// Panics if the fixed timestamp cannot be represented.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0)
        .expect("fixed timestamp should be valid")
}

#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fixed_now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn fixed_clock_does_not_move() {
        let clock = fixed_clock();
        assert_eq!(clock.now(), clock.now());
    }

    #[test]
    fn lesson_day_is_none_on_tuesday() {
        assert_eq!(fixed_clock().lesson_day(), None);
    }

    #[test]
    fn lesson_day_maps_wednesday() {
        let clock = Clock::fixed(fixed_now() + Duration::days(1));
        assert_eq!(clock.lesson_day(), Some(Day::Wednesday));
    }
}
