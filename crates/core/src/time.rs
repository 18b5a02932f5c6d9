use chrono::{DateTime, Duration, Local, NaiveDate, NaiveTime, Utc};

/// A simple clock abstraction for deterministic time in services and tests.
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

    /// Returns the current time according to the clock.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::Default => Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }

    /// Calendar day the auditor is living in.
    ///
    /// The system clock reports the local date; a fixed clock reports the UTC
    /// date so tests do not depend on the host time zone.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        match self {
            Clock::Default => Local::now().date_naive(),
            Clock::Fixed(t) => t.date_naive(),
        }
    }

    /// Calendar day a stored timestamp falls on, in the same zone as `today`.
    #[must_use]
    pub fn date_of(&self, at: DateTime<Utc>) -> NaiveDate {
        match self {
            Clock::Default => at.with_timezone(&Local).date_naive(),
            Clock::Fixed(_) => at.date_naive(),
        }
    }

    /// Wall-clock time of day, used for daily template windows.
    #[must_use]
    pub fn time_of_day(&self) -> NaiveTime {
        match self {
            Clock::Default => Local::now().time(),
            Clock::Fixed(t) => t.time(),
        }
    }

    /// If this is a fixed clock, advance it by the given duration.
    ///
    /// Has no effect on `Clock::Default`.
    pub fn advance(&mut self, delta: Duration) {
        if let Clock::Fixed(t) = self {
            *t += delta;
        }
    }

    /// Returns true if this clock is fixed.
    #[must_use]
    pub fn is_fixed(&self) -> bool {
        matches!(self, Clock::Fixed(_))
    }
}

/// Deterministic timestamp for tests (2026-03-02T07:30:00Z, a Monday morning).
pub const FIXED_TEST_TIMESTAMP: i64 = 1_772_436_600;

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

/// Returns a `Clock` fixed at the deterministic test timestamp.
#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fixed_now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Weekday};

    #[test]
    fn fixed_clock_reports_monday_morning() {
        let clock = fixed_clock();
        assert_eq!(clock.today().weekday(), Weekday::Mon);
        assert_eq!(clock.time_of_day(), NaiveTime::from_hms_opt(7, 30, 0).unwrap());
    }

    #[test]
    fn advance_moves_fixed_clock_only() {
        let mut clock = fixed_clock();
        clock.advance(Duration::days(1));
        assert_eq!(clock.now(), fixed_now() + Duration::days(1));

        let mut system = Clock::default_clock();
        system.advance(Duration::days(1));
        assert!(!system.is_fixed());
    }
}
