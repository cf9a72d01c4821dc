use chrono::{Days, Local, NaiveDate};

/// A calendar-day clock for deterministic scheduling in services and tests.
///
/// Scheduling works on whole local days: "today" is the learner's local
/// calendar date, never a UTC instant.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    System,
    Fixed(NaiveDate),
}

impl Clock {
    /// Returns a clock that follows the local wall-clock date.
    #[must_use]
    pub fn system() -> Self {
        Self::System
    }

    /// Returns a clock pinned to the given date.
    #[must_use]
    pub fn fixed(today: NaiveDate) -> Self {
        Self::Fixed(today)
    }

    /// Returns today's local calendar date according to the clock.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        match self {
            Clock::System => Local::now().date_naive(),
            Clock::Fixed(day) => *day,
        }
    }

    /// If this is a fixed clock, move it forward by `days`.
    ///
    /// Has no effect on `Clock::System`, or when the result would leave the
    /// representable date range.
    pub fn advance(&mut self, days: u64) {
        if let Clock::Fixed(day) = self {
            if let Some(next) = day.checked_add_days(Days::new(days)) {
                *day = next;
            }
        }
    }

    #[must_use]
    pub fn is_fixed(&self) -> bool {
        matches!(self, Clock::Fixed(_))
    }
}

/// Deterministic date for tests and examples (2024-01-01).
///
/// # Panics
///
/// Panics if the fixed date cannot be represented.
#[must_use]
pub fn fixed_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).expect("fixed date should be valid")
}

/// Returns a `Clock` fixed at the deterministic test date.
#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fixed_today())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_reports_its_day() {
        let clock = fixed_clock();
        assert!(clock.is_fixed());
        assert_eq!(clock.today().to_string(), "2024-01-01");
    }

    #[test]
    fn advance_moves_fixed_clock_across_month_boundary() {
        let mut clock = Clock::fixed(NaiveDate::from_ymd_opt(2024, 1, 30).unwrap());
        clock.advance(3);
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2024, 2, 2).unwrap());
    }

    #[test]
    fn advance_is_ignored_by_system_clock() {
        let mut clock = Clock::system();
        clock.advance(10);
        assert!(!clock.is_fixed());
    }
}
