//! Calendar arithmetic for the due-date picker.
//!
//! Year, month, and day are edited through independent selectors, so any
//! single change can leave the current day past the end of the month. The
//! contract is "never hold an invalid calendar date": a day that no longer
//! fits is clamped to the last day of the target month, which is the
//! success path, not an error.

use crate::error::AppError;
use time::{Date, Month, OffsetDateTime};

/// Number of days in the given month of the proleptic Gregorian calendar.
pub fn days_in_month(year: i32, month: u8) -> Result<u8, AppError> {
    let month = Month::try_from(month)
        .map_err(|_| AppError::invalid_argument(format!("month {month} is out of range (1-12)")))?;
    Ok(time::util::days_in_month(month, year))
}

/// Clamp a candidate day into the given month: `min(day, days_in_month)`.
pub fn clamp_day(year: i32, month: u8, day: u8) -> Result<u8, AppError> {
    if day == 0 {
        return Err(AppError::invalid_argument("day must be at least 1"));
    }
    Ok(day.min(days_in_month(year, month)?))
}

/// Years offered by the picker: ten selectable years starting at the
/// current one. A policy of the presentation layer, kept as a pure
/// function of the injected clock.
pub fn selectable_years(now: OffsetDateTime) -> Vec<i32> {
    let first = now.year();
    (first..first + 10).collect()
}

/// The date-picker state: a (year, month, day) triple that always denotes
/// a valid calendar date. Fields are private so every mutation goes
/// through re-clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarCursor {
    year: i32,
    month: u8,
    day: u8,
}

impl CalendarCursor {
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self, AppError> {
        let day = clamp_day(year, month, day)?;
        Ok(Self { year, month, day })
    }

    pub fn from_datetime(datetime: OffsetDateTime) -> Self {
        Self {
            year: datetime.year(),
            month: u8::from(datetime.month()),
            day: datetime.day(),
        }
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> u8 {
        self.month
    }

    pub fn day(self) -> u8 {
        self.day
    }

    /// Rebuild with a new year, re-clamping the day (Feb 29 becomes
    /// Feb 28 when moving off a leap year).
    pub fn with_year(self, year: i32) -> Self {
        let day = self
            .day
            .min(time::util::days_in_month(month_of(self.month), year));
        Self { year, day, ..self }
    }

    /// Rebuild with a new month, re-clamping the day.
    pub fn with_month(self, month: u8) -> Result<Self, AppError> {
        let day = clamp_day(self.year, month, self.day)?;
        Ok(Self {
            month,
            day,
            ..self
        })
    }

    /// Rebuild with a new day, clamping overflow requests such as day 31
    /// in a 30-day month.
    pub fn with_day(self, day: u8) -> Result<Self, AppError> {
        let day = clamp_day(self.year, self.month, day)?;
        Ok(Self { day, ..self })
    }

    /// The timestamp committed onto a task when the picker is accepted.
    pub fn to_midnight_utc(self) -> Result<OffsetDateTime, AppError> {
        let date = Date::from_calendar_date(self.year, month_of(self.month), self.day)
            .map_err(|err| AppError::invalid_argument(err.to_string()))?;
        Ok(date.midnight().assume_utc())
    }
}

// The cursor invariant keeps `month` in 1..=12, so the conversion cannot
// fail once a cursor exists.
fn month_of(month: u8) -> Month {
    Month::try_from(month).unwrap_or(Month::January)
}
