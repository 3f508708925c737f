//! Calendar dates under the proleptic Gregorian calendar, as used by ISO 8601.
//!
//! A [`Date`] is a day number counted from 1970-01-01 (day zero). Year, month
//! and week information is derived through `chrono`. Years use astronomical
//! numbering, so year 0 is 1 BC.

use std::fmt;
use std::ops::Sub;

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// A number of whole days. Negative values point backwards.
pub type PeriodOfDays = i32;

// chrono's default date is 1970-01-01.
fn epoch() -> NaiveDate {
    NaiveDate::default()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date {
    day: i32,
}

impl Date {
    /// The smallest representable date.
    pub fn earliest() -> Date {
        Date::from_naive(NaiveDate::MIN)
    }

    /// The largest representable date.
    pub fn latest() -> Date {
        Date::from_naive(NaiveDate::MAX)
    }

    /// The date for `year`, `month` and `day`.
    ///
    /// Month and day may lie outside their usual ranges and are carried over:
    /// month 13 of 2020 is January 2021, day 0 is the last day of the
    /// previous month. `None` if the result cannot be represented.
    pub fn new(year: i32, month: i32, day: i32) -> Option<Date> {
        let month0 = month.checked_sub(1)?;
        let year = year.checked_add(month0.div_euclid(12))?;
        let first = NaiveDate::from_ymd_opt(year, month0.rem_euclid(12) as u32 + 1, 1)?;
        Date::from_naive(first).add_days(day.checked_sub(1)?)
    }

    /// The date `day` days after 1970-01-01, if it can be represented.
    pub fn from_day_number(day: i32) -> Option<Date> {
        if (Date::earliest().day..=Date::latest().day).contains(&day) {
            Some(Date { day })
        } else {
            None
        }
    }

    pub fn from_naive(date: NaiveDate) -> Date {
        Date {
            day: days_from_epoch(date),
        }
    }

    pub fn to_naive(self) -> NaiveDate {
        // Every constructor keeps the day number within chrono's range.
        epoch()
            .checked_add_signed(Duration::days(i64::from(self.day)))
            .unwrap_or_default()
    }

    pub fn day_number(self) -> i32 {
        self.day
    }

    /// True for 1970-01-01, which is unlikely to be set on purpose.
    pub fn is_zero(self) -> bool {
        self.day == 0
    }

    pub fn year(self) -> i32 {
        self.to_naive().year()
    }

    /// Month of the year, 1 to 12.
    pub fn month(self) -> u32 {
        self.to_naive().month()
    }

    /// Day of the month, from 1.
    pub fn day(self) -> u32 {
        self.to_naive().day()
    }

    /// Day of the year, 1 to 365 (366 in leap years).
    pub fn year_day(self) -> u32 {
        self.to_naive().ordinal()
    }

    pub fn weekday(self) -> Weekday {
        // Day zero was a Thursday.
        (0..self.day.rem_euclid(7)).fold(Weekday::Thu, |d, _| d.succ())
    }

    /// ISO 8601 week-numbering year and week (1 to 53). The first days of
    /// January may belong to the last week of the previous year, and the last
    /// days of December to week 1 of the next.
    pub fn iso_week(self) -> (i32, u32) {
        let week = self.to_naive().iso_week();
        (week.year(), week.week())
    }

    /// The date `days` later (earlier if negative).
    pub fn add_days(self, days: PeriodOfDays) -> Option<Date> {
        Date::from_day_number(self.day.checked_add(days)?)
    }

    /// Adds years, months and days with the same carrying as [`Date::new`].
    /// For example adding (-1, 2, 3) to 2011-01-01 gives 2010-03-04.
    pub fn add_date(self, years: i32, months: i32, days: i32) -> Option<Date> {
        let year = self.year().checked_add(years)?;
        let month = (self.month() as i32).checked_add(months)?;
        let day = (self.day() as i32).checked_add(days)?;
        Date::new(year, month, day)
    }
}

fn days_from_epoch(date: NaiveDate) -> i32 {
    // chrono's whole range is a few hundred million days at most.
    date.signed_duration_since(epoch()).num_days() as i32
}

impl Sub for Date {
    type Output = PeriodOfDays;

    /// Days from `other` to `self`.
    fn sub(self, other: Date) -> PeriodOfDays {
        self.day - other.day
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Date {
        Date::from_naive(date)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_naive(), f)
    }
}
