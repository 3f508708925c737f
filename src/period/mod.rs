//! ISO-8601 periods such as `P1Y2M3D` or `-PT4H5M6.7S`.
//!
//! A [`Period`] holds whole years, months, days, hours and minutes, plus
//! seconds in fixed point (thousandths), and one overall sign. Weeks are
//! folded into days when parsing.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::error::ParseError;

mod decimal;
mod normalise;
mod scanner;

pub use scanner::{parse, parse_or_panic, parse_or_panic_with, parse_strict};

const DAYS_PER_WEEK: i64 = 7;

/// Field values straight out of the scanner, before normalisation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct RawPeriod<'a> {
    pub years: i64,
    pub months: i64,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    /// Seconds scaled by 1000.
    pub seconds: i64,
    pub negative: bool,
    /// Only kept for diagnostics.
    pub input: &'a str,
}

impl RawPeriod<'_> {
    pub(crate) fn into_period(self) -> Period {
        log::trace!("scanned {:?} into {:?}", self.input, self);
        Period {
            years: self.years,
            months: self.months,
            days: self.days,
            hours: self.hours,
            minutes: self.minutes,
            millis: self.seconds,
            negative: self.negative,
        }
        .clear_zero_sign()
    }
}

/// A span of calendar and clock time.
///
/// Periods compare equal when their signed fields are equal, regardless of
/// how they were written: `P0Y`, `PT0S` and `-P0D` are all the same zero
/// period, and `P-1M` equals `-P1M`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Period {
    years: i64,
    months: i64,
    days: i64,
    hours: i64,
    minutes: i64,
    millis: i64,
    negative: bool,
}

impl Period {
    pub const ZERO: Period = Period {
        years: 0,
        months: 0,
        days: 0,
        hours: 0,
        minutes: 0,
        millis: 0,
        negative: false,
    };

    /// Builds a period from signed fields. `millis` is the seconds field in
    /// thousandths of a second.
    ///
    /// The fields are kept as given; nothing is normalised. `i64::MIN` is
    /// clamped to `-i64::MAX` so that every field can be negated.
    pub fn new(
        years: i64,
        months: i64,
        days: i64,
        hours: i64,
        minutes: i64,
        millis: i64,
    ) -> Period {
        let [years, months, days, hours, minutes, millis] =
            [years, months, days, hours, minutes, millis].map(|v| v.max(-i64::MAX));
        Period {
            years,
            months,
            days,
            hours,
            minutes,
            millis,
            negative: false,
        }
        .canonical_sign()
    }

    fn fields(&self) -> [i64; 6] {
        [
            self.years,
            self.months,
            self.days,
            self.hours,
            self.minutes,
            self.millis,
        ]
    }

    // No field ever holds i64::MIN, so negation is exact.
    fn signed(&self, value: i64) -> i64 {
        if self.negative {
            -value
        } else {
            value
        }
    }

    fn signed_fields(&self) -> [i64; 6] {
        self.fields().map(|v| self.signed(v))
    }

    fn clear_zero_sign(mut self) -> Period {
        if self.fields().iter().all(|&v| v == 0) {
            self.negative = false;
        }
        self
    }

    // Stores magnitudes plus the sign flag whenever every non-zero field
    // points the same way. Mixed-sign periods keep their fields as they are.
    fn canonical_sign(self) -> Period {
        let fields = self.fields();
        let any_negative = fields.iter().any(|&v| v < 0);
        let any_positive = fields.iter().any(|&v| v > 0);
        if !any_negative || any_positive {
            return self.clear_zero_sign();
        }
        let [years, months, days, hours, minutes, millis] = fields.map(|v| -v);
        Period {
            years,
            months,
            days,
            hours,
            minutes,
            millis,
            negative: !self.negative,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.fields().iter().all(|&v| v == 0)
    }

    /// -1, 0 or 1, taken from the largest non-zero field.
    pub fn sign(&self) -> i8 {
        match self.signed_fields().into_iter().find(|&v| v != 0) {
            Some(v) if v < 0 => -1,
            Some(_) => 1,
            None => 0,
        }
    }

    pub fn is_negative(&self) -> bool {
        self.sign() < 0
    }

    pub fn is_positive(&self) -> bool {
        self.sign() > 0
    }

    pub fn years(&self) -> i64 {
        self.signed(self.years)
    }

    pub fn months(&self) -> i64 {
        self.signed(self.months)
    }

    /// Whole weeks in the days field, truncated toward zero.
    pub fn weeks(&self) -> i64 {
        self.days() / DAYS_PER_WEEK
    }

    pub fn days(&self) -> i64 {
        self.signed(self.days)
    }

    pub fn hours(&self) -> i64 {
        self.signed(self.hours)
    }

    pub fn minutes(&self) -> i64 {
        self.signed(self.minutes)
    }

    /// Whole seconds, truncated toward zero.
    pub fn seconds(&self) -> i64 {
        self.millis() / 1000
    }

    /// The seconds field in thousandths of a second.
    pub fn millis(&self) -> i64 {
        self.signed(self.millis)
    }

    #[must_use]
    pub fn negate(self) -> Period {
        Period {
            negative: !self.negative,
            ..self
        }
        .clear_zero_sign()
    }

    #[must_use]
    pub fn abs(self) -> Period {
        if self.is_negative() { self.negate() } else { self }
    }
}

impl PartialEq for Period {
    fn eq(&self, other: &Period) -> bool {
        self.signed_fields() == other.signed_fields()
    }
}

impl Eq for Period {}

impl Hash for Period {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.signed_fields().hash(state);
    }
}

impl FromStr for Period {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Period, ParseError> {
        parse(s)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("P0D");
        }
        if self.negative {
            f.write_str("-")?;
        }
        f.write_str("P")?;
        for (value, designator) in [(self.years, 'Y'), (self.months, 'M'), (self.days, 'D')] {
            if value != 0 {
                write!(f, "{value}{designator}")?;
            }
        }
        if self.hours == 0 && self.minutes == 0 && self.millis == 0 {
            return Ok(());
        }
        f.write_str("T")?;
        for (value, designator) in [(self.hours, 'H'), (self.minutes, 'M')] {
            if value != 0 {
                write!(f, "{value}{designator}")?;
            }
        }
        if self.millis != 0 {
            write_seconds(f, self.millis)?;
        }
        Ok(())
    }
}

fn write_seconds(f: &mut fmt::Formatter<'_>, millis: i64) -> fmt::Result {
    let sign = if millis < 0 { "-" } else { "" };
    let millis = millis.unsigned_abs();
    let (whole, frac) = (millis / 1000, millis % 1000);
    if frac == 0 {
        return write!(f, "{sign}{whole}S");
    }
    let frac = format!("{frac:03}");
    write!(f, "{sign}{whole}.{}S", frac.trim_end_matches('0'))
}
