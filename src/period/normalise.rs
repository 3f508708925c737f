//! Canonical form along the years/months axis.
//!
//! Twelve months always make a year, so whole multiples of twelve months are
//! folded into years. Nothing else is carried: a month is not a fixed number
//! of days and a day is not always 24 hours, so days, hours, minutes and
//! seconds stay exactly as written.

use super::{Period, RawPeriod};

/// Folds months into years. The remainder keeps the sign of the total, so
/// `years * 12 + months` is unchanged. `None` if the folded year count does
/// not fit in an `i64` or is `i64::MIN`, which periods never hold.
pub(crate) fn fold_months(years: i64, months: i64) -> Option<(i64, i64)> {
    let total = i128::from(years) * 12 + i128::from(months);
    let years = i64::try_from(total / 12).ok().filter(|&y| y != i64::MIN)?;
    let months = i64::try_from(total % 12).ok()?;
    Some((years, months))
}

impl RawPeriod<'_> {
    pub(crate) fn normalise(self) -> Period {
        self.into_period().normalise()
    }
}

impl Period {
    /// Returns the canonical form of this period: whole years taken out of
    /// the months count. All other fields pass through unchanged.
    ///
    /// A period whose folded year count would not fit in an `i64` is
    /// returned as is.
    #[must_use]
    pub fn normalise(self) -> Period {
        match fold_months(self.years, self.months) {
            Some((years, months)) => Period {
                years,
                months,
                ..self
            }
            .canonical_sign(),
            None => self,
        }
    }
}
