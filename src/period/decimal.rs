//! Fixed-point decimal field values.
//!
//! A field such as `12.5` becomes `12500`: the value scaled by 1000. Only the
//! first fractional digit is kept; anything after it is truncated, never
//! rounded. The parser knows nothing about units.

use crate::error::NumberError;

/// Fixed-point scale: three fractional decimal digits.
pub(crate) const SCALE: i64 = 1000;

/// Parses `text` (digits, optionally one `.` or `,` and more digits) into a
/// value scaled by [`SCALE`].
pub(crate) fn parse_fixed_point(text: &str) -> Result<i64, NumberError> {
    if !text.bytes().any(|b| b.is_ascii_digit()) {
        return Err(NumberError::NoDigits);
    }

    let digits = match text.find(['.', ',']) {
        None => format!("{text}000"),
        Some(sep) => {
            let int_part = &text[..sep];
            let mut fraction = text[sep + 1..].chars();
            let first = fraction.next();
            if !fraction.as_str().bytes().all(|b| b.is_ascii_digit()) {
                return Err(NumberError::InvalidFraction);
            }
            match first {
                Some(d) => format!("{int_part}{d}00"),
                None => format!("{int_part}000"),
            }
        }
    };

    Ok(digits.parse::<i64>()?)
}

/// Parses a field that must hold a whole number of its unit. A fraction of
/// zero (`3.0`) is tolerated.
pub(crate) fn parse_whole(text: &str) -> Result<i64, NumberError> {
    let value = parse_fixed_point(text)?;
    if value % SCALE != 0 {
        return Err(NumberError::FractionNotAllowed);
    }
    Ok(value / SCALE)
}
