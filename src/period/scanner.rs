// Format: [+-]PnYnMnWnDTnHnMnS, each field optional but at least one present.
//
// Fields are found by searching for their designator in what is left of the
// date or time part, in a fixed order. Everything before the designator is
// the number.

use super::decimal::{parse_fixed_point, parse_whole};
use super::{Period, RawPeriod};
use crate::error::{Designator, NumberError, ParseError};

/// The only spelling of zero that has no designator at all.
const ZERO_LITERAL: &str = "P0";

/// Parses an ISO-8601 period and normalises it.
///
/// A leading `+` or `-` is allowed. Multiples of 12 months become years, so
/// `P24M` is the same as `P2Y`, but days are never turned into months because
/// months vary in length.
///
/// The zero period can be written `P0Y`, `P0M`, `P0W`, `P0D`, `PT0H`, `PT0M`,
/// `PT0S` or `P0`; all of them give the same value.
pub fn parse(text: &str) -> Result<Period, ParseError> {
    parse_strict(text, true)
}

/// Like [`parse`], but normalisation is only done when `normalise` is set.
/// Without it `P24M` keeps its 24 months.
pub fn parse_strict(text: &str, normalise: bool) -> Result<Period, ParseError> {
    log::trace!("parsing period {text:?}, normalise: {normalise}");
    let raw = scan(text).inspect_err(|e| log::debug!("rejected period: {e}"))?;
    if normalise {
        Ok(raw.normalise())
    } else {
        Ok(raw.into_period())
    }
}

/// Parses and normalises `text`, panicking if it is not a valid period.
///
/// Meant for literals in setup code. Never use it on user input.
pub fn parse_or_panic(text: &str) -> Period {
    parse_or_panic_with(text, true)
}

/// [`parse_or_panic`] with explicit control over normalisation.
pub fn parse_or_panic_with(text: &str, normalise: bool) -> Period {
    match parse_strict(text, normalise) {
        Ok(period) => period,
        Err(e) => panic!("{e}"),
    }
}

struct Scanner<'a> {
    input: &'a str,
    rest: &'a str,
    matched: bool,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Scanner {
            input,
            rest: "",
            matched: false,
        }
    }

    fn reset(&mut self, part: &'a str) {
        self.rest = part;
    }

    /// Text of the field ending at `designator`, or `None` if the designator
    /// does not occur in the rest of the part.
    fn field(&mut self, designator: Designator) -> Result<Option<&'a str>, ParseError> {
        match self.rest.find(designator.symbol()) {
            None => Ok(None),
            Some(0) => Err(ParseError::MissingFieldNumber {
                designator,
                input: self.input.to_string(),
            }),
            Some(pos) => {
                let text = &self.rest[..pos];
                self.rest = &self.rest[pos + 1..];
                self.matched = true;
                Ok(Some(text))
            }
        }
    }

    fn whole(&mut self, designator: Designator) -> Result<i64, ParseError> {
        match self.field(designator)? {
            None => Ok(0),
            Some(text) => parse_whole(text).map_err(|cause| self.malformed(designator, cause)),
        }
    }

    fn fixed_point(&mut self, designator: Designator) -> Result<i64, ParseError> {
        match self.field(designator)? {
            None => Ok(0),
            Some(text) => {
                parse_fixed_point(text).map_err(|cause| self.malformed(designator, cause))
            }
        }
    }

    fn expect_consumed(&self) -> Result<(), ParseError> {
        if self.rest.is_empty() {
            return Ok(());
        }
        Err(ParseError::TrailingUnconsumedText {
            remaining: self.rest.to_string(),
            input: self.input.to_string(),
        })
    }

    fn malformed(&self, designator: Designator, cause: NumberError) -> ParseError {
        ParseError::MalformedFieldNumber {
            designator,
            input: self.input.to_string(),
            cause,
        }
    }
}

fn scan(text: &str) -> Result<RawPeriod<'_>, ParseError> {
    if text.is_empty() || text == "-" || text == "+" {
        return Err(ParseError::EmptyOrSignOnlyInput {
            input: text.to_string(),
        });
    }

    if text == ZERO_LITERAL {
        return Ok(RawPeriod {
            input: text,
            ..RawPeriod::default()
        });
    }

    let (negative, unsigned) = if let Some(rest) = text.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = text.strip_prefix('+') {
        (false, rest)
    } else {
        (false, text)
    };

    let Some(body) = unsigned.strip_prefix('P') else {
        return Err(ParseError::MissingPeriodMarker {
            input: text.to_string(),
        });
    };

    let mut raw = RawPeriod {
        negative,
        input: text,
        ..RawPeriod::default()
    };
    let mut scanner = Scanner::new(text);

    let date = match body.find('T') {
        Some(t) => {
            scanner.reset(&body[t + 1..]);
            raw.hours = scanner.whole(Designator::Hours)?;
            raw.minutes = scanner.whole(Designator::Minutes)?;
            raw.seconds = scanner.fixed_point(Designator::Seconds)?;
            scanner.expect_consumed()?;
            &body[..t]
        }
        None => body,
    };

    scanner.reset(date);
    raw.years = scanner.whole(Designator::Years)?;
    raw.months = scanner.whole(Designator::Months)?;
    let weeks = scanner.whole(Designator::Weeks)?;
    let days = scanner.whole(Designator::Days)?;
    scanner.expect_consumed()?;

    // Whole-unit fields are at most i64::MAX / 1000, so this cannot overflow.
    raw.days = weeks * 7 + days;

    if !scanner.matched {
        return Err(ParseError::NoFieldsMatched {
            input: text.to_string(),
        });
    }

    Ok(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn kind(s: &str) -> ErrorKind {
        parse(s).unwrap_err().kind()
    }

    fn raw(s: &str) -> Period {
        parse_strict(s, false).unwrap()
    }

    #[test]
    fn all_fields() {
        let d = raw("P1Y2M3W4DT5H6M7.8S");
        assert_eq!(d.years(), 1);
        assert_eq!(d.months(), 2);
        assert_eq!(d.days(), 25);
        assert_eq!(d.hours(), 5);
        assert_eq!(d.minutes(), 6);
        assert_eq!(d.millis(), 7800);
        assert!(!d.is_negative());
    }

    #[test]
    fn months_and_minutes_are_told_apart() {
        let d = raw("P3MT4M");
        assert_eq!(d.months(), 3);
        assert_eq!(d.minutes(), 4);
        assert_eq!(raw("PT4M").months(), 0);
        assert_eq!(raw("P3M").minutes(), 0);
    }

    #[test]
    fn leading_sign() {
        assert_eq!(raw("-P10D").days(), -10);
        assert_eq!(raw("+P10D").days(), 10);
        assert!(raw("-PT1S").is_negative());
    }

    #[test]
    fn zero_spellings() {
        let zero = Period::ZERO;
        for s in ["P0Y", "P0M", "P0W", "P0D", "PT0H", "PT0M", "PT0S", "P0"] {
            let d = parse(s).unwrap();
            assert_eq!(d, zero, "{s}");
            assert!(d.is_zero());
            assert_eq!(d.to_string(), "P0D");
        }
        assert_eq!(parse("-P0D").unwrap(), zero);
    }

    #[test]
    fn zero_literal_is_exact() {
        assert_eq!(kind("-P0"), ErrorKind::TrailingUnconsumedText);
        assert_eq!(kind("P0T0S"), ErrorKind::TrailingUnconsumedText);
        assert_eq!(kind("P00"), ErrorKind::TrailingUnconsumedText);
    }

    #[test]
    fn months_fold_into_years_when_normalising() {
        assert_eq!(parse("P24M").unwrap(), parse("P2Y").unwrap());
        let kept = raw("P24M");
        assert_eq!(kept.months(), 24);
        assert_eq!(kept.years(), 0);
        assert_ne!(kept, parse("P2Y").unwrap());

        let d = parse("P1Y11M").unwrap();
        assert_eq!((d.years(), d.months()), (1, 11));
    }

    #[test]
    fn mixed_sign_fields_normalise() {
        let d = parse("P-1Y13M").unwrap();
        assert_eq!(d.years() * 12 + d.months(), 1);
        assert_eq!((d.years(), d.months()), (0, 1));
        assert!(d.is_positive());
    }

    #[test]
    fn days_never_become_months() {
        let d = parse("P400DT48H").unwrap();
        assert_eq!(d.months(), 0);
        assert_eq!(d.days(), 400);
        assert_eq!(d.hours(), 48);
    }

    #[test]
    fn fractional_seconds() {
        assert_eq!(parse("PT1.5S").unwrap().millis(), 1500);
        assert_eq!(parse("PT1,5S").unwrap(), parse("PT1.5S").unwrap());
        assert_eq!(parse("PT1.23456S").unwrap().millis(), 1200);
        assert_eq!(parse("PT0.09S").unwrap().millis(), 0);
        assert_eq!(parse("-PT2.5S").unwrap().millis(), -2500);
    }

    #[test]
    fn fraction_on_whole_unit() {
        let err = parse("PT1.5H").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedFieldNumber);
        assert_eq!(err.designator(), Some(Designator::Hours));
        assert_eq!(parse("P2.0D").unwrap().days(), 2);
    }

    #[test]
    fn distinct_error_kinds() {
        assert_eq!(kind(""), ErrorKind::EmptyOrSignOnlyInput);
        assert_eq!(kind("-"), ErrorKind::EmptyOrSignOnlyInput);
        assert_eq!(kind("+"), ErrorKind::EmptyOrSignOnlyInput);
        assert_eq!(kind("P"), ErrorKind::NoFieldsMatched);
        assert_eq!(kind("-PT"), ErrorKind::NoFieldsMatched);
        assert_eq!(kind("1Y"), ErrorKind::MissingPeriodMarker);
        assert_eq!(kind(" P1Y"), ErrorKind::MissingPeriodMarker);
        assert_eq!(kind("PY"), ErrorKind::MissingFieldNumber);
        assert_eq!(kind("P1Y2X"), ErrorKind::TrailingUnconsumedText);
        assert_eq!(kind("PT1H2X"), ErrorKind::TrailingUnconsumedText);
        assert_eq!(kind("PaY"), ErrorKind::MalformedFieldNumber);
    }

    #[test]
    fn errors_carry_input_and_designator() {
        let err = parse("P1YTM").unwrap_err();
        assert_eq!(err.input(), "P1YTM");
        assert_eq!(err.designator(), Some(Designator::Minutes));

        let err = parse("P1Y2X").unwrap_err();
        let ParseError::TrailingUnconsumedText { remaining, input } = err else {
            panic!("unexpected error");
        };
        assert_eq!(remaining, "2X");
        assert_eq!(input, "P1Y2X");
    }

    #[test]
    fn out_of_order_fields_are_rejected() {
        assert!(parse("P1D2Y").is_err());
        assert!(parse("PT1S2H").is_err());
    }

    #[test]
    fn overflow() {
        assert_eq!(kind("P9999999999999999999Y"), ErrorKind::MalformedFieldNumber);
        let err = parse("P9223372036854776W").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedFieldNumber);
        assert_eq!(err.designator(), Some(Designator::Weeks));
    }

    #[test]
    fn largest_week_count_folds_exactly() {
        let d = parse("P9223372036854775W9223372036854775D").unwrap();
        assert_eq!(d.days(), 9_223_372_036_854_775 * 8);
        assert_eq!(d.weeks(), 9_223_372_036_854_775 * 8 / 7);
    }

    #[test]
    fn empty_time_part_is_accepted() {
        assert_eq!(parse("P1YT").unwrap(), parse("P1Y").unwrap());
    }

    #[test]
    fn parse_or_panic_on_good_input() {
        assert_eq!(parse_or_panic("P1D").days(), 1);
        assert_eq!(parse_or_panic_with("P13M", false).months(), 13);
    }

    #[test]
    #[should_panic(expected = "expected 'P' period mark")]
    fn parse_or_panic_on_bad_input() {
        parse_or_panic("1D");
    }

    #[test]
    fn concurrent_parses_do_not_interfere() {
        std::thread::scope(|s| {
            let handles: Vec<_> = (0..16)
                .map(|i| {
                    s.spawn(move || {
                        (0..200)
                            .map(|j| {
                                let text = format!("P{i}Y{j}DT{j}.{}S", i % 10);
                                (i, j, parse(&text).unwrap())
                            })
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            for handle in handles {
                for (i, j, d) in handle.join().unwrap() {
                    assert_eq!(d.years(), i);
                    assert_eq!(d.days(), j);
                    assert_eq!(d.millis(), j * 1000 + (i % 10) * 100);
                }
            }
        });
    }
}
