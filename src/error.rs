use std::error::Error;
use std::fmt;
use std::num::ParseIntError;

/// The unit a numeric field belongs to.
///
/// Months and minutes share the letter `M`, so errors carry this instead of
/// the raw character.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Designator {
    Years,
    Months,
    Weeks,
    Days,
    Hours,
    Minutes,
    Seconds,
}

impl Designator {
    pub fn symbol(self) -> char {
        match self {
            Designator::Years => 'Y',
            Designator::Months | Designator::Minutes => 'M',
            Designator::Weeks => 'W',
            Designator::Days => 'D',
            Designator::Hours => 'H',
            Designator::Seconds => 'S',
        }
    }

    pub fn is_time(self) -> bool {
        matches!(
            self,
            Designator::Hours | Designator::Minutes | Designator::Seconds
        )
    }

    /// Which side of the `T` separator the designator belongs to.
    fn part(self) -> &'static str {
        if self.is_time() { "time" } else { "date" }
    }
}

impl fmt::Display for Designator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", self.symbol())
    }
}

/// Why the text of a single field could not be turned into a number.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NumberError {
    /// There was not a single digit in the field.
    NoDigits,
    /// The digits did not form a 64-bit integer once scaled.
    Invalid(ParseIntError),
    /// The discarded part of the fraction contained something other than digits.
    InvalidFraction,
    /// A non-zero fraction was given on a unit that only holds whole values.
    FractionNotAllowed,
}

impl fmt::Display for NumberError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberError::Invalid(e) => write!(f, "{e}"),
            NumberError::NoDigits => write!(f, "no digits"),
            NumberError::InvalidFraction => write!(f, "invalid digits in fraction"),
            NumberError::FractionNotAllowed => {
                write!(f, "only the seconds field may have a fraction")
            }
        }
    }
}

impl Error for NumberError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            NumberError::Invalid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ParseIntError> for NumberError {
    fn from(e: ParseIntError) -> Self {
        NumberError::Invalid(e)
    }
}

/// Fieldless mirror of [`ParseError`] for callers that only branch on kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    EmptyOrSignOnlyInput,
    MissingPeriodMarker,
    MissingFieldNumber,
    MalformedFieldNumber,
    TrailingUnconsumedText,
    NoFieldsMatched,
}

/// A rejected period string. Every variant keeps the complete input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseError {
    EmptyOrSignOnlyInput {
        input: String,
    },
    MissingPeriodMarker {
        input: String,
    },
    MissingFieldNumber {
        designator: Designator,
        input: String,
    },
    MalformedFieldNumber {
        designator: Designator,
        input: String,
        cause: NumberError,
    },
    TrailingUnconsumedText {
        remaining: String,
        input: String,
    },
    NoFieldsMatched {
        input: String,
    },
}

impl ParseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::EmptyOrSignOnlyInput { .. } => ErrorKind::EmptyOrSignOnlyInput,
            ParseError::MissingPeriodMarker { .. } => ErrorKind::MissingPeriodMarker,
            ParseError::MissingFieldNumber { .. } => ErrorKind::MissingFieldNumber,
            ParseError::MalformedFieldNumber { .. } => ErrorKind::MalformedFieldNumber,
            ParseError::TrailingUnconsumedText { .. } => ErrorKind::TrailingUnconsumedText,
            ParseError::NoFieldsMatched { .. } => ErrorKind::NoFieldsMatched,
        }
    }

    pub fn input(&self) -> &str {
        match self {
            ParseError::EmptyOrSignOnlyInput { input }
            | ParseError::MissingPeriodMarker { input }
            | ParseError::MissingFieldNumber { input, .. }
            | ParseError::MalformedFieldNumber { input, .. }
            | ParseError::TrailingUnconsumedText { input, .. }
            | ParseError::NoFieldsMatched { input } => input,
        }
    }

    /// The field being parsed when the error was raised, if any.
    pub fn designator(&self) -> Option<Designator> {
        match self {
            ParseError::MissingFieldNumber { designator, .. }
            | ParseError::MalformedFieldNumber { designator, .. } => Some(*designator),
            _ => None,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::EmptyOrSignOnlyInput { input } => {
                write!(f, "cannot parse a blank string as a period: {input:?}")
            }
            ParseError::MissingPeriodMarker { input } => {
                write!(f, "expected 'P' period mark at the start: {input}")
            }
            ParseError::MissingFieldNumber { designator, input } => {
                let part = designator.part();
                write!(
                    f,
                    "expected a number before the {designator} designator in the {part} part: {input}"
                )
            }
            ParseError::MalformedFieldNumber {
                designator,
                input,
                cause,
            } => write!(
                f,
                "invalid number before the {designator} designator in the {} part ({cause}): {input}",
                designator.part()
            ),
            ParseError::TrailingUnconsumedText { remaining, input } => {
                write!(f, "unexpected remaining components {remaining}: {input}")
            }
            ParseError::NoFieldsMatched { input } => write!(
                f,
                "expected 'Y', 'M', 'W', 'D', 'H', 'M', or 'S' designator: {input}"
            ),
        }
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParseError::MalformedFieldNumber { cause, .. } => Some(cause),
            _ => None,
        }
    }
}
