//! ISO-8601 periods (`P1Y2M3DT4H5M6.7S`) parsed into exact, fixed-point
//! values, with a conservative normal form and a small calendar date type.
//!
//! ```
//! let p = period::parse("P1Y14MT1,5S").unwrap();
//! assert_eq!((p.years(), p.months()), (2, 2));
//! assert_eq!(p.millis(), 1500);
//! assert_eq!(p.to_string(), "P2Y2MT1.5S");
//! ```

pub mod date;
mod error;
pub mod period;

pub use date::{Date, PeriodOfDays};
pub use error::{Designator, ErrorKind, NumberError, ParseError};
pub use period::{Period, parse, parse_or_panic, parse_or_panic_with, parse_strict};
