//! The `calendrical_rs` crate is a proleptic ISO-8601 calendrical engine.
//!
//! It provides immutable dates, times, offsets and zone identities with
//! exact arithmetic, a registry of calendrical fields, and a merger that
//! resolves a sparse bag of field values into canonical values.
//!
//! ```rust
//! use calendrical_rs::{fields::Field, merger::Merger, PlainDate, Weekday};
//!
//! // Create a date and add a month to it.
//! let date = PlainDate::try_new(2024, 1, 31).unwrap();
//! assert_eq!(date.plus_months(1).unwrap(), PlainDate::try_new(2024, 2, 29).unwrap());
//!
//! // Resolve a year, a week of the year and a day of the week into a date.
//! let merged = Merger::strict()
//!     .with_field(Field::Year, 2024).unwrap()
//!     .with_field(Field::WeekOfYear, 10).unwrap()
//!     .with_field(Field::DayOfWeek, 5).unwrap()
//!     .merge()
//!     .unwrap();
//! let date = merged.date().unwrap();
//! assert_eq!(date.to_string(), "2024-03-08");
//! assert_eq!(date.day_of_week(), Weekday::Friday);
//! ```
//!
//! Zone rules are supplied through the [`provider::ZoneRulesProvider`]
//! trait; the `zone_rules_provider` crate holds an in-memory implementation.
#![no_std]
#![cfg_attr(not(test), forbid(clippy::unwrap_used))]
#![allow(
    // Currently throws a false positive regarding dependencies that are only used in tests.
    unused_crate_dependencies,
    clippy::module_name_repetitions,
    clippy::redundant_pub_crate,
    clippy::too_many_lines,
    clippy::cognitive_complexity,
    clippy::missing_errors_doc,
    clippy::let_unit_value,
    clippy::option_if_let_else,

    // It may be worth to look if we can fix the issues highlighted by these lints.
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
)]

extern crate alloc;
extern crate core;

#[cfg(feature = "std")]
extern crate std;

pub mod error;
pub mod fields;
pub mod iso;
pub mod merger;
pub mod options;
pub mod parsers;
pub mod provider;

mod builtins;

#[doc(hidden)]
pub(crate) mod utils;

use core::cmp::Ordering;

/// Re-export of `TinyAsciiStr` from `tinystr`.
pub use tinystr::TinyAsciiStr;

#[doc(inline)]
pub use error::CalendricalError;

/// The `calendrical_rs` result type
pub type CalendricalResult<T> = Result<T, CalendricalError>;

pub use crate::builtins::core::{
    OffsetDate, OffsetDateTime, OffsetTime, Overflow, Period, PlainDate, PlainDateTime, PlainTime,
    TimeZone, UtcOffset, ZoneIdentifier, ZonedDateTime, DEFAULT_ZONE_GROUP,
};
pub use crate::fields::{AmPm, Calendrical, Weekday};

/// A library specific trait for unwrapping assertions.
pub(crate) trait CalendricalUnwrap {
    type Output;

    /// `calendrical_rs` based assertion for unwrapping. This will panic in
    /// debug builds, but returns an error during runtime.
    fn calendrical_unwrap(self) -> CalendricalResult<Self::Output>;
}

impl<T> CalendricalUnwrap for Option<T> {
    type Output = T;

    fn calendrical_unwrap(self) -> CalendricalResult<Self::Output> {
        debug_assert!(self.is_some());
        self.ok_or(CalendricalError::assert())
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! calendrical_assert {
    ($condition:expr $(,)*) => {
        if !$condition {
            return Err($crate::CalendricalError::assert());
        }
    };
    ($condition:expr, $($args:tt)+) => {
        if !$condition {
            #[cfg(feature = "log")]
            log::error!($($args)+);
            return Err($crate::CalendricalError::assert());
        }
    };
}

/// A general Sign type.
#[repr(i8)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Sign {
    #[default]
    Positive = 1,
    Zero = 0,
    Negative = -1,
}

impl From<i64> for Sign {
    fn from(value: i64) -> Self {
        match value.cmp(&0) {
            Ordering::Greater => Self::Positive,
            Ordering::Equal => Self::Zero,
            Ordering::Less => Self::Negative,
        }
    }
}

impl Sign {
    /// Coerces the current `Sign` to be either negative or positive.
    pub(crate) fn as_sign_multiplier(&self) -> i8 {
        if matches!(self, Self::Zero) {
            return 1;
        }
        *self as i8
    }
}

// Relevant numeric constants
/// Nanoseconds per day constant: 8.64e+13
pub const NS_PER_DAY: i64 = 86_400 * 1_000_000_000;
/// The earliest supported year.
pub const MIN_YEAR: i32 = -999_999_999;
/// The latest supported year.
pub const MAX_YEAR: i32 = 999_999_999;
