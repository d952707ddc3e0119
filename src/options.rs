//! Options that control how values are resolved and merged.
//!
//! Each option has a `FromStr` and `Display` implementation using the same
//! camelCase names, so options can be read from configuration text.

use core::{fmt, str::FromStr};

use crate::{
    builtins::core::Period,
    error::CalendricalError,
    fields::Field,
    iso::IsoDate,
    utils::{days_in_month, days_in_year, month_day_from_day_of_year},
    CalendricalResult,
};

// ==== DateResolver ====

/// The policy for a (year, month, day) triple whose day is past the end of
/// the month.
///
/// All resolvers reject a month outside `1..=12` or a day outside `1..=31`
/// with a range error; they differ only for days that are valid in some
/// month but not in this one.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateResolver {
    /// Fail with an invalid combination error.
    Strict,
    /// Clamp to the last valid day of the month.
    #[default]
    PreviousValid,
    /// Use the first day of the following month.
    NextValid,
    /// Carry the excess days into the following month.
    PartLenient,
}

impl DateResolver {
    /// Resolves a year, month and day into a date.
    ///
    /// ```rust
    /// use calendrical_rs::options::DateResolver;
    ///
    /// let date = DateResolver::PartLenient.resolve(2023, 2, 30).unwrap();
    /// assert_eq!((date.year, date.month, date.day), (2023, 3, 2));
    ///
    /// let date = DateResolver::PreviousValid.resolve(2024, 2, 30).unwrap();
    /// assert_eq!((date.year, date.month, date.day), (2024, 2, 29));
    ///
    /// assert!(DateResolver::Strict.resolve(2023, 2, 29).is_err());
    /// ```
    pub fn resolve(self, year: i32, month: u8, day: u8) -> CalendricalResult<IsoDate> {
        IsoDate::new_with_resolver(year, month, day, self)
    }

    /// Resolves a year and one based day of the year into a date.
    ///
    /// Day 366 of a standard year is handled like the 32nd of December.
    pub fn resolve_day_of_year(self, year: i32, day_of_year: u16) -> CalendricalResult<IsoDate> {
        let length = days_in_year(year);
        if day_of_year == 0 || day_of_year > 366 {
            return Err(CalendricalError::range()
                .with_message("day of year must be in 1..=366")
                .with_field(Field::DayOfYear)
                .with_value(i64::from(day_of_year)));
        }
        if day_of_year <= length {
            let (month, day) = month_day_from_day_of_year(year, day_of_year);
            return IsoDate::try_new(year, month, day);
        }
        match self {
            Self::Strict => Err(CalendricalError::invalid_combination()
                .with_message("day 366 is not valid in a standard year")
                .with_field(Field::DayOfYear)
                .with_value(i64::from(day_of_year))),
            Self::PreviousValid => IsoDate::try_new(year, 12, 31),
            Self::NextValid | Self::PartLenient => IsoDate::try_new(year.saturating_add(1), 1, 1),
        }
    }

    /// Returns the day to use when the day is past the end of the month,
    /// together with the number of whole months to move forward.
    pub(crate) fn adjust(self, year: i32, month: u8, day: u8) -> CalendricalResult<(u8, u8)> {
        let length = days_in_month(year, month);
        if day <= length {
            return Ok((day, 0));
        }
        match self {
            Self::Strict => Err(CalendricalError::invalid_combination()
                .with_message("day is not valid for the month")
                .with_field(Field::DayOfMonth)
                .with_value(i64::from(day))),
            Self::PreviousValid => Ok((length, 0)),
            Self::NextValid => Ok((1, 1)),
            Self::PartLenient => Ok((day - length, 1)),
        }
    }
}

/// A parsing error for `DateResolver`.
#[derive(Debug, Clone, Copy)]
pub struct ParseDateResolverError;

impl fmt::Display for ParseDateResolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("provided string was not a valid date resolver.")
    }
}

impl FromStr for DateResolver {
    type Err = ParseDateResolverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strict" => Ok(Self::Strict),
            "previousValid" => Ok(Self::PreviousValid),
            "nextValid" => Ok(Self::NextValid),
            "partLenient" => Ok(Self::PartLenient),
            _ => Err(ParseDateResolverError),
        }
    }
}

impl fmt::Display for DateResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strict => "strict",
            Self::PreviousValid => "previousValid",
            Self::NextValid => "nextValid",
            Self::PartLenient => "partLenient",
        }
        .fmt(f)
    }
}

// ==== MergeMode ====

/// How the merger treats values that disagree or fall outside a field's range.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MergeMode {
    /// Disagreements are conflicts and out of range values are range errors.
    #[default]
    Strict,
    /// Out of range values are normalized into overflow, disagreeing values
    /// are reconciled.
    Lenient,
}

impl MergeMode {
    /// The date resolver used when none is given explicitly.
    pub const fn default_resolver(self) -> DateResolver {
        match self {
            Self::Strict => DateResolver::Strict,
            Self::Lenient => DateResolver::PartLenient,
        }
    }

    #[inline]
    pub(crate) const fn is_strict(self) -> bool {
        matches!(self, Self::Strict)
    }
}

/// A parsing error for `MergeMode`.
#[derive(Debug, Clone, Copy)]
pub struct ParseMergeModeError;

impl fmt::Display for ParseMergeModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("provided string was not a valid merge mode.")
    }
}

impl FromStr for MergeMode {
    type Err = ParseMergeModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strict" => Ok(Self::Strict),
            "lenient" => Ok(Self::Lenient),
            _ => Err(ParseMergeModeError),
        }
    }
}

impl fmt::Display for MergeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strict => "strict",
            Self::Lenient => "lenient",
        }
        .fmt(f)
    }
}

// ==== Unit ====

/// The units fields are measured in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Unit {
    Nanoseconds,
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
    HalfDays,
    Days,
    Weeks,
    Months,
    QuarterYears,
    Years,
    WeekBasedYears,
    Forever,
}

impl Unit {
    /// Returns whether the unit is shorter than a day.
    #[inline]
    pub const fn is_time_based(self) -> bool {
        (self as u8) < (Self::Days as u8)
    }

    /// Returns a period of `amount` of this unit, if the unit can be
    /// expressed as a period.
    pub fn period_of(self, amount: i64) -> CalendricalResult<Option<Period>> {
        let overflow = || {
            CalendricalError::overflow().with_message("unit amount exceeds the period range")
        };
        let period = match self {
            Self::Nanoseconds => Period::ZERO.with_nanoseconds(amount),
            Self::Milliseconds => {
                Period::ZERO.with_nanoseconds(amount.checked_mul(1_000_000).ok_or_else(overflow)?)
            }
            Self::Seconds => Period::ZERO.with_seconds(amount),
            Self::Minutes => Period::ZERO.with_minutes(amount),
            Self::Hours => Period::ZERO.with_hours(amount),
            Self::HalfDays => Period::ZERO.with_hours(amount.checked_mul(12).ok_or_else(overflow)?),
            Self::Days => Period::ZERO.with_days(amount),
            Self::Weeks => Period::ZERO.with_days(amount.checked_mul(7).ok_or_else(overflow)?),
            Self::Months => Period::ZERO.with_months(amount),
            Self::QuarterYears => {
                Period::ZERO.with_months(amount.checked_mul(3).ok_or_else(overflow)?)
            }
            Self::Years => Period::ZERO.with_years(amount),
            Self::WeekBasedYears | Self::Forever => return Ok(None),
        };
        Ok(Some(period))
    }
}

/// A parsing error for `Unit`.
#[derive(Debug, Clone, Copy)]
pub struct ParseUnitError;

impl fmt::Display for ParseUnitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("provided string was not a valid unit.")
    }
}

impl FromStr for Unit {
    type Err = ParseUnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nanoseconds" => Ok(Self::Nanoseconds),
            "milliseconds" => Ok(Self::Milliseconds),
            "seconds" => Ok(Self::Seconds),
            "minutes" => Ok(Self::Minutes),
            "hours" => Ok(Self::Hours),
            "halfDays" => Ok(Self::HalfDays),
            "days" => Ok(Self::Days),
            "weeks" => Ok(Self::Weeks),
            "months" => Ok(Self::Months),
            "quarterYears" => Ok(Self::QuarterYears),
            "years" => Ok(Self::Years),
            "weekBasedYears" => Ok(Self::WeekBasedYears),
            "forever" => Ok(Self::Forever),
            _ => Err(ParseUnitError),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nanoseconds => "nanoseconds",
            Self::Milliseconds => "milliseconds",
            Self::Seconds => "seconds",
            Self::Minutes => "minutes",
            Self::Hours => "hours",
            Self::HalfDays => "halfDays",
            Self::Days => "days",
            Self::Weeks => "weeks",
            Self::Months => "months",
            Self::QuarterYears => "quarterYears",
            Self::Years => "years",
            Self::WeekBasedYears => "weekBasedYears",
            Self::Forever => "forever",
        }
        .fmt(f)
    }
}
