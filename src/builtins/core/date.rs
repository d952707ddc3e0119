//! This module implements `PlainDate` and any directly related algorithms.

use writeable::{impl_display_with_writeable, LengthHint, Writeable};

use crate::{
    builtins::core::{OffsetDate, Period, PlainDateTime, PlainTime, UtcOffset},
    fields::{Calendrical, Field, Weekday},
    iso::{IsoDate, IsoDateTime},
    options::DateResolver,
    parsers::FormattableDate,
    utils, CalendricalError, CalendricalResult,
};

/// A date in the proleptic ISO-8601 calendar, without a time or offset.
///
/// Years range over `MIN_YEAR..=MAX_YEAR`. Comparison follows the time line.
///
/// ```rust
/// use calendrical_rs::{PlainDate, Weekday};
///
/// let date = PlainDate::from_epoch_days(0).unwrap();
/// assert_eq!(date.to_string(), "1970-01-01");
/// assert_eq!(date.day_of_week(), Weekday::Thursday);
/// assert_eq!(date.to_modified_julian_day(), 40_587);
/// ```
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlainDate {
    pub(crate) iso: IsoDate,
}

// ==== Private API ====

impl PlainDate {
    #[inline]
    #[must_use]
    pub(crate) const fn new_unchecked(iso: IsoDate) -> Self {
        Self { iso }
    }

    fn add_months_with_resolver(
        &self,
        months: i128,
        resolver: DateResolver,
    ) -> CalendricalResult<Self> {
        self.iso.add_months(months, resolver).map(Self::new_unchecked)
    }
}

// ==== Public API ====

impl PlainDate {
    /// Creates a new `PlainDate`, rejecting a day past the end of the month.
    #[inline]
    pub fn try_new(year: i32, month: u8, day: u8) -> CalendricalResult<Self> {
        IsoDate::try_new(year, month, day).map(Self::new_unchecked)
    }

    /// Creates a new `PlainDate`, resolving a day past the end of the month
    /// with `resolver`.
    ///
    /// ```rust
    /// use calendrical_rs::{options::DateResolver, PlainDate};
    ///
    /// let date = PlainDate::new_with_resolver(2023, 4, 31, DateResolver::NextValid).unwrap();
    /// assert_eq!(date, PlainDate::try_new(2023, 5, 1).unwrap());
    /// ```
    #[inline]
    pub fn new_with_resolver(
        year: i32,
        month: u8,
        day: u8,
        resolver: DateResolver,
    ) -> CalendricalResult<Self> {
        IsoDate::new_with_resolver(year, month, day, resolver).map(Self::new_unchecked)
    }

    /// Creates a date from a year and a one based day of the year.
    pub fn from_year_day(year: i32, day_of_year: u16) -> CalendricalResult<Self> {
        let year = IsoDate::check_year(i64::from(year))?;
        let day_of_year = Field::DayOfYear.check_value(i64::from(day_of_year))? as u16;
        DateResolver::Strict
            .resolve_day_of_year(year, day_of_year)
            .map(Self::new_unchecked)
    }

    /// Creates a date from days since 1970-01-01.
    #[inline]
    pub fn from_epoch_days(epoch_days: i64) -> CalendricalResult<Self> {
        IsoDate::from_epoch_days(epoch_days).map(Self::new_unchecked)
    }

    /// Returns the days since 1970-01-01.
    #[inline]
    #[must_use]
    pub const fn to_epoch_days(&self) -> i64 {
        self.iso.to_epoch_days()
    }

    /// Creates a date from a Modified Julian Day number.
    pub fn from_modified_julian_day(mjd: i64) -> CalendricalResult<Self> {
        let epoch_days = mjd.checked_sub(utils::MJD_EPOCH_OFFSET).ok_or_else(|| {
            CalendricalError::range()
                .with_message("modified julian day is outside the supported range")
                .with_value(mjd)
        })?;
        Self::from_epoch_days(epoch_days)
    }

    /// Returns the Modified Julian Day number, where 1858-11-17 is day 0.
    #[inline]
    #[must_use]
    pub const fn to_modified_julian_day(&self) -> i64 {
        self.to_epoch_days() + utils::MJD_EPOCH_OFFSET
    }

    /// Creates a date from days since 0000-01-01.
    pub fn from_year_zero_days(year_zero_days: i64) -> CalendricalResult<Self> {
        let epoch_days = year_zero_days
            .checked_sub(utils::DAYS_0000_TO_1970)
            .ok_or_else(|| {
                CalendricalError::range()
                    .with_message("year zero day is outside the supported range")
                    .with_value(year_zero_days)
            })?;
        Self::from_epoch_days(epoch_days)
    }

    /// Returns the days since 0000-01-01.
    #[inline]
    #[must_use]
    pub const fn to_year_zero_days(&self) -> i64 {
        self.to_epoch_days() + utils::DAYS_0000_TO_1970
    }

    #[inline]
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.iso.year
    }

    #[inline]
    #[must_use]
    pub const fn month(&self) -> u8 {
        self.iso.month
    }

    #[inline]
    #[must_use]
    pub const fn day(&self) -> u8 {
        self.iso.day
    }

    /// Returns the day of the week.
    #[must_use]
    pub fn day_of_week(&self) -> Weekday {
        Weekday::Monday.plus(i64::from(self.iso.day_of_week()) - 1)
    }

    /// Returns the one based day of the year.
    #[inline]
    #[must_use]
    pub const fn day_of_year(&self) -> u16 {
        self.iso.day_of_year()
    }

    #[inline]
    #[must_use]
    pub const fn days_in_month(&self) -> u8 {
        utils::days_in_month(self.year(), self.month())
    }

    #[inline]
    #[must_use]
    pub const fn days_in_year(&self) -> u16 {
        utils::days_in_year(self.year())
    }

    #[inline]
    #[must_use]
    pub const fn is_leap_year(&self) -> bool {
        utils::is_leap_year(self.year())
    }

    /// Returns the ISO week-based-year, which may differ from the calendar
    /// year in the first and last days of the year.
    #[must_use]
    pub fn week_based_year(&self) -> i32 {
        utils::week_date_from_epoch_days(self.to_epoch_days()).0
    }

    /// Returns the ISO week of the week-based-year, `1..=53`.
    #[must_use]
    pub fn week_of_week_based_year(&self) -> u8 {
        utils::week_date_from_epoch_days(self.to_epoch_days()).1
    }

    /// Returns this date with the year replaced, clamping February 29th.
    pub fn with_year(&self, year: i32) -> CalendricalResult<Self> {
        Self::new_with_resolver(year, self.month(), self.day(), DateResolver::PreviousValid)
    }

    /// Returns this date with the month replaced, clamping the day to the
    /// end of the month.
    pub fn with_month(&self, month: u8) -> CalendricalResult<Self> {
        Self::new_with_resolver(self.year(), month, self.day(), DateResolver::PreviousValid)
    }

    /// Returns this date with the day of the month replaced.
    pub fn with_day(&self, day: u8) -> CalendricalResult<Self> {
        Self::try_new(self.year(), self.month(), day)
    }

    /// Returns the date at `day_of_year` in this date's year.
    pub fn with_day_of_year(&self, day_of_year: u16) -> CalendricalResult<Self> {
        Self::from_year_day(self.year(), day_of_year)
    }

    /// Adds years, clamping February 29th to the 28th in standard years.
    #[inline]
    pub fn plus_years(&self, years: i64) -> CalendricalResult<Self> {
        self.plus_years_with_resolver(years, DateResolver::PreviousValid)
    }

    /// Adds years, resolving February 29th with `resolver`.
    pub fn plus_years_with_resolver(
        &self,
        years: i64,
        resolver: DateResolver,
    ) -> CalendricalResult<Self> {
        self.iso.add_years(years, resolver).map(Self::new_unchecked)
    }

    /// Adds months, clamping the day to the end of the resulting month.
    #[inline]
    pub fn plus_months(&self, months: i64) -> CalendricalResult<Self> {
        self.plus_months_with_resolver(months, DateResolver::PreviousValid)
    }

    /// Adds months, resolving a day past the end of the resulting month
    /// with `resolver`.
    ///
    /// ```rust
    /// use calendrical_rs::{options::DateResolver, PlainDate};
    ///
    /// let date = PlainDate::try_new(2023, 1, 31).unwrap();
    /// let next = date.plus_months_with_resolver(1, DateResolver::PartLenient).unwrap();
    /// assert_eq!(next.to_string(), "2023-03-03");
    /// assert!(date.plus_months_with_resolver(1, DateResolver::Strict).is_err());
    /// ```
    pub fn plus_months_with_resolver(
        &self,
        months: i64,
        resolver: DateResolver,
    ) -> CalendricalResult<Self> {
        self.add_months_with_resolver(i128::from(months), resolver)
    }

    /// Adds weeks.
    pub fn plus_weeks(&self, weeks: i64) -> CalendricalResult<Self> {
        let days = weeks.checked_mul(7).ok_or_else(|| {
            CalendricalError::overflow().with_message("week count exceeds the supported range")
        })?;
        self.plus_days(days)
    }

    /// Adds days.
    #[inline]
    pub fn plus_days(&self, days: i64) -> CalendricalResult<Self> {
        self.iso.add_days(days).map(Self::new_unchecked)
    }

    /// Subtracts years, clamping February 29th to the 28th in standard years.
    #[inline]
    pub fn minus_years(&self, years: i64) -> CalendricalResult<Self> {
        self.minus_years_with_resolver(years, DateResolver::PreviousValid)
    }

    /// Subtracts years, resolving February 29th with `resolver`.
    pub fn minus_years_with_resolver(
        &self,
        years: i64,
        resolver: DateResolver,
    ) -> CalendricalResult<Self> {
        self.add_months_with_resolver(-i128::from(years) * 12, resolver)
    }

    /// Subtracts months, clamping the day to the end of the resulting month.
    #[inline]
    pub fn minus_months(&self, months: i64) -> CalendricalResult<Self> {
        self.minus_months_with_resolver(months, DateResolver::PreviousValid)
    }

    /// Subtracts months, resolving a day past the end of the resulting
    /// month with `resolver`.
    pub fn minus_months_with_resolver(
        &self,
        months: i64,
        resolver: DateResolver,
    ) -> CalendricalResult<Self> {
        self.add_months_with_resolver(-i128::from(months), resolver)
    }

    /// Subtracts weeks.
    pub fn minus_weeks(&self, weeks: i64) -> CalendricalResult<Self> {
        let weeks = weeks.checked_neg().ok_or_else(negation_overflow)?;
        self.plus_weeks(weeks)
    }

    /// Subtracts days.
    pub fn minus_days(&self, days: i64) -> CalendricalResult<Self> {
        let days = days.checked_neg().ok_or_else(negation_overflow)?;
        self.plus_days(days)
    }

    /// Adds the years, months and days of `period`, in that order.
    ///
    /// A period with hours, minutes, seconds or nanoseconds cannot be added
    /// to a date and fails with an invalid combination error.
    pub fn add(&self, period: &Period, resolver: DateResolver) -> CalendricalResult<Self> {
        if !period.time_part().is_zero() {
            return Err(CalendricalError::invalid_combination()
                .with_message("a date cannot be combined with time units"));
        }
        self.iso
            .add_date_period(period, resolver)
            .map(Self::new_unchecked)
    }

    /// Subtracts the years, months and days of `period`.
    pub fn subtract(&self, period: &Period, resolver: DateResolver) -> CalendricalResult<Self> {
        self.add(&period.negated()?, resolver)
    }

    /// Combines this date with a time.
    #[inline]
    #[must_use]
    pub fn at_time(&self, time: &PlainTime) -> PlainDateTime {
        PlainDateTime::new_unchecked(IsoDateTime::new(self.iso, time.iso))
    }

    /// Returns the date-time at midnight at the start of this date.
    #[inline]
    #[must_use]
    pub fn at_start_of_day(&self) -> PlainDateTime {
        self.at_time(&PlainTime::MIDNIGHT)
    }

    /// Combines this date with an offset.
    #[inline]
    #[must_use]
    pub fn at_offset(&self, offset: UtcOffset) -> OffsetDate {
        OffsetDate::new(*self, offset)
    }
}

fn negation_overflow() -> CalendricalError {
    CalendricalError::overflow().with_message("amount cannot be negated")
}

// ==== Trait impls ====

impl Writeable for PlainDate {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        FormattableDate(self.year(), self.month(), self.day()).write_to(sink)
    }

    fn writeable_length_hint(&self) -> LengthHint {
        FormattableDate(self.year(), self.month(), self.day()).writeable_length_hint()
    }
}

impl_display_with_writeable!(PlainDate);

impl Calendrical for PlainDate {
    fn iso_date(&self) -> Option<IsoDate> {
        Some(self.iso)
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for PlainDate {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        use crate::iso::{MAX_EPOCH_DAYS, MIN_EPOCH_DAYS};
        let span = (MAX_EPOCH_DAYS - MIN_EPOCH_DAYS + 1) as u64;
        let epoch_days =
            MIN_EPOCH_DAYS + (<u64 as quickcheck::Arbitrary>::arbitrary(g) % span) as i64;
        Self::new_unchecked(IsoDate::from_epoch_days(epoch_days).unwrap())
    }

    fn shrink(&self) -> alloc::boxed::Box<dyn Iterator<Item = Self>> {
        alloc::boxed::Box::new(
            quickcheck::Arbitrary::shrink(&self.to_epoch_days())
                .filter_map(|days| Self::from_epoch_days(days).ok()),
        )
    }
}
