//! This module implements the ISO field records.
//!
//! The three records are:
//!   - `IsoDate`
//!   - `IsoTime`
//!   - `IsoDateTime`
//!
//! The records hold already validated fields and implement the arithmetic
//! shared by the public value types. Every constructor that can fail checks
//! the field ranges and the supported year range, `MIN_YEAR..=MAX_YEAR`.

use crate::{
    builtins::core::Period,
    fields::Field,
    options::DateResolver,
    utils, CalendricalError, CalendricalResult, MAX_YEAR, MIN_YEAR, NS_PER_DAY,
};

pub use crate::utils::{days_in_month, days_in_year, is_leap_year};

/// The epoch days of `MIN_YEAR-01-01`.
pub const MIN_EPOCH_DAYS: i64 = utils::epoch_days_from_ymd(MIN_YEAR, 1, 1);
/// The epoch days of `MAX_YEAR-12-31`.
pub const MAX_EPOCH_DAYS: i64 = utils::epoch_days_from_ymd(MAX_YEAR, 12, 31);

const NS_PER_SECOND: i64 = 1_000_000_000;
const SECONDS_PER_DAY: i64 = 86_400;

fn out_of_range_result() -> CalendricalError {
    CalendricalError::overflow().with_message("result is outside the supported year range")
}

// ==== IsoDate ====

/// `IsoDate` is the record of a proleptic ISO year, month and day.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsoDate {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

impl IsoDate {
    /// Creates a new `IsoDate` without validation.
    #[inline]
    pub(crate) const fn new_unchecked(year: i32, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    /// Creates a new `IsoDate`, rejecting a day past the end of the month.
    #[inline]
    pub fn try_new(year: i32, month: u8, day: u8) -> CalendricalResult<Self> {
        Self::new_with_resolver(year, month, day, DateResolver::Strict)
    }

    /// Creates a new `IsoDate`, handling a day past the end of the month
    /// with `resolver`.
    pub fn new_with_resolver(
        year: i32,
        month: u8,
        day: u8,
        resolver: DateResolver,
    ) -> CalendricalResult<Self> {
        let year = Self::check_year(i64::from(year))?;
        let month = Field::MonthOfYear.check_u8(i64::from(month))?;
        let day = Field::DayOfMonth.check_u8(i64::from(day))?;
        let (day, carry) = resolver.adjust(year, month, day)?;
        if carry == 0 {
            return Ok(Self::new_unchecked(year, month, day));
        }
        let (year, month) = next_month(year, month);
        let year = Self::check_year(i64::from(year))?;
        Ok(Self::new_unchecked(year, month, day))
    }

    /// Checks that `year` is in the supported year range.
    #[inline]
    pub(crate) fn check_year(year: i64) -> CalendricalResult<i32> {
        Field::Year.check_value(year).map(|y| y as i32)
    }

    /// Creates an `IsoDate` from days since 1970-01-01.
    pub fn from_epoch_days(epoch_days: i64) -> CalendricalResult<Self> {
        if !(MIN_EPOCH_DAYS..=MAX_EPOCH_DAYS).contains(&epoch_days) {
            return Err(CalendricalError::range()
                .with_message("epoch day is outside the supported year range")
                .with_value(epoch_days));
        }
        let (year, month, day) = utils::ymd_from_epoch_days(epoch_days);
        Ok(Self::new_unchecked(year, month, day))
    }

    /// Returns the days since 1970-01-01.
    #[inline]
    pub const fn to_epoch_days(self) -> i64 {
        utils::epoch_days_from_ymd(self.year, self.month, self.day)
    }

    /// Returns the ISO day of week, Monday = 1 through Sunday = 7.
    #[inline]
    pub const fn day_of_week(self) -> u8 {
        utils::day_of_week(self.to_epoch_days())
    }

    /// Returns the one based day of the year.
    #[inline]
    pub const fn day_of_year(self) -> u16 {
        utils::day_of_year(self.year, self.month, self.day)
    }

    /// Adds a signed number of days.
    pub(crate) fn add_days(self, days: i64) -> CalendricalResult<Self> {
        if days == 0 {
            return Ok(self);
        }
        let epoch_days = self
            .to_epoch_days()
            .checked_add(days)
            .ok_or_else(out_of_range_result)?;
        Self::from_epoch_days(epoch_days).map_err(|_| out_of_range_result())
    }

    /// Adds a signed number of months.
    ///
    /// The month is counted as `year * 12 + (month - 1)` and split back with
    /// floor division, then the day is resolved for the new month.
    pub(crate) fn add_months(
        self,
        months: i128,
        resolver: DateResolver,
    ) -> CalendricalResult<Self> {
        if months == 0 {
            return Ok(self);
        }
        let month_count = i128::from(self.year) * 12 + i128::from(self.month) - 1 + months;
        let year = month_count.div_euclid(12);
        let month = (month_count.rem_euclid(12) + 1) as u8;
        if !(i128::from(MIN_YEAR)..=i128::from(MAX_YEAR)).contains(&year) {
            return Err(out_of_range_result());
        }
        Self::new_with_resolver(year as i32, month, self.day, resolver).map_err(|e| {
            if e.field() == Some(Field::Year) {
                out_of_range_result()
            } else {
                e
            }
        })
    }

    /// Adds a signed number of years, resolving February 29th with `resolver`.
    #[inline]
    pub(crate) fn add_years(self, years: i64, resolver: DateResolver) -> CalendricalResult<Self> {
        self.add_months(i128::from(years) * 12, resolver)
    }

    /// Adds the date portion of a period: years and months first, then days.
    pub(crate) fn add_date_period(
        self,
        period: &Period,
        resolver: DateResolver,
    ) -> CalendricalResult<Self> {
        self.add_months(period.total_months(), resolver)?
            .add_days(period.days())
    }
}

#[inline]
const fn next_month(year: i32, month: u8) -> (i32, u8) {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

// ==== IsoTime ====

/// `IsoTime` is the record of an hour, minute, second and nanosecond.
#[non_exhaustive]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsoTime {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub nanosecond: u32,
}

impl IsoTime {
    /// 00:00
    pub const MIDNIGHT: Self = Self::new_unchecked(0, 0, 0, 0);

    /// Creates a new `IsoTime` without validation.
    #[inline]
    pub(crate) const fn new_unchecked(hour: u8, minute: u8, second: u8, nanosecond: u32) -> Self {
        Self {
            hour,
            minute,
            second,
            nanosecond,
        }
    }

    /// Creates a new `IsoTime`, rejecting any field that is out of range.
    pub fn try_new(hour: u8, minute: u8, second: u8, nanosecond: u32) -> CalendricalResult<Self> {
        Field::HourOfDay.check_value(i64::from(hour))?;
        Field::MinuteOfHour.check_value(i64::from(minute))?;
        Field::SecondOfMinute.check_value(i64::from(second))?;
        Field::NanoOfSecond.check_value(i64::from(nanosecond))?;
        Ok(Self::new_unchecked(hour, minute, second, nanosecond))
    }

    /// Creates an `IsoTime` from nanoseconds since midnight.
    pub fn from_nano_of_day(nano_of_day: i64) -> CalendricalResult<Self> {
        Field::NanoOfDay.check_value(nano_of_day)?;
        Ok(Self::from_nano_of_day_unchecked(nano_of_day))
    }

    /// `nano_of_day` must be in `0..NS_PER_DAY`.
    pub(crate) const fn from_nano_of_day_unchecked(nano_of_day: i64) -> Self {
        let second_of_day = nano_of_day / NS_PER_SECOND;
        Self::new_unchecked(
            (second_of_day / 3600) as u8,
            ((second_of_day / 60) % 60) as u8,
            (second_of_day % 60) as u8,
            (nano_of_day % NS_PER_SECOND) as u32,
        )
    }

    /// Returns the seconds since midnight.
    #[inline]
    pub const fn to_second_of_day(self) -> i64 {
        self.hour as i64 * 3600 + self.minute as i64 * 60 + self.second as i64
    }

    /// Returns the nanoseconds since midnight.
    #[inline]
    pub const fn to_nano_of_day(self) -> i64 {
        self.to_second_of_day() * NS_PER_SECOND + self.nanosecond as i64
    }

    /// Adds nanoseconds to this time, returning the signed whole-day carry
    /// and the wrapped time.
    pub(crate) fn add_nanos(self, nanos: i128) -> CalendricalResult<(i64, Self)> {
        let total = i128::from(self.to_nano_of_day()) + nanos;
        let days = total.div_euclid(i128::from(NS_PER_DAY));
        let nano_of_day = total.rem_euclid(i128::from(NS_PER_DAY)) as i64;
        let days = i64::try_from(days).map_err(|_| {
            CalendricalError::overflow().with_message("day carry exceeds the supported range")
        })?;
        Ok((days, Self::from_nano_of_day_unchecked(nano_of_day)))
    }
}

// ==== IsoDateTime ====

/// `IsoDateTime` is the record of an `IsoDate` and an `IsoTime`.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsoDateTime {
    pub date: IsoDate,
    pub time: IsoTime,
}

impl IsoDateTime {
    #[inline]
    pub const fn new(date: IsoDate, time: IsoTime) -> Self {
        Self { date, time }
    }

    /// Returns the local seconds since 1970-01-01T00:00, ignoring any offset.
    #[inline]
    pub const fn to_local_seconds(&self) -> i64 {
        self.date.to_epoch_days() * SECONDS_PER_DAY + self.time.to_second_of_day()
    }

    /// Returns the seconds since the Unix epoch of this local date-time at
    /// `offset_seconds` from UTC.
    #[inline]
    pub const fn to_epoch_seconds(&self, offset_seconds: i32) -> i64 {
        self.to_local_seconds() - offset_seconds as i64
    }

    /// Creates the local date-time of an instant at `offset_seconds` from UTC.
    pub fn from_epoch_seconds(
        epoch_seconds: i64,
        nanosecond: u32,
        offset_seconds: i32,
    ) -> CalendricalResult<Self> {
        Field::NanoOfSecond.check_value(i64::from(nanosecond))?;
        let local = epoch_seconds
            .checked_add(i64::from(offset_seconds))
            .ok_or_else(out_of_range_result)?;
        let date = IsoDate::from_epoch_days(local.div_euclid(SECONDS_PER_DAY))?;
        let nano_of_day = local.rem_euclid(SECONDS_PER_DAY) * NS_PER_SECOND + i64::from(nanosecond);
        Ok(Self::new(date, IsoTime::from_nano_of_day_unchecked(nano_of_day)))
    }

    /// Adds nanoseconds, folding the day carry into the date.
    pub(crate) fn add_nanos(&self, nanos: i128) -> CalendricalResult<Self> {
        let (days, time) = self.time.add_nanos(nanos)?;
        Ok(Self::new(self.date.add_days(days)?, time))
    }

    /// Adds a period: the date portion first, then the time portion.
    pub(crate) fn add_period(
        &self,
        period: &Period,
        resolver: DateResolver,
    ) -> CalendricalResult<Self> {
        let date = self.date.add_date_period(period, resolver)?;
        Self::new(date, self.time).add_nanos(period.time_nanos())
    }
}
