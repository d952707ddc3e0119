//! This module implements `PlainTime` and the `Overflow` of time arithmetic.

use num_traits::AsPrimitive;
use writeable::{impl_display_with_writeable, LengthHint, Writeable};

use crate::{
    builtins::core::{OffsetTime, PlainDate, PlainDateTime, UtcOffset},
    fields::{Calendrical, Field},
    iso::{IsoDateTime, IsoTime},
    parsers::FormattableTime,
    CalendricalResult, NS_PER_DAY,
};

const NS_PER_SECOND: i128 = 1_000_000_000;
const NS_PER_MINUTE: i128 = 60 * NS_PER_SECOND;
const NS_PER_HOUR: i128 = 60 * NS_PER_MINUTE;

/// A time of day without a date or offset, with nanosecond precision.
///
/// `PlainTime` is a value: it is `Copy`, and comparison follows the time
/// line within a single day.
#[non_exhaustive]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlainTime {
    pub(crate) iso: IsoTime,
}

/// The whole hours of the day, shared by every caller of `PlainTime::from_hour`.
static HOURS: [PlainTime; 24] = {
    let mut hours = [PlainTime::MIDNIGHT; 24];
    let mut hour = 0;
    while hour < 24 {
        hours[hour] = PlainTime::new_unchecked(IsoTime::new_unchecked(hour as u8, 0, 0, 0));
        hour += 1;
    }
    hours
};

// ==== Private API ====

impl PlainTime {
    #[inline]
    #[must_use]
    pub(crate) const fn new_unchecked(iso: IsoTime) -> Self {
        Self { iso }
    }

    /// Adds a signed count of nanoseconds, returning the wrapped time and
    /// the whole days crossed.
    fn add_nanos(&self, nanos: i128) -> Overflow {
        let total = i128::from(self.iso.to_nano_of_day()) + nanos;
        let days: i64 = total.div_euclid(i128::from(NS_PER_DAY)).as_();
        let nano_of_day: i64 = total.rem_euclid(i128::from(NS_PER_DAY)).as_();
        Overflow {
            time: Self::new_unchecked(IsoTime::from_nano_of_day_unchecked(nano_of_day)),
            days,
        }
    }
}

// ==== Public API ====

impl PlainTime {
    /// 00:00
    pub const MIDNIGHT: Self = Self::new_unchecked(IsoTime::MIDNIGHT);
    /// 12:00
    pub const NOON: Self = Self::new_unchecked(IsoTime::new_unchecked(12, 0, 0, 0));
    /// 23:59:59.999999999
    pub const MAX: Self = Self::new_unchecked(IsoTime::new_unchecked(23, 59, 59, 999_999_999));

    /// Creates a new `PlainTime`, rejecting any field that is out of range.
    ///
    /// ```rust
    /// use calendrical_rs::PlainTime;
    ///
    /// let time = PlainTime::try_new(13, 45, 30, 0).unwrap();
    /// assert_eq!(time.to_string(), "13:45:30");
    /// assert!(PlainTime::try_new(24, 0, 0, 0).is_err());
    /// ```
    #[inline]
    pub fn try_new(hour: u8, minute: u8, second: u8, nanosecond: u32) -> CalendricalResult<Self> {
        IsoTime::try_new(hour, minute, second, nanosecond).map(Self::new_unchecked)
    }

    /// Returns the whole hour `hour`:00.
    pub fn from_hour(hour: u8) -> CalendricalResult<Self> {
        let hour = Field::HourOfDay.check_u8(i64::from(hour))?;
        Ok(HOURS[usize::from(hour)])
    }

    /// Creates a `PlainTime` from nanoseconds since midnight.
    #[inline]
    pub fn from_nano_of_day(nano_of_day: i64) -> CalendricalResult<Self> {
        IsoTime::from_nano_of_day(nano_of_day).map(Self::new_unchecked)
    }

    /// Creates a `PlainTime` from seconds since midnight.
    pub fn from_second_of_day(second_of_day: i64) -> CalendricalResult<Self> {
        let second_of_day = Field::SecondOfDay.check_value(second_of_day)?;
        Ok(Self::new_unchecked(IsoTime::from_nano_of_day_unchecked(
            second_of_day * 1_000_000_000,
        )))
    }

    #[inline]
    #[must_use]
    pub const fn hour(&self) -> u8 {
        self.iso.hour
    }

    #[inline]
    #[must_use]
    pub const fn minute(&self) -> u8 {
        self.iso.minute
    }

    #[inline]
    #[must_use]
    pub const fn second(&self) -> u8 {
        self.iso.second
    }

    #[inline]
    #[must_use]
    pub const fn nanosecond(&self) -> u32 {
        self.iso.nanosecond
    }

    /// Returns the nanoseconds since midnight.
    #[inline]
    #[must_use]
    pub const fn to_nano_of_day(&self) -> i64 {
        self.iso.to_nano_of_day()
    }

    /// Returns the whole seconds since midnight.
    #[inline]
    #[must_use]
    pub const fn to_second_of_day(&self) -> i64 {
        self.iso.to_second_of_day()
    }

    /// Returns this time with the hour replaced.
    pub fn with_hour(&self, hour: u8) -> CalendricalResult<Self> {
        Self::try_new(hour, self.minute(), self.second(), self.nanosecond())
    }

    /// Returns this time with the minute replaced.
    pub fn with_minute(&self, minute: u8) -> CalendricalResult<Self> {
        Self::try_new(self.hour(), minute, self.second(), self.nanosecond())
    }

    /// Returns this time with the second replaced.
    pub fn with_second(&self, second: u8) -> CalendricalResult<Self> {
        Self::try_new(self.hour(), self.minute(), second, self.nanosecond())
    }

    /// Returns this time with the nanosecond replaced.
    pub fn with_nanosecond(&self, nanosecond: u32) -> CalendricalResult<Self> {
        Self::try_new(self.hour(), self.minute(), self.second(), nanosecond)
    }

    /// Adds an amount of time, returning the wrapped time together with
    /// the signed number of days crossed.
    ///
    /// ```rust
    /// use calendrical_rs::PlainTime;
    ///
    /// let time = PlainTime::try_new(22, 0, 0, 0).unwrap();
    /// let overflow = time.plus_with_overflow(3, 0, 0, 0);
    /// assert_eq!(overflow.time(), PlainTime::try_new(1, 0, 0, 0).unwrap());
    /// assert_eq!(overflow.days(), 1);
    ///
    /// let overflow = time.minus_with_overflow(46, 0, 0, 0);
    /// assert_eq!(overflow.time(), time);
    /// assert_eq!(overflow.days(), -2);
    /// ```
    #[must_use]
    pub fn plus_with_overflow(
        &self,
        hours: i64,
        minutes: i64,
        seconds: i64,
        nanoseconds: i64,
    ) -> Overflow {
        self.add_nanos(nanos_of(hours, minutes, seconds, nanoseconds))
    }

    /// Subtracts an amount of time, returning the wrapped time together
    /// with the signed number of days crossed.
    #[must_use]
    pub fn minus_with_overflow(
        &self,
        hours: i64,
        minutes: i64,
        seconds: i64,
        nanoseconds: i64,
    ) -> Overflow {
        self.add_nanos(-nanos_of(hours, minutes, seconds, nanoseconds))
    }

    /// Adds hours, wrapping around midnight.
    #[inline]
    #[must_use]
    pub fn plus_hours(&self, hours: i64) -> Self {
        self.plus_with_overflow(hours, 0, 0, 0).time
    }

    /// Adds minutes, wrapping around midnight.
    #[inline]
    #[must_use]
    pub fn plus_minutes(&self, minutes: i64) -> Self {
        self.plus_with_overflow(0, minutes, 0, 0).time
    }

    /// Adds seconds, wrapping around midnight.
    #[inline]
    #[must_use]
    pub fn plus_seconds(&self, seconds: i64) -> Self {
        self.plus_with_overflow(0, 0, seconds, 0).time
    }

    /// Adds nanoseconds, wrapping around midnight.
    #[inline]
    #[must_use]
    pub fn plus_nanoseconds(&self, nanoseconds: i64) -> Self {
        self.plus_with_overflow(0, 0, 0, nanoseconds).time
    }

    /// Subtracts hours, wrapping around midnight.
    #[inline]
    #[must_use]
    pub fn minus_hours(&self, hours: i64) -> Self {
        self.minus_with_overflow(hours, 0, 0, 0).time
    }

    /// Subtracts minutes, wrapping around midnight.
    #[inline]
    #[must_use]
    pub fn minus_minutes(&self, minutes: i64) -> Self {
        self.minus_with_overflow(0, minutes, 0, 0).time
    }

    /// Subtracts seconds, wrapping around midnight.
    #[inline]
    #[must_use]
    pub fn minus_seconds(&self, seconds: i64) -> Self {
        self.minus_with_overflow(0, 0, seconds, 0).time
    }

    /// Subtracts nanoseconds, wrapping around midnight.
    #[inline]
    #[must_use]
    pub fn minus_nanoseconds(&self, nanoseconds: i64) -> Self {
        self.minus_with_overflow(0, 0, 0, nanoseconds).time
    }

    /// Combines this time with a date.
    #[inline]
    #[must_use]
    pub fn at_date(&self, date: &PlainDate) -> PlainDateTime {
        PlainDateTime::new_unchecked(IsoDateTime::new(date.iso, self.iso))
    }

    /// Combines this time with an offset.
    #[inline]
    #[must_use]
    pub fn at_offset(&self, offset: UtcOffset) -> OffsetTime {
        OffsetTime::new(*self, offset)
    }
}

fn nanos_of(hours: i64, minutes: i64, seconds: i64, nanoseconds: i64) -> i128 {
    i128::from(hours) * NS_PER_HOUR
        + i128::from(minutes) * NS_PER_MINUTE
        + i128::from(seconds) * NS_PER_SECOND
        + i128::from(nanoseconds)
}

// ==== Trait impls ====

impl Writeable for PlainTime {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        FormattableTime {
            hour: self.hour(),
            minute: self.minute(),
            second: self.second(),
            nanosecond: self.nanosecond(),
        }
        .write_to(sink)
    }

    fn writeable_length_hint(&self) -> LengthHint {
        if self.nanosecond() == 0 {
            return LengthHint::exact(8);
        }
        LengthHint::between(10, 18)
    }
}

impl_display_with_writeable!(PlainTime);

impl Calendrical for PlainTime {
    fn iso_time(&self) -> Option<IsoTime> {
        Some(self.iso)
    }
}

// ==== Overflow ====

/// The result of time arithmetic: a time of day and the signed number of
/// whole days the arithmetic crossed.
///
/// The day carry is applied to a date with [`Overflow::to_date_time`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Overflow {
    time: PlainTime,
    days: i64,
}

impl Overflow {
    #[inline]
    #[must_use]
    pub const fn time(&self) -> PlainTime {
        self.time
    }

    #[inline]
    #[must_use]
    pub const fn days(&self) -> i64 {
        self.days
    }

    /// Applies the day carry to `date` and combines the result with the time.
    pub fn to_date_time(&self, date: &PlainDate) -> CalendricalResult<PlainDateTime> {
        let date = date.iso.add_days(self.days)?;
        Ok(PlainDateTime::new_unchecked(IsoDateTime::new(date, self.time.iso)))
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for PlainTime {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let nano_of_day = <i64 as quickcheck::Arbitrary>::arbitrary(g).rem_euclid(NS_PER_DAY);
        Self::new_unchecked(IsoTime::from_nano_of_day_unchecked(nano_of_day))
    }
}
