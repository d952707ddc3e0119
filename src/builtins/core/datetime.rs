//! This module implements `PlainDateTime` and any directly related algorithms.

use writeable::{impl_display_with_writeable, LengthHint, Writeable};

use crate::{
    builtins::core::{
        OffsetDateTime, Period, PlainDate, PlainTime, TimeZone, UtcOffset, ZonedDateTime,
    },
    fields::Calendrical,
    iso::{IsoDate, IsoDateTime, IsoTime},
    options::{DateResolver, MergeMode},
    provider::ZoneRulesProvider,
    CalendricalResult,
};

/// A date and time of day without an offset or zone.
///
/// ```rust
/// use calendrical_rs::PlainDateTime;
///
/// let dt = PlainDateTime::try_new(2024, 2, 28, 23, 30, 0, 0).unwrap();
/// let later = dt.plus_hours(1).unwrap();
/// assert_eq!(later.to_string(), "2024-02-29T00:30:00");
/// ```
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlainDateTime {
    pub(crate) iso: IsoDateTime,
}

// ==== Private API ====

impl PlainDateTime {
    #[inline]
    #[must_use]
    pub(crate) const fn new_unchecked(iso: IsoDateTime) -> Self {
        Self { iso }
    }

    /// Adds time units through `PlainTime`'s overflow arithmetic and folds
    /// the day carry into the date.
    fn plus_time(
        &self,
        hours: i64,
        minutes: i64,
        seconds: i64,
        nanoseconds: i64,
    ) -> CalendricalResult<Self> {
        self.time()
            .plus_with_overflow(hours, minutes, seconds, nanoseconds)
            .to_date_time(&self.date())
    }

    fn minus_time(
        &self,
        hours: i64,
        minutes: i64,
        seconds: i64,
        nanoseconds: i64,
    ) -> CalendricalResult<Self> {
        self.time()
            .minus_with_overflow(hours, minutes, seconds, nanoseconds)
            .to_date_time(&self.date())
    }

    fn with_iso_date(&self, date: IsoDate) -> Self {
        Self::new_unchecked(IsoDateTime::new(date, self.iso.time))
    }
}

// ==== Public API ====

impl PlainDateTime {
    /// Creates a new `PlainDateTime` from a date and a time.
    #[inline]
    #[must_use]
    pub fn new(date: PlainDate, time: PlainTime) -> Self {
        Self::new_unchecked(IsoDateTime::new(date.iso, time.iso))
    }

    /// Creates a new validated `PlainDateTime` from its fields.
    #[allow(clippy::too_many_arguments)]
    pub fn try_new(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
        nanosecond: u32,
    ) -> CalendricalResult<Self> {
        let date = IsoDate::try_new(year, month, day)?;
        let time = IsoTime::try_new(hour, minute, second, nanosecond)?;
        Ok(Self::new_unchecked(IsoDateTime::new(date, time)))
    }

    #[inline]
    #[must_use]
    pub const fn date(&self) -> PlainDate {
        PlainDate::new_unchecked(self.iso.date)
    }

    #[inline]
    #[must_use]
    pub const fn time(&self) -> PlainTime {
        PlainTime::new_unchecked(self.iso.time)
    }

    #[inline]
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.iso.date.year
    }

    #[inline]
    #[must_use]
    pub const fn month(&self) -> u8 {
        self.iso.date.month
    }

    #[inline]
    #[must_use]
    pub const fn day(&self) -> u8 {
        self.iso.date.day
    }

    #[inline]
    #[must_use]
    pub const fn hour(&self) -> u8 {
        self.iso.time.hour
    }

    #[inline]
    #[must_use]
    pub const fn minute(&self) -> u8 {
        self.iso.time.minute
    }

    #[inline]
    #[must_use]
    pub const fn second(&self) -> u8 {
        self.iso.time.second
    }

    #[inline]
    #[must_use]
    pub const fn nanosecond(&self) -> u32 {
        self.iso.time.nanosecond
    }

    /// Returns this date-time with the date replaced.
    #[inline]
    #[must_use]
    pub fn with_date(&self, date: PlainDate) -> Self {
        self.with_iso_date(date.iso)
    }

    /// Returns this date-time with the time replaced.
    #[inline]
    #[must_use]
    pub fn with_time(&self, time: PlainTime) -> Self {
        Self::new_unchecked(IsoDateTime::new(self.iso.date, time.iso))
    }

    pub fn plus_years(&self, years: i64) -> CalendricalResult<Self> {
        self.date().plus_years(years).map(|d| self.with_date(d))
    }

    pub fn plus_months(&self, months: i64) -> CalendricalResult<Self> {
        self.date().plus_months(months).map(|d| self.with_date(d))
    }

    pub fn plus_weeks(&self, weeks: i64) -> CalendricalResult<Self> {
        self.date().plus_weeks(weeks).map(|d| self.with_date(d))
    }

    pub fn plus_days(&self, days: i64) -> CalendricalResult<Self> {
        self.date().plus_days(days).map(|d| self.with_date(d))
    }

    pub fn plus_hours(&self, hours: i64) -> CalendricalResult<Self> {
        self.plus_time(hours, 0, 0, 0)
    }

    pub fn plus_minutes(&self, minutes: i64) -> CalendricalResult<Self> {
        self.plus_time(0, minutes, 0, 0)
    }

    pub fn plus_seconds(&self, seconds: i64) -> CalendricalResult<Self> {
        self.plus_time(0, 0, seconds, 0)
    }

    pub fn plus_nanoseconds(&self, nanoseconds: i64) -> CalendricalResult<Self> {
        self.plus_time(0, 0, 0, nanoseconds)
    }

    pub fn minus_years(&self, years: i64) -> CalendricalResult<Self> {
        self.date().minus_years(years).map(|d| self.with_date(d))
    }

    pub fn minus_months(&self, months: i64) -> CalendricalResult<Self> {
        self.date().minus_months(months).map(|d| self.with_date(d))
    }

    pub fn minus_weeks(&self, weeks: i64) -> CalendricalResult<Self> {
        self.date().minus_weeks(weeks).map(|d| self.with_date(d))
    }

    pub fn minus_days(&self, days: i64) -> CalendricalResult<Self> {
        self.date().minus_days(days).map(|d| self.with_date(d))
    }

    pub fn minus_hours(&self, hours: i64) -> CalendricalResult<Self> {
        self.minus_time(hours, 0, 0, 0)
    }

    pub fn minus_minutes(&self, minutes: i64) -> CalendricalResult<Self> {
        self.minus_time(0, minutes, 0, 0)
    }

    pub fn minus_seconds(&self, seconds: i64) -> CalendricalResult<Self> {
        self.minus_time(0, 0, seconds, 0)
    }

    pub fn minus_nanoseconds(&self, nanoseconds: i64) -> CalendricalResult<Self> {
        self.minus_time(0, 0, 0, nanoseconds)
    }

    /// Adds a period: years and months first, resolving the day with
    /// `resolver`, then days, then the time units.
    ///
    /// ```rust
    /// use calendrical_rs::{options::DateResolver, Period, PlainDateTime};
    ///
    /// let dt = PlainDateTime::try_new(2024, 1, 31, 22, 0, 0, 0).unwrap();
    /// let period = Period::ZERO.with_months(1).with_hours(3);
    /// let result = dt.add(&period, DateResolver::PreviousValid).unwrap();
    /// assert_eq!(result.to_string(), "2024-03-01T01:00:00");
    /// ```
    pub fn add(&self, period: &Period, resolver: DateResolver) -> CalendricalResult<Self> {
        self.iso.add_period(period, resolver).map(Self::new_unchecked)
    }

    /// Subtracts a period, unit by unit in the same order as `add`.
    pub fn subtract(&self, period: &Period, resolver: DateResolver) -> CalendricalResult<Self> {
        self.add(&period.negated()?, resolver)
    }

    /// Combines this date-time with an offset.
    #[inline]
    #[must_use]
    pub fn at_offset(&self, offset: UtcOffset) -> OffsetDateTime {
        OffsetDateTime::new(*self, offset)
    }

    /// Places this local date-time in `zone`.
    ///
    /// Under `MergeMode::Strict`, a local time that is skipped or repeated
    /// by a transition is rejected. Under `MergeMode::Lenient`, a skipped
    /// time moves forward by the length of the gap and a repeated time
    /// takes the earlier offset.
    pub fn to_zoned_date_time_with_provider(
        &self,
        zone: &TimeZone,
        mode: MergeMode,
        provider: &impl ZoneRulesProvider,
    ) -> CalendricalResult<ZonedDateTime> {
        ZonedDateTime::from_local_with_provider(*self, zone.clone(), mode, provider)
    }
}

// ==== Trait impls ====

impl Writeable for PlainDateTime {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        self.date().write_to(sink)?;
        sink.write_char('T')?;
        self.time().write_to(sink)
    }

    fn writeable_length_hint(&self) -> LengthHint {
        self.date().writeable_length_hint() + 1 + self.time().writeable_length_hint()
    }
}

impl_display_with_writeable!(PlainDateTime);

impl Calendrical for PlainDateTime {
    fn iso_date(&self) -> Option<IsoDate> {
        Some(self.iso.date)
    }

    fn iso_time(&self) -> Option<IsoTime> {
        Some(self.iso.time)
    }
}
