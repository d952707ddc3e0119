//! This module implements `Period`, an amount of date and time units.

use writeable::{impl_display_with_writeable, LengthHint, Writeable};

use crate::{parsers::FormattablePeriod, CalendricalError, CalendricalResult};

const NS_PER_SECOND: i128 = 1_000_000_000;

/// A signed amount of years, months, days, hours, minutes, seconds and
/// nanoseconds.
///
/// The units are kept separately and never balanced into each other, since
/// the length of a month or year depends on the date it is added to.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Period {
    years: i64,
    months: i64,
    days: i64,
    hours: i64,
    minutes: i64,
    seconds: i64,
    nanoseconds: i64,
}

impl Period {
    /// A period with every unit set to zero.
    pub const ZERO: Self = Self::new(0, 0, 0, 0, 0, 0, 0);

    /// Creates a new `Period`.
    #[inline]
    pub const fn new(
        years: i64,
        months: i64,
        days: i64,
        hours: i64,
        minutes: i64,
        seconds: i64,
        nanoseconds: i64,
    ) -> Self {
        Self {
            years,
            months,
            days,
            hours,
            minutes,
            seconds,
            nanoseconds,
        }
    }

    /// Creates a period of whole weeks.
    pub fn of_weeks(weeks: i64) -> CalendricalResult<Self> {
        weeks
            .checked_mul(7)
            .map(|days| Self::ZERO.with_days(days))
            .ok_or_else(overflow)
    }

    #[inline]
    #[must_use]
    pub const fn with_years(mut self, years: i64) -> Self {
        self.years = years;
        self
    }

    #[inline]
    #[must_use]
    pub const fn with_months(mut self, months: i64) -> Self {
        self.months = months;
        self
    }

    #[inline]
    #[must_use]
    pub const fn with_days(mut self, days: i64) -> Self {
        self.days = days;
        self
    }

    #[inline]
    #[must_use]
    pub const fn with_hours(mut self, hours: i64) -> Self {
        self.hours = hours;
        self
    }

    #[inline]
    #[must_use]
    pub const fn with_minutes(mut self, minutes: i64) -> Self {
        self.minutes = minutes;
        self
    }

    #[inline]
    #[must_use]
    pub const fn with_seconds(mut self, seconds: i64) -> Self {
        self.seconds = seconds;
        self
    }

    #[inline]
    #[must_use]
    pub const fn with_nanoseconds(mut self, nanoseconds: i64) -> Self {
        self.nanoseconds = nanoseconds;
        self
    }

    #[inline]
    pub const fn years(&self) -> i64 {
        self.years
    }

    #[inline]
    pub const fn months(&self) -> i64 {
        self.months
    }

    #[inline]
    pub const fn days(&self) -> i64 {
        self.days
    }

    #[inline]
    pub const fn hours(&self) -> i64 {
        self.hours
    }

    #[inline]
    pub const fn minutes(&self) -> i64 {
        self.minutes
    }

    #[inline]
    pub const fn seconds(&self) -> i64 {
        self.seconds
    }

    #[inline]
    pub const fn nanoseconds(&self) -> i64 {
        self.nanoseconds
    }

    /// Returns whether every unit is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.years == 0
            && self.months == 0
            && self.days == 0
            && self.hours == 0
            && self.minutes == 0
            && self.seconds == 0
            && self.nanoseconds == 0
    }

    /// Returns the years, months and days of this period.
    #[inline]
    #[must_use]
    pub const fn date_part(&self) -> Self {
        Self::new(self.years, self.months, self.days, 0, 0, 0, 0)
    }

    /// Returns the hours, minutes, seconds and nanoseconds of this period.
    #[inline]
    #[must_use]
    pub const fn time_part(&self) -> Self {
        Self::new(0, 0, 0, self.hours, self.minutes, self.seconds, self.nanoseconds)
    }

    /// Returns the years and months as a number of months.
    #[inline]
    pub(crate) fn total_months(&self) -> i128 {
        i128::from(self.years) * 12 + i128::from(self.months)
    }

    /// Returns the time units as a number of nanoseconds.
    #[inline]
    pub(crate) fn time_nanos(&self) -> i128 {
        ((i128::from(self.hours) * 60 + i128::from(self.minutes)) * 60 + i128::from(self.seconds))
            * NS_PER_SECOND
            + i128::from(self.nanoseconds)
    }

    /// Adds two periods unit by unit.
    pub fn checked_add(&self, other: &Self) -> CalendricalResult<Self> {
        Ok(Self {
            years: self.years.checked_add(other.years).ok_or_else(overflow)?,
            months: self.months.checked_add(other.months).ok_or_else(overflow)?,
            days: self.days.checked_add(other.days).ok_or_else(overflow)?,
            hours: self.hours.checked_add(other.hours).ok_or_else(overflow)?,
            minutes: self.minutes.checked_add(other.minutes).ok_or_else(overflow)?,
            seconds: self.seconds.checked_add(other.seconds).ok_or_else(overflow)?,
            nanoseconds: self
                .nanoseconds
                .checked_add(other.nanoseconds)
                .ok_or_else(overflow)?,
        })
    }

    /// Returns the period with every unit negated.
    pub fn negated(&self) -> CalendricalResult<Self> {
        Self::ZERO.checked_sub(self)
    }

    /// Subtracts `other` unit by unit.
    pub fn checked_sub(&self, other: &Self) -> CalendricalResult<Self> {
        Ok(Self {
            years: self.years.checked_sub(other.years).ok_or_else(overflow)?,
            months: self.months.checked_sub(other.months).ok_or_else(overflow)?,
            days: self.days.checked_sub(other.days).ok_or_else(overflow)?,
            hours: self.hours.checked_sub(other.hours).ok_or_else(overflow)?,
            minutes: self.minutes.checked_sub(other.minutes).ok_or_else(overflow)?,
            seconds: self.seconds.checked_sub(other.seconds).ok_or_else(overflow)?,
            nanoseconds: self
                .nanoseconds
                .checked_sub(other.nanoseconds)
                .ok_or_else(overflow)?,
        })
    }
}

fn overflow() -> CalendricalError {
    CalendricalError::overflow().with_message("period unit exceeds the supported range")
}

impl Writeable for Period {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        FormattablePeriod {
            years: self.years,
            months: self.months,
            days: self.days,
            hours: self.hours,
            minutes: self.minutes,
            seconds: i128::from(self.seconds) * NS_PER_SECOND + i128::from(self.nanoseconds),
        }
        .write_to(sink)
    }

    fn writeable_length_hint(&self) -> LengthHint {
        LengthHint::at_least(3)
    }
}

impl_display_with_writeable!(Period);

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::Period;
    use crate::error::ErrorKind;

    #[test]
    fn add_and_negate() {
        let a = Period::new(1, 2, 3, 4, 5, 6, 7);
        let b = Period::ZERO.with_days(-3).with_hours(1);
        assert_eq!(a.checked_add(&b).unwrap(), Period::new(1, 2, 0, 5, 5, 6, 7));
        assert_eq!(a.negated().unwrap(), Period::new(-1, -2, -3, -4, -5, -6, -7));
        assert_eq!(
            Period::ZERO
                .with_days(i64::MAX)
                .checked_add(&Period::ZERO.with_days(1))
                .map_err(|e| e.kind()),
            Err(ErrorKind::Overflow)
        );
        assert!(Period::ZERO.with_years(i64::MIN).negated().is_err());
        assert!(Period::ZERO.is_zero());
        assert_eq!(a.date_part().checked_add(&a.time_part()).unwrap(), a);
    }

    #[test]
    fn unit_totals() {
        let period = Period::new(2, -3, 0, 1, 1, 1, 1);
        assert_eq!(period.total_months(), 21);
        assert_eq!(period.time_nanos(), 3_661_000_000_001);
        assert_eq!(Period::of_weeks(2).unwrap(), Period::ZERO.with_days(14));
    }

    #[test]
    fn iso_format() {
        assert_eq!(Period::ZERO.to_string(), "PT0S");
        assert_eq!(Period::new(1, 2, 3, 4, 5, 6, 0).to_string(), "P1Y2M3DT4H5M6S");
        assert_eq!(Period::ZERO.with_days(-7).to_string(), "P-7D");
        assert_eq!(
            Period::ZERO.with_seconds(1).with_nanoseconds(500_000_000).to_string(),
            "PT1.5S"
        );
        assert_eq!(
            Period::ZERO.with_nanoseconds(-1).to_string(),
            "PT-0.000000001S"
        );
        assert_eq!(Period::ZERO.with_hours(12).to_string(), "PT12H");
    }
}
