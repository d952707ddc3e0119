//! This module implements `OffsetDateTime`.

use core::cmp::Ordering;

use writeable::{impl_display_with_writeable, LengthHint, Writeable};

use crate::{
    builtins::core::{OffsetDate, OffsetTime, PlainDate, PlainDateTime, PlainTime, UtcOffset},
    fields::Calendrical,
    iso::{IsoDate, IsoDateTime, IsoTime},
    CalendricalResult,
};

/// A local date-time paired with an offset from UTC, identifying a single
/// instant.
///
/// Equality compares the local date-time and the offset; two values for
/// the same instant at different offsets are not equal. Use
/// [`OffsetDateTime::compare_instant`] to order by instant.
///
/// ```rust
/// use calendrical_rs::{OffsetDateTime, PlainDateTime, UtcOffset};
///
/// let dt = PlainDateTime::try_new(1970, 1, 1, 1, 0, 0, 0).unwrap();
/// let value = OffsetDateTime::new(dt, UtcOffset::from_hours(1).unwrap());
/// assert_eq!(value.to_epoch_seconds(), 0);
/// assert_eq!(value.to_string(), "1970-01-01T01:00:00+01:00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OffsetDateTime {
    date_time: PlainDateTime,
    offset: UtcOffset,
}

impl OffsetDateTime {
    #[inline]
    #[must_use]
    pub const fn new(date_time: PlainDateTime, offset: UtcOffset) -> Self {
        Self { date_time, offset }
    }

    /// Creates the value at `offset` for seconds since the Unix epoch.
    pub fn from_epoch_seconds(
        epoch_seconds: i64,
        nanosecond: u32,
        offset: UtcOffset,
    ) -> CalendricalResult<Self> {
        let iso = IsoDateTime::from_epoch_seconds(epoch_seconds, nanosecond, offset.seconds())?;
        Ok(Self::new(PlainDateTime::new_unchecked(iso), offset))
    }

    #[inline]
    #[must_use]
    pub const fn date_time(&self) -> PlainDateTime {
        self.date_time
    }

    #[inline]
    #[must_use]
    pub const fn date(&self) -> PlainDate {
        self.date_time.date()
    }

    #[inline]
    #[must_use]
    pub const fn time(&self) -> PlainTime {
        self.date_time.time()
    }

    #[inline]
    #[must_use]
    pub const fn offset(&self) -> UtcOffset {
        self.offset
    }

    #[inline]
    #[must_use]
    pub fn to_offset_date(&self) -> OffsetDate {
        OffsetDate::new(self.date(), self.offset)
    }

    #[inline]
    #[must_use]
    pub fn to_offset_time(&self) -> OffsetTime {
        OffsetTime::new(self.time(), self.offset)
    }

    /// Returns the whole seconds since the Unix epoch.
    #[inline]
    #[must_use]
    pub const fn to_epoch_seconds(&self) -> i64 {
        self.date_time.iso.to_epoch_seconds(self.offset.seconds())
    }

    /// Returns the same local date-time with a different offset.
    #[inline]
    #[must_use]
    pub const fn with_offset_same_local(&self, offset: UtcOffset) -> Self {
        Self::new(self.date_time, offset)
    }

    /// Re-expresses the same instant at `offset`.
    pub fn with_offset_same_instant(&self, offset: UtcOffset) -> CalendricalResult<Self> {
        if offset == self.offset {
            return Ok(*self);
        }
        Self::from_epoch_seconds(self.to_epoch_seconds(), self.date_time.nanosecond(), offset)
    }

    /// Orders two values by the instant they describe.
    #[must_use]
    pub fn compare_instant(&self, other: &Self) -> Ordering {
        self.to_epoch_seconds()
            .cmp(&other.to_epoch_seconds())
            .then_with(|| self.date_time.nanosecond().cmp(&other.date_time.nanosecond()))
    }

    /// Returns whether both values describe the same instant.
    #[inline]
    #[must_use]
    pub fn is_same_instant(&self, other: &Self) -> bool {
        self.compare_instant(other) == Ordering::Equal
    }
}

impl Writeable for OffsetDateTime {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        self.date_time.write_to(sink)?;
        self.offset.write_to(sink)
    }

    fn writeable_length_hint(&self) -> LengthHint {
        self.date_time.writeable_length_hint() + self.offset.writeable_length_hint()
    }
}

impl_display_with_writeable!(OffsetDateTime);

impl Calendrical for OffsetDateTime {
    fn iso_date(&self) -> Option<IsoDate> {
        Some(self.date_time.iso.date)
    }

    fn iso_time(&self) -> Option<IsoTime> {
        Some(self.date_time.iso.time)
    }

    fn utc_offset(&self) -> Option<UtcOffset> {
        Some(self.offset)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use core::cmp::Ordering;

    use super::OffsetDateTime;
    use crate::{fields::{Calendrical, Field}, PlainDateTime, UtcOffset};

    fn odt(h: u8, offset_hours: i8) -> OffsetDateTime {
        OffsetDateTime::new(
            PlainDateTime::try_new(2024, 1, 1, h, 0, 0, 0).unwrap(),
            UtcOffset::from_hours(offset_hours).unwrap(),
        )
    }

    #[test]
    fn epoch_seconds() {
        let value = OffsetDateTime::from_epoch_seconds(-1, 500, UtcOffset::UTC).unwrap();
        assert_eq!(value.to_string(), "1969-12-31T23:59:59.0000005Z");
        assert_eq!(value.to_epoch_seconds(), -1);

        let value = odt(0, 5);
        assert_eq!(value.to_epoch_seconds(), 1_704_067_200 - 5 * 3600);
        assert!(OffsetDateTime::from_epoch_seconds(i64::MAX, 0, UtcOffset::MAX).is_err());
    }

    #[test]
    fn same_instant() {
        let tokyo = odt(9, 9);
        let utc = tokyo.with_offset_same_instant(UtcOffset::UTC).unwrap();
        assert_eq!(utc, odt(0, 0));
        assert!(utc.is_same_instant(&tokyo));
        assert_ne!(utc, tokyo);
        let earlier = tokyo.with_offset_same_instant(UtcOffset::from_hours(-1).unwrap()).unwrap();
        assert_eq!(earlier.to_string(), "2023-12-31T23:00:00-01:00");
        assert_eq!(odt(1, 0).compare_instant(&tokyo), Ordering::Greater);
        assert_eq!(tokyo.with_offset_same_local(UtcOffset::UTC), odt(9, 0));
    }

    #[test]
    fn parts() {
        let value = odt(13, -3);
        assert_eq!(value.to_offset_date().to_string(), "2024-01-01-03:00");
        assert_eq!(value.to_offset_time().to_string(), "13:00:00-03:00");
        assert_eq!(value.get(Field::AmPmOfDay), Some(1));
        assert_eq!(value.get(Field::OffsetSeconds), Some(-10_800));
        assert_eq!(value.get(Field::Year), Some(2024));
    }
}
