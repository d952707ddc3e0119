//! This module implements `OffsetTime`.

use core::cmp::Ordering;

use writeable::{impl_display_with_writeable, LengthHint, Writeable};

use crate::{
    builtins::core::{PlainTime, UtcOffset},
    fields::Calendrical,
    iso::IsoTime,
};

/// A time of day paired with an offset from UTC.
///
/// Equality compares the local time and the offset. Use
/// [`OffsetTime::compare_instant`] to order two times by the instant they
/// describe within a shared UTC day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OffsetTime {
    time: PlainTime,
    offset: UtcOffset,
}

impl OffsetTime {
    #[inline]
    #[must_use]
    pub const fn new(time: PlainTime, offset: UtcOffset) -> Self {
        Self { time, offset }
    }

    #[inline]
    #[must_use]
    pub const fn time(&self) -> PlainTime {
        self.time
    }

    #[inline]
    #[must_use]
    pub const fn offset(&self) -> UtcOffset {
        self.offset
    }

    /// Returns the same local time with a different offset.
    #[inline]
    #[must_use]
    pub const fn with_offset_same_local(&self, offset: UtcOffset) -> Self {
        Self::new(self.time, offset)
    }

    /// Re-expresses this time at `offset`, keeping the instant.
    ///
    /// The local time wraps around midnight; the signed number of days it
    /// moved is returned with it.
    ///
    /// ```rust
    /// use calendrical_rs::{OffsetTime, PlainTime, UtcOffset};
    ///
    /// let time = OffsetTime::new(
    ///     PlainTime::try_new(1, 0, 0, 0).unwrap(),
    ///     UtcOffset::from_hours(2).unwrap(),
    /// );
    /// let (utc, days) = time.with_offset_same_instant(UtcOffset::UTC);
    /// assert_eq!(utc.to_string(), "23:00:00Z");
    /// assert_eq!(days, -1);
    /// ```
    #[must_use]
    pub fn with_offset_same_instant(&self, offset: UtcOffset) -> (Self, i64) {
        let difference = i64::from(offset.seconds()) - i64::from(self.offset.seconds());
        let overflow = self.time.plus_with_overflow(0, 0, difference, 0);
        (Self::new(overflow.time(), offset), overflow.days())
    }

    /// Nanoseconds from midnight UTC, possibly outside a single day.
    fn utc_nanos(&self) -> i64 {
        self.time.to_nano_of_day() - i64::from(self.offset.seconds()) * 1_000_000_000
    }

    /// Orders two times by their instant on the same UTC day.
    #[must_use]
    pub fn compare_instant(&self, other: &Self) -> Ordering {
        self.utc_nanos().cmp(&other.utc_nanos())
    }

    /// Returns whether both values describe the same instant.
    #[must_use]
    pub fn is_same_instant(&self, other: &Self) -> bool {
        self.utc_nanos() == other.utc_nanos()
    }
}

impl Writeable for OffsetTime {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        self.time.write_to(sink)?;
        self.offset.write_to(sink)
    }

    fn writeable_length_hint(&self) -> LengthHint {
        self.time.writeable_length_hint() + self.offset.writeable_length_hint()
    }
}

impl_display_with_writeable!(OffsetTime);

impl Calendrical for OffsetTime {
    fn iso_time(&self) -> Option<IsoTime> {
        Some(self.time.iso)
    }

    fn utc_offset(&self) -> Option<UtcOffset> {
        Some(self.offset)
    }
}
