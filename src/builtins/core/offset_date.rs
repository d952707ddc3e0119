//! This module implements `OffsetDate`.

use writeable::{impl_display_with_writeable, LengthHint, Writeable};

use crate::{
    builtins::core::{OffsetDateTime, PlainDate, PlainTime, UtcOffset},
    fields::Calendrical,
    iso::IsoDate,
};

/// A date paired with an offset from UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OffsetDate {
    date: PlainDate,
    offset: UtcOffset,
}

impl OffsetDate {
    #[inline]
    #[must_use]
    pub const fn new(date: PlainDate, offset: UtcOffset) -> Self {
        Self { date, offset }
    }

    #[inline]
    #[must_use]
    pub const fn date(&self) -> PlainDate {
        self.date
    }

    #[inline]
    #[must_use]
    pub const fn offset(&self) -> UtcOffset {
        self.offset
    }

    /// Returns the same date with a different offset.
    #[inline]
    #[must_use]
    pub const fn with_offset(&self, offset: UtcOffset) -> Self {
        Self::new(self.date, offset)
    }

    /// Combines this date with a local time at the same offset.
    #[inline]
    #[must_use]
    pub fn at_time(&self, time: &PlainTime) -> OffsetDateTime {
        OffsetDateTime::new(self.date.at_time(time), self.offset)
    }
}

impl Writeable for OffsetDate {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        self.date.write_to(sink)?;
        self.offset.write_to(sink)
    }

    fn writeable_length_hint(&self) -> LengthHint {
        self.date.writeable_length_hint() + self.offset.writeable_length_hint()
    }
}

impl_display_with_writeable!(OffsetDate);

impl Calendrical for OffsetDate {
    fn iso_date(&self) -> Option<IsoDate> {
        Some(self.date.iso)
    }

    fn utc_offset(&self) -> Option<UtcOffset> {
        Some(self.offset)
    }
}
