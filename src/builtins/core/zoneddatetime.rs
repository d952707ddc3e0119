//! This module implements `ZonedDateTime` and any directly related algorithms.

use writeable::{impl_display_with_writeable, Writeable};

use crate::{
    builtins::core::{
        timezone::offset_from_rules, OffsetDateTime, PlainDate, PlainDateTime, PlainTime,
        TimeZone, UtcOffset,
    },
    fields::{Calendrical, Field},
    iso::{IsoDate, IsoTime},
    options::MergeMode,
    parsers::FormattableZoneId,
    provider::{LocalOffsets, ZoneRulesProvider},
    CalendricalError, CalendricalResult,
};

#[cfg(test)]
mod tests;

/// A local date-time in a time zone, together with the offset in effect.
///
/// The offset is always one the zone allows for the local date-time, so a
/// `ZonedDateTime` identifies a single instant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ZonedDateTime {
    date_time: PlainDateTime,
    offset: UtcOffset,
    zone: TimeZone,
}

// ==== Private API ====

impl ZonedDateTime {
    #[inline]
    #[must_use]
    pub(crate) fn new_unchecked(
        date_time: PlainDateTime,
        offset: UtcOffset,
        zone: TimeZone,
    ) -> Self {
        Self {
            date_time,
            offset,
            zone,
        }
    }
}

// ==== Public API ====

impl ZonedDateTime {
    /// Creates a `ZonedDateTime` for an instant given as seconds since the
    /// Unix epoch.
    pub fn from_epoch_seconds_with_provider(
        epoch_seconds: i64,
        nanosecond: u32,
        zone: TimeZone,
        provider: &impl ZoneRulesProvider,
    ) -> CalendricalResult<Self> {
        let offset = zone.offset_for_epoch_seconds_with_provider(epoch_seconds, provider)?;
        let odt = OffsetDateTime::from_epoch_seconds(epoch_seconds, nanosecond, offset)?;
        Ok(Self::new_unchecked(odt.date_time(), offset, zone))
    }

    /// Creates a `ZonedDateTime` from a local date-time and an offset that
    /// must be valid for `zone` at that local date-time.
    ///
    /// An offset the zone does not allow there is a conflict error.
    pub fn try_new_strict_with_provider(
        date_time: PlainDateTime,
        offset: UtcOffset,
        zone: TimeZone,
        provider: &impl ZoneRulesProvider,
    ) -> CalendricalResult<Self> {
        if !zone.is_valid_offset_with_provider(&date_time, offset, provider)? {
            return Err(CalendricalError::conflict()
                .with_message("offset is not valid for the zone at the local date-time")
                .with_field(Field::OffsetSeconds)
                .with_value(i64::from(offset.seconds())));
        }
        Ok(Self::new_unchecked(date_time, offset, zone))
    }

    /// Creates a `ZonedDateTime` for the instant described by a local
    /// date-time and an offset, re-expressed with the offset `zone` uses at
    /// that instant.
    pub fn try_new_lenient_with_provider(
        date_time: PlainDateTime,
        offset: UtcOffset,
        zone: TimeZone,
        provider: &impl ZoneRulesProvider,
    ) -> CalendricalResult<Self> {
        let instant = date_time.at_offset(offset);
        Self::from_epoch_seconds_with_provider(
            instant.to_epoch_seconds(),
            date_time.nanosecond(),
            zone,
            provider,
        )
    }

    /// Places an `OffsetDateTime` in `zone`, strictly or leniently.
    pub fn from_offset_date_time_with_provider(
        value: &OffsetDateTime,
        zone: TimeZone,
        mode: MergeMode,
        provider: &impl ZoneRulesProvider,
    ) -> CalendricalResult<Self> {
        match mode {
            MergeMode::Strict => Self::try_new_strict_with_provider(
                value.date_time(),
                value.offset(),
                zone,
                provider,
            ),
            MergeMode::Lenient => Self::try_new_lenient_with_provider(
                value.date_time(),
                value.offset(),
                zone,
                provider,
            ),
        }
    }

    /// Places a local date-time in `zone`.
    ///
    /// A local date-time with one valid offset uses it. Otherwise, under
    /// `MergeMode::Strict` a skipped or repeated local time is an invalid
    /// combination error. Under `MergeMode::Lenient`, a skipped time moves
    /// forward by the length of the gap and a repeated time takes the
    /// earlier offset.
    pub fn from_local_with_provider(
        date_time: PlainDateTime,
        zone: TimeZone,
        mode: MergeMode,
        provider: &impl ZoneRulesProvider,
    ) -> CalendricalResult<Self> {
        match zone.offsets_for_local_with_provider(&date_time, provider)? {
            LocalOffsets::Unique(offset) => {
                let offset = offset_from_rules(offset)?;
                Ok(Self::new_unchecked(date_time, offset, zone))
            }
            LocalOffsets::Gap { .. } if mode.is_strict() => {
                Err(CalendricalError::invalid_combination()
                    .with_message("local date-time falls in a gap of the zone"))
            }
            LocalOffsets::Overlap { .. } if mode.is_strict() => {
                Err(CalendricalError::invalid_combination()
                    .with_message("local date-time is ambiguous in the zone"))
            }
            LocalOffsets::Gap { before, after, .. } => {
                #[cfg(feature = "log")]
                log::debug!("moving {date_time} forward past a gap in {zone}");
                let shifted = date_time.plus_seconds(i64::from(after.0) - i64::from(before.0))?;
                let offset = offset_from_rules(after)?;
                Ok(Self::new_unchecked(shifted, offset, zone))
            }
            LocalOffsets::Overlap { earlier, .. } => {
                let offset = offset_from_rules(earlier)?;
                Ok(Self::new_unchecked(date_time, offset, zone))
            }
        }
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
    pub const fn zone(&self) -> &TimeZone {
        &self.zone
    }

    /// Returns the local date-time and offset without the zone.
    #[inline]
    #[must_use]
    pub const fn to_offset_date_time(&self) -> OffsetDateTime {
        OffsetDateTime::new(self.date_time, self.offset)
    }

    /// Returns the whole seconds since the Unix epoch.
    #[inline]
    #[must_use]
    pub const fn to_epoch_seconds(&self) -> i64 {
        self.to_offset_date_time().to_epoch_seconds()
    }

    /// Re-expresses the same instant in another zone.
    pub fn with_zone_same_instant_with_provider(
        &self,
        zone: TimeZone,
        provider: &impl ZoneRulesProvider,
    ) -> CalendricalResult<Self> {
        Self::from_epoch_seconds_with_provider(
            self.to_epoch_seconds(),
            self.date_time.nanosecond(),
            zone,
            provider,
        )
    }
}

// ==== Trait impls ====

impl Writeable for ZonedDateTime {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        self.date_time.write_to(sink)?;
        self.offset.write_to(sink)?;
        FormattableZoneId {
            zone: &self.zone.identifier(),
        }
        .write_to(sink)
    }
}

impl_display_with_writeable!(ZonedDateTime);

impl Calendrical for ZonedDateTime {
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
