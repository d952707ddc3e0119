//! This module implements `UtcOffset`.

use alloc::borrow::Cow;
use core::str::FromStr;

use writeable::{impl_display_with_writeable, LengthHint, Writeable};

use crate::{
    fields::{Calendrical, Field},
    parsers::{parse_offset, FormattableOffset, ParsedOffset},
    CalendricalError, CalendricalResult, Sign,
};

/// An offset from UTC, from -18:00 to +18:00 with second precision.
///
/// Offsets are plain values: two offsets with the same total seconds are
/// equal and interchangeable. The text form of offsets on a 15 minute
/// boundary is memoized process-wide when the `std` feature is enabled.
///
/// ```rust
/// use calendrical_rs::UtcOffset;
/// use core::str::FromStr;
///
/// let offset = UtcOffset::from_hours_minutes_seconds(-5, -30, 0).unwrap();
/// assert_eq!(offset.seconds(), -19_800);
/// assert_eq!(offset.to_string(), "-05:30");
/// assert_eq!(UtcOffset::from_str("-0530").unwrap(), offset);
///
/// // Components may not mix signs.
/// assert!(UtcOffset::from_hours_minutes_seconds(5, -30, 0).is_err());
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UtcOffset {
    seconds: i32,
}

/// The largest offset magnitude in seconds, 18 hours.
const MAX_SECONDS: i32 = 18 * 3600;

/// Offsets on this boundary have their identifier memoized.
pub(crate) const CACHED_INTERVAL: i32 = 900;

impl UtcOffset {
    /// The offset of UTC itself.
    pub const UTC: Self = Self { seconds: 0 };
    /// The smallest valid offset, -18:00.
    pub const MIN: Self = Self {
        seconds: -MAX_SECONDS,
    };
    /// The largest valid offset, +18:00.
    pub const MAX: Self = Self {
        seconds: MAX_SECONDS,
    };

    /// Creates an offset from its total seconds.
    pub fn from_total_seconds(seconds: i32) -> CalendricalResult<Self> {
        Field::OffsetSeconds.check_value(i64::from(seconds))?;
        Ok(Self { seconds })
    }

    /// Creates an offset of whole hours.
    #[inline]
    pub fn from_hours(hours: i8) -> CalendricalResult<Self> {
        Self::from_hours_minutes_seconds(hours, 0, 0)
    }

    /// Creates an offset from signed components.
    ///
    /// The components must not mix signs, each must be in range, and an
    /// offset of 18 hours may not carry minutes or seconds.
    pub fn from_hours_minutes_seconds(
        hours: i8,
        minutes: i8,
        seconds: i8,
    ) -> CalendricalResult<Self> {
        if !(-18..=18).contains(&hours) {
            return Err(component_range("offset hours must be in -18..=18", hours));
        }
        if !(-59..=59).contains(&minutes) {
            return Err(component_range("offset minutes must be in -59..=59", minutes));
        }
        if !(-59..=59).contains(&seconds) {
            return Err(component_range("offset seconds must be in -59..=59", seconds));
        }
        let signs = [hours, minutes, seconds].map(|c| Sign::from(i64::from(c)));
        let mixed = signs.contains(&Sign::Positive) && signs.contains(&Sign::Negative);
        if mixed {
            return Err(CalendricalError::invalid_combination()
                .with_message("offset components must not mix signs")
                .with_field(Field::OffsetSeconds));
        }
        let total = i32::from(hours) * 3600 + i32::from(minutes) * 60 + i32::from(seconds);
        if total.abs() > MAX_SECONDS {
            return Err(CalendricalError::range()
                .with_message("offset must be within -18:00 and +18:00")
                .with_field(Field::OffsetSeconds)
                .with_value(i64::from(total)));
        }
        Ok(Self { seconds: total })
    }

    /// Returns the total seconds of this offset.
    #[inline]
    pub const fn seconds(&self) -> i32 {
        self.seconds
    }

    /// Returns the hours, minutes and seconds of this offset, each carrying
    /// the sign of the offset.
    pub const fn hours_minutes_seconds(&self) -> (i8, i8, i8) {
        (
            (self.seconds / 3600) as i8,
            ((self.seconds / 60) % 60) as i8,
            (self.seconds % 60) as i8,
        )
    }

    /// Returns the offset identifier: `Z` for UTC, otherwise `±hh:mm` or
    /// `±hh:mm:ss`.
    pub fn identifier(&self) -> Cow<'static, str> {
        if self.seconds == 0 {
            return Cow::Borrowed("Z");
        }
        #[cfg(feature = "std")]
        if self.seconds % CACHED_INTERVAL == 0 {
            return Cow::Borrowed(crate::builtins::std::offset_identifier(*self));
        }
        Cow::Owned(self.to_formattable().to_string())
    }

    /// Validates parsed offset components.
    pub(crate) fn from_parsed(parsed: ParsedOffset) -> CalendricalResult<Self> {
        let sign = parsed.sign.as_sign_multiplier();
        // Two digit components always fit in an `i8`.
        let component = |value: u8| (value as i8) * sign;
        Self::from_hours_minutes_seconds(
            component(parsed.hours),
            component(parsed.minutes),
            component(parsed.seconds),
        )
    }

    pub(crate) fn to_formattable(self) -> FormattableOffset {
        let abs = self.seconds.unsigned_abs();
        FormattableOffset {
            sign: Sign::from(i64::from(self.seconds)),
            hour: (abs / 3600) as u8,
            minute: ((abs / 60) % 60) as u8,
            second: (abs % 60) as u8,
        }
    }
}

fn component_range(msg: &'static str, value: i8) -> CalendricalError {
    CalendricalError::range()
        .with_message(msg)
        .with_field(Field::OffsetSeconds)
        .with_value(i64::from(value))
}

impl FromStr for UtcOffset {
    type Err = CalendricalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_offset(s).and_then(Self::from_parsed)
    }
}

impl Writeable for UtcOffset {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        if self.seconds == 0 {
            return sink.write_char('Z');
        }
        self.to_formattable().write_to(sink)
    }

    fn writeable_length_hint(&self) -> LengthHint {
        if self.seconds == 0 {
            return LengthHint::exact(1);
        }
        self.to_formattable().writeable_length_hint()
    }
}

impl_display_with_writeable!(UtcOffset);

impl Calendrical for UtcOffset {
    fn utc_offset(&self) -> Option<UtcOffset> {
        Some(*self)
    }
}
