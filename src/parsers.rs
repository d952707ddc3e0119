//! This module implements the text boundary of `calendrical_rs`: offset and
//! zone identifier parsing, and ISO formatting of values.
//!
//! Full date-time grammars and locale aware formats are outside of this
//! crate; values print themselves with `Display` in ISO-8601 form.

use writeable::{impl_display_with_writeable, LengthHint, Writeable};

use crate::Sign;

mod timezone;

pub(crate) use timezone::{parse_offset, parse_zone_identifier, ParsedOffset, ParsedZone};

#[derive(Debug)]
pub struct FormattableDate(pub i32, pub u8, pub u8);

impl Writeable for FormattableDate {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        write_year(self.0, sink)?;
        sink.write_char('-')?;
        write_padded_u8(self.1, sink)?;
        sink.write_char('-')?;
        write_padded_u8(self.2, sink)
    }

    fn writeable_length_hint(&self) -> LengthHint {
        let year_length = if (0..=9999).contains(&self.0) { 4 } else { 5 };
        LengthHint::at_least(6 + year_length)
    }
}

#[derive(Debug)]
pub struct FormattableTime {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub nanosecond: u32,
}

impl Writeable for FormattableTime {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        write_padded_u8(self.hour, sink)?;
        sink.write_char(':')?;
        write_padded_u8(self.minute, sink)?;
        sink.write_char(':')?;
        write_padded_u8(self.second, sink)?;
        if self.nanosecond == 0 {
            return Ok(());
        }
        sink.write_char('.')?;
        write_nanosecond(self.nanosecond, sink)
    }

    fn writeable_length_hint(&self) -> LengthHint {
        if self.nanosecond == 0 {
            return LengthHint::exact(8);
        }
        LengthHint::between(10, 18)
    }
}

/// A non-zero offset, written as `±hh:mm` or `±hh:mm:ss`.
#[derive(Debug)]
pub struct FormattableOffset {
    pub sign: Sign,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl Writeable for FormattableOffset {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        match self.sign {
            Sign::Negative => sink.write_char('-')?,
            _ => sink.write_char('+')?,
        }
        write_padded_u8(self.hour, sink)?;
        sink.write_char(':')?;
        write_padded_u8(self.minute, sink)?;
        if self.second != 0 {
            sink.write_char(':')?;
            write_padded_u8(self.second, sink)?;
        }
        Ok(())
    }

    fn writeable_length_hint(&self) -> LengthHint {
        if self.second == 0 {
            LengthHint::exact(6)
        } else {
            LengthHint::exact(9)
        }
    }
}

/// An ISO-8601 period, `PnYnMnDTnHnMnS`, where every unit may carry its own sign.
#[derive(Debug)]
pub struct FormattablePeriod {
    pub years: i64,
    pub months: i64,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    /// Seconds and nanoseconds as a single count of nanoseconds.
    pub seconds: i128,
}

impl Writeable for FormattablePeriod {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        sink.write_char('P')?;
        let has_time = self.hours != 0 || self.minutes != 0 || self.seconds != 0;
        if self.years == 0 && self.months == 0 && self.days == 0 && !has_time {
            return sink.write_str("T0S");
        }
        for (value, designator) in [(self.years, 'Y'), (self.months, 'M'), (self.days, 'D')] {
            if value != 0 {
                value.write_to(sink)?;
                sink.write_char(designator)?;
            }
        }
        if !has_time {
            return Ok(());
        }
        sink.write_char('T')?;
        for (value, designator) in [(self.hours, 'H'), (self.minutes, 'M')] {
            if value != 0 {
                value.write_to(sink)?;
                sink.write_char(designator)?;
            }
        }
        if self.seconds != 0 {
            if self.seconds < 0 {
                sink.write_char('-')?;
            }
            let seconds = self.seconds.unsigned_abs();
            (seconds / 1_000_000_000).write_to(sink)?;
            let fraction = (seconds % 1_000_000_000) as u32;
            if fraction != 0 {
                sink.write_char('.')?;
                write_nanosecond(fraction, sink)?;
            }
            sink.write_char('S')?;
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct FormattableZoneId<'a> {
    pub zone: &'a str,
}

impl Writeable for FormattableZoneId<'_> {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        sink.write_char('[')?;
        sink.write_str(self.zone)?;
        sink.write_char(']')
    }

    fn writeable_length_hint(&self) -> LengthHint {
        LengthHint::exact(self.zone.len() + 2)
    }
}

impl_display_with_writeable!(FormattableDate);
impl_display_with_writeable!(FormattableTime);
impl_display_with_writeable!(FormattableOffset);
impl_display_with_writeable!(FormattablePeriod);
impl_display_with_writeable!(FormattableZoneId<'_>);

/// Years outside `0..=9999` are written with a sign and at least four digits.
fn write_year<W: core::fmt::Write + ?Sized>(year: i32, sink: &mut W) -> core::fmt::Result {
    if (0..=9999).contains(&year) {
        return write_four_digits(year.unsigned_abs(), sink);
    }
    let sign = if year < 0 { '-' } else { '+' };
    sink.write_char(sign)?;
    let year = year.unsigned_abs();
    if year < 10_000 {
        write_four_digits(year, sink)
    } else {
        year.write_to(sink)
    }
}

fn write_four_digits<W: core::fmt::Write + ?Sized>(mut y: u32, sink: &mut W) -> core::fmt::Result {
    (y / 1_000).write_to(sink)?;
    y %= 1_000;
    (y / 100).write_to(sink)?;
    y %= 100;
    (y / 10).write_to(sink)?;
    y %= 10;
    y.write_to(sink)
}

fn write_padded_u8<W: core::fmt::Write + ?Sized>(num: u8, sink: &mut W) -> core::fmt::Result {
    if num < 10 {
        sink.write_char('0')?;
    }
    num.write_to(sink)
}

/// Writes the fractional digits of `nanoseconds` without trailing zeros.
fn write_nanosecond<W: core::fmt::Write + ?Sized>(
    nanoseconds: u32,
    sink: &mut W,
) -> core::fmt::Result {
    let (digits, precision) = u32_to_digits(nanoseconds);
    write_digit_slice_to_precision(digits, 0, precision, sink)
}

/// Splits a nanosecond value into nine digits, returning the digits and the
/// number of digits up to the last non-zero one.
pub fn u32_to_digits(mut value: u32) -> ([u8; 9], usize) {
    let mut output = [0; 9];
    let mut precision = 0;
    let mut i = 9;
    while i != 0 {
        let v = (value % 10) as u8;
        value /= 10;
        if precision == 0 && v != 0 {
            precision = i;
        }
        output[i - 1] = v;
        i -= 1;
    }

    (output, precision)
}

pub fn write_digit_slice_to_precision<W: core::fmt::Write + ?Sized>(
    digits: [u8; 9],
    base: usize,
    precision: usize,
    sink: &mut W,
) -> core::fmt::Result {
    for digit in digits.iter().take(precision).skip(base) {
        digit.write_to(sink)?;
    }
    Ok(())
}
