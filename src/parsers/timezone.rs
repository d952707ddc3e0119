use core::{iter::Peekable, str::Chars};

use crate::{CalendricalError, CalendricalResult, Sign};

/// The components of an offset as written, before range validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ParsedOffset {
    pub(crate) sign: Sign,
    pub(crate) hours: u8,
    pub(crate) minutes: u8,
    pub(crate) seconds: u8,
}

/// A zone identifier split into its parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ParsedZone<'a> {
    Fixed(ParsedOffset),
    Identified {
        group: Option<&'a str>,
        region: &'a str,
        version: Option<&'a str>,
    },
}

const ZERO_OFFSET: ParsedOffset = ParsedOffset {
    sign: Sign::Zero,
    hours: 0,
    minutes: 0,
    seconds: 0,
};

/// Parses `Z`, `±hh`, `±hh:mm`, `±hhmm`, `±hh:mm:ss` or `±hhmmss`.
pub(crate) fn parse_offset(source: &str) -> CalendricalResult<ParsedOffset> {
    if source == "Z" {
        return Ok(ZERO_OFFSET);
    }
    let mut cursor = source.chars().peekable();
    if !cursor.peek().is_some_and(is_ascii_sign) {
        return Err(CalendricalError::syntax().with_message("offset must start with '+' or '-'"));
    }
    parse_signed_offset(&mut cursor)
}

/// Parses the forms accepted for a zone identifier:
/// `group:region#version`, `group:region`, `region#version`, `region`,
/// `UTC`, `GMT`, `Z`, a bare offset, or `UTC`/`GMT` followed by an offset.
pub(crate) fn parse_zone_identifier(source: &str) -> CalendricalResult<ParsedZone<'_>> {
    if source == "Z" || source == "UTC" || source == "GMT" {
        return Ok(ParsedZone::Fixed(ZERO_OFFSET));
    }
    let mut cursor = source.chars().peekable();
    if cursor.peek().is_some_and(is_ascii_sign) {
        return parse_signed_offset(&mut cursor).map(ParsedZone::Fixed);
    }
    for prefix in ["UTC", "GMT"] {
        if let Some(rest) = source.strip_prefix(prefix) {
            if rest.starts_with(['+', '-']) {
                let mut cursor = rest.chars().peekable();
                return parse_signed_offset(&mut cursor).map(ParsedZone::Fixed);
            }
        }
    }

    let (main, version) = match source.split_once('#') {
        Some((main, version)) => {
            if !is_label(version) {
                return Err(invalid_identifier("invalid zone rule version"));
            }
            (main, Some(version))
        }
        None => (source, None),
    };
    let (group, region) = match main.split_once(':') {
        Some((group, region)) => {
            if !is_label(group) {
                return Err(invalid_identifier("invalid zone group"));
            }
            (Some(group), region)
        }
        None => (None, main),
    };
    let mut region_cursor = region.chars().peekable();
    if !parse_region_component(&mut region_cursor) {
        return Err(invalid_identifier("invalid zone region"));
    }
    Ok(ParsedZone::Identified {
        group,
        region,
        version,
    })
}

fn parse_signed_offset(chars: &mut Peekable<Chars<'_>>) -> CalendricalResult<ParsedOffset> {
    let sign = match chars.next() {
        Some('-') => Sign::Negative,
        _ => Sign::Positive,
    };
    let hours = parse_digit_pair(chars)?;
    if chars.peek().is_none() {
        return Ok(ParsedOffset {
            sign,
            hours,
            minutes: 0,
            seconds: 0,
        });
    }

    let extended = chars.peek().is_some_and(|ch| *ch == ':');
    if extended {
        chars.next();
    }
    let minutes = parse_digit_pair(chars)?;
    if chars.peek().is_none() {
        return Ok(ParsedOffset {
            sign,
            hours,
            minutes,
            seconds: 0,
        });
    }

    // The seconds separator must match the minutes separator.
    let sep = chars.peek().is_some_and(|ch| *ch == ':');
    if sep != extended {
        return Err(CalendricalError::syntax().with_message("offset separators must be consistent"));
    }
    if sep {
        chars.next();
    }
    let seconds = parse_digit_pair(chars)?;
    if chars.peek().is_some() {
        return Err(CalendricalError::syntax().with_message("unexpected text after offset"));
    }
    Ok(ParsedOffset {
        sign,
        hours,
        minutes,
        seconds,
    })
}

fn parse_digit_pair(chars: &mut Peekable<Chars<'_>>) -> CalendricalResult<u8> {
    let tens = parse_digit(chars)?;
    let ones = parse_digit(chars)?;
    Ok(tens * 10 + ones)
}

fn parse_digit(chars: &mut Peekable<Chars<'_>>) -> CalendricalResult<u8> {
    let digit = chars
        .next()
        .ok_or_else(abrupt_end)?
        .to_digit(10)
        .ok_or_else(non_ascii_digit)?;
    Ok(digit as u8)
}

fn parse_region_component(chars: &mut Peekable<Chars<'_>>) -> bool {
    // Confirm leading region char
    if !chars.peek().is_some_and(is_region_leading_char) {
        return false;
    }
    chars.next();

    // Move and check that chars are an expected region char
    while chars.peek().is_some_and(is_region_char) {
        chars.next();
    }

    // Check for sub component and parse
    if chars.peek().is_some_and(is_slash) {
        chars.next();
        return parse_region_component(chars);
    }

    // Confirm full source text has been parsed.
    chars.peek().is_none()
}

/// Group and version labels are short ASCII words.
fn is_label(s: &str) -> bool {
    !s.is_empty()
        && s.len() <= 16
        && s.bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'_' | b'-'))
}

fn is_region_leading_char(ch: &char) -> bool {
    ch.is_ascii_alphabetic() || *ch == '.' || *ch == '_'
}

fn is_region_char(ch: &char) -> bool {
    is_region_leading_char(ch) || ch.is_ascii_digit() || *ch == '-' || *ch == '+'
}

fn is_ascii_sign(ch: &char) -> bool {
    *ch == '+' || *ch == '-'
}

fn is_slash(ch: &char) -> bool {
    *ch == '/'
}

fn invalid_identifier(msg: &'static str) -> CalendricalError {
    CalendricalError::syntax().with_message(msg)
}

fn abrupt_end() -> CalendricalError {
    CalendricalError::syntax().with_message("abrupt end to parsing offset string")
}

fn non_ascii_digit() -> CalendricalError {
    CalendricalError::syntax().with_message("offset string was not a valid ascii digit")
}
