//! This module implements `TimeZone` and `ZoneIdentifier`.

use alloc::borrow::Cow;
use alloc::string::{String, ToString};
use core::str::FromStr;

use tinystr::TinyAsciiStr;
use writeable::{impl_display_with_writeable, Writeable};

use crate::{
    builtins::core::{PlainDateTime, UtcOffset},
    parsers::{parse_zone_identifier, ParsedZone},
    provider::{LocalOffsets, UtcOffsetSeconds, ZoneRulesProvider},
    CalendricalError, CalendricalResult,
};

/// The group used for identifiers written without one.
pub const DEFAULT_ZONE_GROUP: &str = "TZDB";

/// A zone region within a rules group, optionally pinned to a rule version.
///
/// A missing version is floating: lookups always use the latest rules the
/// provider knows.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ZoneIdentifier {
    group: TinyAsciiStr<16>,
    region: String,
    version: Option<TinyAsciiStr<16>>,
}

impl ZoneIdentifier {
    /// Creates an identifier from already validated parts.
    fn try_new(group: &str, region: &str, version: Option<&str>) -> CalendricalResult<Self> {
        let label = |s: &str| {
            TinyAsciiStr::try_from_str(s)
                .map_err(|_| CalendricalError::syntax().with_message("zone label is too long"))
        };
        Ok(Self {
            group: label(group)?,
            region: region.to_string(),
            version: version.map(label).transpose()?,
        })
    }

    #[inline]
    #[must_use]
    pub fn group(&self) -> &str {
        self.group.as_str()
    }

    #[inline]
    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }

    #[inline]
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_ref().map(TinyAsciiStr::as_str)
    }
}

impl Writeable for ZoneIdentifier {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        if self.group() != DEFAULT_ZONE_GROUP {
            sink.write_str(self.group())?;
            sink.write_char(':')?;
        }
        sink.write_str(&self.region)?;
        if let Some(version) = self.version() {
            sink.write_char('#')?;
            sink.write_str(version)?;
        }
        Ok(())
    }
}

impl_display_with_writeable!(ZoneIdentifier);

/// A time zone: either a fixed offset or an identified region whose offsets
/// come from zone rules.
///
/// Equality is structural. A pinned and a floating identifier for the same
/// region are different zones, and a fixed offset never equals a region
/// even when their offsets agree.
///
/// ```rust
/// use calendrical_rs::TimeZone;
///
/// let zone = TimeZone::try_from_str("TZDB:Europe/Paris#2024a").unwrap();
/// assert_eq!(zone.region(), Some("Europe/Paris"));
/// assert_eq!(zone.version(), Some("2024a"));
/// assert_eq!(zone.to_string(), "Europe/Paris#2024a");
///
/// let fixed = TimeZone::try_from_str("UTC+05:30").unwrap();
/// assert!(fixed.is_fixed());
/// assert_eq!(fixed.to_string(), "+05:30");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TimeZone {
    Fixed(UtcOffset),
    Identified(ZoneIdentifier),
}

impl Default for TimeZone {
    fn default() -> Self {
        Self::UTC
    }
}

impl From<UtcOffset> for TimeZone {
    fn from(offset: UtcOffset) -> Self {
        Self::Fixed(offset)
    }
}

// ==== Parsing and accessors ====

impl TimeZone {
    /// The fixed zone at offset zero.
    pub const UTC: Self = Self::Fixed(UtcOffset::UTC);

    /// Parses a zone identifier, using `DEFAULT_ZONE_GROUP` when no group
    /// is written.
    #[inline]
    pub fn try_from_str(source: &str) -> CalendricalResult<Self> {
        Self::try_from_str_with_group(source, DEFAULT_ZONE_GROUP)
    }

    /// Parses a zone identifier, using `default_group` when no group is
    /// written.
    ///
    /// Identified zones are not checked against any rules; a region that no
    /// provider knows only fails once its rules are looked up.
    pub fn try_from_str_with_group(source: &str, default_group: &str) -> CalendricalResult<Self> {
        match parse_zone_identifier(source)? {
            ParsedZone::Fixed(parsed) => UtcOffset::from_parsed(parsed).map(Self::Fixed),
            ParsedZone::Identified {
                group,
                region,
                version,
            } => ZoneIdentifier::try_new(group.unwrap_or(default_group), region, version)
                .map(Self::Identified),
        }
    }

    /// Creates an identified zone in `group`.
    pub fn identified(group: &str, region: &str, version: Option<&str>) -> CalendricalResult<Self> {
        let mut source = String::from(group);
        source.push(':');
        source.push_str(region);
        if let Some(version) = version {
            source.push('#');
            source.push_str(version);
        }
        match Self::try_from_str(&source)? {
            zone @ Self::Identified(_) => Ok(zone),
            Self::Fixed(_) => Err(CalendricalError::syntax().with_message("invalid zone region")),
        }
    }

    /// Returns the zone identifier text.
    ///
    /// Fixed zones use the offset identifier. Identified zones omit the
    /// group when it is `DEFAULT_ZONE_GROUP`.
    #[must_use]
    pub fn identifier(&self) -> Cow<'_, str> {
        match self {
            Self::Fixed(offset) => offset.identifier(),
            Self::Identified(id) => Cow::Owned(id.to_string()),
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_fixed(&self) -> bool {
        matches!(self, Self::Fixed(_))
    }

    /// Returns the offset of a fixed zone.
    #[inline]
    #[must_use]
    pub const fn fixed_offset(&self) -> Option<UtcOffset> {
        match self {
            Self::Fixed(offset) => Some(*offset),
            Self::Identified(_) => None,
        }
    }

    #[must_use]
    pub fn group(&self) -> Option<&str> {
        match self {
            Self::Fixed(_) => None,
            Self::Identified(id) => Some(id.group()),
        }
    }

    #[must_use]
    pub fn region(&self) -> Option<&str> {
        match self {
            Self::Fixed(_) => None,
            Self::Identified(id) => Some(id.region()),
        }
    }

    #[must_use]
    pub fn version(&self) -> Option<&str> {
        match self {
            Self::Fixed(_) => None,
            Self::Identified(id) => id.version(),
        }
    }

    /// Returns whether lookups use the latest rules. Fixed zones have no
    /// rules and always count as floating.
    #[inline]
    #[must_use]
    pub fn is_floating_version(&self) -> bool {
        self.version().is_none()
    }

    /// Pins the zone to a rule version.
    pub fn with_version(&self, version: &str) -> CalendricalResult<Self> {
        match self {
            Self::Fixed(_) => Err(CalendricalError::invalid_combination()
                .with_message("a fixed offset zone has no rule version")),
            Self::Identified(id) => {
                ZoneIdentifier::try_new(id.group(), id.region(), Some(version))
                    .map(Self::Identified)
            }
        }
    }

    /// Returns the zone with its version removed.
    #[must_use]
    pub fn with_floating_version(&self) -> Self {
        match self {
            Self::Fixed(_) => self.clone(),
            Self::Identified(id) => Self::Identified(ZoneIdentifier {
                version: None,
                ..id.clone()
            }),
        }
    }
}

// ==== Rule lookups ====

impl TimeZone {
    /// Returns the version lookups use: the pinned version, or the
    /// provider's latest one.
    fn resolved_version<'a>(
        id: &'a ZoneIdentifier,
        provider: &impl ZoneRulesProvider,
    ) -> CalendricalResult<Cow<'a, str>> {
        match id.version() {
            Some(version) => Ok(Cow::Borrowed(version)),
            None => Ok(Cow::Owned(
                provider
                    .latest_version(id.group(), id.region())?
                    .as_str()
                    .to_string(),
            )),
        }
    }

    /// Pins the zone to the latest version `provider` knows.
    pub fn with_latest_version_with_provider(
        &self,
        provider: &impl ZoneRulesProvider,
    ) -> CalendricalResult<Self> {
        match self {
            Self::Fixed(_) => Ok(self.clone()),
            Self::Identified(id) => {
                let latest = provider.latest_version(id.group(), id.region())?;
                self.with_version(latest.as_str())
            }
        }
    }

    /// Returns whether `provider` has rules for this zone at its version.
    #[must_use]
    pub fn is_valid_with_provider(&self, provider: &impl ZoneRulesProvider) -> bool {
        match self {
            Self::Fixed(_) => true,
            Self::Identified(_) => self.offset_for_epoch_seconds_with_provider(0, provider).is_ok(),
        }
    }

    /// Returns the offset in effect at an instant.
    pub fn offset_for_epoch_seconds_with_provider(
        &self,
        epoch_seconds: i64,
        provider: &impl ZoneRulesProvider,
    ) -> CalendricalResult<UtcOffset> {
        match self {
            Self::Fixed(offset) => Ok(*offset),
            Self::Identified(id) => {
                let version = Self::resolved_version(id, provider)?;
                let offset = provider.offset_for_epoch_seconds(
                    id.group(),
                    id.region(),
                    &version,
                    epoch_seconds,
                )?;
                offset_from_rules(offset)
            }
        }
    }

    /// Returns the offsets valid for a local date-time in this zone.
    pub fn offsets_for_local_with_provider(
        &self,
        local: &PlainDateTime,
        provider: &impl ZoneRulesProvider,
    ) -> CalendricalResult<LocalOffsets> {
        match self {
            Self::Fixed(offset) => Ok(LocalOffsets::Unique(UtcOffsetSeconds(offset.seconds()))),
            Self::Identified(id) => {
                let version = Self::resolved_version(id, provider)?;
                provider.offsets_for_local(
                    id.group(),
                    id.region(),
                    &version,
                    local.iso.to_local_seconds(),
                )
            }
        }
    }

    /// Returns whether `offset` is valid for a local date-time in this zone.
    pub fn is_valid_offset_with_provider(
        &self,
        local: &PlainDateTime,
        offset: UtcOffset,
        provider: &impl ZoneRulesProvider,
    ) -> CalendricalResult<bool> {
        self.offsets_for_local_with_provider(local, provider)
            .map(|offsets| offsets.contains(UtcOffsetSeconds(offset.seconds())))
    }
}

/// Converts an offset from zone rules, rejecting values no offset can hold.
pub(crate) fn offset_from_rules(offset: UtcOffsetSeconds) -> CalendricalResult<UtcOffset> {
    UtcOffset::from_total_seconds(offset.0).map_err(|_| {
        CalendricalError::zone_rules()
            .with_message("zone rules returned an offset outside -18:00..=+18:00")
            .with_value(i64::from(offset.0))
    })
}

impl FromStr for TimeZone {
    type Err = CalendricalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from_str(s)
    }
}

impl Writeable for TimeZone {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        match self {
            Self::Fixed(offset) => offset.write_to(sink),
            Self::Identified(id) => id.write_to(sink),
        }
    }
}

impl_display_with_writeable!(TimeZone);
