use core::fmt;

/// Errors produced while storing or looking up zone rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneRulesError {
    /// No rules are registered for the group and region.
    UnknownRegion,
    /// Rules exist for the region, but not for the requested version.
    UnknownVersion,
    /// A group or version label is not a short ASCII string.
    InvalidKey,
    /// Transitions were not strictly ascending or did not chain their offsets.
    InvalidTransitions,
}

impl fmt::Display for ZoneRulesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownRegion => f.write_str("no zone rules are available for this region"),
            Self::UnknownVersion => f.write_str("the requested zone rule version is not available"),
            Self::InvalidKey => {
                f.write_str("zone group and version must be ASCII of at most 16 bytes")
            }
            Self::InvalidTransitions => {
                f.write_str("transitions must be ascending and chain their offsets")
            }
        }
    }
}

impl core::error::Error for ZoneRulesError {}
