//! This module implements `CalendricalError`.

use alloc::borrow::Cow;
use core::fmt;

use crate::fields::Field;

/// The kind of a `CalendricalError`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Error for general purpose errors, such as an unknown field name.
    #[default]
    Generic,
    /// A field value or year lies outside its valid range.
    Range,
    /// Individually valid field values that do not form a valid value
    /// together, such as February 30th under the strict resolver.
    InvalidCombination,
    /// Two sources disagree about the same field.
    Conflict,
    /// A computation exceeded the representable range.
    Overflow,
    /// Malformed offset or zone identifier text.
    Syntax,
    /// Zone rules were required but are not available.
    ZoneRules,
    /// An internal invariant did not hold.
    Assert,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generic => "Error",
            Self::Range => "RangeError",
            Self::InvalidCombination => "InvalidCombinationError",
            Self::Conflict => "ConflictError",
            Self::Overflow => "OverflowError",
            Self::Syntax => "SyntaxError",
            Self::ZoneRules => "ZoneRulesError",
            Self::Assert => "ImplementationError",
        }
        .fmt(f)
    }
}

/// The error type for `calendrical_rs`.
///
/// Errors carry the field (or pair of fields, for conflicts) and the value
/// that caused them, when there is one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendricalError {
    kind: ErrorKind,
    msg: Cow<'static, str>,
    field: Option<Field>,
    conflicting_field: Option<Field>,
    value: Option<i64>,
}

impl CalendricalError {
    #[inline]
    #[must_use]
    const fn new(kind: ErrorKind) -> Self {
        Self::new_with_message(kind, "")
    }

    #[inline]
    #[must_use]
    const fn new_with_message(kind: ErrorKind, msg: &'static str) -> Self {
        Self {
            kind,
            msg: Cow::Borrowed(msg),
            field: None,
            conflicting_field: None,
            value: None,
        }
    }

    /// Create a generic error
    #[inline]
    #[must_use]
    pub const fn general(msg: &'static str) -> Self {
        Self::new_with_message(ErrorKind::Generic, msg)
    }

    /// Create a range error.
    #[inline]
    #[must_use]
    pub const fn range() -> Self {
        Self::new(ErrorKind::Range)
    }

    /// Create an invalid combination error.
    #[inline]
    #[must_use]
    pub const fn invalid_combination() -> Self {
        Self::new(ErrorKind::InvalidCombination)
    }

    /// Create a conflict error.
    #[inline]
    #[must_use]
    pub const fn conflict() -> Self {
        Self::new(ErrorKind::Conflict)
    }

    /// Create an overflow error.
    #[inline]
    #[must_use]
    pub const fn overflow() -> Self {
        Self::new(ErrorKind::Overflow)
    }

    /// Create a syntax error.
    #[inline]
    #[must_use]
    pub const fn syntax() -> Self {
        Self::new(ErrorKind::Syntax)
    }

    /// Create a zone rules error.
    #[inline]
    #[must_use]
    pub const fn zone_rules() -> Self {
        Self::new(ErrorKind::ZoneRules)
    }

    /// Create an assertion error
    #[inline]
    #[must_use]
    pub const fn assert() -> Self {
        Self::new_with_message(ErrorKind::Assert, "Implementation error occured.")
    }

    /// Add a message to the error.
    #[inline]
    #[must_use]
    pub fn with_message<S>(mut self, msg: S) -> Self
    where
        S: Into<Cow<'static, str>>,
    {
        self.msg = msg.into();
        self
    }

    /// Attach the offending field. A second call records the field it
    /// conflicts with.
    #[inline]
    #[must_use]
    pub fn with_field(mut self, field: Field) -> Self {
        if self.field.is_none() {
            self.field = Some(field);
        } else {
            self.conflicting_field = Some(field);
        }
        self
    }

    /// Attach the offending value.
    #[inline]
    #[must_use]
    pub fn with_value(mut self, value: i64) -> Self {
        self.value = Some(value);
        self
    }

    /// Returns this error's kind.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error message.
    #[inline]
    #[must_use]
    pub fn message(&self) -> &str {
        &self.msg
    }

    /// Returns the field that caused the error.
    #[inline]
    #[must_use]
    pub const fn field(&self) -> Option<Field> {
        self.field
    }

    /// Returns the second field of a conflict.
    #[inline]
    #[must_use]
    pub const fn conflicting_field(&self) -> Option<Field> {
        self.conflicting_field
    }

    /// Returns the value that caused the error.
    #[inline]
    #[must_use]
    pub const fn value(&self) -> Option<i64> {
        self.value
    }

    /// Extracts the error message.
    #[inline]
    #[must_use]
    pub fn into_message(self) -> Cow<'static, str> {
        self.msg
    }
}

impl fmt::Display for CalendricalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;

        let msg = self.msg.trim();
        if !msg.is_empty() {
            write!(f, ": {msg}")?;
        }

        match (self.field, self.conflicting_field) {
            (Some(field), Some(other)) => write!(f, " ({field} and {other})")?,
            (Some(field), None) => write!(f, " ({field})")?,
            _ => {}
        }

        if let Some(value) = self.value {
            write!(f, " [value: {value}]")?;
        }

        Ok(())
    }
}

impl core::error::Error for CalendricalError {}
