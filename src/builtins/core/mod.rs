//! The core value types of `calendrical_rs`.

pub(crate) mod date;
pub(crate) mod datetime;
pub(crate) mod offset;
pub(crate) mod offset_date;
pub(crate) mod offset_datetime;
pub(crate) mod offset_time;
pub(crate) mod period;
pub(crate) mod time;
pub(crate) mod timezone;
pub(crate) mod zoneddatetime;

#[doc(inline)]
pub use date::PlainDate;
#[doc(inline)]
pub use datetime::PlainDateTime;
#[doc(inline)]
pub use offset::UtcOffset;
#[doc(inline)]
pub use offset_date::OffsetDate;
#[doc(inline)]
pub use offset_datetime::OffsetDateTime;
#[doc(inline)]
pub use offset_time::OffsetTime;
#[doc(inline)]
pub use period::Period;
#[doc(inline)]
pub use time::{Overflow, PlainTime};
#[doc(inline)]
pub use timezone::{TimeZone, ZoneIdentifier, DEFAULT_ZONE_GROUP};
#[doc(inline)]
pub use zoneddatetime::ZonedDateTime;
