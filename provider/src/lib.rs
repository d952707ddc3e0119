//! Zone offset rule data for `calendrical_rs`.
//!
//! This crate holds zone rules as in-memory transition tables keyed by
//! `group`, `region` and rule `version`. It knows nothing about dates or
//! calendars: every query is phrased in seconds, either seconds since the
//! Unix epoch (an instant) or local seconds since the Unix epoch (a wall
//! clock reading).
//!
//! ```rust
//! use zone_rules_provider::{
//!     LocalOffsets, RulesStore, Transition, TransitionTable, UtcOffsetSeconds,
//! };
//!
//! let table = TransitionTable::try_new(
//!     UtcOffsetSeconds(3600),
//!     vec![Transition::new(1_711_846_800, UtcOffsetSeconds(3600), UtcOffsetSeconds(7200))],
//! )
//! .unwrap();
//!
//! let mut store = RulesStore::new();
//! store.insert("TZDB", "Europe/Paris", "2024a", table).unwrap();
//!
//! let table = store.table("TZDB", "Europe/Paris", "2024a").unwrap();
//! assert_eq!(table.offset_at(1_711_846_800), UtcOffsetSeconds(7200));
//! assert!(matches!(
//!     table.local_offsets(1_711_846_800 + 3600 + 60),
//!     LocalOffsets::Gap { .. }
//! ));
//! ```
#![no_std]
#![cfg_attr(not(test), forbid(clippy::unwrap_used))]

extern crate alloc;

mod error;
mod rules;
mod store;

pub use error::ZoneRulesError;
pub use rules::{LocalOffsets, Transition, TransitionTable, UtcOffsetSeconds};
pub use store::{RulesStore, ZoneKey};

/// A prelude of needed types for interacting with `zone_rules_provider` data.
pub mod prelude {
    pub use tinystr;
}
