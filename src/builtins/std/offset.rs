use rustc_hash::FxHashMap;
use std::sync::{LazyLock, PoisonError, RwLock};

use crate::builtins::core::UtcOffset;

/// Identifiers of offsets on a 15 minute boundary, keyed by total seconds.
///
/// Entries are never evicted. There are at most 145 such offsets, so the
/// leaked strings are bounded.
static OFFSET_IDENTIFIERS: LazyLock<RwLock<FxHashMap<i32, &'static str>>> =
    LazyLock::new(|| RwLock::new(FxHashMap::default()));

/// Returns the shared identifier of `offset`, inserting it on first use.
///
/// Concurrent callers for the same offset all observe the same string.
pub(crate) fn offset_identifier(offset: UtcOffset) -> &'static str {
    let key = offset.seconds();
    let cached = OFFSET_IDENTIFIERS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&key)
        .copied();
    if let Some(id) = cached {
        return id;
    }
    let mut cache = OFFSET_IDENTIFIERS
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    // Another writer may have won the race between the two locks.
    *cache.entry(key).or_insert_with(|| {
        #[cfg(feature = "log")]
        log::trace!("caching offset identifier for {key} seconds");
        offset.to_formattable().to_string().leak()
    })
}
