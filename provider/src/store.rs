//! A keyed store of transition tables.

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use tinystr::TinyAsciiStr;

use crate::{TransitionTable, ZoneRulesError};

/// The key a rule table is stored under.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ZoneKey {
    pub group: TinyAsciiStr<16>,
    pub region: String,
    pub version: TinyAsciiStr<16>,
}

impl ZoneKey {
    pub fn try_new(group: &str, region: &str, version: &str) -> Result<Self, ZoneRulesError> {
        Ok(Self {
            group: TinyAsciiStr::try_from_str(group).map_err(|_| ZoneRulesError::InvalidKey)?,
            region: region.to_string(),
            version: TinyAsciiStr::try_from_str(version).map_err(|_| ZoneRulesError::InvalidKey)?,
        })
    }
}

/// An in-memory collection of zone rules.
///
/// Several versions of the same region may be held at once; the latest
/// version is the lexically greatest version label, so labels such as
/// `2023c` and `2024a` order as expected.
#[derive(Debug, Clone, Default)]
pub struct RulesStore {
    zones: BTreeMap<ZoneKey, TransitionTable>,
}

impl RulesStore {
    pub const fn new() -> Self {
        Self {
            zones: BTreeMap::new(),
        }
    }

    /// Registers `table` for the key, replacing any previous table.
    pub fn insert(
        &mut self,
        group: &str,
        region: &str,
        version: &str,
        table: TransitionTable,
    ) -> Result<(), ZoneRulesError> {
        let key = ZoneKey::try_new(group, region, version)?;
        self.zones.insert(key, table);
        Ok(())
    }

    /// Returns the versions available for a region in ascending order.
    pub fn versions<'a>(
        &'a self,
        group: &'a str,
        region: &'a str,
    ) -> impl Iterator<Item = TinyAsciiStr<16>> + 'a {
        self.zones
            .keys()
            .filter(move |key| key.group.as_str() == group && key.region == region)
            .map(|key| key.version)
    }

    /// Returns the regions known for a group.
    pub fn regions<'a>(&'a self, group: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        let mut last: Option<&'a str> = None;
        self.zones
            .keys()
            .filter(move |key| key.group.as_str() == group)
            .filter_map(move |key| {
                if last == Some(key.region.as_str()) {
                    return None;
                }
                last = Some(key.region.as_str());
                last
            })
    }

    /// Returns the latest version available for a region.
    pub fn latest_version(
        &self,
        group: &str,
        region: &str,
    ) -> Result<TinyAsciiStr<16>, ZoneRulesError> {
        self.versions(group, region)
            .max()
            .ok_or(ZoneRulesError::UnknownRegion)
    }

    /// Returns the table for a specific version of a region.
    pub fn table(
        &self,
        group: &str,
        region: &str,
        version: &str,
    ) -> Result<&TransitionTable, ZoneRulesError> {
        let key = ZoneKey::try_new(group, region, version)?;
        if let Some(table) = self.zones.get(&key) {
            return Ok(table);
        }
        if self.versions(group, region).next().is_some() {
            Err(ZoneRulesError::UnknownVersion)
        } else {
            Err(ZoneRulesError::UnknownRegion)
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::RulesStore;
    use crate::{TransitionTable, UtcOffsetSeconds, ZoneRulesError};

    fn store() -> RulesStore {
        let mut store = RulesStore::new();
        let plus_one = TransitionTable::fixed(UtcOffsetSeconds(3600));
        let plus_two = TransitionTable::fixed(UtcOffsetSeconds(7200));
        store
            .insert("TZDB", "Europe/Paris", "2023c", plus_one.clone())
            .unwrap();
        store
            .insert("TZDB", "Europe/Paris", "2024a", plus_two)
            .unwrap();
        store
            .insert("TZDB", "Europe/Berlin", "2024a", plus_one)
            .unwrap();
        store
    }

    #[test]
    fn latest_version_is_lexical_max() {
        let store = store();
        assert_eq!(
            store.latest_version("TZDB", "Europe/Paris").unwrap().as_str(),
            "2024a"
        );
        assert_eq!(
            store.latest_version("TZDB", "Asia/Tokyo"),
            Err(ZoneRulesError::UnknownRegion)
        );
        assert_eq!(
            store.latest_version("BCP", "Europe/Paris"),
            Err(ZoneRulesError::UnknownRegion)
        );
    }

    #[test]
    fn table_lookup_errors() {
        let store = store();
        assert!(store.table("TZDB", "Europe/Paris", "2023c").is_ok());
        assert_eq!(
            store.table("TZDB", "Europe/Paris", "1999z").err(),
            Some(ZoneRulesError::UnknownVersion)
        );
        assert_eq!(
            store.table("TZDB", "Mars/Olympus", "2024a").err(),
            Some(ZoneRulesError::UnknownRegion)
        );
        assert_eq!(
            store
                .table("TZDB", "Europe/Paris", "a-version-label-that-is-too-long")
                .err(),
            Some(ZoneRulesError::InvalidKey)
        );
    }

    #[test]
    fn region_listing() {
        let store = store();
        let regions = store.regions("TZDB").collect::<Vec<_>>();
        assert_eq!(regions, ["Europe/Berlin", "Europe/Paris"]);
        assert_eq!(store.versions("TZDB", "Europe/Paris").count(), 2);
    }
}
