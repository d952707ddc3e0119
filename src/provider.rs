//! The `ZoneRulesProvider` trait.

use alloc::string::ToString;

use tinystr::TinyAsciiStr;
use zone_rules_provider::{RulesStore, ZoneRulesError};

use crate::{CalendricalError, CalendricalResult};

pub use zone_rules_provider::{LocalOffsets, UtcOffsetSeconds};

/// The `ZoneRulesProvider` trait supplies the rules of identified zones.
///
/// Zones are addressed by group, region and rule version. Fixed offset
/// zones never reach a provider.
pub trait ZoneRulesProvider {
    /// Returns the latest rule version known for a region.
    fn latest_version(&self, group: &str, region: &str) -> CalendricalResult<TinyAsciiStr<16>>;

    /// Returns the offset in effect at an instant.
    fn offset_for_epoch_seconds(
        &self,
        group: &str,
        region: &str,
        version: &str,
        epoch_seconds: i64,
    ) -> CalendricalResult<UtcOffsetSeconds>;

    /// Returns the offsets valid for a local date-time, given as seconds
    /// since 1970-01-01T00:00 local time.
    fn offsets_for_local(
        &self,
        group: &str,
        region: &str,
        version: &str,
        local_seconds: i64,
    ) -> CalendricalResult<LocalOffsets>;
}

/// A provider without any rules.
///
/// Every lookup fails with a zone rules error, so only fixed offset zones
/// can be used with it.
#[derive(Debug, Default, Clone, Copy)]
pub struct NeverProvider;

fn no_rules() -> CalendricalError {
    CalendricalError::zone_rules().with_message("no zone rules are available")
}

impl ZoneRulesProvider for NeverProvider {
    fn latest_version(&self, _: &str, _: &str) -> CalendricalResult<TinyAsciiStr<16>> {
        Err(no_rules())
    }

    fn offset_for_epoch_seconds(
        &self,
        _: &str,
        _: &str,
        _: &str,
        _: i64,
    ) -> CalendricalResult<UtcOffsetSeconds> {
        Err(no_rules())
    }

    fn offsets_for_local(
        &self,
        _: &str,
        _: &str,
        _: &str,
        _: i64,
    ) -> CalendricalResult<LocalOffsets> {
        Err(no_rules())
    }
}

impl From<ZoneRulesError> for CalendricalError {
    fn from(error: ZoneRulesError) -> Self {
        CalendricalError::zone_rules().with_message(error.to_string())
    }
}

impl ZoneRulesProvider for RulesStore {
    fn latest_version(&self, group: &str, region: &str) -> CalendricalResult<TinyAsciiStr<16>> {
        Ok(RulesStore::latest_version(self, group, region)?)
    }

    fn offset_for_epoch_seconds(
        &self,
        group: &str,
        region: &str,
        version: &str,
        epoch_seconds: i64,
    ) -> CalendricalResult<UtcOffsetSeconds> {
        let table = self.table(group, region, version)?;
        Ok(table.offset_at(epoch_seconds))
    }

    fn offsets_for_local(
        &self,
        group: &str,
        region: &str,
        version: &str,
        local_seconds: i64,
    ) -> CalendricalResult<LocalOffsets> {
        let table = self.table(group, region, version)?;
        Ok(table.local_offsets(local_seconds))
    }
}

/// Zone rules shared by the crate's tests.
#[cfg(test)]
pub(crate) mod fixtures {
    use alloc::vec;

    use zone_rules_provider::{RulesStore, Transition, TransitionTable, UtcOffsetSeconds};

    pub(crate) const CET: UtcOffsetSeconds = UtcOffsetSeconds(3600);
    pub(crate) const CEST: UtcOffsetSeconds = UtcOffsetSeconds(7200);

    /// 2024-03-31T01:00Z, when Paris moves from +01:00 to +02:00.
    pub(crate) const SPRING_2024: i64 = 1_711_846_800;
    /// 2024-10-27T01:00Z, when Paris moves back to +01:00.
    pub(crate) const AUTUMN_2024: i64 = 1_729_990_800;

    /// `Europe/Paris` at `2024a` with the 2024 transitions and at `2023c`
    /// as a fixed +01:00, plus `Asia/Tokyo` at `2024a`.
    pub(crate) fn rules() -> RulesStore {
        let mut store = RulesStore::new();
        let paris = TransitionTable::try_new(
            CET,
            vec![
                Transition::new(SPRING_2024, CET, CEST),
                Transition::new(AUTUMN_2024, CEST, CET),
            ],
        )
        .unwrap();
        store.insert("TZDB", "Europe/Paris", "2024a", paris).unwrap();
        store
            .insert("TZDB", "Europe/Paris", "2023c", TransitionTable::fixed(CET))
            .unwrap();
        store
            .insert("TZDB", "Asia/Tokyo", "2024a", TransitionTable::fixed(UtcOffsetSeconds(32_400)))
            .unwrap();
        store
    }
}

#[cfg(test)]
mod tests {
    use zone_rules_provider::{RulesStore, TransitionTable};

    use super::{NeverProvider, UtcOffsetSeconds, ZoneRulesProvider};
    use crate::error::ErrorKind;

    #[test]
    fn never_provider_has_no_rules() {
        assert_eq!(
            NeverProvider
                .latest_version("TZDB", "Europe/Paris")
                .map_err(|e| e.kind()),
            Err(ErrorKind::ZoneRules)
        );
    }

    #[test]
    fn store_errors_become_zone_rules_errors() {
        let mut store = RulesStore::new();
        store
            .insert("TZDB", "Asia/Tokyo", "2024a", TransitionTable::fixed(UtcOffsetSeconds(32_400)))
            .unwrap();
        assert_eq!(
            ZoneRulesProvider::latest_version(&store, "TZDB", "Asia/Tokyo")
                .unwrap()
                .as_str(),
            "2024a"
        );
        assert_eq!(
            store
                .offset_for_epoch_seconds("TZDB", "Asia/Tokyo", "2024a", 0)
                .unwrap(),
            UtcOffsetSeconds(32_400)
        );
        let err = store
            .offsets_for_local("TZDB", "Asia/Tokyo", "1999z", 0)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ZoneRules);
        assert!(ZoneRulesProvider::latest_version(&store, "TZDB", "Asia/Seoul").is_err());
    }
}
