use super::ZonedDateTime;
use crate::{
    error::ErrorKind,
    fields::{Calendrical, Field},
    options::MergeMode,
    provider::{fixtures, NeverProvider},
    OffsetDateTime, PlainDateTime, TimeZone, UtcOffset,
};
use alloc::string::ToString;

fn paris() -> TimeZone {
    TimeZone::try_from_str("Europe/Paris").unwrap()
}

fn hours(h: i8) -> UtcOffset {
    UtcOffset::from_hours(h).unwrap()
}

#[test]
fn basic_zdt_test() {
    let rules = fixtures::rules();
    let nov_30_2023_utc = 1_701_308_952;

    let zdt =
        ZonedDateTime::from_epoch_seconds_with_provider(nov_30_2023_utc, 0, paris(), &rules)
            .unwrap();

    assert_eq!(zdt.date().year(), 2023);
    assert_eq!(zdt.date().month(), 11);
    assert_eq!(zdt.date().day(), 30);
    assert_eq!(zdt.time().hour(), 2);
    assert_eq!(zdt.time().minute(), 49);
    assert_eq!(zdt.time().second(), 12);
    assert_eq!(zdt.offset(), hours(1));
    assert_eq!(zdt.to_epoch_seconds(), nov_30_2023_utc);
    assert_eq!(zdt.to_string(), "2023-11-30T02:49:12+01:00[Europe/Paris]");

    let utc = ZonedDateTime::from_epoch_seconds_with_provider(
        nov_30_2023_utc,
        0,
        TimeZone::UTC,
        &NeverProvider,
    )
    .unwrap();
    assert_eq!(utc.to_string(), "2023-11-30T01:49:12Z[Z]");
    assert_eq!(utc.get(Field::OffsetSeconds), Some(0));
}

#[test]
fn summer_offset() {
    let rules = fixtures::rules();
    let local = PlainDateTime::try_new(2024, 7, 14, 12, 0, 0, 0).unwrap();
    let zdt = ZonedDateTime::from_local_with_provider(local, paris(), MergeMode::Strict, &rules)
        .unwrap();
    assert_eq!(zdt.offset(), hours(2));
    assert_eq!(zdt.to_string(), "2024-07-14T12:00:00+02:00[Europe/Paris]");

    let pinned = TimeZone::try_from_str("Europe/Paris#2023c").unwrap();
    let zdt = ZonedDateTime::from_local_with_provider(local, pinned, MergeMode::Strict, &rules)
        .unwrap();
    assert_eq!(zdt.offset(), hours(1));
    assert_eq!(zdt.to_string(), "2024-07-14T12:00:00+01:00[Europe/Paris#2023c]");
}

#[test]
fn gap_handling() {
    let rules = fixtures::rules();
    let local = PlainDateTime::try_new(2024, 3, 31, 2, 30, 0, 0).unwrap();

    let err = ZonedDateTime::from_local_with_provider(local, paris(), MergeMode::Strict, &rules)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidCombination);

    let zdt = ZonedDateTime::from_local_with_provider(local, paris(), MergeMode::Lenient, &rules)
        .unwrap();
    assert_eq!(
        zdt.date_time(),
        PlainDateTime::try_new(2024, 3, 31, 3, 30, 0, 0).unwrap()
    );
    assert_eq!(zdt.offset(), hours(2));
    assert_eq!(zdt.to_epoch_seconds(), fixtures::SPRING_2024 + 1800);
}

#[test]
fn overlap_handling() {
    let rules = fixtures::rules();
    let local = PlainDateTime::try_new(2024, 10, 27, 2, 30, 0, 0).unwrap();

    let err = ZonedDateTime::from_local_with_provider(local, paris(), MergeMode::Strict, &rules)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidCombination);

    let zdt = ZonedDateTime::from_local_with_provider(local, paris(), MergeMode::Lenient, &rules)
        .unwrap();
    assert_eq!(zdt.date_time(), local);
    assert_eq!(zdt.offset(), hours(2));
    assert_eq!(zdt.to_epoch_seconds(), fixtures::AUTUMN_2024 - 1800);

    // Either offset is accepted when it is given explicitly.
    let later = ZonedDateTime::try_new_strict_with_provider(local, hours(1), paris(), &rules)
        .unwrap();
    assert_eq!(later.to_epoch_seconds(), fixtures::AUTUMN_2024 + 1800);
}

#[test]
fn strict_offset_must_match_zone() {
    let rules = fixtures::rules();
    let local = PlainDateTime::try_new(2024, 7, 14, 12, 0, 0, 0).unwrap();

    let err = ZonedDateTime::try_new_strict_with_provider(local, hours(1), paris(), &rules)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(err.field(), Some(Field::OffsetSeconds));
    assert_eq!(err.value(), Some(3600));

    let zdt = ZonedDateTime::try_new_strict_with_provider(local, hours(2), paris(), &rules)
        .unwrap();
    assert_eq!(zdt.to_offset_date_time(), OffsetDateTime::new(local, hours(2)));
}

#[test]
fn lenient_offset_keeps_the_instant() {
    let rules = fixtures::rules();
    let local = PlainDateTime::try_new(2024, 7, 14, 12, 0, 0, 0).unwrap();

    let zdt = ZonedDateTime::try_new_lenient_with_provider(local, hours(1), paris(), &rules)
        .unwrap();
    assert_eq!(
        zdt.date_time(),
        PlainDateTime::try_new(2024, 7, 14, 13, 0, 0, 0).unwrap()
    );
    assert_eq!(zdt.offset(), hours(2));

    let odt = OffsetDateTime::new(local, UtcOffset::UTC);
    let strict = ZonedDateTime::from_offset_date_time_with_provider(
        &odt,
        paris(),
        MergeMode::Strict,
        &rules,
    );
    assert_eq!(strict.map_err(|e| e.kind()), Err(ErrorKind::Conflict));
    let lenient = ZonedDateTime::from_offset_date_time_with_provider(
        &odt,
        paris(),
        MergeMode::Lenient,
        &rules,
    )
    .unwrap();
    assert_eq!(lenient.time().hour(), 14);
    assert!(lenient.to_offset_date_time().is_same_instant(&odt));
}

#[test]
fn change_zone() {
    let rules = fixtures::rules();
    let tokyo = TimeZone::try_from_str("Asia/Tokyo").unwrap();
    let local = PlainDateTime::try_new(2024, 1, 1, 9, 0, 0, 500).unwrap();
    let zdt = ZonedDateTime::from_local_with_provider(local, tokyo, MergeMode::Strict, &rules)
        .unwrap();

    let in_paris = zdt.with_zone_same_instant_with_provider(paris(), &rules).unwrap();
    assert_eq!(in_paris.to_string(), "2024-01-01T01:00:00.0000005+01:00[Europe/Paris]");
    assert_eq!(in_paris.to_epoch_seconds(), zdt.to_epoch_seconds());
    assert_eq!(in_paris.zone(), &paris());

    let in_utc = zdt
        .with_zone_same_instant_with_provider(TimeZone::UTC, &rules)
        .unwrap();
    assert_eq!(in_utc.date_time().hour(), 0);
}

#[test]
fn missing_rules() {
    let local = PlainDateTime::try_new(2024, 7, 14, 12, 0, 0, 0).unwrap();
    let err =
        ZonedDateTime::from_local_with_provider(local, paris(), MergeMode::Lenient, &NeverProvider)
            .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ZoneRules);

    let zdt = local
        .to_zoned_date_time_with_provider(
            &TimeZone::Fixed(hours(-5)),
            MergeMode::Strict,
            &NeverProvider,
        )
        .unwrap();
    assert_eq!(zdt.to_string(), "2024-07-14T12:00:00-05:00[-05:00]");
}
