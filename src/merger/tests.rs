use super::{Merged, MergedValue, Merger};
use crate::{
    error::ErrorKind,
    fields::{Calendrical, Field},
    options::{DateResolver, MergeMode},
    provider::fixtures,
    OffsetDate, OffsetTime, Period, PlainDate, PlainDateTime, PlainTime, TimeZone, UtcOffset,
};
use alloc::{string::ToString, vec::Vec};

fn merge(mode: MergeMode, fields: &[(Field, i64)]) -> Result<Merged, ErrorKind> {
    let mut merger = Merger::new(mode);
    for (field, value) in fields {
        merger = merger.with_field(*field, *value).map_err(|e| e.kind())?;
    }
    merger.merge().map_err(|e| e.kind())
}

fn strict(fields: &[(Field, i64)]) -> Result<Merged, ErrorKind> {
    merge(MergeMode::Strict, fields)
}

fn lenient(fields: &[(Field, i64)]) -> Result<Merged, ErrorKind> {
    merge(MergeMode::Lenient, fields)
}

fn date(year: i32, month: u8, day: u8) -> PlainDate {
    PlainDate::try_new(year, month, day).unwrap()
}

fn time(hour: u8, minute: u8, second: u8, nanosecond: u32) -> PlainTime {
    PlainTime::try_new(hour, minute, second, nanosecond).unwrap()
}

fn hours(h: i8) -> UtcOffset {
    UtcOffset::from_hours(h).unwrap()
}

#[test]
fn year_month_day() {
    use Field::{DayOfMonth, MonthOfYear, Year};

    let merged = strict(&[(Year, 2024), (MonthOfYear, 2), (DayOfMonth, 29)]).unwrap();
    assert_eq!(merged.date(), Some(date(2024, 2, 29)));
    assert!(merged.is_fully_merged());
    assert_eq!(merged.overflow(), Period::ZERO);

    assert_eq!(
        strict(&[(Year, 2023), (MonthOfYear, 2), (DayOfMonth, 29)]).unwrap_err(),
        ErrorKind::InvalidCombination
    );

    let merged = strict(&[(Year, 2008), (MonthOfYear, 2), (DayOfMonth, 29)]).unwrap();
    assert_eq!(merged.date(), Some(date(2008, 2, 29)));
    let leap_day_2009 = [(Year, 2009), (MonthOfYear, 2), (DayOfMonth, 29)];
    assert_eq!(strict(&leap_day_2009).unwrap_err(), ErrorKind::InvalidCombination);
    assert_eq!(lenient(&leap_day_2009).unwrap().date(), Some(date(2009, 3, 1)));

    let merged = lenient(&[(Year, 2023), (MonthOfYear, 2), (DayOfMonth, 30)]).unwrap();
    assert_eq!(merged.date(), Some(date(2023, 3, 2)));

    let merged = Merger::strict()
        .with_resolver(DateResolver::PreviousValid)
        .with_field(Year, 2023)
        .unwrap()
        .with_field(MonthOfYear, 2)
        .unwrap()
        .with_field(DayOfMonth, 30)
        .unwrap()
        .merge()
        .unwrap();
    assert_eq!(merged.date(), Some(date(2023, 2, 28)));
}

#[test]
fn year_and_day_of_year() {
    use Field::{DayOfYear, Year};

    let merged = strict(&[(Year, 2024), (DayOfYear, 60)]).unwrap();
    assert_eq!(merged.date(), Some(date(2024, 2, 29)));

    assert_eq!(
        strict(&[(Year, 2023), (DayOfYear, 366)]).unwrap_err(),
        ErrorKind::InvalidCombination
    );
    let merged = lenient(&[(Year, 2023), (DayOfYear, 366)]).unwrap();
    assert_eq!(merged.date(), Some(date(2024, 1, 1)));
}

#[test]
fn year_week_and_day_of_week() {
    use Field::{DayOfWeek, WeekOfYear, Year};

    let merged = strict(&[(Year, 2024), (WeekOfYear, 10), (DayOfWeek, 5)]).unwrap();
    assert_eq!(merged.date(), Some(date(2024, 3, 8)));

    // 2023 started on a Sunday, so its 53rd week is only December 31st.
    let merged = strict(&[(Year, 2023), (WeekOfYear, 53), (DayOfWeek, 7)]).unwrap();
    assert_eq!(merged.date(), Some(date(2023, 12, 31)));
    assert_eq!(
        strict(&[(Year, 2023), (WeekOfYear, 53), (DayOfWeek, 1)]).unwrap_err(),
        ErrorKind::InvalidCombination
    );
    let merged = lenient(&[(Year, 2023), (WeekOfYear, 53), (DayOfWeek, 1)]).unwrap();
    assert_eq!(merged.date(), Some(date(2024, 1, 1)));
}

#[test]
fn year_month_week_and_day_of_week() {
    use Field::{DayOfWeek, MonthOfYear, WeekOfMonth, Year};

    let merged = strict(&[(Year, 2024), (MonthOfYear, 2), (WeekOfMonth, 5), (DayOfWeek, 4)])
        .unwrap();
    assert_eq!(merged.date(), Some(date(2024, 2, 29)));

    let fields = [(Year, 2023), (MonthOfYear, 2), (WeekOfMonth, 5), (DayOfWeek, 3)];
    let err = Merger::strict()
        .with_field(Year, 2023)
        .and_then(|m| m.with_field(MonthOfYear, 2))
        .and_then(|m| m.with_field(WeekOfMonth, 5))
        .and_then(|m| m.with_field(DayOfWeek, 3))
        .and_then(Merger::merge)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidCombination);
    assert_eq!(err.field(), Some(WeekOfMonth));
    assert_eq!(lenient(&fields).unwrap().date(), Some(date(2023, 3, 1)));
}

#[test]
fn week_based_year() {
    use Field::{DayOfWeek, WeekBasedYear, WeekOfWeekBasedYear};

    let merged =
        strict(&[(WeekBasedYear, 2009), (WeekOfWeekBasedYear, 1), (DayOfWeek, 1)]).unwrap();
    assert_eq!(merged.date(), Some(date(2008, 12, 29)));

    let merged =
        strict(&[(WeekBasedYear, 2020), (WeekOfWeekBasedYear, 53), (DayOfWeek, 5)]).unwrap();
    assert_eq!(merged.date(), Some(date(2021, 1, 1)));
    assert!(merged.is_fully_merged());

    let fields = [(WeekBasedYear, 2023), (WeekOfWeekBasedYear, 53), (DayOfWeek, 1)];
    assert_eq!(strict(&fields).unwrap_err(), ErrorKind::InvalidCombination);
    assert_eq!(lenient(&fields).unwrap().date(), Some(date(2024, 1, 1)));
}

#[test]
fn quarter_of_year() {
    use Field::{DayOfMonth, MonthOfQuarter, QuarterOfYear, Year};

    let merged = strict(&[
        (Year, 2024),
        (QuarterOfYear, 3),
        (MonthOfQuarter, 2),
        (DayOfMonth, 15),
    ])
    .unwrap();
    assert_eq!(merged.date(), Some(date(2024, 8, 15)));
    assert!(merged.is_fully_merged());
}

#[test]
fn sub_day_fields() {
    use Field::{
        HourOfDay, MilliOfDay, MilliOfSecond, MinuteOfDay, MinuteOfHour, NanoOfDay,
        NanoOfSecond, SecondOfDay, SecondOfMinute,
    };

    let time_of = |fields: &[(Field, i64)]| strict(fields).unwrap().time();

    assert_eq!(time_of(&[(NanoOfDay, 3_600_000_000_001)]), Some(time(1, 0, 0, 1)));
    assert_eq!(time_of(&[(MilliOfDay, 1_500)]), Some(time(0, 0, 1, 500_000_000)));
    assert_eq!(
        time_of(&[(SecondOfDay, 3_661), (NanoOfSecond, 5)]),
        Some(time(1, 1, 1, 5))
    );
    assert_eq!(
        time_of(&[(MinuteOfDay, 90), (SecondOfMinute, 30)]),
        Some(time(1, 30, 30, 0))
    );
    assert_eq!(
        time_of(&[(HourOfDay, 13), (MinuteOfHour, 45)]),
        Some(time(13, 45, 0, 0))
    );
    assert_eq!(
        time_of(&[
            (HourOfDay, 1),
            (MinuteOfHour, 2),
            (SecondOfMinute, 3),
            (MilliOfSecond, 250)
        ]),
        Some(time(1, 2, 3, 250_000_000))
    );
}

#[test]
fn am_pm_hours() {
    use Field::{AmPmOfDay, ClockHourOfAmPm, ClockHourOfDay, HourOfAmPm};

    let time_of = |fields: &[(Field, i64)]| strict(fields).unwrap().time();

    // Clock hour 12 is the first hour of its half of the day.
    assert_eq!(
        time_of(&[(ClockHourOfAmPm, 12), (AmPmOfDay, 0)]),
        Some(PlainTime::MIDNIGHT)
    );
    assert_eq!(
        time_of(&[(ClockHourOfAmPm, 12), (AmPmOfDay, 1)]),
        Some(PlainTime::NOON)
    );
    assert_eq!(
        time_of(&[(ClockHourOfAmPm, 1), (AmPmOfDay, 1)]),
        Some(time(13, 0, 0, 0))
    );
    assert_eq!(
        time_of(&[(HourOfAmPm, 11), (AmPmOfDay, 1)]),
        Some(time(23, 0, 0, 0))
    );

    // Clock hour 24 is midnight of the same day, without any overflow.
    let merged = strict(&[
        (Field::Year, 2024),
        (Field::MonthOfYear, 3),
        (Field::DayOfMonth, 8),
        (ClockHourOfDay, 24),
    ])
    .unwrap();
    assert_eq!(merged.date_time(), Some(date(2024, 3, 8).at_start_of_day()));
    assert_eq!(merged.overflow(), Period::ZERO);

    // Hour of am/pm 12 is out of range; lenient input reports the excess.
    assert_eq!(
        strict(&[(HourOfAmPm, 12), (AmPmOfDay, 1)]).unwrap_err(),
        ErrorKind::Range
    );
    let merged = lenient(&[(HourOfAmPm, 12), (AmPmOfDay, 1)]).unwrap();
    assert_eq!(merged.time(), Some(PlainTime::NOON));
    assert_eq!(merged.overflow(), Period::ZERO.with_hours(12));

    // Lenient clock hours wrap over their one-based span.
    assert_eq!(
        strict(&[(ClockHourOfDay, 25)]).unwrap_err(),
        ErrorKind::Range
    );
    let merged = lenient(&[(ClockHourOfDay, 25)]).unwrap();
    assert_eq!(merged.time(), Some(time(1, 0, 0, 0)));
    assert_eq!(merged.overflow(), Period::ZERO.with_days(1));

    let merged = lenient(&[(ClockHourOfAmPm, 13), (AmPmOfDay, 0)]).unwrap();
    assert_eq!(merged.time(), Some(time(1, 0, 0, 0)));
    assert_eq!(merged.overflow(), Period::ZERO.with_hours(12));
}

#[test]
fn lenient_overflow() {
    use Field::{DayOfMonth, HourOfDay, MinuteOfHour, MonthOfYear, Year};

    let merged = lenient(&[
        (Year, 2024),
        (MonthOfYear, 14),
        (DayOfMonth, 1),
        (HourOfDay, 25),
        (MinuteOfHour, 75),
    ])
    .unwrap();
    assert_eq!(merged.date_time(), Some(date(2024, 2, 1).at_time(&time(1, 15, 0, 0))));
    assert_eq!(
        merged.overflow(),
        Period::new(1, 0, 1, 1, 0, 0, 0)
    );

    // Fields without a fixed span are never normalized.
    assert_eq!(
        lenient(&[(Year, 2024), (MonthOfYear, 1), (DayOfMonth, 32)]).unwrap_err(),
        ErrorKind::Range
    );
}

#[test]
fn leftover_fields_are_cross_checked() {
    use Field::{AmPmOfDay, DayOfMonth, DayOfWeek, HourOfDay, MonthOfYear, Year};

    let fields = [(Year, 2024), (MonthOfYear, 3), (DayOfMonth, 8), (DayOfWeek, 5)];
    let merged = strict(&fields).unwrap();
    assert!(merged.is_fully_merged());
    assert_eq!(merged.date(), Some(date(2024, 3, 8)));

    let fields = [(Year, 2024), (MonthOfYear, 3), (DayOfMonth, 8), (DayOfWeek, 1)];
    let err = Merger::strict()
        .with_field(Year, 2024)
        .and_then(|m| m.with_field(MonthOfYear, 3))
        .and_then(|m| m.with_field(DayOfMonth, 8))
        .and_then(|m| m.with_field(DayOfWeek, 1))
        .and_then(Merger::merge)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(err.field(), Some(DayOfWeek));
    assert_eq!(err.conflicting_field(), Some(DayOfMonth));
    assert_eq!(err.value(), Some(1));

    let merged = lenient(&fields).unwrap();
    assert_eq!(merged.date(), Some(date(2024, 3, 8)));
    assert!(merged.is_fully_merged());

    let err = Merger::strict()
        .with_field(HourOfDay, 13)
        .and_then(|m| m.with_field(AmPmOfDay, 0))
        .and_then(Merger::merge)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(err.field(), Some(AmPmOfDay));
    assert_eq!(err.conflicting_field(), Some(HourOfDay));
}

#[test]
fn partial_results() {
    let merged = strict(&[(Field::MonthOfYear, 5)]).unwrap();
    assert_eq!(merged.value(), None);
    assert_eq!(merged.date(), None);
    assert!(!merged.is_fully_merged());
    assert_eq!(
        merged.unmerged().collect::<Vec<_>>(),
        [(Field::MonthOfYear, 5)]
    );
    assert_eq!(merged.unmerged_value(Field::MonthOfYear), Some(5));

    let merged = strict(&[(Field::Year, 2024), (Field::HourOfDay, 10)]).unwrap();
    assert_eq!(merged.value(), Some(MergedValue::Time(time(10, 0, 0, 0))));
    assert_eq!(merged.unmerged().collect::<Vec<_>>(), [(Field::Year, 2024)]);
    assert_eq!(merged.get(Field::AmPmOfDay), Some(0));
    assert_eq!(merged.get(Field::DayOfWeek), None);
}

#[test]
fn repeated_fields() {
    let merger = Merger::strict().with_field(Field::Year, 2024).unwrap();
    let merger = merger.with_field(Field::Year, 2024).unwrap();
    let err = merger.with_field(Field::Year, 2025).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(err.field(), Some(Field::Year));

    let merged = Merger::lenient()
        .with_field(Field::HourOfDay, 1)
        .and_then(|m| m.with_field(Field::HourOfDay, 2))
        .and_then(Merger::merge)
        .unwrap();
    assert_eq!(merged.time(), Some(time(2, 0, 0, 0)));

    assert_eq!(
        Merger::strict()
            .with_field(Field::HourOfDay, 24)
            .map_err(|e| e.kind())
            .unwrap_err(),
        ErrorKind::Range
    );
}

#[test]
fn raw_field_names() {
    let merged = Merger::strict()
        .with_raw_field("year", 2024)
        .and_then(|m| m.with_raw_field("monthOfYear", 3))
        .and_then(|m| m.with_raw_field("dayOfMonth", 8))
        .and_then(Merger::merge)
        .unwrap();
    assert_eq!(merged.date(), Some(date(2024, 3, 8)));

    assert_eq!(
        Merger::strict()
            .with_raw_field("fortnightOfYear", 1)
            .map_err(|e| e.kind())
            .unwrap_err(),
        ErrorKind::Generic
    );
}

#[test]
fn offsets() {
    let merged = Merger::strict()
        .with_date(date(2024, 3, 8))
        .and_then(|m| m.with_field(Field::HourOfDay, 10))
        .and_then(|m| m.with_field(Field::OffsetSeconds, 3_600))
        .and_then(Merger::merge)
        .unwrap();
    let value = merged.value().unwrap();
    assert!(matches!(value, MergedValue::OffsetDateTime(_)));
    assert_eq!(value.to_string(), "2024-03-08T10:00:00+01:00");
    assert_eq!(merged.offset(), Some(hours(1)));
    assert_eq!(merged.offset_date(), Some(OffsetDate::new(date(2024, 3, 8), hours(1))));
    assert_eq!(merged.get(Field::OffsetSeconds), Some(3_600));

    let merged = Merger::strict()
        .with_date(date(2024, 3, 8))
        .and_then(|m| m.with_offset(hours(-5)))
        .and_then(Merger::merge)
        .unwrap();
    assert_eq!(merged.value().unwrap().to_string(), "2024-03-08-05:00");

    let merged = Merger::strict()
        .with_time(time(8, 30, 0, 0))
        .and_then(|m| m.with_offset(UtcOffset::UTC))
        .and_then(Merger::merge)
        .unwrap();
    assert_eq!(
        merged.value(),
        Some(MergedValue::OffsetTime(OffsetTime::new(time(8, 30, 0, 0), UtcOffset::UTC)))
    );

    let err = Merger::strict()
        .with_offset(hours(1))
        .and_then(|m| m.with_field(Field::OffsetSeconds, 7_200))
        .and_then(Merger::merge)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(err.field(), Some(Field::OffsetSeconds));
}

#[test]
fn offset_date_and_offset_time() {
    let offset_date = OffsetDate::new(date(2024, 3, 8), hours(1));
    let at = |h, offset| OffsetTime::new(time(h, 30, 0, 0), offset);

    let merged = Merger::strict()
        .with_offset_date(offset_date)
        .and_then(|m| m.with_offset_time(at(10, hours(1))))
        .and_then(Merger::merge)
        .unwrap();
    assert_eq!(
        merged.offset_date_time().unwrap().to_string(),
        "2024-03-08T10:30:00+01:00"
    );

    let err = Merger::strict()
        .with_offset_date(offset_date)
        .and_then(|m| m.with_offset_time(at(10, hours(2))))
        .and_then(Merger::merge)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(err.field(), Some(Field::OffsetSeconds));

    let merged = Merger::lenient()
        .with_offset_date(offset_date)
        .and_then(|m| m.with_offset_time(at(10, hours(2))))
        .and_then(Merger::merge)
        .unwrap();
    assert_eq!(
        merged.offset_date_time().unwrap().to_string(),
        "2024-03-08T09:30:00+01:00"
    );
    assert_eq!(merged.overflow(), Period::ZERO);

    // Re-basing 00:30+02:00 onto +01:00 crosses back into the previous day.
    let merged = Merger::lenient()
        .with_offset_date(offset_date)
        .and_then(|m| m.with_offset_time(at(0, hours(2))))
        .and_then(Merger::merge)
        .unwrap();
    assert_eq!(
        merged.offset_date_time().unwrap().to_string(),
        "2024-03-08T23:30:00+01:00"
    );
    assert_eq!(merged.overflow(), Period::ZERO.with_days(-1));
}

#[test]
fn zones() {
    let rules = fixtures::rules();
    let paris = TimeZone::try_from_str("Europe/Paris").unwrap();
    let summer = PlainDateTime::try_new(2024, 7, 14, 12, 0, 0, 0).unwrap();

    let merged = Merger::strict()
        .with_date_time(summer)
        .and_then(|m| m.with_zone(paris.clone()))
        .and_then(|m| m.merge_with_provider(&rules))
        .unwrap();
    let zoned = merged.zoned_date_time().unwrap();
    assert_eq!(zoned.to_string(), "2024-07-14T12:00:00+02:00[Europe/Paris]");
    assert_eq!(merged.zone(), Some(&paris));
    assert_eq!(merged.offset(), Some(hours(2)));
    assert_eq!(merged.date(), Some(date(2024, 7, 14)));

    let err = Merger::strict()
        .with_date_time(summer)
        .and_then(|m| m.with_offset(hours(1)))
        .and_then(|m| m.with_zone(paris.clone()))
        .and_then(|m| m.merge_with_provider(&rules))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);

    let merged = Merger::lenient()
        .with_date_time(summer)
        .and_then(|m| m.with_offset(hours(1)))
        .and_then(|m| m.with_zone(paris.clone()))
        .and_then(|m| m.merge_with_provider(&rules))
        .unwrap();
    assert_eq!(
        merged.value().unwrap().to_string(),
        "2024-07-14T13:00:00+02:00[Europe/Paris]"
    );

    let gap = PlainDateTime::try_new(2024, 3, 31, 2, 30, 0, 0).unwrap();
    let err = Merger::strict()
        .with_date_time(gap)
        .and_then(|m| m.with_zone(paris.clone()))
        .and_then(|m| m.merge_with_provider(&rules))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidCombination);

    let err = Merger::strict()
        .with_date_time(summer)
        .and_then(|m| m.with_zone(paris))
        .and_then(Merger::merge)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ZoneRules);

    let merged = Merger::strict()
        .with_date_time(summer)
        .and_then(|m| m.with_zone(TimeZone::Fixed(hours(3))))
        .and_then(Merger::merge)
        .unwrap();
    assert_eq!(merged.value().unwrap().to_string(), "2024-07-14T12:00:00+03:00[+03:00]");
}

#[test]
fn supplied_values_must_agree() {
    let err = Merger::strict()
        .with_date(date(2024, 3, 8))
        .and_then(|m| m.with_date(date(2024, 3, 9)))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);

    let merged = Merger::lenient()
        .with_date(date(2024, 3, 8))
        .and_then(|m| m.with_date(date(2024, 3, 9)))
        .and_then(Merger::merge)
        .unwrap();
    assert_eq!(merged.date(), Some(date(2024, 3, 9)));

    let date_time = date(2024, 3, 8).at_time(&PlainTime::NOON);
    let err = Merger::strict()
        .with_date_time(date_time)
        .and_then(|m| m.with_date(date(2024, 3, 9)))
        .and_then(Merger::merge)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);

    let merged = Merger::lenient()
        .with_date_time(date_time)
        .and_then(|m| m.with_date(date(2024, 3, 9)))
        .and_then(Merger::merge)
        .unwrap();
    assert_eq!(merged.date(), Some(date(2024, 3, 8)));
    assert_eq!(merged.value(), Some(MergedValue::DateTime(date_time)));

    let merged = Merger::strict()
        .with_date_time(date_time)
        .and_then(|m| m.with_time(PlainTime::NOON))
        .and_then(Merger::merge)
        .unwrap();
    assert_eq!(merged.value(), Some(MergedValue::DateTime(date_time)));
}

#[test]
fn defaults() {
    assert_eq!(Merger::default().mode(), MergeMode::Strict);
    assert_eq!(Merger::strict().resolver(), DateResolver::Strict);
    assert_eq!(Merger::lenient().resolver(), DateResolver::PartLenient);
    let merged = Merger::lenient().merge().unwrap();
    assert_eq!(merged.value(), None);
    assert!(merged.is_fully_merged());
}
