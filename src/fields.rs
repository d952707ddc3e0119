//! The field registry.
//!
//! Every calendrical field is described by a row in a static table indexed
//! by the field's ordinal. A row holds the field's units and its static
//! range; the behavior that differs between fields (derivation from a value,
//! interpretation of loosely typed input and the contextual maximum) is
//! dispatched on the `Field` enum.

use core::{fmt, str::FromStr};

use crate::{
    builtins::core::{Period, UtcOffset},
    iso::{IsoDate, IsoTime},
    options::Unit,
    utils, CalendricalError, CalendricalResult, MAX_YEAR, MIN_YEAR, NS_PER_DAY,
};

/// A calendrical field.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    NanoOfSecond,
    NanoOfDay,
    MilliOfSecond,
    MilliOfDay,
    SecondOfMinute,
    SecondOfDay,
    MinuteOfHour,
    MinuteOfDay,
    HourOfAmPm,
    ClockHourOfAmPm,
    AmPmOfDay,
    HourOfDay,
    ClockHourOfDay,
    DayOfWeek,
    DayOfMonth,
    DayOfYear,
    WeekOfMonth,
    WeekOfYear,
    WeekOfWeekBasedYear,
    WeekBasedYear,
    MonthOfQuarter,
    QuarterOfYear,
    MonthOfYear,
    Year,
    OffsetSeconds,
}

/// The static description of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRules {
    pub name: &'static str,
    pub base_unit: Unit,
    pub range_unit: Unit,
    pub min: i64,
    pub max: i64,
    /// The smallest maximum the field takes, e.g. 28 for day-of-month.
    pub smallest_max: i64,
    /// Whether out of range input may be normalized into overflow.
    interpretable: bool,
}

const fn rules(
    name: &'static str,
    base_unit: Unit,
    range_unit: Unit,
    min: i64,
    max: i64,
    smallest_max: i64,
    interpretable: bool,
) -> FieldRules {
    FieldRules {
        name,
        base_unit,
        range_unit,
        min,
        max,
        smallest_max,
        interpretable,
    }
}

const NANOS_PER_MILLI: i64 = 1_000_000;
const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// The field table, in `Field` ordinal order.
static FIELD_RULES: [FieldRules; Field::COUNT] = [
    rules("nanoOfSecond", Unit::Nanoseconds, Unit::Seconds, 0, 999_999_999, 999_999_999, true),
    rules("nanoOfDay", Unit::Nanoseconds, Unit::Days, 0, NS_PER_DAY - 1, NS_PER_DAY - 1, true),
    rules("milliOfSecond", Unit::Milliseconds, Unit::Seconds, 0, 999, 999, true),
    rules("milliOfDay", Unit::Milliseconds, Unit::Days, 0, 86_399_999, 86_399_999, true),
    rules("secondOfMinute", Unit::Seconds, Unit::Minutes, 0, 59, 59, true),
    rules("secondOfDay", Unit::Seconds, Unit::Days, 0, 86_399, 86_399, true),
    rules("minuteOfHour", Unit::Minutes, Unit::Hours, 0, 59, 59, true),
    rules("minuteOfDay", Unit::Minutes, Unit::Days, 0, 1_439, 1_439, true),
    rules("hourOfAmPm", Unit::Hours, Unit::HalfDays, 0, 11, 11, true),
    rules("clockHourOfAmPm", Unit::Hours, Unit::HalfDays, 1, 12, 12, true),
    rules("amPmOfDay", Unit::HalfDays, Unit::Days, 0, 1, 1, true),
    rules("hourOfDay", Unit::Hours, Unit::Days, 0, 23, 23, true),
    rules("clockHourOfDay", Unit::Hours, Unit::Days, 1, 24, 24, true),
    rules("dayOfWeek", Unit::Days, Unit::Weeks, 1, 7, 7, true),
    rules("dayOfMonth", Unit::Days, Unit::Months, 1, 31, 28, false),
    rules("dayOfYear", Unit::Days, Unit::Years, 1, 366, 365, false),
    rules("weekOfMonth", Unit::Weeks, Unit::Months, 1, 5, 4, false),
    rules("weekOfYear", Unit::Weeks, Unit::Years, 1, 53, 53, false),
    rules("weekOfWeekBasedYear", Unit::Weeks, Unit::WeekBasedYears, 1, 53, 52, false),
    rules(
        "weekBasedYear",
        Unit::WeekBasedYears,
        Unit::Forever,
        MIN_YEAR as i64,
        MAX_YEAR as i64,
        MAX_YEAR as i64,
        false,
    ),
    rules("monthOfQuarter", Unit::Months, Unit::QuarterYears, 1, 3, 3, true),
    rules("quarterOfYear", Unit::QuarterYears, Unit::Years, 1, 4, 4, true),
    rules("monthOfYear", Unit::Months, Unit::Years, 1, 12, 12, true),
    rules(
        "year",
        Unit::Years,
        Unit::Forever,
        MIN_YEAR as i64,
        MAX_YEAR as i64,
        MAX_YEAR as i64,
        false,
    ),
    rules("offsetSeconds", Unit::Seconds, Unit::Forever, -64_800, 64_800, 64_800, false),
];

impl Field {
    /// The number of registered fields.
    pub const COUNT: usize = 25;

    /// All fields in ordinal order.
    pub const ALL: [Field; Field::COUNT] = [
        Self::NanoOfSecond,
        Self::NanoOfDay,
        Self::MilliOfSecond,
        Self::MilliOfDay,
        Self::SecondOfMinute,
        Self::SecondOfDay,
        Self::MinuteOfHour,
        Self::MinuteOfDay,
        Self::HourOfAmPm,
        Self::ClockHourOfAmPm,
        Self::AmPmOfDay,
        Self::HourOfDay,
        Self::ClockHourOfDay,
        Self::DayOfWeek,
        Self::DayOfMonth,
        Self::DayOfYear,
        Self::WeekOfMonth,
        Self::WeekOfYear,
        Self::WeekOfWeekBasedYear,
        Self::WeekBasedYear,
        Self::MonthOfQuarter,
        Self::QuarterOfYear,
        Self::MonthOfYear,
        Self::Year,
        Self::OffsetSeconds,
    ];

    /// Returns this field's row in the field table.
    #[inline]
    pub fn rules(self) -> &'static FieldRules {
        &FIELD_RULES[self as usize]
    }

    #[inline]
    pub fn name(self) -> &'static str {
        self.rules().name
    }

    #[inline]
    pub fn base_unit(self) -> Unit {
        self.rules().base_unit
    }

    #[inline]
    pub fn range_unit(self) -> Unit {
        self.rules().range_unit
    }

    #[inline]
    pub fn min(self) -> i64 {
        self.rules().min
    }

    #[inline]
    pub fn max(self) -> i64 {
        self.rules().max
    }

    /// Returns whether the field is derived from the time of day.
    #[inline]
    pub fn is_time_based(self) -> bool {
        (self as u8) <= (Self::ClockHourOfDay as u8)
    }

    /// Returns whether the field is derived from the date.
    #[inline]
    pub fn is_date_based(self) -> bool {
        !self.is_time_based() && self != Self::OffsetSeconds
    }

    /// Checks `value` against the field's static range.
    pub fn check_value(self, value: i64) -> CalendricalResult<i64> {
        let rules = self.rules();
        if !(rules.min..=rules.max).contains(&value) {
            return Err(CalendricalError::range()
                .with_message("value is outside the range of the field")
                .with_field(self)
                .with_value(value));
        }
        Ok(value)
    }

    /// Checks `value` against the field's range and narrows it.
    pub(crate) fn check_u8(self, value: i64) -> CalendricalResult<u8> {
        self.check_value(value).map(|v| v as u8)
    }

    /// Normalizes loosely typed input into the field's range.
    ///
    /// A value outside a fixed span is wrapped back into range and the
    /// excess is returned as a period of the field's range unit. Fields
    /// without a fixed span only accept values that are already in range.
    ///
    /// ```rust
    /// use calendrical_rs::{fields::Field, Period};
    ///
    /// let (value, overflow) = Field::MinuteOfHour.interpret(75).unwrap();
    /// assert_eq!(value, 15);
    /// assert_eq!(overflow, Period::ZERO.with_hours(1));
    ///
    /// let (value, overflow) = Field::DayOfWeek.interpret(9).unwrap();
    /// assert_eq!(value, 2);
    /// assert_eq!(overflow, Period::ZERO.with_days(7));
    ///
    /// assert!(Field::DayOfMonth.interpret(32).is_err());
    /// ```
    pub fn interpret(self, value: i64) -> CalendricalResult<(i64, Period)> {
        let rules = self.rules();
        if (rules.min..=rules.max).contains(&value) || !rules.interpretable {
            return self.check_value(value).map(|v| (v, Period::ZERO));
        }
        let span = rules.max - rules.min + 1;
        let offset = i128::from(value) - i128::from(rules.min);
        let carry = offset.div_euclid(i128::from(span));
        let normalized = offset.rem_euclid(i128::from(span)) as i64 + rules.min;
        let carry = i64::try_from(carry).map_err(|_| {
            CalendricalError::overflow()
                .with_field(self)
                .with_value(value)
        })?;
        match rules.range_unit.period_of(carry)? {
            Some(period) => Ok((normalized, period)),
            None => self.check_value(value).map(|v| (v, Period::ZERO)),
        }
    }

    /// Derives this field's value from a calendrical value.
    ///
    /// Returns `None` when the value lacks the part the field is read from,
    /// e.g. a day-of-week requested from a time.
    pub fn derive<T: Calendrical + ?Sized>(self, source: &T) -> Option<i64> {
        if self.is_time_based() {
            return source.iso_time().map(|time| self.derive_from_time(&time));
        }
        if self == Self::OffsetSeconds {
            return source.utc_offset().map(|offset| i64::from(offset.seconds()));
        }
        source.iso_date().map(|date| self.derive_from_date(&date))
    }

    fn derive_from_time(self, time: &IsoTime) -> i64 {
        let hour = i64::from(time.hour);
        let nano_of_day = time.to_nano_of_day();
        match self {
            Self::NanoOfSecond => i64::from(time.nanosecond),
            Self::NanoOfDay => nano_of_day,
            Self::MilliOfSecond => i64::from(time.nanosecond) / NANOS_PER_MILLI,
            Self::MilliOfDay => nano_of_day / NANOS_PER_MILLI,
            Self::SecondOfMinute => i64::from(time.second),
            Self::SecondOfDay => nano_of_day / NANOS_PER_SECOND,
            Self::MinuteOfHour => i64::from(time.minute),
            Self::MinuteOfDay => hour * 60 + i64::from(time.minute),
            Self::HourOfAmPm => hour % 12,
            Self::ClockHourOfAmPm => match hour % 12 {
                0 => 12,
                h => h,
            },
            Self::AmPmOfDay => hour / 12,
            Self::HourOfDay => hour,
            Self::ClockHourOfDay => match hour {
                0 => 24,
                h => h,
            },
            _ => 0,
        }
    }

    fn derive_from_date(self, date: &IsoDate) -> i64 {
        let month = i64::from(date.month);
        match self {
            Self::DayOfWeek => i64::from(date.day_of_week()),
            Self::DayOfMonth => i64::from(date.day),
            Self::DayOfYear => i64::from(date.day_of_year()),
            Self::WeekOfMonth => (i64::from(date.day) - 1) / 7 + 1,
            Self::WeekOfYear => (i64::from(date.day_of_year()) - 1) / 7 + 1,
            Self::WeekOfWeekBasedYear => {
                i64::from(utils::week_date_from_epoch_days(date.to_epoch_days()).1)
            }
            Self::WeekBasedYear => {
                i64::from(utils::week_date_from_epoch_days(date.to_epoch_days()).0)
            }
            Self::MonthOfQuarter => (month - 1) % 3 + 1,
            Self::QuarterOfYear => (month - 1) / 3 + 1,
            Self::MonthOfYear => month,
            Self::Year => i64::from(date.year),
            _ => 0,
        }
    }

    /// Returns the largest value the field takes for the value's context.
    ///
    /// Date-dependent fields need a date; `None` is returned when the source
    /// has none.
    pub fn maximum_for<T: Calendrical + ?Sized>(self, source: &T) -> Option<i64> {
        let date = source.iso_date();
        match self {
            Self::DayOfMonth => date.map(|d| i64::from(utils::days_in_month(d.year, d.month))),
            Self::DayOfYear => date.map(|d| i64::from(utils::days_in_year(d.year))),
            Self::WeekOfMonth => date.map(|d| {
                if d.month == 2 && !utils::is_leap_year(d.year) {
                    4
                } else {
                    5
                }
            }),
            Self::WeekOfWeekBasedYear => date.map(|d| {
                let (week_based_year, _) = utils::week_date_from_epoch_days(d.to_epoch_days());
                i64::from(utils::weeks_in_week_based_year(week_based_year))
            }),
            _ => Some(self.max()),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.name().fmt(f)
    }
}

impl FromStr for Field {
    type Err = CalendricalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or(CalendricalError::general("unknown field name"))
    }
}

/// A value that calendrical fields can be read from.
pub trait Calendrical {
    /// The date part of the value, if it has one.
    fn iso_date(&self) -> Option<IsoDate> {
        None
    }

    /// The time part of the value, if it has one.
    fn iso_time(&self) -> Option<IsoTime> {
        None
    }

    /// The offset from UTC of the value, if it has one.
    fn utc_offset(&self) -> Option<UtcOffset> {
        None
    }

    /// Returns the value of `field`, or `None` when it cannot be derived.
    fn get(&self, field: Field) -> Option<i64> {
        field.derive(self)
    }
}

/// A day of the week.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Weekday {
    Monday = 1,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    /// Returns the weekday for its ISO number, Monday = 1 through Sunday = 7.
    pub fn from_value(value: i64) -> CalendricalResult<Self> {
        let value = Field::DayOfWeek.check_value(value)?;
        Ok(Self::ALL[value as usize - 1])
    }

    /// Returns the ISO number of the weekday.
    #[inline]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Returns the weekday `days` later.
    pub fn plus(self, days: i64) -> Self {
        let index = (i64::from(self.value()) - 1 + days.rem_euclid(7)) % 7;
        Self::ALL[index as usize]
    }

    /// The number of days from this weekday forward to `target`, in `0..7`.
    pub(crate) fn days_until(self, target: Self) -> i64 {
        (i64::from(target.value()) - i64::from(self.value())).rem_euclid(7)
    }
}

/// The half of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AmPm {
    Am,
    Pm,
}

impl AmPm {
    /// Returns the half of the day for an `amPmOfDay` value.
    pub fn from_value(value: i64) -> CalendricalResult<Self> {
        match Field::AmPmOfDay.check_value(value)? {
            0 => Ok(Self::Am),
            _ => Ok(Self::Pm),
        }
    }

    #[inline]
    pub const fn value(self) -> i64 {
        match self {
            Self::Am => 0,
            Self::Pm => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use core::str::FromStr;

    use super::{AmPm, Calendrical, Field, Weekday, FIELD_RULES};
    use crate::{error::ErrorKind, iso::{IsoDate, IsoTime}, options::Unit, Period};

    struct DateOnly(IsoDate);

    impl Calendrical for DateOnly {
        fn iso_date(&self) -> Option<IsoDate> {
            Some(self.0)
        }
    }

    struct TimeOnly(IsoTime);

    impl Calendrical for TimeOnly {
        fn iso_time(&self) -> Option<IsoTime> {
            Some(self.0)
        }
    }

    #[test]
    fn table_is_in_ordinal_order() {
        assert_eq!(FIELD_RULES.len(), Field::ALL.len());
        for (index, field) in Field::ALL.iter().enumerate() {
            assert_eq!(*field as usize, index);
            assert_eq!(Field::from_str(field.name()).unwrap(), *field);
        }
        assert_eq!(
            Field::from_str("fortnightOfYear").map_err(|e| e.kind()),
            Err(ErrorKind::Generic)
        );
    }

    #[test]
    fn check_value_range() {
        assert_eq!(Field::HourOfDay.check_value(23), Ok(23));
        let err = Field::HourOfDay.check_value(24).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);
        assert_eq!(err.field(), Some(Field::HourOfDay));
        assert_eq!(err.value(), Some(24));
        assert!(Field::ClockHourOfDay.check_value(24).is_ok());
        assert!(Field::ClockHourOfDay.check_value(0).is_err());
        assert!(Field::OffsetSeconds.check_value(-64_800).is_ok());
        assert!(Field::OffsetSeconds.check_value(64_801).is_err());
    }

    #[test]
    fn interpret_wraps_fixed_spans() {
        assert_eq!(
            Field::DayOfWeek.interpret(9).unwrap(),
            (2, Period::ZERO.with_days(7))
        );
        assert_eq!(
            Field::DayOfWeek.interpret(0).unwrap(),
            (7, Period::ZERO.with_days(-7))
        );
        assert_eq!(
            Field::MinuteOfHour.interpret(75).unwrap(),
            (15, Period::ZERO.with_hours(1))
        );
        assert_eq!(
            Field::HourOfDay.interpret(-1).unwrap(),
            (23, Period::ZERO.with_days(-1))
        );
        assert_eq!(
            Field::MonthOfYear.interpret(14).unwrap(),
            (2, Period::ZERO.with_years(1))
        );
        assert_eq!(
            Field::MonthOfQuarter.interpret(4).unwrap(),
            (1, Period::ZERO.with_months(3))
        );
        assert_eq!(
            Field::HourOfAmPm.interpret(12).unwrap(),
            (0, Period::ZERO.with_hours(12))
        );
        assert_eq!(
            Field::ClockHourOfDay.interpret(25).unwrap(),
            (1, Period::ZERO.with_days(1))
        );
        assert_eq!(
            Field::ClockHourOfAmPm.interpret(13).unwrap(),
            (1, Period::ZERO.with_hours(12))
        );
        assert_eq!(
            Field::ClockHourOfAmPm.interpret(0).unwrap(),
            (12, Period::ZERO.with_hours(-12))
        );
        assert_eq!(Field::SecondOfMinute.interpret(30).unwrap(), (30, Period::ZERO));
    }

    #[test]
    fn interpret_rejects_variable_spans() {
        for field in [
            Field::DayOfMonth,
            Field::DayOfYear,
            Field::WeekOfMonth,
            Field::WeekOfYear,
            Field::WeekOfWeekBasedYear,
            Field::Year,
        ] {
            assert_eq!(
                field.interpret(field.max() + 1).map_err(|e| e.kind()),
                Err(ErrorKind::Range),
                "{field}"
            );
        }
    }

    #[test]
    fn derive_needs_matching_part() {
        let date = DateOnly(IsoDate::new_unchecked(2024, 2, 29));
        assert_eq!(date.get(Field::DayOfWeek), Some(4));
        assert_eq!(date.get(Field::DayOfYear), Some(60));
        assert_eq!(date.get(Field::WeekOfMonth), Some(5));
        assert_eq!(date.get(Field::WeekOfYear), Some(9));
        assert_eq!(date.get(Field::QuarterOfYear), Some(1));
        assert_eq!(date.get(Field::MonthOfQuarter), Some(2));
        assert_eq!(date.get(Field::WeekOfWeekBasedYear), Some(9));
        assert_eq!(date.get(Field::WeekBasedYear), Some(2024));
        assert_eq!(date.get(Field::HourOfDay), None);
        assert_eq!(date.get(Field::OffsetSeconds), None);

        let time = TimeOnly(IsoTime::new_unchecked(0, 30, 15, 123_456_789));
        assert_eq!(time.get(Field::ClockHourOfDay), Some(24));
        assert_eq!(time.get(Field::ClockHourOfAmPm), Some(12));
        assert_eq!(time.get(Field::AmPmOfDay), Some(0));
        assert_eq!(time.get(Field::MilliOfSecond), Some(123));
        assert_eq!(time.get(Field::SecondOfDay), Some(30 * 60 + 15));
        assert_eq!(time.get(Field::MinuteOfDay), Some(30));
        assert_eq!(time.get(Field::DayOfMonth), None);

        let time = TimeOnly(IsoTime::new_unchecked(13, 0, 0, 0));
        assert_eq!(time.get(Field::HourOfAmPm), Some(1));
        assert_eq!(time.get(Field::ClockHourOfAmPm), Some(1));
        assert_eq!(time.get(Field::AmPmOfDay), Some(1));
    }

    #[test]
    fn contextual_maximums() {
        let max = |field: Field, y, m, d| {
            field.maximum_for(&DateOnly(IsoDate::new_unchecked(y, m, d)))
        };
        assert_eq!(max(Field::DayOfMonth, 2023, 2, 1), Some(28));
        assert_eq!(max(Field::DayOfMonth, 2024, 2, 1), Some(29));
        assert_eq!(max(Field::DayOfMonth, 2024, 4, 1), Some(30));
        assert_eq!(max(Field::DayOfYear, 2023, 6, 1), Some(365));
        assert_eq!(max(Field::DayOfYear, 2024, 6, 1), Some(366));
        assert_eq!(max(Field::WeekOfMonth, 2023, 2, 1), Some(4));
        assert_eq!(max(Field::WeekOfMonth, 2024, 2, 1), Some(5));
        assert_eq!(max(Field::WeekOfMonth, 2023, 3, 1), Some(5));
        // 2020 started on a Wednesday and was a leap year.
        assert_eq!(max(Field::WeekOfWeekBasedYear, 2020, 6, 1), Some(53));
        // 2015 started on a Thursday.
        assert_eq!(max(Field::WeekOfWeekBasedYear, 2015, 6, 1), Some(53));
        assert_eq!(max(Field::WeekOfWeekBasedYear, 2023, 6, 1), Some(52));
        assert_eq!(max(Field::HourOfDay, 2023, 6, 1), Some(23));

        let time = TimeOnly(IsoTime::new_unchecked(1, 0, 0, 0));
        assert_eq!(Field::DayOfMonth.maximum_for(&time), None);
    }

    #[test]
    fn units_and_groups() {
        assert_eq!(Field::DayOfWeek.base_unit(), Unit::Days);
        assert_eq!(Field::DayOfWeek.range_unit(), Unit::Weeks);
        assert!(Field::ClockHourOfDay.is_time_based());
        assert!(Field::DayOfWeek.is_date_based());
        assert!(!Field::OffsetSeconds.is_date_based());
        assert!(!Field::OffsetSeconds.is_time_based());
    }

    #[test]
    fn weekdays() {
        assert_eq!(Weekday::from_value(1).unwrap(), Weekday::Monday);
        assert!(Weekday::from_value(8).is_err());
        assert_eq!(Weekday::Sunday.plus(1), Weekday::Monday);
        assert_eq!(Weekday::Monday.plus(-1), Weekday::Sunday);
        assert_eq!(Weekday::Friday.days_until(Weekday::Monday), 3);
        assert_eq!(Weekday::Friday.days_until(Weekday::Friday), 0);
        assert_eq!(AmPm::from_value(1).unwrap(), AmPm::Pm);
    }
}
