//! The field merger.
//!
//! A [`Merger`] collects a sparse bag of field values and canonical values,
//! then repeatedly combines compatible groups into more complete values until
//! nothing else can be combined. Every combination consumes its inputs.
//! Fields left over at the end are cross-checked against the values that
//! were produced.
//!
//! ```rust
//! use calendrical_rs::{fields::Field, merger::Merger, PlainDateTime};
//!
//! let merged = Merger::strict()
//!     .with_field(Field::Year, 2024).unwrap()
//!     .with_field(Field::DayOfYear, 100).unwrap()
//!     .with_field(Field::ClockHourOfAmPm, 12).unwrap()
//!     .with_field(Field::AmPmOfDay, 1).unwrap()
//!     .merge()
//!     .unwrap();
//!
//! assert_eq!(
//!     merged.date_time(),
//!     Some(PlainDateTime::try_new(2024, 4, 9, 12, 0, 0, 0).unwrap())
//! );
//! ```

use core::str::FromStr;

use writeable::{impl_display_with_writeable, Writeable};

use crate::{
    builtins::core::{
        OffsetDate, OffsetDateTime, OffsetTime, Period, PlainDate, PlainDateTime, PlainTime,
        TimeZone, UtcOffset, ZonedDateTime,
    },
    calendrical_assert,
    fields::{Calendrical, Field, Weekday},
    iso::{IsoDate, IsoTime},
    options::{DateResolver, MergeMode},
    provider::{NeverProvider, ZoneRulesProvider},
    utils, CalendricalError, CalendricalResult, CalendricalUnwrap,
};

#[cfg(test)]
mod tests;

const NANOS_PER_SECOND: i64 = 1_000_000_000;
const NANOS_PER_MILLI: i64 = 1_000_000;

/// A rule consumes inputs and produces a more complete value, returning
/// whether it fired.
type Rule = fn(&mut Merger) -> CalendricalResult<bool>;

/// The merge rules, in the order they are tried within a round.
const RULES: [(&str, Rule); 23] = [
    ("offsetSeconds", Merger::merge_offset_seconds),
    ("milliOfSecond", Merger::merge_milli_of_second),
    ("nanoOfDay", Merger::merge_nano_of_day),
    ("milliOfDay", Merger::merge_milli_of_day),
    ("secondOfDay", Merger::merge_second_of_day),
    ("minuteOfDay", Merger::merge_minute_of_day),
    ("clockHourOfDay", Merger::merge_clock_hour_of_day),
    ("clockHourOfAmPm", Merger::merge_clock_hour_of_ampm),
    ("amPmOfDay", Merger::merge_ampm_of_day),
    ("hourOfDay", Merger::merge_hour_of_day),
    ("quarterOfYear", Merger::merge_quarter_of_year),
    ("yearMonthDay", Merger::merge_year_month_day),
    ("yearDay", Merger::merge_year_day),
    ("yearWeekDay", Merger::merge_year_week_day),
    ("yearMonthWeekDay", Merger::merge_year_month_week_day),
    ("weekBasedYear", Merger::merge_week_based_year),
    ("dateTime", Merger::merge_date_time),
    ("offsetDateTime", Merger::merge_offset_date_time),
    ("offsetDate", Merger::merge_offset_date),
    ("offsetTime", Merger::merge_offset_time),
    ("offsetDateOffsetTime", Merger::merge_offset_date_offset_time),
    ("offsetDateTime(offsetDate)", Merger::merge_offset_date_time_of_date),
    ("offsetDateTime(offsetTime)", Merger::merge_offset_date_time_of_time),
];

/// Every firing consumes at least one input, so the rules settle within
/// this many rounds.
const MAX_ROUNDS: usize = Field::COUNT + 16;

/// Resolves a bag of field values into canonical values.
///
/// Builders return an error when a value is rejected on input: an out of
/// range field under `MergeMode::Strict`, or a second, different value for
/// the same field or canonical value under `MergeMode::Strict`. Under
/// `MergeMode::Lenient` the last value supplied wins, and out of range
/// fields are normalized at merge time with the excess recorded in
/// [`Merged::overflow`].
#[derive(Debug, Clone)]
pub struct Merger {
    mode: MergeMode,
    resolver: DateResolver,
    consumed: [bool; Field::COUNT],
    state: Merged,
}

impl Default for Merger {
    fn default() -> Self {
        Self::new(MergeMode::default())
    }
}

// ==== Public API ====

impl Merger {
    /// Creates an empty merger using the mode's default date resolver.
    #[must_use]
    pub fn new(mode: MergeMode) -> Self {
        Self {
            mode,
            resolver: mode.default_resolver(),
            consumed: [false; Field::COUNT],
            state: Merged::empty(),
        }
    }

    #[inline]
    #[must_use]
    pub fn strict() -> Self {
        Self::new(MergeMode::Strict)
    }

    #[inline]
    #[must_use]
    pub fn lenient() -> Self {
        Self::new(MergeMode::Lenient)
    }

    /// Sets the resolver used when a day does not exist in its month.
    #[inline]
    #[must_use]
    pub fn with_resolver(mut self, resolver: DateResolver) -> Self {
        self.resolver = resolver;
        self
    }

    #[inline]
    #[must_use]
    pub const fn mode(&self) -> MergeMode {
        self.mode
    }

    #[inline]
    #[must_use]
    pub const fn resolver(&self) -> DateResolver {
        self.resolver
    }

    /// Adds a field value.
    pub fn with_field(mut self, field: Field, value: i64) -> CalendricalResult<Self> {
        if self.mode.is_strict() {
            field.check_value(value)?;
        }
        match self.state.fields[field as usize] {
            Some(existing) if existing != value && self.mode.is_strict() => {
                return Err(CalendricalError::conflict()
                    .with_message("field was supplied twice with different values")
                    .with_field(field)
                    .with_value(value));
            }
            #[cfg(feature = "log")]
            Some(existing) if existing != value => {
                log::debug!("replacing {field} value {existing} with {value}");
            }
            _ => {}
        }
        self.state.fields[field as usize] = Some(value);
        Ok(self)
    }

    /// Adds a field value by the field's name, e.g. `"dayOfMonth"`.
    pub fn with_raw_field(self, name: &str, value: i64) -> CalendricalResult<Self> {
        let field = Field::from_str(name)?;
        self.with_field(field, value)
    }

    pub fn with_date(mut self, date: PlainDate) -> CalendricalResult<Self> {
        set_slot(self.mode, &mut self.state.date, date, "date")?;
        Ok(self)
    }

    pub fn with_time(mut self, time: PlainTime) -> CalendricalResult<Self> {
        set_slot(self.mode, &mut self.state.time, time, "time")?;
        Ok(self)
    }

    pub fn with_date_time(mut self, date_time: PlainDateTime) -> CalendricalResult<Self> {
        set_slot(self.mode, &mut self.state.date_time, date_time, "date-time")?;
        Ok(self)
    }

    pub fn with_offset(mut self, offset: UtcOffset) -> CalendricalResult<Self> {
        set_slot(self.mode, &mut self.state.offset, offset, "offset")?;
        Ok(self)
    }

    pub fn with_zone(mut self, zone: TimeZone) -> CalendricalResult<Self> {
        set_slot(self.mode, &mut self.state.zone, zone, "zone")?;
        Ok(self)
    }

    pub fn with_offset_date(mut self, offset_date: OffsetDate) -> CalendricalResult<Self> {
        set_slot(self.mode, &mut self.state.offset_date, offset_date, "offset date")?;
        Ok(self)
    }

    pub fn with_offset_time(mut self, offset_time: OffsetTime) -> CalendricalResult<Self> {
        set_slot(self.mode, &mut self.state.offset_time, offset_time, "offset time")?;
        Ok(self)
    }

    /// Merges without zone rules.
    ///
    /// Fixed offset zones merge as usual; combining an identified zone fails
    /// with a zone rules error.
    pub fn merge(self) -> CalendricalResult<Merged> {
        self.merge_with_provider(&NeverProvider)
    }

    /// Merges, looking up identified zones in `provider`.
    pub fn merge_with_provider(
        mut self,
        provider: &impl ZoneRulesProvider,
    ) -> CalendricalResult<Merged> {
        self.normalize()?;
        self.run_rules(provider)?;
        self.reconcile_values()?;
        self.cross_check()?;
        Ok(self.state)
    }
}

// ==== Private API ====

/// Fills a canonical value slot, rejecting a different value in strict mode.
fn set_slot<T: PartialEq>(
    mode: MergeMode,
    slot: &mut Option<T>,
    value: T,
    what: &'static str,
) -> CalendricalResult<()> {
    if mode.is_strict() && slot.as_ref().is_some_and(|existing| *existing != value) {
        return Err(CalendricalError::conflict()
            .with_message(alloc::format!("{what} was supplied twice with different values")));
    }
    *slot = Some(value);
    Ok(())
}

/// Drops a supplied value once a more complete value carries the same
/// information. A disagreement is a conflict in strict mode; in lenient mode
/// the more complete value wins.
fn reconcile<T: PartialEq>(
    mode: MergeMode,
    slot: &mut Option<T>,
    merged: Option<T>,
    what: &'static str,
) -> CalendricalResult<()> {
    let (Some(own), Some(merged)) = (slot.as_ref(), merged) else {
        return Ok(());
    };
    if *own != merged {
        if mode.is_strict() {
            return Err(CalendricalError::conflict().with_message(alloc::format!(
                "supplied {what} disagrees with the merged value"
            )));
        }
        #[cfg(feature = "log")]
        log::debug!("dropping a supplied {what} that disagrees with the merged value");
    }
    *slot = None;
    Ok(())
}

impl Merger {
    #[inline]
    fn peek(&self, field: Field) -> Option<i64> {
        self.state.fields[field as usize]
    }

    #[inline]
    fn put(&mut self, field: Field, value: i64) {
        self.state.fields[field as usize] = Some(value);
    }

    fn take(&mut self, field: Field) -> Option<i64> {
        let value = self.state.fields[field as usize].take();
        if value.is_some() {
            self.consumed[field as usize] = true;
        }
        value
    }

    /// Takes every field of `fields`, or nothing when one is missing.
    fn take_all<const N: usize>(
        &mut self,
        fields: [Field; N],
    ) -> CalendricalResult<Option<[i64; N]>> {
        if fields.iter().any(|field| self.peek(*field).is_none()) {
            return Ok(None);
        }
        let mut values = [0; N];
        for (value, field) in values.iter_mut().zip(fields) {
            *value = self.take(field).calendrical_unwrap()?;
        }
        Ok(Some(values))
    }

    /// Takes the longest run of present fields from the front of `chain`.
    /// Missing fields after the run read as zero.
    fn take_chain<const N: usize>(
        &mut self,
        chain: [Field; N],
    ) -> CalendricalResult<Option<[i64; N]>> {
        let present = chain
            .iter()
            .take_while(|field| self.peek(**field).is_some())
            .count();
        if present == 0 {
            return Ok(None);
        }
        let mut values = [0; N];
        for (value, field) in values.iter_mut().zip(&chain[..present]) {
            *value = self.take(*field).calendrical_unwrap()?;
        }
        Ok(Some(values))
    }

    /// Brings lenient input into range, collecting the excess as overflow.
    fn normalize(&mut self) -> CalendricalResult<()> {
        if self.mode.is_strict() {
            return Ok(());
        }
        for field in Field::ALL {
            let Some(raw) = self.peek(field) else {
                continue;
            };
            let (value, excess) = field.interpret(raw)?;
            #[cfg(feature = "log")]
            if !excess.is_zero() {
                log::debug!("normalized {field} {raw} to {value} with overflow {excess}");
            }
            self.put(field, value);
            self.state.overflow = self.state.overflow.checked_add(&excess)?;
        }
        Ok(())
    }

    fn run_rules(&mut self, provider: &impl ZoneRulesProvider) -> CalendricalResult<()> {
        let mut rounds = 0;
        loop {
            calendrical_assert!(
                rounds < MAX_ROUNDS,
                "merge rules did not settle after {rounds} rounds"
            );
            rounds += 1;
            let mut fired = false;
            for (_name, rule) in RULES {
                if rule(self)? {
                    #[cfg(feature = "log")]
                    log::trace!("merge rule {_name} fired");
                    fired = true;
                }
            }
            if self.merge_zone(provider)? {
                #[cfg(feature = "log")]
                log::trace!("merge rule zonedDateTime fired");
                fired = true;
            }
            if !fired {
                return Ok(());
            }
        }
    }

    // ==== Rules ====

    fn merge_offset_seconds(&mut self) -> CalendricalResult<bool> {
        if self.state.offset().is_some() {
            return Ok(false);
        }
        let Some(seconds) = self.take(Field::OffsetSeconds) else {
            return Ok(false);
        };
        self.state.offset = Some(UtcOffset::from_total_seconds(seconds as i32)?);
        Ok(true)
    }

    fn merge_milli_of_second(&mut self) -> CalendricalResult<bool> {
        if self.state.time().is_some() || self.peek(Field::NanoOfSecond).is_some() {
            return Ok(false);
        }
        let Some(milli) = self.take(Field::MilliOfSecond) else {
            return Ok(false);
        };
        self.put(Field::NanoOfSecond, milli * NANOS_PER_MILLI);
        Ok(true)
    }

    fn merge_nano_of_day(&mut self) -> CalendricalResult<bool> {
        if self.state.time().is_some() {
            return Ok(false);
        }
        let Some(nano_of_day) = self.take(Field::NanoOfDay) else {
            return Ok(false);
        };
        self.state.time = Some(PlainTime::from_nano_of_day(nano_of_day)?);
        Ok(true)
    }

    fn merge_milli_of_day(&mut self) -> CalendricalResult<bool> {
        if self.state.time().is_some() {
            return Ok(false);
        }
        let Some(milli_of_day) = self.take(Field::MilliOfDay) else {
            return Ok(false);
        };
        self.state.time = Some(PlainTime::from_nano_of_day(milli_of_day * NANOS_PER_MILLI)?);
        Ok(true)
    }

    fn merge_second_of_day(&mut self) -> CalendricalResult<bool> {
        if self.state.time().is_some() {
            return Ok(false);
        }
        let Some([second_of_day, nano]) =
            self.take_chain([Field::SecondOfDay, Field::NanoOfSecond])?
        else {
            return Ok(false);
        };
        let nano_of_day = second_of_day * NANOS_PER_SECOND + nano;
        self.state.time = Some(PlainTime::from_nano_of_day(nano_of_day)?);
        Ok(true)
    }

    fn merge_minute_of_day(&mut self) -> CalendricalResult<bool> {
        if self.state.time().is_some() {
            return Ok(false);
        }
        let Some([minute_of_day, second, nano]) = self.take_chain([
            Field::MinuteOfDay,
            Field::SecondOfMinute,
            Field::NanoOfSecond,
        ])?
        else {
            return Ok(false);
        };
        let nano_of_day = (minute_of_day * 60 + second) * NANOS_PER_SECOND + nano;
        self.state.time = Some(PlainTime::from_nano_of_day(nano_of_day)?);
        Ok(true)
    }

    /// Clock hour 24 is midnight at the start of the same day.
    fn merge_clock_hour_of_day(&mut self) -> CalendricalResult<bool> {
        if self.state.time().is_some() || self.peek(Field::HourOfDay).is_some() {
            return Ok(false);
        }
        let Some(clock_hour) = self.take(Field::ClockHourOfDay) else {
            return Ok(false);
        };
        self.put(Field::HourOfDay, clock_hour % 24);
        Ok(true)
    }

    /// Clock hour 12 is hour 0 of its half of the day.
    fn merge_clock_hour_of_ampm(&mut self) -> CalendricalResult<bool> {
        if self.state.time().is_some() || self.peek(Field::HourOfAmPm).is_some() {
            return Ok(false);
        }
        let Some(clock_hour) = self.take(Field::ClockHourOfAmPm) else {
            return Ok(false);
        };
        self.put(Field::HourOfAmPm, clock_hour % 12);
        Ok(true)
    }

    fn merge_ampm_of_day(&mut self) -> CalendricalResult<bool> {
        if self.state.time().is_some() || self.peek(Field::HourOfDay).is_some() {
            return Ok(false);
        }
        let Some([ampm, hour]) = self.take_all([Field::AmPmOfDay, Field::HourOfAmPm])? else {
            return Ok(false);
        };
        self.put(Field::HourOfDay, ampm * 12 + hour);
        Ok(true)
    }

    fn merge_hour_of_day(&mut self) -> CalendricalResult<bool> {
        if self.state.time().is_some() {
            return Ok(false);
        }
        let Some([hour, minute, second, nano]) = self.take_chain([
            Field::HourOfDay,
            Field::MinuteOfHour,
            Field::SecondOfMinute,
            Field::NanoOfSecond,
        ])?
        else {
            return Ok(false);
        };
        self.state.time = Some(PlainTime::try_new(
            hour as u8,
            minute as u8,
            second as u8,
            nano as u32,
        )?);
        Ok(true)
    }

    fn merge_quarter_of_year(&mut self) -> CalendricalResult<bool> {
        if self.state.date().is_some() || self.peek(Field::MonthOfYear).is_some() {
            return Ok(false);
        }
        let Some([quarter, month]) = self.take_all([Field::QuarterOfYear, Field::MonthOfQuarter])?
        else {
            return Ok(false);
        };
        self.put(Field::MonthOfYear, (quarter - 1) * 3 + month);
        Ok(true)
    }

    fn merge_year_month_day(&mut self) -> CalendricalResult<bool> {
        if self.state.date().is_some() {
            return Ok(false);
        }
        let Some([year, month, day]) =
            self.take_all([Field::Year, Field::MonthOfYear, Field::DayOfMonth])?
        else {
            return Ok(false);
        };
        let iso = self.resolver.resolve(year as i32, month as u8, day as u8)?;
        self.state.date = Some(PlainDate::new_unchecked(iso));
        Ok(true)
    }

    fn merge_year_day(&mut self) -> CalendricalResult<bool> {
        if self.state.date().is_some() {
            return Ok(false);
        }
        let Some([year, day_of_year]) = self.take_all([Field::Year, Field::DayOfYear])? else {
            return Ok(false);
        };
        let iso = self
            .resolver
            .resolve_day_of_year(year as i32, day_of_year as u16)?;
        self.state.date = Some(PlainDate::new_unchecked(iso));
        Ok(true)
    }

    /// Week `n` of a year is the seven days starting on day `7n - 6`.
    fn merge_year_week_day(&mut self) -> CalendricalResult<bool> {
        if self.state.date().is_some() {
            return Ok(false);
        }
        let Some([year, week, day_of_week]) =
            self.take_all([Field::Year, Field::WeekOfYear, Field::DayOfWeek])?
        else {
            return Ok(false);
        };
        let start = PlainDate::try_new(year as i32, 1, 1)?.plus_days((week - 1) * 7)?;
        let date = nearest_weekday(start, day_of_week)?;
        if self.resolver == DateResolver::Strict && i64::from(date.year()) != year {
            return Err(CalendricalError::invalid_combination()
                .with_message("week of year does not exist in this year")
                .with_field(Field::WeekOfYear)
                .with_value(week));
        }
        self.state.date = Some(date);
        Ok(true)
    }

    /// Week `n` of a month is the seven days starting on day `7n - 6`.
    fn merge_year_month_week_day(&mut self) -> CalendricalResult<bool> {
        if self.state.date().is_some() {
            return Ok(false);
        }
        let Some([year, month, week, day_of_week]) = self.take_all([
            Field::Year,
            Field::MonthOfYear,
            Field::WeekOfMonth,
            Field::DayOfWeek,
        ])?
        else {
            return Ok(false);
        };
        let start = PlainDate::try_new(year as i32, month as u8, 1)?.plus_days((week - 1) * 7)?;
        let date = nearest_weekday(start, day_of_week)?;
        if self.resolver == DateResolver::Strict && i64::from(date.month()) != month {
            return Err(CalendricalError::invalid_combination()
                .with_message("week of month does not exist in this month")
                .with_field(Field::WeekOfMonth)
                .with_value(week));
        }
        self.state.date = Some(date);
        Ok(true)
    }

    fn merge_week_based_year(&mut self) -> CalendricalResult<bool> {
        if self.state.date().is_some() {
            return Ok(false);
        }
        let Some([week_based_year, week, day_of_week]) = self.take_all([
            Field::WeekBasedYear,
            Field::WeekOfWeekBasedYear,
            Field::DayOfWeek,
        ])?
        else {
            return Ok(false);
        };
        let week_based_year = week_based_year as i32;
        let weeks = i64::from(utils::weeks_in_week_based_year(week_based_year));
        if self.resolver == DateResolver::Strict && week > weeks {
            return Err(CalendricalError::invalid_combination()
                .with_message("week does not exist in this week-based-year")
                .with_field(Field::WeekOfWeekBasedYear)
                .with_value(week));
        }
        let epoch_days =
            utils::week_one_start(week_based_year) + (week - 1) * 7 + (day_of_week - 1);
        self.state.date = Some(PlainDate::from_epoch_days(epoch_days)?);
        Ok(true)
    }

    fn merge_date_time(&mut self) -> CalendricalResult<bool> {
        if self.state.date_time.is_some() {
            return Ok(false);
        }
        let (Some(date), Some(time)) = (self.state.date, self.state.time) else {
            return Ok(false);
        };
        self.state.date_time = Some(date.at_time(&time));
        self.state.date = None;
        self.state.time = None;
        Ok(true)
    }

    fn merge_offset_date_time(&mut self) -> CalendricalResult<bool> {
        if self.state.offset_date_time.is_some() {
            return Ok(false);
        }
        let (Some(date_time), Some(offset)) = (self.state.date_time, self.state.offset) else {
            return Ok(false);
        };
        self.state.offset_date_time = Some(date_time.at_offset(offset));
        self.state.date_time = None;
        self.state.offset = None;
        Ok(true)
    }

    fn merge_offset_date(&mut self) -> CalendricalResult<bool> {
        if self.state.offset_date.is_some() || self.state.time.is_some() {
            return Ok(false);
        }
        let (Some(date), Some(offset)) = (self.state.date, self.state.offset) else {
            return Ok(false);
        };
        self.state.offset_date = Some(date.at_offset(offset));
        self.state.date = None;
        self.state.offset = None;
        Ok(true)
    }

    fn merge_offset_time(&mut self) -> CalendricalResult<bool> {
        if self.state.offset_time.is_some() || self.state.date.is_some() {
            return Ok(false);
        }
        let (Some(time), Some(offset)) = (self.state.time, self.state.offset) else {
            return Ok(false);
        };
        self.state.offset_time = Some(time.at_offset(offset));
        self.state.time = None;
        self.state.offset = None;
        Ok(true)
    }

    /// Joins an offset date with an offset time. Differing offsets are a
    /// conflict in strict mode; in lenient mode the time is moved to the
    /// date's offset and any day it crosses joins the overflow.
    fn merge_offset_date_offset_time(&mut self) -> CalendricalResult<bool> {
        if self.state.offset_date_time.is_some() {
            return Ok(false);
        }
        let (Some(offset_date), Some(offset_time)) =
            (self.state.offset_date, self.state.offset_time)
        else {
            return Ok(false);
        };
        let mut time = offset_time.time();
        if offset_date.offset() != offset_time.offset() {
            if self.mode.is_strict() {
                return Err(CalendricalError::conflict()
                    .with_message("offset date and offset time have different offsets")
                    .with_field(Field::OffsetSeconds)
                    .with_value(i64::from(offset_time.offset().seconds())));
            }
            let (rebased, days) = offset_time.with_offset_same_instant(offset_date.offset());
            #[cfg(feature = "log")]
            log::debug!("rebased {offset_time} onto {} moving {days} days", offset_date.offset());
            time = rebased.time();
            self.state.overflow = self
                .state
                .overflow
                .checked_add(&Period::ZERO.with_days(days))?;
        }
        self.state.offset_date_time = Some(offset_date.at_time(&time));
        self.state.offset_date = None;
        self.state.offset_time = None;
        Ok(true)
    }

    fn merge_offset_date_time_of_date(&mut self) -> CalendricalResult<bool> {
        if self.state.offset_date_time.is_some() {
            return Ok(false);
        }
        let (Some(offset_date), Some(time)) = (self.state.offset_date, self.state.time) else {
            return Ok(false);
        };
        self.state.offset_date_time = Some(offset_date.at_time(&time));
        self.state.offset_date = None;
        self.state.time = None;
        Ok(true)
    }

    fn merge_offset_date_time_of_time(&mut self) -> CalendricalResult<bool> {
        if self.state.offset_date_time.is_some() {
            return Ok(false);
        }
        let (Some(date), Some(offset_time)) = (self.state.date, self.state.offset_time) else {
            return Ok(false);
        };
        self.state.offset_date_time = Some(
            date.at_time(&offset_time.time())
                .at_offset(offset_time.offset()),
        );
        self.state.date = None;
        self.state.offset_time = None;
        Ok(true)
    }

    /// Places an offset date-time, or a local date-time without an offset,
    /// in the supplied zone.
    fn merge_zone(&mut self, provider: &impl ZoneRulesProvider) -> CalendricalResult<bool> {
        if self.state.zoned_date_time.is_some() {
            return Ok(false);
        }
        let Some(zone) = self.state.zone.clone() else {
            return Ok(false);
        };
        let zoned = if let Some(offset_date_time) = self.state.offset_date_time.take() {
            ZonedDateTime::from_offset_date_time_with_provider(
                &offset_date_time,
                zone,
                self.mode,
                provider,
            )?
        } else if let (Some(date_time), None) = (self.state.date_time, self.state.offset()) {
            self.state.date_time = None;
            ZonedDateTime::from_local_with_provider(date_time, zone, self.mode, provider)?
        } else {
            return Ok(false);
        };
        self.state.zoned_date_time = Some(zoned);
        self.state.zone = None;
        Ok(true)
    }

    // ==== Final checks ====

    /// Drops supplied values that a more complete value already covers.
    fn reconcile_values(&mut self) -> CalendricalResult<()> {
        let mode = self.mode;
        let state = &mut self.state;

        let merged = state.zoned_date_time.as_ref().map(ZonedDateTime::to_offset_date_time);
        reconcile(mode, &mut state.offset_date_time, merged, "offset date-time")?;
        let merged = state.zoned_date_time.as_ref().map(|z| z.zone().clone());
        reconcile(mode, &mut state.zone, merged, "zone")?;

        let merged = state.upper_date_time();
        reconcile(mode, &mut state.date_time, merged, "date-time")?;
        let merged = state.upper_offset_date();
        reconcile(mode, &mut state.offset_date, merged, "offset date")?;
        let merged = state.upper_offset_time();
        reconcile(mode, &mut state.offset_time, merged, "offset time")?;

        let merged = state.upper_date();
        reconcile(mode, &mut state.date, merged, "date")?;
        let merged = state.upper_time();
        reconcile(mode, &mut state.time, merged, "time")?;
        let merged = state.upper_offset();
        reconcile(mode, &mut state.offset, merged, "offset")
    }

    /// Checks leftover fields against the merged values they can be derived
    /// from. A matching field is consumed; a mismatch is a conflict in
    /// strict mode and is dropped in lenient mode.
    fn cross_check(&mut self) -> CalendricalResult<()> {
        for field in Field::ALL {
            let Some(value) = self.peek(field) else {
                continue;
            };
            let Some(derived) = self.state.get(field) else {
                continue;
            };
            if derived != value && self.mode.is_strict() {
                let mut err = CalendricalError::conflict()
                    .with_message("field disagrees with the merged value")
                    .with_field(field);
                if let Some(source) = self.source_of(field) {
                    err = err.with_field(source);
                }
                return Err(err.with_value(value));
            }
            #[cfg(feature = "log")]
            if derived != value {
                log::debug!("dropping {field} {value}, the merged value has {derived}");
            }
            self.take(field);
        }
        Ok(())
    }

    /// Picks the consumed field a leftover field is checked against: one
    /// with the same range unit, else the same base unit, else any from
    /// the same part of the value.
    fn source_of(&self, field: Field) -> Option<Field> {
        let same_part = move |other: &Field| {
            self.consumed[*other as usize]
                && other.is_time_based() == field.is_time_based()
                && other.is_date_based() == field.is_date_based()
        };
        let mut candidates = Field::ALL.into_iter().filter(same_part);
        candidates
            .clone()
            .find(|other| other.range_unit() == field.range_unit())
            .or_else(|| {
                candidates
                    .clone()
                    .find(|other| other.base_unit() == field.base_unit())
            })
            .or_else(|| candidates.next())
    }
}

/// Returns the first date on or after `start` that falls on `day_of_week`.
fn nearest_weekday(start: PlainDate, day_of_week: i64) -> CalendricalResult<PlainDate> {
    let target = Weekday::from_value(day_of_week)?;
    start.plus_days(start.day_of_week().days_until(target))
}

// ==== Merged ====

/// The result of a merge.
///
/// Each accessor returns the value when the merge produced it directly or
/// as part of a more complete value. Fields that could not be merged or
/// checked remain available through [`Merged::unmerged`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Merged {
    fields: [Option<i64>; Field::COUNT],
    date: Option<PlainDate>,
    time: Option<PlainTime>,
    date_time: Option<PlainDateTime>,
    offset: Option<UtcOffset>,
    zone: Option<TimeZone>,
    offset_date: Option<OffsetDate>,
    offset_time: Option<OffsetTime>,
    offset_date_time: Option<OffsetDateTime>,
    zoned_date_time: Option<ZonedDateTime>,
    overflow: Period,
}

/// The most complete value a merge produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergedValue {
    ZonedDateTime(ZonedDateTime),
    OffsetDateTime(OffsetDateTime),
    DateTime(PlainDateTime),
    OffsetDate(OffsetDate),
    OffsetTime(OffsetTime),
    Date(PlainDate),
    Time(PlainTime),
    Offset(UtcOffset),
    Zone(TimeZone),
}

impl Merged {
    const fn empty() -> Self {
        Self {
            fields: [None; Field::COUNT],
            date: None,
            time: None,
            date_time: None,
            offset: None,
            zone: None,
            offset_date: None,
            offset_time: None,
            offset_date_time: None,
            zoned_date_time: None,
            overflow: Period::ZERO,
        }
    }

    fn upper_date_time(&self) -> Option<PlainDateTime> {
        self.offset_date_time
            .map(|odt| odt.date_time())
            .or_else(|| self.zoned_date_time.as_ref().map(ZonedDateTime::date_time))
    }

    fn upper_offset_date(&self) -> Option<OffsetDate> {
        self.offset_date_time().map(|odt| odt.to_offset_date())
    }

    fn upper_offset_time(&self) -> Option<OffsetTime> {
        self.offset_date_time().map(|odt| odt.to_offset_time())
    }

    fn upper_date(&self) -> Option<PlainDate> {
        self.date_time()
            .map(|dt| dt.date())
            .or_else(|| self.offset_date().map(|od| od.date()))
    }

    fn upper_time(&self) -> Option<PlainTime> {
        self.date_time()
            .map(|dt| dt.time())
            .or_else(|| self.offset_time().map(|ot| ot.time()))
    }

    fn upper_offset(&self) -> Option<UtcOffset> {
        self.offset_date()
            .map(|od| od.offset())
            .or_else(|| self.offset_time().map(|ot| ot.offset()))
    }

    #[must_use]
    pub fn date(&self) -> Option<PlainDate> {
        self.date.or_else(|| self.upper_date())
    }

    #[must_use]
    pub fn time(&self) -> Option<PlainTime> {
        self.time.or_else(|| self.upper_time())
    }

    #[must_use]
    pub fn date_time(&self) -> Option<PlainDateTime> {
        self.date_time.or_else(|| self.upper_date_time())
    }

    #[must_use]
    pub fn offset(&self) -> Option<UtcOffset> {
        self.offset.or_else(|| self.upper_offset())
    }

    #[must_use]
    pub fn zone(&self) -> Option<&TimeZone> {
        self.zone
            .as_ref()
            .or_else(|| self.zoned_date_time.as_ref().map(ZonedDateTime::zone))
    }

    #[must_use]
    pub fn offset_date(&self) -> Option<OffsetDate> {
        self.offset_date.or_else(|| self.upper_offset_date())
    }

    #[must_use]
    pub fn offset_time(&self) -> Option<OffsetTime> {
        self.offset_time.or_else(|| self.upper_offset_time())
    }

    #[must_use]
    pub fn offset_date_time(&self) -> Option<OffsetDateTime> {
        self.offset_date_time.or_else(|| {
            self.zoned_date_time
                .as_ref()
                .map(ZonedDateTime::to_offset_date_time)
        })
    }

    #[must_use]
    pub fn zoned_date_time(&self) -> Option<&ZonedDateTime> {
        self.zoned_date_time.as_ref()
    }

    /// Returns the most complete value produced, if any.
    #[must_use]
    pub fn value(&self) -> Option<MergedValue> {
        if let Some(zoned) = &self.zoned_date_time {
            return Some(MergedValue::ZonedDateTime(zoned.clone()));
        }
        self.offset_date_time
            .map(MergedValue::OffsetDateTime)
            .or_else(|| self.date_time.map(MergedValue::DateTime))
            .or_else(|| self.offset_date.map(MergedValue::OffsetDate))
            .or_else(|| self.offset_time.map(MergedValue::OffsetTime))
            .or_else(|| self.date.map(MergedValue::Date))
            .or_else(|| self.time.map(MergedValue::Time))
            .or_else(|| self.offset.map(MergedValue::Offset))
            .or_else(|| self.zone.clone().map(MergedValue::Zone))
    }

    /// Returns the fields that were neither merged nor checked, in field
    /// order.
    pub fn unmerged(&self) -> impl Iterator<Item = (Field, i64)> + '_ {
        Field::ALL
            .into_iter()
            .filter_map(|field| self.fields[field as usize].map(|value| (field, value)))
    }

    /// Returns an unmerged field's value.
    #[inline]
    #[must_use]
    pub fn unmerged_value(&self, field: Field) -> Option<i64> {
        self.fields[field as usize]
    }

    /// Returns whether every supplied field was merged or checked.
    #[must_use]
    pub fn is_fully_merged(&self) -> bool {
        self.fields.iter().all(Option::is_none)
    }

    /// Returns the excess collected from out of range lenient input and
    /// from re-based times. The merged values do not include it.
    #[inline]
    #[must_use]
    pub const fn overflow(&self) -> Period {
        self.overflow
    }
}

impl Calendrical for Merged {
    fn iso_date(&self) -> Option<IsoDate> {
        self.date().map(|date| date.iso)
    }

    fn iso_time(&self) -> Option<IsoTime> {
        self.time().map(|time| time.iso)
    }

    fn utc_offset(&self) -> Option<UtcOffset> {
        self.offset()
    }
}

impl Writeable for MergedValue {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        match self {
            Self::ZonedDateTime(value) => value.write_to(sink),
            Self::OffsetDateTime(value) => value.write_to(sink),
            Self::DateTime(value) => value.write_to(sink),
            Self::OffsetDate(value) => value.write_to(sink),
            Self::OffsetTime(value) => value.write_to(sink),
            Self::Date(value) => value.write_to(sink),
            Self::Time(value) => value.write_to(sink),
            Self::Offset(value) => value.write_to(sink),
            Self::Zone(value) => value.write_to(sink),
        }
    }
}

impl_display_with_writeable!(MergedValue);
