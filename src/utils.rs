//! Utility date and time equations for the proleptic ISO calendar.
//!
//! Dates are counted as epoch days, the number of days since 1970-01-01.
//! Every function here is total over the supported year range
//! (`MIN_YEAR..=MAX_YEAR`); range validation is left to the callers.

/// The number of days in a 400 year cycle.
pub(crate) const DAYS_PER_CYCLE: i64 = 146_097;

/// The number of days from year zero to 1970-01-01.
///
/// There are five 400 year cycles from year zero to 2000, and 30 years
/// from 1970 to 2000 including seven leap years.
pub(crate) const DAYS_0000_TO_1970: i64 = DAYS_PER_CYCLE * 5 - (30 * 365 + 7);

/// The Modified Julian Day number of 1970-01-01.
pub(crate) const MJD_EPOCH_OFFSET: i64 = 40_587;

/// The first day of each month in a standard year, as a zero based day of year.
const MONTH_STARTS: [u16; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

/// Returns whether `year` is a leap year in the proleptic Gregorian calendar.
#[inline]
pub const fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Returns the number of days in the year.
#[inline]
pub const fn days_in_year(year: i32) -> u16 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

/// Returns the length of `month` in `year`.
///
/// `month` must be in `1..=12`.
#[inline]
pub const fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Returns the epoch days for a valid year, month and day.
pub(crate) const fn epoch_days_from_ymd(year: i32, month: u8, day: u8) -> i64 {
    let y = year as i64;
    let m = month as i64;
    let mut total = 365 * y;
    if y >= 0 {
        total += (y + 3) / 4 - (y + 99) / 100 + (y + 399) / 400;
    } else {
        total -= y / -4 - y / -100 + y / -400;
    }
    total += (367 * m - 362) / 12;
    total += day as i64 - 1;
    if m > 2 {
        total -= 1;
        if !is_leap_year(year) {
            total -= 1;
        }
    }
    total - DAYS_0000_TO_1970
}

/// Returns the year, month and day of an epoch day.
///
/// The count is shifted so that years start on March 1st, which places the
/// leap day at the end of each 400 year cycle.
pub(crate) const fn ymd_from_epoch_days(epoch_days: i64) -> (i32, u8, u8) {
    let mut zero_day = epoch_days + DAYS_0000_TO_1970 - 60;
    let mut adjust = 0;
    if zero_day < 0 {
        let adjust_cycles = (zero_day + 1) / DAYS_PER_CYCLE - 1;
        adjust = adjust_cycles * 400;
        zero_day += -adjust_cycles * DAYS_PER_CYCLE;
    }
    let mut year_est = (400 * zero_day + 591) / DAYS_PER_CYCLE;
    let mut doy_est = zero_day - days_before_march_year(year_est);
    if doy_est < 0 {
        year_est -= 1;
        doy_est = zero_day - days_before_march_year(year_est);
    }
    year_est += adjust;

    let march_month0 = (doy_est * 5 + 2) / 153;
    let month = (march_month0 + 2) % 12 + 1;
    let day = doy_est - (march_month0 * 306 + 5) / 10 + 1;
    year_est += march_month0 / 10;

    (year_est as i32, month as u8, day as u8)
}

#[inline]
const fn days_before_march_year(year: i64) -> i64 {
    365 * year + year / 4 - year / 100 + year / 400
}

/// Returns the one based day of the year.
#[inline]
pub(crate) const fn day_of_year(year: i32, month: u8, day: u8) -> u16 {
    let leap_day = if month > 2 && is_leap_year(year) { 1 } else { 0 };
    MONTH_STARTS[month as usize - 1] + leap_day + day as u16
}

/// Returns the month and day for a one based day of the year.
///
/// `day_of_year` must be valid for `year`.
pub(crate) fn month_day_from_day_of_year(year: i32, day_of_year: u16) -> (u8, u8) {
    let leap = u16::from(is_leap_year(year));
    let mut month = 12u8;
    while month > 1 {
        let start = MONTH_STARTS[month as usize - 1] + if month > 2 { leap } else { 0 };
        if day_of_year > start {
            return (month, (day_of_year - start) as u8);
        }
        month -= 1;
    }
    (1, day_of_year as u8)
}

/// Returns the ISO day of week, Monday = 1 through Sunday = 7.
#[inline]
pub(crate) const fn day_of_week(epoch_days: i64) -> u8 {
    ((epoch_days + MJD_EPOCH_OFFSET + 2).rem_euclid(7) + 1) as u8
}

/// Returns the epoch days of the Monday that starts week one of the
/// week-based-year.
///
/// Week one is the week containing January 4th.
pub(crate) const fn week_one_start(week_based_year: i32) -> i64 {
    let jan_fourth = epoch_days_from_ymd(week_based_year, 1, 4);
    jan_fourth - (day_of_week(jan_fourth) as i64 - 1)
}

/// Returns the number of ISO weeks in a week-based-year.
pub(crate) const fn weeks_in_week_based_year(week_based_year: i32) -> u8 {
    let jan_first = day_of_week(epoch_days_from_ymd(week_based_year, 1, 1));
    if jan_first == 4 || (jan_first == 3 && is_leap_year(week_based_year)) {
        53
    } else {
        52
    }
}

/// Returns the week-based-year and ISO week of an epoch day.
pub(crate) fn week_date_from_epoch_days(epoch_days: i64) -> (i32, u8) {
    let (year, _, _) = ymd_from_epoch_days(epoch_days);
    let mut week_based_year = year;
    let mut start = week_one_start(year);
    if epoch_days < start {
        week_based_year -= 1;
        start = week_one_start(week_based_year);
    } else if epoch_days >= week_one_start(year + 1) {
        week_based_year += 1;
        start = week_one_start(week_based_year);
    }
    (week_based_year, ((epoch_days - start) / 7 + 1) as u8)
}
