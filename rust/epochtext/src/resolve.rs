//! Calendar, clock and zone arithmetic over extracted fields.
//!
//! Day counts use the proleptic Gregorian civil-day algorithm over signed
//! years, so pre-epoch and BC-era dates resolve without consulting any
//! platform calendar type. Astronomical year numbering applies throughout:
//! year 1 BC is year 0, year 2 BC is year -1.

use crate::extract::{DateFields, TimeFields, ZoneField};
use crate::{MICROS_PER_HOUR, MICROS_PER_MINUTE, MICROS_PER_SECOND};

/// Fixed offsets for the recognized zone abbreviations, in seconds from
/// UTC. This is deliberately a static table rather than a time-zone
/// database: wire data uses a handful of common North American and UTC
/// spellings, and a fixed mapping keeps parsing deterministic.
const ZONE_ABBREVIATIONS: &[(&str, i64)] = &[
    ("Z", 0),
    ("UT", 0),
    ("UTC", 0),
    ("GMT", 0),
    ("EST", -5 * 3600),
    ("EDT", -4 * 3600),
    ("CST", -6 * 3600),
    ("CDT", -5 * 3600),
    ("MST", -7 * 3600),
    ("MDT", -6 * 3600),
    ("PST", -8 * 3600),
    ("PDT", -7 * 3600),
    ("AKST", -9 * 3600),
    ("AKDT", -8 * 3600),
    ("HST", -10 * 3600),
];

const DAYS_IN_MONTH: &[u32] = &[31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Reinterprets a written year under astronomical numbering when the `BC`
/// era marker is present: year N BC becomes year -(N - 1).
pub(crate) fn astronomical_year(year: i64, bc_era: bool) -> i64 {
    if bc_era { -(year - 1) } else { year }
}

/// Validates the day of month and converts the (era-adjusted) calendar
/// date to a signed day count from 1970-01-01.
pub(crate) fn civil_day(date: &DateFields, bc_era: bool) -> Option<i64> {
    let year = astronomical_year(date.year, bc_era);
    if date.day > days_in_month(year, date.month) {
        return None;
    }
    Some(epoch_day_from_civil(year, date.month, date.day))
}

/// Days from 1970-01-01 to `year-month-day` in the proleptic Gregorian
/// calendar, negative for earlier dates. Years are astronomical and may be
/// arbitrarily far in the past or future. Uses the 400-year-era
/// decomposition from Howard Hinnant's civil-calendar algorithms.
pub(crate) fn epoch_day_from_civil(year: i64, month: u32, day: u32) -> i64 {
    let y = if month <= 2 { year - 1 } else { year };
    let era = (if y >= 0 { y } else { y - 399 }) / 400;
    let yoe = y - era * 400; // [0, 399]
    let mp = (if month > 2 { month - 3 } else { month + 9 }) as i64; // [0, 11], March-first
    let doy = (153 * mp + 2) / 5 + day as i64 - 1; // [0, 365]
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy; // [0, 146096]
    era * 146_097 + doe - 719_468
}

/// Gregorian leap rule, including the century/400-year exceptions; valid
/// for negative astronomical years (year 0 is a leap year).
pub(crate) fn is_leap_year(year: i64) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

pub(crate) fn days_in_month(year: i64, month: u32) -> u32 {
    if month == 2 && is_leap_year(year) {
        29
    } else {
        DAYS_IN_MONTH[month as usize - 1]
    }
}

/// Microseconds since midnight, or `None` when a clock component is out of
/// range. The fraction is already capped below one second by extraction,
/// so the result is always below 86_400_000_000.
pub(crate) fn time_of_day_micros(time: &TimeFields) -> Option<i64> {
    if time.hour > 23 || time.minute > 59 || time.second > 59 {
        return None;
    }
    Some(
        time.hour as i64 * MICROS_PER_HOUR
            + time.minute as i64 * MICROS_PER_MINUTE
            + time.second as i64 * MICROS_PER_SECOND
            + time.fraction_micros as i64,
    )
}

/// Signed offset from UTC in microseconds, or `None` for an abbreviation
/// outside the fixed table or a numeric offset with out-of-range parts.
pub(crate) fn zone_offset_micros(zone: &ZoneField) -> Option<i64> {
    match zone {
        ZoneField::Unspecified => Some(0),
        ZoneField::Abbreviation(name) => ZONE_ABBREVIATIONS
            .iter()
            .find(|(abbrev, _)| *abbrev == name.as_str())
            .map(|(_, seconds)| seconds * MICROS_PER_SECOND),
        ZoneField::Offset {
            negative,
            hours,
            minutes,
        } => {
            if *hours > 23 || *minutes > 59 {
                return None;
            }
            let seconds = *hours as i64 * 3600 + *minutes as i64 * 60;
            let seconds = if *negative { -seconds } else { seconds };
            Some(seconds * MICROS_PER_SECOND)
        }
    }
}
