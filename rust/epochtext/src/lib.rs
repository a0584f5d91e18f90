//! Flexible parsing of human-authored date, time and date-time strings
//! into the canonical 64-bit values consumed by a schema-driven record
//! serializer: epoch days, epoch microseconds, and microseconds since
//! midnight.
//!
//! Parsing is a single pass through three stages: a sanitizer that strips
//! stray line breaks, a token extractor applying a fixed positional
//! grammar, and a resolver performing proleptic-Gregorian calendar, zone
//! and era arithmetic. There is no state between calls; every function
//! here is pure and may be invoked concurrently without coordination.

mod extract;
mod resolve;
mod sanitize;


use thiserror::Error;

pub const MICROS_PER_SECOND: i64 = 1_000_000;
pub const MICROS_PER_MINUTE: i64 = MICROS_PER_SECOND * 60;
pub const MICROS_PER_HOUR: i64 = MICROS_PER_MINUTE * 60;
pub const MICROS_PER_DAY: i64 = MICROS_PER_HOUR * 24;

/// The single failure mode of the parser: the input does not match the
/// positional grammar for the requested output kind, or a recognized
/// field carries an out-of-range value. There is no partial success and
/// no silent coercion; the embedding converter decides whether a failure
/// is fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("malformed temporal input '{input}': {message}")]
    MalformedInput { input: String, message: String },
}

impl ParseError {
    fn malformed(input: impl Into<String>, message: impl Into<String>) -> ParseError {
        ParseError::MalformedInput {
            input: input.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ParseError>;

/// Parses a date string into a signed count of whole days from
/// 1970-01-01, negative for earlier dates.
///
/// Accepted forms include `2021-01-01`, `2021/1/1`, `2021.1.1`,
/// `2021 Jan 04` and a trailing `BC` era marker. Time and zone segments,
/// when present, are ignored; a bare date denotes a calendar day, not an
/// instant.
///
/// ```
/// assert_eq!(epochtext::parse_epoch_day("2021-1-1").unwrap(), 18628);
/// assert_eq!(epochtext::parse_epoch_day("2021-1-1 BC").unwrap(), -1457318);
/// ```
pub fn parse_epoch_day(text: &str) -> Result<i64> {
    let sanitized = sanitize::strip_line_breaks(text);
    let fields = extract::TokenExtractor::extract_date_time(&sanitized)
        .ok_or_else(|| ParseError::malformed(text, "unrecognized date format"))?;
    resolve::civil_day(&fields.date, fields.bc_era)
        .ok_or_else(|| ParseError::malformed(text, "day out of range for month"))
}

/// Parses a date-time string into signed microseconds from
/// 1970-01-01T00:00:00 UTC.
///
/// The written date and time are taken as local to the stated zone
/// (absence means UTC) and converted to UTC by subtracting the zone
/// offset. A missing time segment means midnight. Fractional seconds
/// keep their first six digits, truncated rather than rounded.
///
/// ```
/// let micros = epochtext::parse_epoch_micros("2021-01-01T01:01:01Z").unwrap();
/// assert_eq!(micros, 1609462861000000);
/// ```
pub fn parse_epoch_micros(text: &str) -> Result<i64> {
    let sanitized = sanitize::strip_line_breaks(text);
    let fields = extract::TokenExtractor::extract_date_time(&sanitized)
        .ok_or_else(|| ParseError::malformed(text, "unrecognized date-time format"))?;
    let epoch_day = resolve::civil_day(&fields.date, fields.bc_era)
        .ok_or_else(|| ParseError::malformed(text, "day out of range for month"))?;
    let time_micros = resolve::time_of_day_micros(&fields.time)
        .ok_or_else(|| ParseError::malformed(text, "time of day out of range"))?;
    let zone_micros = resolve::zone_offset_micros(&fields.zone)
        .ok_or_else(|| ParseError::malformed(text, "unrecognized time zone"))?;

    epoch_day
        .checked_mul(MICROS_PER_DAY)
        .and_then(|v| v.checked_add(time_micros))
        .and_then(|v| v.checked_sub(zone_micros))
        .ok_or_else(|| ParseError::malformed(text, "instant outside the 64-bit microsecond range"))
}

/// Parses a bare time string into non-negative microseconds since
/// midnight, always below 86_400_000_000.
///
/// Seconds and the fraction are optional; the fraction keeps its first
/// six digits. Date, zone and era fields do not apply to a bare time and
/// are ignored.
///
/// ```
/// assert_eq!(epochtext::parse_time_of_day_micros("01:01").unwrap(), 3660000000);
/// ```
pub fn parse_time_of_day_micros(text: &str) -> Result<i64> {
    let sanitized = sanitize::strip_line_breaks(text);
    let fields = extract::TokenExtractor::extract_time_of_day(&sanitized)
        .ok_or_else(|| ParseError::malformed(text, "unrecognized time format"))?;
    resolve::time_of_day_micros(&fields)
        .ok_or_else(|| ParseError::malformed(text, "time of day out of range"))
}
