//! Tokenization of sanitized timestamp text into calendar, clock, zone and
//! era fields.
//!
//! The extractor applies a fixed positional grammar: date segment, optional
//! date/time separator plus time segment, optional zone segment, optional
//! trailing era marker. Each segment is recognized by pattern dispatch over
//! a small set of accepted spellings rather than by trying full preformatted
//! layouts, so mixed separators within one string are fine (`2021-1/1` is
//! accepted just like `2021-1-1`).

/// Calendar fields as written, before any era adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DateFields {
    pub year: i64,
    pub month: u32,
    pub day: u32,
}

/// Clock fields; absence of a time segment yields the all-zero default
/// (midnight). The fraction is already normalized to microsecond scale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct TimeFields {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub fraction_micros: u32,
}

/// Zone segment as extracted. Offset resolution (table lookup, range
/// checks) is the resolver's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ZoneField {
    /// No zone token present; interpreted downstream as UTC.
    Unspecified,
    /// An alphabetic token such as `Z`, `UTC` or `PST`, kept verbatim.
    Abbreviation(String),
    /// A signed numeric offset, `±HH[:MM]` / `±HHMM` / `±HH`, possibly
    /// anchored to a `GMT`/`UT`/`UTC` prefix.
    Offset {
        negative: bool,
        hours: u32,
        minutes: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DateTimeFields {
    pub date: DateFields,
    pub time: TimeFields,
    pub zone: ZoneField,
    pub bc_era: bool,
}

pub(crate) struct TokenExtractor;

impl TokenExtractor {
    const MONTH_ABBREVIATIONS: &'static [&'static str] = &[
        "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
    ];

    /// Scale factors turning 1..=6 significant fraction digits into a
    /// microsecond count, indexed by digit count minus one.
    const FRACTION_SCALE: &'static [u32] = &[100_000, 10_000, 1_000, 100, 10, 1];

    const MAX_YEAR_DIGITS: usize = 6;

    /// Extracts date, optional time, optional zone and optional era marker
    /// from a sanitized string. Returns `None` when the mandatory date core
    /// is missing or a present segment does not match its grammar.
    pub fn extract_date_time(s: &str) -> Option<DateTimeFields> {
        if !s.is_ascii() {
            return None;
        }
        let s = s.trim();

        let (date, s) = Self::scan_date(s)?;
        let (time, s) = Self::scan_optional_time(s)?;
        let (zone, bc_era) = Self::scan_zone_and_era(s)?;

        Some(DateTimeFields {
            date,
            time,
            zone,
            bc_era,
        })
    }

    /// Extracts a bare time-of-day string, `HH:MM[:SS[.fraction]]`. A
    /// trailing zone or era token is tolerated and discarded; a bare time
    /// denotes no absolute instant, so neither can carry meaning.
    pub fn extract_time_of_day(s: &str) -> Option<TimeFields> {
        if !s.is_ascii() {
            return None;
        }
        let s = s.trim();
        if !Self::looks_like_time(s) {
            return None;
        }
        let (time, rest) = Self::scan_time(s)?;
        let (_zone, _bc_era) = Self::scan_zone_and_era(rest)?;
        Some(time)
    }

    /// Scans the mandatory date segment: year digits, separator, month
    /// (numeric or 3-letter abbreviation), separator, day digits.
    fn scan_date(s: &str) -> Option<(DateFields, &str)> {
        let (year_digits, s) = Self::scan_digits(s);
        if year_digits.is_empty() || year_digits.len() > Self::MAX_YEAR_DIGITS {
            return None;
        }
        let year = Self::str_to_u64(year_digits)? as i64;

        let s = Self::skip_date_separator(s)?;
        let (month, s) = Self::scan_month(s)?;
        if !(1..=12).contains(&month) {
            return None;
        }

        let s = Self::skip_date_separator(s)?;
        let (day_digits, s) = Self::scan_digits(s);
        if day_digits.is_empty() || day_digits.len() > 2 {
            return None;
        }
        let day = Self::str_to_u64(day_digits)? as u32;
        if !(1..=31).contains(&day) {
            return None;
        }

        Some((DateFields { year, month, day }, s))
    }

    /// A date separator is a single `-`, `/` or `.`, or a run of spaces.
    fn skip_date_separator(s: &str) -> Option<&str> {
        match s.as_bytes().first() {
            Some(b'-') | Some(b'/') | Some(b'.') => Some(&s[1..]),
            Some(b' ') => Some(s.trim_start_matches(' ')),
            _ => None,
        }
    }

    fn scan_month(s: &str) -> Option<(u32, &str)> {
        let (digits, rest) = Self::scan_digits(s);
        if !digits.is_empty() {
            if digits.len() > 2 {
                return None;
            }
            return Some((Self::str_to_u64(digits)? as u32, rest));
        }
        let (alpha, rest) = Self::scan_alphabetic(s);
        if alpha.len() != 3 {
            return None;
        }
        let month = Self::MONTH_ABBREVIATIONS
            .iter()
            .position(|name| alpha.eq_ignore_ascii_case(name))?;
        Some((month as u32 + 1, rest))
    }

    /// Scans the time segment when one follows the date, consuming the `T`
    /// or whitespace separator in front of it. Absence of a time segment is
    /// not an error; the remainder is handed on to zone/era scanning.
    fn scan_optional_time(s: &str) -> Option<(TimeFields, &str)> {
        if let Some(after) = s.strip_prefix('T') {
            if Self::looks_like_time(after) {
                return Self::scan_time(after);
            }
        }
        let trimmed = s.trim_start();
        if trimmed.len() < s.len() && Self::looks_like_time(trimmed) {
            return Self::scan_time(trimmed);
        }
        Some((TimeFields::default(), s))
    }

    fn looks_like_time(s: &str) -> bool {
        let (digits, rest) = Self::scan_digits(s);
        (1..=2).contains(&digits.len()) && rest.starts_with(':')
    }

    /// `HH:MM[:SS[.fraction]]`; each clock component is 1 or 2 digits.
    /// Range validation happens in the resolver.
    fn scan_time(s: &str) -> Option<(TimeFields, &str)> {
        let (hour, s) = Self::scan_clock_component(s)?;
        let s = s.strip_prefix(':')?;
        let (minute, s) = Self::scan_clock_component(s)?;

        let (second, fraction_micros, s) = if let Some(after) = s.strip_prefix(':') {
            let (second, after) = Self::scan_clock_component(after)?;
            if let Some(frac) = after.strip_prefix('.') {
                let (fraction_micros, rest) = Self::scan_fraction(frac)?;
                (second, fraction_micros, rest)
            } else {
                (second, 0, after)
            }
        } else {
            (0, 0, s)
        };

        Some((
            TimeFields {
                hour,
                minute,
                second,
                fraction_micros,
            },
            s,
        ))
    }

    fn scan_clock_component(s: &str) -> Option<(u32, &str)> {
        let (digits, rest) = Self::scan_digits(s);
        if digits.is_empty() || digits.len() > 2 {
            return None;
        }
        Some((Self::str_to_u64(digits)? as u32, rest))
    }

    /// Normalizes a fractional-seconds token to microsecond scale: the
    /// first 6 digits are significant (truncated, never rounded), fewer
    /// than 6 digits are right-zero-padded.
    fn scan_fraction(s: &str) -> Option<(u32, &str)> {
        let (digits, rest) = Self::scan_digits(s);
        if digits.is_empty() {
            return None;
        }
        let significant = &digits[..digits.len().min(6)];
        let value = Self::str_to_u64(significant)? as u32;
        Some((value * Self::FRACTION_SCALE[significant.len() - 1], rest))
    }

    /// Scans the optional zone segment and the optional trailing `BC`
    /// marker, in that order. Only trailing whitespace may remain after
    /// them. A numeric offset may attach directly or after whitespace; an
    /// era marker always requires separating whitespace.
    fn scan_zone_and_era(s: &str) -> Option<(ZoneField, bool)> {
        let trimmed = s.trim_start();
        if trimmed.is_empty() {
            return Some((ZoneField::Unspecified, false));
        }
        let had_whitespace = trimmed.len() < s.len();

        if Self::is_era_marker(trimmed) {
            return had_whitespace.then_some((ZoneField::Unspecified, true));
        }

        let (zone, rest) = Self::scan_zone(trimmed)?;

        let after = rest.trim_start();
        if after.is_empty() {
            return Some((zone, false));
        }
        if after.len() < rest.len() && Self::is_era_marker(after) {
            return Some((zone, true));
        }
        None
    }

    fn is_era_marker(s: &str) -> bool {
        let (alpha, rest) = Self::scan_alphabetic(s);
        alpha.eq_ignore_ascii_case("bc") && rest.trim().is_empty()
    }

    fn scan_zone(s: &str) -> Option<(ZoneField, &str)> {
        if s.starts_with(['+', '-']) {
            return Self::scan_numeric_offset(s);
        }
        let (alpha, rest) = Self::scan_alphabetic(s);
        if alpha.is_empty() {
            return None;
        }
        // GMT+08:00 style: a UTC-equivalent prefix anchoring a numeric
        // offset. Any other abbreviation must stand alone.
        if matches!(alpha, "GMT" | "UT" | "UTC") && rest.starts_with(['+', '-']) {
            return Self::scan_numeric_offset(rest);
        }
        Some((ZoneField::Abbreviation(alpha.to_string()), rest))
    }

    /// `±HH:MM`, `±HHMM` or `±HH`.
    fn scan_numeric_offset(s: &str) -> Option<(ZoneField, &str)> {
        let negative = s.starts_with('-');
        let s = &s[1..];

        let (digits, rest) = Self::scan_digits(s);
        let (hours, minutes, rest) = match digits.len() {
            1 | 2 => {
                let hours = Self::str_to_u64(digits)? as u32;
                if let Some(after) = rest.strip_prefix(':') {
                    let (minute_digits, after) = Self::scan_digits(after);
                    if minute_digits.len() != 2 {
                        return None;
                    }
                    (hours, Self::str_to_u64(minute_digits)? as u32, after)
                } else {
                    (hours, 0, rest)
                }
            }
            4 => {
                let hours = Self::str_to_u64(&digits[..2])? as u32;
                let minutes = Self::str_to_u64(&digits[2..])? as u32;
                (hours, minutes, rest)
            }
            _ => return None,
        };

        Some((
            ZoneField::Offset {
                negative,
                hours,
                minutes,
            },
            rest,
        ))
    }

    /// Splits the leading run of ASCII digits off the front of `s`.
    fn scan_digits(s: &str) -> (&str, &str) {
        let end = s
            .as_bytes()
            .iter()
            .position(|b| !b.is_ascii_digit())
            .unwrap_or(s.len());
        s.split_at(end)
    }

    /// Splits the leading run of ASCII letters off the front of `s`.
    fn scan_alphabetic(s: &str) -> (&str, &str) {
        let end = s
            .as_bytes()
            .iter()
            .position(|b| !b.is_ascii_alphabetic())
            .unwrap_or(s.len());
        s.split_at(end)
    }

    fn str_to_u64(s: &str) -> Option<u64> {
        let mut res: u64 = 0;
        for &b in s.as_bytes() {
            if !b.is_ascii_digit() {
                return None;
            }
            res = res.checked_mul(10)?.checked_add((b - b'0') as u64)?;
        }
        Some(res)
    }
}
