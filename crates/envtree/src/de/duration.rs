//! Parsing durations like `1h30m`.

use std::{error, fmt, time::Duration};

const NANOS_IN_MICRO: u64 = 1_000;
const NANOS_IN_MILLI: u64 = 1_000_000;
const NANOS_IN_SECOND: u64 = 1_000_000_000;

/// Recognized units and the number of nanoseconds in each of them.
const UNITS: &[(&str, u64)] = &[
    ("ns", 1),
    ("us", NANOS_IN_MICRO),
    ("µs", NANOS_IN_MICRO), // U+00B5 micro sign
    ("μs", NANOS_IN_MICRO), // U+03BC Greek small letter mu
    ("ms", NANOS_IN_MILLI),
    ("s", NANOS_IN_SECOND),
    ("m", 60 * NANOS_IN_SECOND),
    ("h", 3_600 * NANOS_IN_SECOND),
];

/// Fraction digits beyond this precision are ignored.
const MAX_FRACTION_DIGITS: usize = 18;

/// Errors that can occur when parsing a duration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DurationError {
    /// Duration is malformed (e.g., empty, or a component doesn't have any digits).
    Invalid,
    /// Duration component misses a unit, like in `10`.
    MissingUnit,
    /// Duration component has an unknown unit.
    UnknownUnit(String),
    /// Duration is negative.
    Negative,
    /// Duration overflows `u64` nanoseconds.
    Overflow,
}

impl fmt::Display for DurationError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid => formatter.write_str("invalid duration"),
            Self::MissingUnit => formatter.write_str("missing unit in duration"),
            Self::UnknownUnit(unit) => write!(
                formatter,
                "unknown unit {unit:?} in duration; expected one of ns, us, ms, s, m, h"
            ),
            Self::Negative => formatter.write_str("negative durations are not supported"),
            Self::Overflow => formatter.write_str("duration out of range"),
        }
    }
}

impl error::Error for DurationError {}

fn split_digits(s: &str) -> (&str, &str) {
    let len = s.find(|ch: char| !ch.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(len)
}

/// Parses a single `<number><unit>` component from the start of `s`, returning the number of nanoseconds
/// and the remaining string.
fn parse_component(s: &str) -> Result<(u128, &str), DurationError> {
    let (int_part, rest) = split_digits(s);
    let (frac_part, rest) = match rest.strip_prefix('.') {
        Some(after_dot) => split_digits(after_dot),
        None => ("", rest),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(DurationError::Invalid);
    }

    let unit_len = rest
        .find(|ch: char| ch == '.' || ch.is_ascii_digit())
        .unwrap_or(rest.len());
    if unit_len == 0 {
        return Err(DurationError::MissingUnit);
    }
    let (unit, rest) = rest.split_at(unit_len);
    let unit_nanos = UNITS
        .iter()
        .find_map(|&(name, nanos)| (name == unit).then_some(u128::from(nanos)))
        .ok_or_else(|| DurationError::UnknownUnit(unit.to_owned()))?;

    let int_value: u128 = if int_part.is_empty() {
        0
    } else {
        int_part.parse().map_err(|_| DurationError::Overflow)?
    };
    let mut nanos = int_value
        .checked_mul(unit_nanos)
        .ok_or(DurationError::Overflow)?;

    if !frac_part.is_empty() {
        let frac_part = &frac_part[..frac_part.len().min(MAX_FRACTION_DIGITS)];
        let frac_digits = u32::try_from(frac_part.len()).map_err(|_| DurationError::Overflow)?;
        let scale = 10_u128.pow(frac_digits);
        let frac_value: u128 = frac_part.parse().map_err(|_| DurationError::Overflow)?;
        // Truncates sub-nanosecond precision.
        nanos = nanos
            .checked_add(frac_value * unit_nanos / scale)
            .ok_or(DurationError::Overflow)?;
    }
    Ok((nanos, rest))
}

/// Parses a duration like `1h30m`, `300ms` or `1.5s`.
pub(super) fn parse_duration(raw: &str) -> Result<Duration, DurationError> {
    let (is_negative, mut s) = if let Some(rest) = raw.strip_prefix('-') {
        (true, rest)
    } else {
        (false, raw.strip_prefix('+').unwrap_or(raw))
    };

    if s == "0" {
        return Ok(Duration::ZERO);
    }
    if s.is_empty() {
        return Err(DurationError::Invalid);
    }

    let mut total_nanos = 0_u128;
    while !s.is_empty() {
        let (nanos, rest) = parse_component(s)?;
        total_nanos = total_nanos
            .checked_add(nanos)
            .filter(|&total| total <= u128::from(u64::MAX))
            .ok_or(DurationError::Overflow)?;
        s = rest;
    }

    if is_negative && total_nanos != 0 {
        return Err(DurationError::Negative);
    }
    let total_nanos = u64::try_from(total_nanos).map_err(|_| DurationError::Overflow)?;
    Ok(Duration::from_nanos(total_nanos))
}
