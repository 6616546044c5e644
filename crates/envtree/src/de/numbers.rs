//! Numeric coercions with bit width checks.

use std::num::{IntErrorKind, ParseIntError};

use super::CoercionCause;

fn int_error_cause(err: &ParseIntError) -> CoercionCause {
    match err.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => CoercionCause::OutOfRange,
        _ => CoercionCause::InvalidSyntax,
    }
}

/// Parses a base-10 signed integer that must fit into `bits`.
pub(super) fn parse_int(raw: &str, bits: u32) -> Result<i64, CoercionCause> {
    let value: i64 = raw.parse().map_err(|err| int_error_cause(&err))?;
    if bits == 0 || bits > i64::BITS {
        return Err(CoercionCause::OutOfRange);
    }
    if bits < i64::BITS {
        let max = (1_i64 << (bits - 1)) - 1;
        if value > max || value < -max - 1 {
            return Err(CoercionCause::OutOfRange);
        }
    }
    Ok(value)
}

/// Splits off the base prefix. A leading zero followed by more chars is an octal prefix.
fn split_radix(raw: &str) -> (u32, &str, bool) {
    let bytes = raw.as_bytes();
    if bytes.len() >= 2 && bytes[0] == b'0' {
        match bytes[1] {
            b'x' | b'X' => (16, &raw[2..], true),
            b'o' | b'O' => (8, &raw[2..], true),
            b'b' | b'B' => (2, &raw[2..], true),
            _ => (8, &raw[1..], true),
        }
    } else {
        (10, raw, false)
    }
}

/// Removes `_` separators. A separator must follow a digit or the base prefix, and must be followed by a digit.
fn strip_separators(digits: &str, after_prefix: bool) -> Option<String> {
    if !digits.contains('_') {
        return Some(digits.to_owned());
    }

    let mut separator_allowed = after_prefix;
    let mut stripped = String::with_capacity(digits.len());
    for ch in digits.chars() {
        if ch == '_' {
            if !separator_allowed {
                return None;
            }
            separator_allowed = false;
        } else {
            stripped.push(ch);
            separator_allowed = true;
        }
    }
    (!digits.ends_with('_')).then_some(stripped)
}

/// Parses an unsigned integer with an optional base prefix that must fit into `bits`.
pub(super) fn parse_uint(raw: &str, bits: u32) -> Result<u64, CoercionCause> {
    let (radix, digits, has_prefix) = split_radix(raw);
    let digits = strip_separators(digits, has_prefix).ok_or(CoercionCause::InvalidSyntax)?;
    // `from_str_radix()` accepts a leading `+`, which we don't want.
    if digits.is_empty() || digits.starts_with(['+', '-']) {
        return Err(CoercionCause::InvalidSyntax);
    }

    let value = u64::from_str_radix(&digits, radix).map_err(|err| int_error_cause(&err))?;
    if bits == 0 || bits > u64::BITS {
        return Err(CoercionCause::OutOfRange);
    }
    if bits < u64::BITS && value >> bits != 0 {
        return Err(CoercionCause::OutOfRange);
    }
    Ok(value)
}

fn is_infinity_literal(raw: &str) -> bool {
    let unsigned = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

/// Parses a float with the precision determined by `bits`. Finite literals overflowing the precision are errors.
pub(super) fn parse_float(raw: &str, bits: u32) -> Result<f64, CoercionCause> {
    let value = match bits {
        32 => raw.parse::<f32>().map(f64::from),
        64 => raw.parse::<f64>(),
        _ => return Err(CoercionCause::OutOfRange),
    };
    let value = value.map_err(|_| CoercionCause::InvalidSyntax)?;

    if value.is_infinite() && !is_infinity_literal(raw) {
        return Err(CoercionCause::OutOfRange);
    }
    Ok(value)
}
