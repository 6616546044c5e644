//! Coercion of raw string values into typed params.
//!
//! Coercion is driven by the [`ParamKind`] of a param. The kind is normally derived from the Rust type of the param field
//! via the [`WellKnown`] trait, so the following types are supported out of the box:
//!
//! | Rust type | Kind | Format |
//! |-----------|------|--------|
//! | `bool` | [`ParamKind::Bool`] | One of `1`, `t`, `T`, `TRUE`, `true`, `True`, `0`, `f`, `F`, `FALSE`, `false`, `False` |
//! | `i8`..`i64`, `isize` | [`ParamKind::Int`] | Decimal integer with an optional sign |
//! | `u8`..`u64`, `usize` | [`ParamKind::Uint`] | Integer with an optional `0x` / `0o` / `0b` / `0` base prefix; `_` separators are allowed |
//! | `f32`, `f64` | [`ParamKind::Float`] | Decimal or scientific literal, or `inf` / `nan` |
//! | [`Duration`] | [`ParamKind::Duration`] | Sequence of numbers with units, like `300ms` or `1h30m`; see below |
//! | `String` | [`ParamKind::String`] | Any string |
//!
//! # Durations
//!
//! A duration is a sequence of decimal numbers, each with an optional fraction and a mandatory unit suffix,
//! such as `300ms`, `1.5h` or `2h45m`. Valid units are `ns`, `us` (or `µs`), `ms`, `s`, `m`, `h`.
//! A bare `0` is accepted as a zero duration. Negative durations are not supported.
//!
//! # Examples
//!
//! ```
//! # use std::time::Duration;
//! use envtree::{de::{coerce, ParamValue}, metadata::ParamKind};
//!
//! let value = coerce(ParamKind::Duration, "1m30s")?;
//! assert_eq!(value, ParamValue::Duration(Duration::from_secs(90)));
//! let value = coerce(ParamKind::Uint { bits: 16 }, "0xff")?;
//! assert_eq!(value, ParamValue::Uint(255));
//!
//! let err = coerce(ParamKind::Int { bits: 8 }, "300").unwrap_err();
//! assert_eq!(err.to_string(), "value out of range");
//! # anyhow::Ok(())
//! ```

use std::{error, fmt, time::Duration};

pub use self::duration::DurationError;
use crate::metadata::ParamKind;

mod duration;
mod numbers;
#[cfg(test)]
mod tests;

/// Typed value produced by [`coerce()`].
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Boolean value.
    Bool(bool),
    /// Signed integer. Guaranteed to fit into the bit width of the coerced kind.
    Int(i64),
    /// Unsigned integer. Guaranteed to fit into the bit width of the coerced kind.
    Uint(u64),
    /// Floating-point value. For 32-bit kinds, the value is exactly representable as `f32`.
    Float(f64),
    /// Time duration.
    Duration(Duration),
    /// String value.
    String(String),
}

/// Reason why [`coerce()`] has failed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CoercionCause {
    /// Value has invalid syntax for the kind.
    InvalidSyntax,
    /// Value is well-formed, but doesn't fit into the bit width of the kind.
    OutOfRange,
    /// Value is not a valid duration.
    Duration(DurationError),
}

impl fmt::Display for CoercionCause {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSyntax => formatter.write_str("invalid syntax"),
            Self::OutOfRange => formatter.write_str("value out of range"),
            Self::Duration(err) => fmt::Display::fmt(err, formatter),
        }
    }
}

impl error::Error for CoercionCause {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Duration(err) => Some(err),
            Self::InvalidSyntax | Self::OutOfRange => None,
        }
    }
}

impl From<DurationError> for CoercionCause {
    fn from(err: DurationError) -> Self {
        Self::Duration(err)
    }
}

/// Coerces a raw string into a value of the specified kind.
///
/// # Errors
///
/// Returns an error if the string cannot be parsed as the specified kind, or if it doesn't fit
/// into the kind's bit width.
pub fn coerce(kind: ParamKind, raw: &str) -> Result<ParamValue, CoercionCause> {
    Ok(match kind {
        ParamKind::Bool => ParamValue::Bool(parse_bool(raw)?),
        ParamKind::Int { bits } => ParamValue::Int(numbers::parse_int(raw, bits)?),
        ParamKind::Uint { bits } => ParamValue::Uint(numbers::parse_uint(raw, bits)?),
        ParamKind::Float { bits } => ParamValue::Float(numbers::parse_float(raw, bits)?),
        ParamKind::Duration => ParamValue::Duration(duration::parse_duration(raw)?),
        ParamKind::String => ParamValue::String(raw.to_owned()),
    })
}

fn parse_bool(raw: &str) -> Result<bool, CoercionCause> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(CoercionCause::InvalidSyntax),
    }
}

/// Param type that can be coerced from a raw string.
///
/// The trait is used by the [`DescribeConfig`](macro@crate::DescribeConfig) derive macro to determine
/// the kind of each param field.
pub trait WellKnown: Sized + 'static {
    /// Kind of params of this type.
    const KIND: ParamKind;

    /// Converts a coerced value into this type. Returns `None` if the value has an unexpected variant
    /// (which means that the param metadata is inconsistent with the Rust type).
    fn from_value(value: ParamValue) -> Option<Self>;
}

macro_rules! impl_well_known_int {
    ($($int:ty => $variant:ident,)*) => {
        $(
        impl WellKnown for $int {
            const KIND: ParamKind = ParamKind::$variant { bits: <$int>::BITS };

            fn from_value(value: ParamValue) -> Option<Self> {
                match value {
                    ParamValue::$variant(value) => value.try_into().ok(),
                    _ => None,
                }
            }
        }
        )*
    };
}

impl_well_known_int!(
    i8 => Int,
    i16 => Int,
    i32 => Int,
    i64 => Int,
    isize => Int,
    u8 => Uint,
    u16 => Uint,
    u32 => Uint,
    u64 => Uint,
    usize => Uint,
);

impl WellKnown for bool {
    const KIND: ParamKind = ParamKind::Bool;

    fn from_value(value: ParamValue) -> Option<Self> {
        match value {
            ParamValue::Bool(value) => Some(value),
            _ => None,
        }
    }
}

impl WellKnown for f32 {
    const KIND: ParamKind = ParamKind::Float { bits: 32 };

    #[allow(clippy::cast_possible_truncation)] // 32-bit floats are coerced with `f32` precision
    fn from_value(value: ParamValue) -> Option<Self> {
        match value {
            ParamValue::Float(value) => Some(value as f32),
            _ => None,
        }
    }
}

impl WellKnown for f64 {
    const KIND: ParamKind = ParamKind::Float { bits: 64 };

    fn from_value(value: ParamValue) -> Option<Self> {
        match value {
            ParamValue::Float(value) => Some(value),
            _ => None,
        }
    }
}

impl WellKnown for Duration {
    const KIND: ParamKind = ParamKind::Duration;

    fn from_value(value: ParamValue) -> Option<Self> {
        match value {
            ParamValue::Duration(value) => Some(value),
            _ => None,
        }
    }
}

impl WellKnown for String {
    const KIND: ParamKind = ParamKind::String;

    fn from_value(value: ParamValue) -> Option<Self> {
        match value {
            ParamValue::String(value) => Some(value),
            _ => None,
        }
    }
}
