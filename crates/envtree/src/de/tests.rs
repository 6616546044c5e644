use std::time::Duration;

use assert_matches::assert_matches;
use proptest::prelude::*;
use test_casing::test_casing;

use super::*;

#[test]
fn coercing_bools() {
    for raw in ["1", "t", "T", "TRUE", "true", "True"] {
        assert_eq!(coerce(ParamKind::Bool, raw).unwrap(), ParamValue::Bool(true));
    }
    for raw in ["0", "f", "F", "FALSE", "false", "False"] {
        assert_eq!(coerce(ParamKind::Bool, raw).unwrap(), ParamValue::Bool(false));
    }
    for raw in ["", "yes", "tRUE", " true", "2"] {
        let err = coerce(ParamKind::Bool, raw).unwrap_err();
        assert_eq!(err, CoercionCause::InvalidSyntax, "{raw}");
    }
}

#[test]
fn coercing_signed_ints() {
    let kind = ParamKind::Int { bits: 64 };
    assert_eq!(coerce(kind, "-123456").unwrap(), ParamValue::Int(-123_456));
    assert_eq!(coerce(kind, "+42").unwrap(), ParamValue::Int(42));
    assert_eq!(
        coerce(kind, "-9223372036854775808").unwrap(),
        ParamValue::Int(i64::MIN)
    );
    assert_eq!(
        coerce(kind, "9223372036854775808").unwrap_err(),
        CoercionCause::OutOfRange
    );

    // Base prefixes and separators are not supported for signed ints.
    for raw in ["", "0x10", "1_000", "1.0", "12a", "- 1"] {
        let err = coerce(kind, raw).unwrap_err();
        assert_eq!(err, CoercionCause::InvalidSyntax, "{raw}");
    }
}

#[test_casing(4, [(8, 127), (16, 32_767), (32, 2_147_483_647), (64, i64::MAX)])]
#[test]
fn signed_int_bounds(bits: u32, max: i64) {
    let kind = ParamKind::Int { bits };
    assert_eq!(coerce(kind, &max.to_string()).unwrap(), ParamValue::Int(max));
    let min = -max - 1;
    assert_eq!(coerce(kind, &min.to_string()).unwrap(), ParamValue::Int(min));

    let above_max = i128::from(max) + 1;
    let err = coerce(kind, &above_max.to_string()).unwrap_err();
    assert_eq!(err, CoercionCause::OutOfRange);
    let below_min = i128::from(min) - 1;
    let err = coerce(kind, &below_min.to_string()).unwrap_err();
    assert_eq!(err, CoercionCause::OutOfRange);
}

#[test]
fn coercing_unsigned_ints() {
    let kind = ParamKind::Uint { bits: 64 };
    let cases = [
        ("5605", 5605),
        ("0", 0),
        ("0x1F", 31),
        ("0XfF", 255),
        ("0o17", 15),
        ("0b101", 5),
        ("0755", 493),
        ("1_000_000", 1_000_000),
        ("0x_ff_ff", 65_535),
        ("0_7", 7),
        ("18446744073709551615", u64::MAX),
    ];
    for (raw, expected) in cases {
        assert_eq!(coerce(kind, raw).unwrap(), ParamValue::Uint(expected), "{raw}");
    }

    let invalid = [
        "", "-1", "+1", "0x", "08", "0b2", "_1", "1_", "1__0", "0x1_", "1.0", "0x+1",
    ];
    for raw in invalid {
        let err = coerce(kind, raw).unwrap_err();
        assert_eq!(err, CoercionCause::InvalidSyntax, "{raw}");
    }

    let err = coerce(kind, "18446744073709551616").unwrap_err();
    assert_eq!(err, CoercionCause::OutOfRange);
}

#[test_casing(3, [(8, 255), (16, 65_535), (32, 4_294_967_295)])]
#[test]
fn unsigned_int_bounds(bits: u32, max: u64) {
    let kind = ParamKind::Uint { bits };
    assert_eq!(coerce(kind, &max.to_string()).unwrap(), ParamValue::Uint(max));
    assert_eq!(
        coerce(kind, &format!("{max:#x}")).unwrap(),
        ParamValue::Uint(max)
    );
    let err = coerce(kind, &(max + 1).to_string()).unwrap_err();
    assert_eq!(err, CoercionCause::OutOfRange);
}

#[test_casing(6, [
    ParamKind::Int { bits: 0 },
    ParamKind::Int { bits: 65 },
    ParamKind::Uint { bits: 0 },
    ParamKind::Uint { bits: 128 },
    ParamKind::Float { bits: 0 },
    ParamKind::Float { bits: 16 },
])]
#[test]
fn unsupported_bit_widths(kind: ParamKind) {
    let err = coerce(kind, "0").unwrap_err();
    assert_eq!(err, CoercionCause::OutOfRange);
}

#[test]
fn coercing_floats() {
    let value = coerce(ParamKind::Float { bits: 32 }, "14.56").unwrap();
    assert_matches!(value, ParamValue::Float(val) if f32::from_value(ParamValue::Float(val)) == Some(14.56_f32));
    let value = coerce(ParamKind::Float { bits: 64 }, "123456.789").unwrap();
    assert_eq!(value, ParamValue::Float(123_456.789));
    let value = coerce(ParamKind::Float { bits: 64 }, "-1.5e3").unwrap();
    assert_eq!(value, ParamValue::Float(-1_500.0));
    let value = coerce(ParamKind::Float { bits: 64 }, "-inf").unwrap();
    assert_eq!(value, ParamValue::Float(f64::NEG_INFINITY));
    let value = coerce(ParamKind::Float { bits: 32 }, "NaN").unwrap();
    assert_matches!(value, ParamValue::Float(val) if val.is_nan());

    // Fits into `f64`, but not into `f32`.
    let err = coerce(ParamKind::Float { bits: 32 }, "1e39").unwrap_err();
    assert_eq!(err, CoercionCause::OutOfRange);
    coerce(ParamKind::Float { bits: 64 }, "1e39").unwrap();
    let err = coerce(ParamKind::Float { bits: 64 }, "1e309").unwrap_err();
    assert_eq!(err, CoercionCause::OutOfRange);

    for raw in ["", "1.2.3", "one", "1,5", "0x10"] {
        let err = coerce(ParamKind::Float { bits: 64 }, raw).unwrap_err();
        assert_eq!(err, CoercionCause::InvalidSyntax, "{raw}");
    }
}

#[test]
fn coercing_durations() {
    let cases = [
        ("30s", Duration::from_secs(30)),
        ("0", Duration::ZERO),
        ("+5m", Duration::from_secs(300)),
        ("-0s", Duration::ZERO),
        ("1h30m", Duration::from_secs(5_400)),
        ("1.5h", Duration::from_secs(5_400)),
        (".5s", Duration::from_millis(500)),
        ("1.s", Duration::from_secs(1)),
        ("300ms", Duration::from_millis(300)),
        ("2h45m10s500ms", Duration::from_millis(9_910_500)),
        ("10us", Duration::from_micros(10)),
        ("10µs", Duration::from_micros(10)),
        ("10μs", Duration::from_micros(10)),
        ("1ns", Duration::from_nanos(1)),
        ("1.0000000015s", Duration::from_nanos(1_000_000_001)),
    ];
    for (raw, expected) in cases {
        let value = coerce(ParamKind::Duration, raw).unwrap();
        assert_eq!(value, ParamValue::Duration(expected), "{raw}");
    }
}

#[test]
fn duration_errors() {
    let cases = [
        ("", DurationError::Invalid),
        ("-", DurationError::Invalid),
        ("s", DurationError::Invalid),
        (".s", DurationError::Invalid),
        ("30", DurationError::MissingUnit),
        ("1h30", DurationError::MissingUnit),
        ("1d", DurationError::UnknownUnit("d".into())),
        ("10 s", DurationError::UnknownUnit(" s".into())),
        ("-30s", DurationError::Negative),
        ("6000000h", DurationError::Overflow),
        (
            "99999999999999999999999999999999999999999h",
            DurationError::Overflow,
        ),
    ];
    for (raw, expected) in cases {
        let err = coerce(ParamKind::Duration, raw).unwrap_err();
        assert_eq!(err, CoercionCause::Duration(expected), "{raw}");
    }
}

#[test]
fn strings_are_passed_through() {
    for raw in ["", "test string", " padded ", "ünïcödé"] {
        let value = coerce(ParamKind::String, raw).unwrap();
        assert_eq!(value, ParamValue::String(raw.to_owned()));
    }
}

#[test]
fn well_known_kinds() {
    assert_eq!(bool::KIND, ParamKind::Bool);
    assert_eq!(i8::KIND, ParamKind::Int { bits: 8 });
    assert_eq!(u16::KIND, ParamKind::Uint { bits: 16 });
    assert_eq!(i64::KIND, ParamKind::Int { bits: 64 });
    assert_eq!(usize::KIND, ParamKind::Uint { bits: usize::BITS });
    assert_eq!(f32::KIND, ParamKind::Float { bits: 32 });
    assert_eq!(Duration::KIND, ParamKind::Duration);
    assert_eq!(String::KIND, ParamKind::String);
}

#[test]
fn narrowing_values() {
    assert_eq!(i8::from_value(ParamValue::Int(-128)), Some(-128));
    assert_eq!(i8::from_value(ParamValue::Int(128)), None);
    assert_eq!(u8::from_value(ParamValue::Int(1)), None);
    assert_eq!(bool::from_value(ParamValue::String("true".into())), None);
    assert_eq!(
        String::from_value(ParamValue::String("??".into())),
        Some("??".to_owned())
    );
}

proptest! {
    #[test]
    fn int_bit_width_is_respected(value: i64) {
        let result = coerce(ParamKind::Int { bits: 8 }, &value.to_string());
        if i8::try_from(value).is_ok() {
            prop_assert_eq!(result, Ok(ParamValue::Int(value)));
        } else {
            prop_assert_eq!(result, Err(CoercionCause::OutOfRange));
        }
    }

    #[test]
    fn uint_bit_width_is_respected(
        value in any::<u64>(),
        bits in prop::sample::select(vec![8_u32, 16, 32]),
    ) {
        let result = coerce(ParamKind::Uint { bits }, &value.to_string());
        if value >> bits == 0 {
            prop_assert_eq!(result, Ok(ParamValue::Uint(value)));
        } else {
            prop_assert_eq!(result, Err(CoercionCause::OutOfRange));
        }
    }

    #[test]
    fn millis_durations_are_parsed(millis in 0_u64..1 << 40) {
        let result = coerce(ParamKind::Duration, &format!("{millis}ms"));
        prop_assert_eq!(result, Ok(ParamValue::Duration(Duration::from_millis(millis))));
    }
}
