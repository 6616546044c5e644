//! Test configs.

use std::time::Duration;

use crate::{DescribeConfig, KeyValueMap, PopulateConfig};

/// Config with a single param of each commonly used type.
#[derive(Debug, Default, PartialEq, DescribeConfig, PopulateConfig)]
#[config(crate = crate)]
pub(crate) struct SimpleConfig {
    #[config(env = "SIMPLE_STRING")]
    pub string: String,
    #[config(env = "SIMPLE_BOOL")]
    pub bool: bool,
    #[config(env = "SIMPLE_INT")]
    pub int: i64,
    #[config(env = "SIMPLE_UINT")]
    pub uint: u64,
    #[config(env = "SIMPLE_FLOAT32")]
    pub float32: f32,
    #[config(env = "SIMPLE_FLOAT64")]
    pub float64: f64,
    #[config(env = "SIMPLE_DURATION")]
    pub duration: Duration,
}

pub(crate) fn simple_vars() -> KeyValueMap {
    KeyValueMap::new([
        ("SIMPLE_STRING", "test string"),
        ("SIMPLE_BOOL", "true"),
        ("SIMPLE_INT", "-123456"),
        ("SIMPLE_UINT", "5605"),
        ("SIMPLE_FLOAT32", "14.56"),
        ("SIMPLE_FLOAT64", "123456.789"),
        ("SIMPLE_DURATION", "30s"),
    ])
}

/// Nested config without requirements.
#[derive(Debug, Default, PartialEq, DescribeConfig, PopulateConfig)]
#[config(crate = crate)]
pub(crate) struct EmbeddedConfig {
    #[config(env = "EMBEDDED_TEST1_STRING")]
    pub string: String,
    #[config(env = "EMBEDDED_TEST1_BOOL")]
    pub bool: bool,
    #[config(env = "EMBEDDED_TEST1_FLOAT32")]
    pub float32: f32,
}

/// Nested config required on condition.
#[derive(Debug, Default, PartialEq, DescribeConfig, PopulateConfig)]
#[config(crate = crate)]
pub(crate) struct ConditionalEmbeddedConfig {
    #[config(env = "EMBEDDED_TEST2_STRING")]
    pub string: String,
    #[config(env = "EMBEDDED_TEST2_BOOL")]
    pub bool: bool,
    #[config(env = "EMBEDDED_TEST2_FLOAT32")]
    pub float32: f32,
}

/// Nested config that is always required.
#[derive(Debug, Default, PartialEq, DescribeConfig, PopulateConfig)]
#[config(crate = crate)]
pub(crate) struct RequiredEmbeddedConfig {
    #[config(env = "EMBEDDED_TEST3_STRING")]
    pub string: String,
    #[config(env = "EMBEDDED_TEST3_BOOL")]
    pub bool: bool,
    #[config(env = "EMBEDDED_TEST3_FLOAT32")]
    pub float32: f32,
}

/// Config covering all supported param types and field attributes.
#[derive(Debug, Default, PartialEq, DescribeConfig, PopulateConfig)]
#[config(crate = crate)]
pub(crate) struct KitchenSinkConfig {
    /// String param.
    #[config(env = "KITCHEN_SINK_STRING")]
    pub string: String,
    #[config(env = "KITCHEN_SINK_BOOL")]
    pub bool: bool,
    #[config(env = "KITCHEN_SINK_INT")]
    pub int: isize,
    #[config(env = "KITCHEN_SINK_INT8")]
    pub int8: i8,
    #[config(env = "KITCHEN_SINK_INT16")]
    pub int16: i16,
    #[config(env = "KITCHEN_SINK_INT32")]
    pub int32: i32,
    #[config(env = "KITCHEN_SINK_INT64")]
    pub int64: i64,
    #[config(env = "KITCHEN_SINK_UINT")]
    pub uint: usize,
    #[config(env = "KITCHEN_SINK_UINT8")]
    pub uint8: u8,
    #[config(env = "KITCHEN_SINK_UINT16")]
    pub uint16: u16,
    #[config(env = "KITCHEN_SINK_UINT32")]
    pub uint32: u32,
    #[config(env = "KITCHEN_SINK_UINT64")]
    pub uint64: u64,
    #[config(env = "KITCHEN_SINK_FLOAT32")]
    pub float32: f32,
    #[config(env = "KITCHEN_SINK_FLOAT64")]
    pub float64: f64,
    /// Duration param,
    /// spanning multiple doc lines.
    #[config(env = "KITCHEN_SINK_DURATION")]
    pub duration: Duration,
    #[config(env = "KITCHEN_SINK_REQUIRED_BOOL", required = "true")]
    pub required_bool: bool,
    #[config(
        env = "KITCHEN_SINK_ALLOWED_STRING",
        allowed = "foobar,racket,badger"
    )]
    pub allowed_string: String,
    #[config(nest)]
    pub embedded: EmbeddedConfig,
    /// Required if `KITCHEN_SINK_BOOL` is literally `true`.
    #[config(nest, required = "KITCHEN_SINK_BOOL=true")]
    pub embedded_required: ConditionalEmbeddedConfig,
    #[config(nest, required = "true")]
    pub embedded_simple_required: RequiredEmbeddedConfig,
    #[config(skip)]
    pub populate_count: u64,
}

/// Returns vars populating all params in [`KitchenSinkConfig`], except for the conditionally required group.
pub(crate) fn kitchen_sink_vars() -> KeyValueMap {
    KeyValueMap::new([
        ("KITCHEN_SINK_STRING", "string"),
        ("KITCHEN_SINK_BOOL", "T"),
        ("KITCHEN_SINK_INT", "-1"),
        ("KITCHEN_SINK_INT8", "-128"),
        ("KITCHEN_SINK_INT16", "32767"),
        ("KITCHEN_SINK_INT32", "-2147483648"),
        ("KITCHEN_SINK_INT64", "9223372036854775807"),
        ("KITCHEN_SINK_UINT", "1_000"),
        ("KITCHEN_SINK_UINT8", "0xff"),
        ("KITCHEN_SINK_UINT16", "0o777"),
        ("KITCHEN_SINK_UINT32", "0b1010"),
        ("KITCHEN_SINK_UINT64", "18446744073709551615"),
        ("KITCHEN_SINK_FLOAT32", "-0.5"),
        ("KITCHEN_SINK_FLOAT64", "1e100"),
        ("KITCHEN_SINK_DURATION", "1h30m"),
        ("KITCHEN_SINK_REQUIRED_BOOL", "false"),
        ("KITCHEN_SINK_ALLOWED_STRING", "badger"),
        ("EMBEDDED_TEST1_STRING", "embedded"),
        ("EMBEDDED_TEST3_STRING", "required"),
        ("EMBEDDED_TEST3_BOOL", "1"),
        ("EMBEDDED_TEST3_FLOAT32", "3.5"),
    ])
}
