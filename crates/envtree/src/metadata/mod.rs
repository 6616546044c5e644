//! Configuration metadata.
//!
//! Metadata is static info about a config type: its fields in the declaration order, their env variables,
//! required conditions etc. It's usually generated by the [`DescribeConfig`](macro@crate::DescribeConfig)
//! derive macro, but can be defined manually as well (e.g., as a `static` item).

use std::{any, fmt};

use serde::{Serialize, Serializer};

mod validation;

/// Metadata for a configuration (i.e., a group of related fields).
#[derive(Debug, Clone, Copy)]
pub struct ConfigMetadata {
    /// Type of this configuration.
    pub ty: RustType,
    /// Help regarding the config itself.
    pub help: &'static str,
    /// Fields included in the config, in the declaration order.
    pub fields: &'static [FieldMetadata],
}

impl ConfigMetadata {
    /// Iterates over param fields in this config (not including nested configs).
    pub fn params(&self) -> impl Iterator<Item = (&'static FieldMetadata, &'static ParamMetadata)> {
        self.fields.iter().filter_map(|field| match &field.kind {
            FieldKind::Param(param) => Some((field, param)),
            FieldKind::Nested(_) => None,
        })
    }

    /// Iterates over nested configs in this config.
    pub fn nested_configs(
        &self,
    ) -> impl Iterator<Item = (&'static FieldMetadata, &'static ConfigMetadata)> {
        self.fields.iter().filter_map(|field| match &field.kind {
            FieldKind::Nested(meta) => Some((field, *meta)),
            FieldKind::Param(_) => None,
        })
    }
}

/// Metadata for a single field in a config.
#[derive(Debug, Clone, Copy)]
pub struct FieldMetadata {
    /// Name of the field in Rust code.
    pub rust_field_name: &'static str,
    /// Human-readable field help parsed from the doc comment.
    pub help: &'static str,
    /// Raw required expression: empty, `"true"` or `"KEY=VALUE"`.
    /// See [`RequiredExpr`](crate::required::RequiredExpr) for details.
    pub required: &'static str,
    /// Kind of the field.
    pub kind: FieldKind,
}

/// Kind of [config field](FieldMetadata).
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    /// Param read from a single env variable.
    Param(ParamMetadata),
    /// Nested configuration.
    Nested(&'static ConfigMetadata),
}

/// Metadata for a specific configuration parameter.
#[derive(Debug, Clone, Copy)]
pub struct ParamMetadata {
    /// Env variable the param is read from.
    pub env: &'static str,
    /// Comma-separated list of allowed raw values. An empty string means that any value is allowed.
    pub allowed: &'static str,
    /// Rust type of the parameter.
    pub rust_type: RustType,
    /// Semantic kind of the parameter, which determines how raw values are parsed.
    pub kind: ParamKind,
}

/// Semantic kind of a [param](ParamMetadata) determining how it is parsed from a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
#[non_exhaustive]
pub enum ParamKind {
    /// Boolean value.
    Bool,
    /// Signed integer with the specified bit width.
    Int {
        /// Bit width of the integer.
        bits: u32,
    },
    /// Unsigned integer with the specified bit width.
    Uint {
        /// Bit width of the integer.
        bits: u32,
    },
    /// Floating-point number with the specified bit width (32 or 64).
    Float {
        /// Bit width of the float.
        bits: u32,
    },
    /// Time duration, like `1h30m`.
    Duration,
    /// String value; always parsed successfully.
    String,
}

impl fmt::Display for ParamKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => formatter.write_str("bool"),
            Self::Int { bits } => write!(formatter, "int{bits}"),
            Self::Uint { bits } => write!(formatter, "uint{bits}"),
            Self::Float { bits } => write!(formatter, "float{bits}"),
            Self::Duration => formatter.write_str("duration"),
            Self::String => formatter.write_str("string"),
        }
    }
}

impl ParamKind {
    /// Returns a short name of this kind not including the bit width.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int { .. } => "int",
            Self::Uint { .. } => "uint",
            Self::Float { .. } => "float",
            Self::Duration => "duration",
            Self::String => "string",
        }
    }

    /// Returns the bit width for fixed-width numeric kinds.
    pub const fn bits(self) -> Option<u32> {
        match self {
            Self::Int { bits } | Self::Uint { bits } | Self::Float { bits } => Some(bits),
            _ => None,
        }
    }
}

/// Representation of a Rust type.
#[derive(Clone, Copy)]
pub struct RustType {
    id: fn() -> any::TypeId,
    name_in_code: &'static str,
}

impl fmt::Debug for RustType {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name_in_code)
    }
}

impl fmt::Display for RustType {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name_in_code)
    }
}

impl PartialEq for RustType {
    fn eq(&self, other: &Self) -> bool {
        (self.id)() == (other.id)()
    }
}

impl Serialize for RustType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name_in_code)
    }
}

impl RustType {
    /// Creates a new type.
    pub const fn of<T: 'static>(name_in_code: &'static str) -> Self {
        Self {
            id: any::TypeId::of::<T>,
            name_in_code,
        }
    }

    /// Returns the unique ID of this type.
    pub fn id(&self) -> any::TypeId {
        (self.id)()
    }

    /// Checks whether this type is `T`.
    pub fn is<T: 'static>(&self) -> bool {
        self.id() == any::TypeId::of::<T>()
    }

    /// Returns the name of this type as specified in code.
    pub const fn name_in_code(&self) -> &'static str {
        self.name_in_code
    }
}
