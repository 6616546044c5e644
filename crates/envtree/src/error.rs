//! Parsing errors.

use std::{error, fmt};

use crate::{
    de::CoercionCause,
    metadata::{ParamKind, RustType},
    tree::AllowedValues,
};

/// Error building a [`FieldTree`](crate::FieldTree) from config metadata.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum BuildError {
    /// Config type is (directly or indirectly) nested in itself.
    RecursiveConfig {
        /// Recursive config type.
        ty: RustType,
        /// Dotted path to the field at which the recursion was detected.
        path: String,
    },
    /// Configs are nested too deeply.
    TooDeep {
        /// Dotted path to the field exceeding the depth.
        path: String,
        /// Maximum supported nesting depth.
        max_depth: usize,
    },
}

impl fmt::Display for BuildError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RecursiveConfig { ty, path } => {
                write!(formatter, "config `{ty}` is recursively nested at `{path}`")
            }
            Self::TooDeep { path, max_depth } => write!(
                formatter,
                "configs are nested too deeply at `{path}`; max supported depth is {max_depth}"
            ),
        }
    }
}

impl error::Error for BuildError {}

/// Reason why a config cannot be populated regardless of the source contents.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum InvalidTargetReason {
    /// Field tree cannot be built from the config metadata.
    Build(BuildError),
    /// Target type differs from the type the field tree was built for.
    TypeMismatch {
        /// Name of the target type.
        actual: &'static str,
    },
    /// Field index passed by the populate routine is out of range.
    FieldOutOfRange {
        /// Index passed by the populate routine.
        index: usize,
        /// Number of fields in the config.
        len: usize,
    },
    /// Field was populated as a param, but it's a nested config.
    NotALeaf {
        /// Name of the field in Rust code.
        field: &'static str,
    },
    /// Field was populated as a nested config, but it's a param.
    NotAGroup {
        /// Name of the field in Rust code.
        field: &'static str,
    },
    /// Rust type of the populated field differs from the one recorded in metadata.
    FieldTypeMismatch {
        /// Name of the field in Rust code.
        field: &'static str,
        /// Type recorded in metadata.
        expected: RustType,
        /// Type of the populated field.
        actual: &'static str,
    },
    /// Coerced value cannot be converted to the field type, i.e., the param kind in metadata
    /// is inconsistent with the field type.
    ValueMismatch {
        /// Name of the field in Rust code.
        field: &'static str,
        /// Param kind recorded in metadata.
        kind: ParamKind,
    },
}

impl fmt::Display for InvalidTargetReason {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Build(err) => fmt::Display::fmt(err, formatter),
            Self::TypeMismatch { actual } => {
                write!(formatter, "field tree is used to populate `{actual}`")
            }
            Self::FieldOutOfRange { index, len } => write!(
                formatter,
                "field index {index} is out of range; config has {len} field(s)"
            ),
            Self::NotALeaf { field } => {
                write!(formatter, "field `{field}` is a nested config, not a param")
            }
            Self::NotAGroup { field } => {
                write!(formatter, "field `{field}` is a param, not a nested config")
            }
            Self::FieldTypeMismatch {
                field,
                expected,
                actual,
            } => write!(
                formatter,
                "field `{field}` has type `{actual}`, while metadata specifies `{expected}`"
            ),
            Self::ValueMismatch { field, kind } => write!(
                formatter,
                "{kind} value cannot be converted to the type of field `{field}`"
            ),
        }
    }
}

/// Error coercing a raw env variable value to the param type.
#[derive(Debug, Clone, PartialEq)]
pub struct CoercionError {
    key: &'static str,
    raw: String,
    kind: ParamKind,
    cause: CoercionCause,
}

impl fmt::Display for CoercionError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "failed to parse {name} from env variable '{key}' (contained: '{raw}'",
            name = self.kind.name(),
            key = self.key,
            raw = self.raw
        )?;
        if let Some(bits) = self.bits() {
            write!(formatter, ", bitsize: {bits}")?;
        }
        write!(formatter, "): {}", self.cause)
    }
}

impl error::Error for CoercionError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        Some(&self.cause)
    }
}

impl CoercionError {
    pub(crate) fn new(key: &'static str, raw: &str, kind: ParamKind, cause: CoercionCause) -> Self {
        Self {
            key,
            raw: raw.to_owned(),
            kind,
            cause,
        }
    }

    /// Returns the env variable with the offending value.
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Returns the raw offending value.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Returns the param kind the value was coerced to.
    pub fn kind(&self) -> ParamKind {
        self.kind
    }

    /// Returns the bit width of the param kind, if it's a fixed-width numeric kind.
    pub fn bits(&self) -> Option<u32> {
        self.kind.bits()
    }

    /// Returns the underlying cause.
    pub fn cause(&self) -> &CoercionCause {
        &self.cause
    }
}

/// Error populating a config.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ParseError {
    /// Config cannot be populated regardless of the source contents. Signals a bug in the config definition.
    InvalidTarget {
        /// Config type.
        ty: RustType,
        /// Reason of the error.
        reason: InvalidTargetReason,
    },
    /// Effectively required env variable is not set.
    MissingRequired {
        /// Env variable name.
        key: &'static str,
    },
    /// Env variable value is not among the allowed values.
    DisallowedValue {
        /// Env variable name.
        key: &'static str,
        /// Allowed values.
        allowed: AllowedValues,
        /// Actual raw value.
        actual: String,
    },
    /// Env variable value cannot be coerced to the param type.
    Coercion(CoercionError),
}

impl fmt::Display for ParseError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTarget { ty, reason } => {
                write!(formatter, "invalid config `{ty}`: {reason}")
            }
            Self::MissingRequired { key } => {
                write!(formatter, "env variable '{key}' is required but not set")
            }
            Self::DisallowedValue {
                key,
                allowed,
                actual,
            } => write!(
                formatter,
                "env variable '{key}' must be one of ({allowed}); {actual} given"
            ),
            Self::Coercion(err) => fmt::Display::fmt(err, formatter),
        }
    }
}

impl error::Error for ParseError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::InvalidTarget {
                reason: InvalidTargetReason::Build(err),
                ..
            } => Some(err),
            Self::Coercion(err) => err.source(),
            Self::InvalidTarget { .. }
            | Self::MissingRequired { .. }
            | Self::DisallowedValue { .. } => None,
        }
    }
}

impl From<CoercionError> for ParseError {
    fn from(err: CoercionError) -> Self {
        Self::Coercion(err)
    }
}

impl ParseError {
    /// Returns the env variable this error relates to, if any.
    pub fn key(&self) -> Option<&'static str> {
        match self {
            Self::MissingRequired { key } | Self::DisallowedValue { key, .. } => Some(key),
            Self::Coercion(err) => Some(err.key),
            Self::InvalidTarget { .. } => None,
        }
    }
}
