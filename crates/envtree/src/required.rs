//! Conditional requirements for config fields.

use std::fmt;

use serde::Serialize;

use crate::KeySnapshot;

/// Parsed required expression for a param or a nested config.
///
/// Expressions are parsed leniently: anything other than an empty string, `"true"` or `"KEY=VALUE"` (with a non-empty `KEY`)
/// is treated as [`Self::Never`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RequiredExpr {
    /// The field is never required on its own (but may be forced by an enclosing group).
    #[default]
    Never,
    /// The field is always required.
    Always,
    /// The field is required iff `key` is set to exactly `value`.
    Conditional {
        /// Env variable the condition depends on.
        key: &'static str,
        /// Expected value of the variable.
        value: &'static str,
    },
}

impl fmt::Display for RequiredExpr {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Never => formatter.write_str("no"),
            Self::Always => formatter.write_str("yes"),
            Self::Conditional { key, value } => write!(formatter, "if {key}={value}"),
        }
    }
}

impl RequiredExpr {
    /// Parses an expression from the raw string.
    pub fn parse(raw: &'static str) -> Self {
        match raw {
            "" => Self::Never,
            "true" => Self::Always,
            _ => match raw.split_once('=') {
                Some((key, value)) if !key.is_empty() => Self::Conditional { key, value },
                _ => {
                    tracing::debug!(raw, "malformed required expression; treating as not required");
                    Self::Never
                }
            },
        }
    }

    /// Returns the env variable this expression depends on, if any.
    pub fn condition_key(&self) -> Option<&'static str> {
        match self {
            Self::Conditional { key, .. } => Some(*key),
            Self::Never | Self::Always => None,
        }
    }

    /// Checks whether the expression holds for the provided snapshot.
    pub fn is_required(&self, snapshot: &KeySnapshot) -> bool {
        match self {
            Self::Never => false,
            Self::Always => true,
            Self::Conditional { key, value } => snapshot.get(key) == Some(*value),
        }
    }

    /// Checks whether a field with this expression is required, taking into account the force flag
    /// inherited from the enclosing groups.
    pub fn effective(&self, snapshot: &KeySnapshot, force: bool) -> bool {
        force || self.is_required(snapshot)
    }
}
