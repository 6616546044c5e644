//! `envtree` – populates typed configuration records from environment variables, driven by per-field metadata.
//!
//! # Overview
//!
//! A configuration is a plain Rust struct. Each field is annotated with the env variable it is read from,
//! an optional *required* condition and an optional set of allowed literal values. Fields may also be nested
//! configurations (*groups*), which makes it possible to require a whole group of variables at once.
//!
//! Parsing proceeds in three steps:
//!
//! 1. A [`FieldTree`] is derived from the [metadata](metadata::ConfigMetadata) of the config type.
//!    The metadata is generated at compile time by the [`DescribeConfig`](macro@DescribeConfig) derive macro.
//! 2. All env variables referenced by the tree are read once into an immutable [`KeySnapshot`].
//!    Required conditions and values are then evaluated against this snapshot only, so concurrent
//!    modifications of the environment cannot change the meaning of a variable mid-parse.
//! 3. The tree is walked in field declaration order; each present variable is checked against its allowed values,
//!    [coerced](de::coerce) to the field type and written into the target. The first violation aborts parsing.
//!
//! # Required conditions
//!
//! The `required` attribute accepts one of:
//!
//! - `"true"`: the variable must always be set.
//! - `"KEY=VALUE"`: the variable must be set if the `KEY` variable is set to exactly `VALUE`.
//!   If `KEY` is not set, the condition does not hold. `KEY` must be read by some param in the config tree;
//!   other variables are not captured into the snapshot, so conditions on them never hold.
//!
//! Any other value is treated as "not required". A required condition on a nested config forces
//! *all* variables in the config (including in its nested configs) to be required.
//!
//! # Supported field types
//!
//! See [`WellKnown`](de::WellKnown): `bool`, signed and unsigned integers up to 64 bits, `f32`, `f64`,
//! [`Duration`](std::time::Duration) (in the `1h30m` format) and `String`.
//!
//! # Partial population
//!
//! Fields are written as soon as they are parsed, so a failed [`parse()`] call may leave the target
//! partially populated. If that matters, use [`load()`], which populates a fresh default instance and
//! only returns it on success.
//!
//! # Examples
//!
//! ```
//! use std::time::Duration;
//! use envtree::{DescribeConfig, KeyValueMap, PopulateConfig};
//!
//! #[derive(Debug, Default, DescribeConfig, PopulateConfig)]
//! struct DatabaseConfig {
//!     #[config(env = "DB_URL")]
//!     url: String,
//!     #[config(env = "DB_POOL_SIZE")]
//!     pool_size: u16,
//! }
//!
//! #[derive(Debug, Default, DescribeConfig, PopulateConfig)]
//! struct AppConfig {
//!     /// Storage backend.
//!     #[config(env = "APP_STORAGE", required = "true", allowed = "memory,postgres")]
//!     storage: String,
//!     #[config(env = "APP_TIMEOUT")]
//!     timeout: Duration,
//!     /// Only required if Postgres is used.
//!     #[config(nest, required = "APP_STORAGE=postgres")]
//!     database: DatabaseConfig,
//! }
//!
//! let source = KeyValueMap::new([
//!     ("APP_STORAGE", "postgres"),
//!     ("APP_TIMEOUT", "1m30s"),
//!     ("DB_URL", "postgres://localhost/app"),
//!     ("DB_POOL_SIZE", "16"),
//! ]);
//! let config: AppConfig = envtree::load_from(&source)?;
//! assert_eq!(config.timeout, Duration::from_secs(90));
//! assert_eq!(config.database.pool_size, 16);
//!
//! // If the storage is Postgres, DB params become required.
//! let source = KeyValueMap::new([("APP_STORAGE", "postgres")]);
//! let err = envtree::load_from::<AppConfig, _>(&source).unwrap_err();
//! assert_eq!(err.to_string(), "env variable 'DB_URL' is required but not set");
//! # anyhow::Ok(())
//! ```

// Documentation settings
#![doc(html_root_url = "https://docs.rs/envtree/0.1.0")]
#![cfg_attr(docsrs, feature(doc_cfg))]
// Linter settings
#![warn(missing_docs)]

/// Derives the [`DescribeConfig`](trait@DescribeConfig) trait for a type.
///
/// The macro can only be placed on structs with named fields and without generics.
/// Macro behavior is configured with `#[config(_)]` attributes. Multiple `#[config(_)]` attributes
/// on a single item are supported.
///
/// # Container attributes
///
/// ## `crate`
///
/// **Type:** path
///
/// Path to the `envtree` crate. Useful if the crate is re-exported.
///
/// # Field attributes
///
/// Each field must be either a param (`env`), a nested config (`nest`) or excluded from parsing (`skip`).
/// Doc comments on fields are recorded as help.
///
/// ## `env`
///
/// **Type:** string
///
/// Env variable to read the param from. The field type must implement [`WellKnown`](de::WellKnown).
/// Ignored for nested configs.
///
/// ## `required`
///
/// **Type:** string; `"true"` or `"KEY=VALUE"`
///
/// Condition under which the param or nested config is required. See the [crate-level docs](crate#required-conditions).
///
/// ## `allowed`
///
/// **Type:** string; comma-separated list of values
///
/// Restricts the raw param value to one of the listed values (compared case-sensitively).
/// Ignored for nested configs.
///
/// ## `nest`
///
/// **Type:** flag
///
/// Marks the field as a nested config. Its type must implement [`DescribeConfig`] and [`PopulateConfig`].
///
/// ## `skip`
///
/// **Type:** flag
///
/// Excludes the field from parsing; it's left untouched.
pub use envtree_derive::DescribeConfig;
/// Derives the [`PopulateConfig`](trait@PopulateConfig) trait for a type.
///
/// Should be used together with [`DescribeConfig`](macro@DescribeConfig); see its docs for the supported attributes.
pub use envtree_derive::PopulateConfig;

pub use self::{
    error::{BuildError, CoercionError, InvalidTargetReason, ParseError},
    populate::GroupPopulator,
    snapshot::KeySnapshot,
    source::{ConfigSource, Environment, KeyValueMap},
    tree::FieldTree,
};
use self::metadata::ConfigMetadata;

pub mod de;
mod error;
pub mod metadata;
mod populate;
pub mod required;
mod snapshot;
mod source;
pub mod testing;
#[cfg(test)]
mod testonly;
pub mod tree;

/// Describes a configuration (i.e., a group of related env params).
///
/// This trait is usually derived with the [corresponding proc macro](macro@DescribeConfig).
pub trait DescribeConfig: 'static {
    /// Provides the config description.
    const DESCRIPTION: ConfigMetadata;
}

/// Populates a configuration instance from a [`FieldTree`] walk.
///
/// This trait is usually derived with the [corresponding proc macro](macro@PopulateConfig). A manual implementation
/// must call [`GroupPopulator::param()`] / [`GroupPopulator::nested()`] for each field described in the config
/// [metadata](DescribeConfig::DESCRIPTION), in the declaration order, propagating errors.
pub trait PopulateConfig: 'static {
    /// Populates this config from the provided group.
    ///
    /// # Errors
    ///
    /// Propagates errors from the populator.
    fn populate_config(&mut self, group: &GroupPopulator<'_>) -> Result<(), ParseError>;
}

/// Populates `target` from the process environment.
///
/// # Errors
///
/// Returns the first encountered error. The `target` may be partially populated in this case.
pub fn parse<C: DescribeConfig + PopulateConfig>(target: &mut C) -> Result<(), ParseError> {
    parse_from(target, &Environment::new())
}

/// Populates `target` from the specified source.
///
/// # Errors
///
/// Returns the first encountered error. The `target` may be partially populated in this case.
pub fn parse_from<C, S>(target: &mut C, source: &S) -> Result<(), ParseError>
where
    C: DescribeConfig + PopulateConfig,
    S: ConfigSource + ?Sized,
{
    let tree = FieldTree::for_config::<C>()?;
    tree.populate(target, source)
}

/// Loads a config from the process environment, starting from its default value.
///
/// # Errors
///
/// Returns the first encountered error.
pub fn load<C>() -> Result<C, ParseError>
where
    C: DescribeConfig + PopulateConfig + Default,
{
    load_from(&Environment::new())
}

/// Loads a config from the specified source, starting from its default value. Unlike [`parse_from()`],
/// a partially populated config is never observable.
///
/// # Errors
///
/// Returns the first encountered error.
pub fn load_from<C, S>(source: &S) -> Result<C, ParseError>
where
    C: DescribeConfig + PopulateConfig + Default,
    S: ConfigSource + ?Sized,
{
    let mut config = C::default();
    parse_from(&mut config, source)?;
    Ok(config)
}
