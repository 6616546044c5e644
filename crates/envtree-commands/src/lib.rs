//! Command-line extensions for `envtree` library.
//!
//! The extensions are as follows:
//!
//! - [Printing help](Printer::print_help()) for config params with optional filtering.
//! - [Debugging](Printer::print_debug()) env variable values and coercion errors without populating a config.
//! - [Printing JSON](Printer::print_json()), e.g. a serialized [`FieldTree`](envtree::FieldTree).
//!
//! All extensions are encapsulated in [`Printer`].
//!
//! # Examples
//!
//! ## Printing help
//!
//! ```
//! use envtree::{DescribeConfig, FieldTree, PopulateConfig};
//! use envtree_commands::Printer;
//!
//! #[derive(Default, DescribeConfig, PopulateConfig)]
//! struct AppConfig {
//!     /// Port to bind to.
//!     #[config(env = "APP_PORT", required = "true")]
//!     port: u16,
//! }
//!
//! let tree = FieldTree::for_config::<AppConfig>()?;
//! Printer::stderr().print_help(&tree, |_| true)?;
//! # anyhow::Ok(())
//! ```
//!
//! ## Debugging param values
//!
//! ```
//! # use envtree::{DescribeConfig, FieldTree, PopulateConfig};
//! use envtree::KeyValueMap;
//! # use envtree_commands::Printer;
//!
//! # #[derive(Default, DescribeConfig, PopulateConfig)]
//! # struct AppConfig {
//! #     #[config(env = "APP_PORT", required = "true")]
//! #     port: u16,
//! # }
//! let tree = FieldTree::for_config::<AppConfig>()?;
//! let source = KeyValueMap::new([("APP_PORT", "8080")]);
//! let outcome = Printer::stderr().print_debug(&tree, &source)?;
//! assert!(outcome.is_ok());
//! # anyhow::Ok(())
//! ```

// Documentation settings
#![doc(html_root_url = "https://docs.rs/envtree-commands/0.1.0")]
// Linter settings
#![warn(missing_docs)]

use std::{
    io,
    io::{StderrLock, StdoutLock},
};

use anstream::{AutoStream, stream::RawStream};
use anstyle::Style;

mod debug;
mod help;
mod utils;

const CONFIG_PATH: Style = Style::new().bold();

/// Wrapper around an I/O writer. Will style the output with ANSI sequences if appropriate.
///
/// Internally, the printer is based on [`anstream`] / [`anstyle`]; see their docs to find out how styling support
/// is detected by default. (TL;DR: based on `NO_COLOR`, `CLICOLOR_FORCE` and `CLICOLOR` env vars, and whether
/// the output is a terminal.) If this detection doesn't work for you, you can always [create](Self::custom()) a fully custom `Printer`.
///
/// [`anstream`]: https://docs.rs/anstream/
/// [`anstyle`]: https://docs.rs/anstyle/
#[derive(Debug)]
pub struct Printer<W: RawStream> {
    writer: AutoStream<W>,
}

impl Printer<StdoutLock<'static>> {
    /// Creates a printer to stdout. The stdout is locked while the printer is alive!
    pub fn stdout() -> Self {
        Self {
            writer: AutoStream::auto(io::stdout()).lock(),
        }
    }
}

impl Printer<StderrLock<'static>> {
    /// Creates a printer to stderr. The stderr is locked while the printer is alive!
    pub fn stderr() -> Self {
        Self {
            writer: AutoStream::auto(io::stderr()).lock(),
        }
    }
}

impl<W: RawStream> Printer<W> {
    /// Creates a custom printer.
    pub fn custom(writer: AutoStream<W>) -> Self {
        Self { writer }
    }
}
