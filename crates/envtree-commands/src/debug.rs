use std::io::{self, Write as _};

use anstream::stream::{AsLockedWrite, RawStream};
use anstyle::{AnsiColor, Color, Style};
use envtree::{ConfigSource, FieldTree, KeySnapshot, ParseError, tree::LeafRef};

use crate::{Printer, utils::write_param_value};

const SECTION: Style = Style::new().bold();
const RUST: Style = Style::new().dimmed();
const UNSET: Style = Style::new().italic().dimmed();
const RAW: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan)));
const REQUIRED: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red)));
const ERROR_LABEL: Style = Style::new()
    .bold()
    .bg_color(Some(Color::Ansi(AnsiColor::Red)))
    .fg_color(None);

impl<W: RawStream + AsLockedWrite> Printer<W> {
    /// Prints debug info for all env variables referenced by the provided `tree`: their values in `source`,
    /// whether params are effectively required, and the outcome of coercing each value. No config is populated.
    ///
    /// Returns the error that populating a config from `source` would fail with, if any.
    ///
    /// # Errors
    ///
    /// Propagates I/O errors.
    pub fn print_debug<S: ConfigSource + ?Sized>(
        self,
        tree: &FieldTree,
        source: &S,
    ) -> io::Result<Result<(), ParseError>> {
        let mut writer = self.writer;
        let snapshot = KeySnapshot::resolve(tree.referenced_keys(), source);
        let set_count = snapshot.iter().filter(|(_, value)| value.is_some()).count();
        writeln!(
            &mut writer,
            "{SECTION}Referenced env variables:{SECTION:#} {} ({set_count} set)",
            snapshot.len()
        )?;
        writeln!(&mut writer)?;
        writeln!(&mut writer, "{SECTION}Values:{SECTION:#}")?;
        let config_name = tree.ty().name_in_code();
        let mut first_error = None;
        for leaf_ref in &tree.leaves() {
            let outcome = write_leaf(&mut writer, config_name, leaf_ref, &snapshot)?;
            if let Err(err) = outcome {
                write_error(&mut writer, &err)?;
                if first_error.is_none() {
                    first_error = Some(err);
                }
            }
        }

        Ok(match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        })
    }
}

fn write_leaf(
    writer: &mut impl io::Write,
    config_name: &str,
    leaf_ref: &LeafRef<'_>,
    snapshot: &KeySnapshot,
) -> io::Result<Result<(), ParseError>> {
    let LeafRef { path, leaf, .. } = leaf_ref;
    let raw = snapshot.get(leaf.key);
    write!(
        writer,
        "{key} {RUST}[Rust: {config_name}.{path}]{RUST:#} = ",
        key = leaf.key
    )?;

    let is_required = leaf_ref.is_required(snapshot);
    let Some(raw) = raw else {
        write_raw_value(writer, None)?;
        writeln!(writer)?;
        if !is_required {
            return Ok(Ok(()));
        }
        writeln!(writer, "  {REQUIRED}Required{REQUIRED:#}")?;
        return Ok(Err(ParseError::MissingRequired { key: leaf.key }));
    };

    let outcome = leaf.check(raw);
    match &outcome {
        Ok(value) => write_param_value(writer, value)?,
        Err(_) => write!(writer, "?")?,
    }
    writeln!(writer)?;
    write!(writer, "  Raw: ")?;
    write_raw_value(writer, Some(raw))?;
    writeln!(writer)?;
    if is_required {
        writeln!(writer, "  {REQUIRED}Required{REQUIRED:#}")?;
    }
    Ok(outcome.map(drop))
}

fn write_raw_value(writer: &mut impl io::Write, raw: Option<&str>) -> io::Result<()> {
    if let Some(raw) = raw {
        write!(writer, "{RAW}{raw:?}{RAW:#}")
    } else {
        write!(writer, "{UNSET}unset{UNSET:#}")
    }
}

fn write_error(writer: &mut impl io::Write, err: &ParseError) -> io::Result<()> {
    writeln!(writer, "  {ERROR_LABEL}Error:{ERROR_LABEL:#} {err}")
}
